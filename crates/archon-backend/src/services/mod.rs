//! The five reference services.

mod battle;
mod enemy;
mod map;
mod random;
mod weather;

pub use battle::{BattleService, resolve_turn};
pub use enemy::{BESTIARY, EnemyService, EnemyTemplate};
pub use map::{DESERT, FIELDS, MapService, SCORCHED, Terrain};
pub use random::RandomService;
pub use weather::WeatherService;
