//! Game session orchestration for Archon.
//!
//! [`GameSession`] owns the player, the current tile, the enemy, and the
//! weather, and is the only thing that changes them. It drives the five
//! service clients from `archon-services` and never sees a transport
//! error: every client answers with its fallback instead.
//!
//! ## Phases
//!
//! | Phase                     | Allowed                                     |
//! |---------------------------|---------------------------------------------|
//! | [`GamePhase::Exploring`]  | move, encounter check, items, save          |
//! | [`GamePhase::InBattle`]   | attack, flee                                |
//! | [`GamePhase::GameOver`]   | load, reset                                 |
//!
//! Anything else returns [`GameError::InvalidPhase`] and changes nothing.
//!
//! ## Example
//!
//! ```rust,no_run
//! use archon_game::{Direction, GameSession};
//! use archon_services::{ServiceClients, ServiceConfig};
//!
//! # async fn run() -> Result<(), archon_game::GameError> {
//! let clients = ServiceClients::connect(&ServiceConfig::default());
//! let mut session = GameSession::new(clients);
//!
//! session.move_player(Direction::North).await?;
//! if session.encounter_check().await? {
//!     session.attack().await?;
//! }
//! println!("{}", session.narration());
//! # Ok(())
//! # }
//! ```

mod direction;
mod error;
pub mod item;
mod phase;
mod player;
mod save;
mod session;

pub use direction::Direction;
pub use error::GameError;
pub use item::{Effect, Item, Stat};
pub use phase::GamePhase;
pub use player::{PlayerState, START_COORDS, START_MAP};
pub use save::{DEFAULT_SAVE_FILE, SaveRecord, SaveStore};
pub use session::{
    BattleOutcome, FLEE_THRESHOLD, FleeOutcome, GameSession, WEATHER_INTERVAL,
};
