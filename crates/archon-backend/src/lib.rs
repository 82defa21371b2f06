//! # Archon backend
//!
//! Reference implementations of the five services the Archon client talks
//! to, and the small framework that serves them.
//!
//! A service implements [`ServiceHandler`]: a typed request in, a typed
//! reply out. The framework handles everything around that:
//!
//! - [`ServiceServer`] binds a WebSocket address and answers each
//!   connection's requests one at a time.
//! - [`local_channel`] puts the same handler behind an in-process
//!   [`LocalChannel`](archon_transport::LocalChannel), for offline play
//!   and tests.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use archon_backend::{RandomService, ServiceServerBuilder};
//!
//! # async fn run() -> Result<(), archon_backend::BackendError> {
//! let server = ServiceServerBuilder::new()
//!     .bind("0.0.0.0:5555")
//!     .build(RandomService::new())
//!     .await?;
//! println!("listening on {}", server.url()?);
//! server.run().await
//! # }
//! ```
//!
//! | Service              | Default port | Kind                 |
//! |----------------------|--------------|----------------------|
//! | [`RandomService`]    | 5555         | d100 rolls           |
//! | [`MapService`]       | 5557         | movement / tiles     |
//! | [`EnemyService`]     | 5558         | enemy by biome       |
//! | [`BattleService`]    | 5559         | one combat turn      |
//! | [`WeatherService`]   | 5560         | weather label        |

mod error;
mod handler;
mod local;
mod server;
mod services;

pub use error::BackendError;
pub use handler::{ServiceHandler, respond};
pub use local::local_channel;
pub use server::{ServiceServer, ServiceServerBuilder};
pub use services::{
    BESTIARY, BattleService, DESERT, EnemyService, EnemyTemplate, FIELDS,
    MapService, RandomService, SCORCHED, Terrain, WeatherService, resolve_turn,
};
