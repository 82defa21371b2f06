//! Backend service clients for Archon.
//!
//! Each backend (movement, random, enemy, battle, weather) gets one typed
//! client that owns one long-lived [`Channel`](archon_transport::Channel).
//! A client turns a domain request into a wire record, sends it, and
//! decodes the reply. When anything goes wrong it returns that service's
//! fallback instead of an error:
//!
//! | Client            | Fallback                                  |
//! |-------------------|-------------------------------------------|
//! | [`MovementClient`]| [`MoveOutcome::Unreachable`] fixed tile   |
//! | [`RandomClient`]  | [`Roll::NEUTRAL`](archon_protocol::Roll)  |
//! | [`EnemyClient`]   | the caller's previous enemy               |
//! | [`BattleClient`]  | the input pair (no-op turn)               |
//! | [`WeatherClient`] | the current weather                       |
//!
//! The game stays playable with any one backend offline.
//!
//! # How it fits in the stack
//!
//! ```text
//! Game (above)      ← folds fallback-safe replies into state
//!     ↕
//! Services (this crate)  ← typed requests, fallback policy
//!     ↕
//! Protocol + Transport (below)  ← records, codecs, channels
//! ```

mod battle;
mod clients;
mod config;
mod endpoint;
mod enemy;
mod error;
mod movement;
mod random;
mod weather;

pub use battle::BattleClient;
pub use clients::ServiceClients;
pub use config::{Endpoints, ServiceConfig};
pub use endpoint::Endpoint;
pub use enemy::EnemyClient;
pub use error::ServiceError;
pub use movement::{
    MoveOutcome, MovementClient, Rejection, UNREACHABLE_INSPECTION,
    UNREACHABLE_NARRATION, unreachable_tile,
};
pub use random::RandomClient;
pub use weather::WeatherClient;
