//! Wire protocol for Archon.
//!
//! This crate defines what the game client and its backend services say to
//! each other:
//!
//! - **Types** ([`Stats`], [`EnemyState`], [`TileInfo`], [`Position`],
//!   [`Weather`], ...): the game values both sides share.
//! - **Wire records** ([`ServiceRequest`], [`MoveReply`], ...): the exact
//!   request and reply shape for each service.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): bytes in, records out.
//! - **Errors** ([`ProtocolError`]): what can go wrong turning one into
//!   the other.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw bytes) and the service
//! clients (fallback policy). It knows nothing about sockets or timeouts.
//!
//! ```text
//! Transport (bytes) → Protocol (typed records) → Services (fallbacks) → Game
//! ```

mod codec;
mod error;
mod types;
mod wire;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    Coords, EncounterChance, EnemyState, Position, Roll, ServiceKind, Stats,
    TileInfo, Weather,
};
pub use wire::{
    BattleSnapshot, EnemyRequest, ErrorReply, MoveReply, MoveRequest,
    MoveStatus, RandomRequest, ServiceRequest, TileData, WeatherReply,
    WeatherRequest,
};
