//! Error types for the game layer.

use archon_protocol::ProtocolError;

use crate::GamePhase;

/// Errors a session action can return.
///
/// Service outages never show up here; the clients turn those into
/// fallbacks. These are player mistakes and local I/O.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The action is not allowed in the current phase. Nothing changed.
    #[error("cannot {action} while {phase}")]
    InvalidPhase {
        action: &'static str,
        phase: GamePhase,
    },

    /// Flee was already tried and failed this turn.
    #[error("flee already failed this turn; attack first")]
    FleeBlocked,

    /// The inventory holds no item with this name.
    #[error("no {0} in inventory")]
    ItemNotHeld(String),

    /// The item exists but cannot be used up.
    #[error("{0} cannot be used")]
    NotConsumable(String),

    /// The save could not be encoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Reading or writing the save file failed.
    #[error("save file: {0}")]
    Persistence(#[from] std::io::Error),
}
