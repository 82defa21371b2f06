//! The session's phase machine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which actions a session currently accepts.
///
/// ```text
/// Exploring ⇄ InBattle → GameOver
///     ↑                      │
///     └──── load / reset ────┘
/// ```
///
/// - **Exploring**: movement, inventory, inspection, stats.
/// - **InBattle**: attack and flee only.
/// - **GameOver**: nothing but loading a save or starting over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Exploring,
    InBattle,
    GameOver,
}

impl GamePhase {
    pub fn is_exploring(self) -> bool {
        matches!(self, Self::Exploring)
    }

    pub fn in_battle(self) -> bool {
        matches!(self, Self::InBattle)
    }

    /// Returns `true` once the player has been defeated.
    pub fn is_over(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exploring => write!(f, "Exploring"),
            Self::InBattle => write!(f, "InBattle"),
            Self::GameOver => write!(f, "GameOver"),
        }
    }
}
