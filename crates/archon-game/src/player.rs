//! The player record.

use archon_protocol::{Coords, Position, Stats};

use crate::item::Item;

/// The map every new game starts on.
pub const START_MAP: &str = "test_map";

/// Where every new game starts.
pub const START_COORDS: Coords = Coords::new(2, 2);

/// Everything persisted about the player.
///
/// Inventory holds catalog references in pickup order; duplicates are
/// allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub name: String,
    pub stats: Stats,
    pub inventory: Vec<&'static Item>,
    pub position: Position,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            name: "placeholder".to_string(),
            stats: Stats {
                health: 100,
                mana: 0,
                attack: 10,
                defense: 10,
            },
            inventory: Vec::new(),
            position: Position::new(START_MAP, START_COORDS),
        }
    }
}

impl PlayerState {
    /// Item names in inventory order.
    pub fn inventory_names(&self) -> Vec<&'static str> {
        self.inventory.iter().map(|item| item.name).collect()
    }

    /// Index of the first held item called `name`.
    pub(crate) fn find_item(&self, name: &str) -> Option<usize> {
        self.inventory.iter().position(|item| item.name == name)
    }

    pub fn is_alive(&self) -> bool {
        self.stats.health > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{HEALTH_POTION, OLD_BROADSWORD};

    #[test]
    fn test_default_player() {
        let player = PlayerState::default();
        assert_eq!(player.name, "placeholder");
        assert_eq!(player.stats.health, 100);
        assert_eq!(player.stats.attack, 10);
        assert!(player.inventory.is_empty());
        assert_eq!(player.position, Position::new("test_map", Coords::new(2, 2)));
    }

    #[test]
    fn test_find_item_returns_first_duplicate() {
        let mut player = PlayerState::default();
        player.inventory = vec![&OLD_BROADSWORD, &HEALTH_POTION, &HEALTH_POTION];
        assert_eq!(player.find_item("Health Potion"), Some(1));
        assert_eq!(player.find_item("Shield"), None);
        assert_eq!(
            player.inventory_names(),
            vec!["Old Broadsword", "Health Potion", "Health Potion"]
        );
    }
}
