//! Items as plain data: a name, some text, and lists of stat effects.
//!
//! Effects are a closed set interpreted by [`apply_effects`], so an item
//! is a `'static` value that can be shared, compared, and looked up by
//! name without carrying any code.

use archon_protocol::Stats;

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// A player stat an effect can touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Health,
    Mana,
    Attack,
    Defense,
}

impl Stat {
    fn slot(self, stats: &mut Stats) -> &mut i32 {
        match self {
            Self::Health => &mut stats.health,
            Self::Mana => &mut stats.mana,
            Self::Attack => &mut stats.attack,
            Self::Defense => &mut stats.defense,
        }
    }
}

/// One change an item makes to the holder's stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Adds `amount` (possibly negative) to `stat`. No clamping at zero;
    /// saturates at the `i32` range.
    StatDelta { stat: Stat, amount: i32 },
}

impl Effect {
    pub fn apply(self, stats: &mut Stats) {
        match self {
            Self::StatDelta { stat, amount } => {
                let slot = stat.slot(stats);
                *slot = slot.saturating_add(amount);
            }
        }
    }
}

/// Applies every effect in order.
pub fn apply_effects(effects: &[Effect], stats: &mut Stats) {
    for effect in effects {
        effect.apply(stats);
    }
}

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// An entry in the item catalog.
#[derive(Debug, PartialEq, Eq)]
pub struct Item {
    pub name: &'static str,
    pub description: &'static str,
    /// One-line summary of what the item does, for the inventory view.
    pub effect_text: &'static str,
    /// Consumables can be used, which spends them.
    pub consumable: bool,
    pub on_equip: &'static [Effect],
    pub on_apply: &'static [Effect],
    pub on_remove: &'static [Effect],
}

pub static HEALTH_POTION: Item = Item {
    name: "Health Potion",
    description: "A vial of red liquid that smells of yarrow flowers",
    effect_text: "Restores 10 HP",
    consumable: true,
    on_equip: &[],
    on_apply: &[Effect::StatDelta {
        stat: Stat::Health,
        amount: 10,
    }],
    on_remove: &[],
};

pub static OLD_BROADSWORD: Item = Item {
    name: "Old Broadsword",
    description: "A sword with a sturdy hilt and wide blade. It is covered in rust.",
    effect_text: "Adds +5 Attack Value",
    consumable: false,
    on_equip: &[Effect::StatDelta {
        stat: Stat::Attack,
        amount: 5,
    }],
    on_apply: &[],
    on_remove: &[Effect::StatDelta {
        stat: Stat::Attack,
        amount: -5,
    }],
};

/// Every item that exists. Saves are resolved against this list only.
pub static CATALOG: [&Item; 2] = [&HEALTH_POTION, &OLD_BROADSWORD];

/// Finds a catalog item by its exact name.
pub fn lookup(name: &str) -> Option<&'static Item> {
    CATALOG.iter().copied().find(|item| item.name == name)
}
