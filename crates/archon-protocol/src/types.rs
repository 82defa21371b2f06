//! Shared game values that travel on the wire.
//!
//! These are the nouns every layer agrees on: where the player stands,
//! what a tile looks like, what an enemy is. The service records in
//! [`wire`](crate::wire) are built out of them, and the game crate stores
//! them directly as authoritative state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// ServiceKind
// ---------------------------------------------------------------------------

/// The five backend services a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Movement,
    Random,
    Enemy,
    Battle,
    Weather,
}

impl ServiceKind {
    /// Every service, in the order clients are built.
    pub const ALL: [ServiceKind; 5] = [
        Self::Movement,
        Self::Random,
        Self::Enemy,
        Self::Battle,
        Self::Weather,
    ];
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movement => write!(f, "movement"),
            Self::Random => write!(f, "random"),
            Self::Enemy => write!(f, "enemy"),
            Self::Battle => write!(f, "battle"),
            Self::Weather => write!(f, "weather"),
        }
    }
}

// ---------------------------------------------------------------------------
// Coords / Position
// ---------------------------------------------------------------------------

/// An integer grid coordinate. On the wire it is a two-element array
/// `[x, y]`, not an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Coords {
    pub x: i32,
    pub y: i32,
}

impl Coords {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the coordinate shifted by `(dx, dy)`, saturating at the
    /// edges of `i32`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl From<(i32, i32)> for Coords {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Coords> for (i32, i32) {
    fn from(c: Coords) -> Self {
        (c.x, c.y)
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A map identifier plus a coordinate on that map.
///
/// Persisted as `[map_id, [x, y]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, Coords)", into = "(String, Coords)")]
pub struct Position {
    pub map: String,
    pub coords: Coords,
}

impl Position {
    pub fn new(map: impl Into<String>, coords: Coords) -> Self {
        Self {
            map: map.into(),
            coords,
        }
    }
}

impl From<(String, Coords)> for Position {
    fn from((map, coords): (String, Coords)) -> Self {
        Self { map, coords }
    }
}

impl From<Position> for (String, Coords) {
    fn from(p: Position) -> Self {
        (p.map, p.coords)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.map, self.coords)
    }
}

// ---------------------------------------------------------------------------
// Stats / EnemyState
// ---------------------------------------------------------------------------

/// The player's numeric stats.
///
/// Health and mana are signed and never clamped: a battle reply that
/// overshoots leaves health negative, and that is what the player sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub health: i32,
    pub mana: i32,
    pub attack: i32,
    pub defense: i32,
}

/// The enemy currently in (or last in) combat.
///
/// Health at or below zero means "no live enemy": the next battle fetches
/// a fresh one. [`EnemyState::default`] is that zero-health sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnemyState {
    pub name: String,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    pub biome: String,
}

impl EnemyState {
    /// Returns `true` once health has reached zero or below.
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

// ---------------------------------------------------------------------------
// Ranged integers
// ---------------------------------------------------------------------------

/// Percentage chance (0–100) that stepping onto a tile starts a fight.
///
/// Deserialization rejects anything above 100, so a malformed movement
/// reply fails at decode time instead of reaching game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct EncounterChance(u8);

impl EncounterChance {
    /// No chance of a fight. Used for every error and fallback tile.
    pub const NONE: Self = Self(0);

    pub fn new(percent: u32) -> Option<Self> {
        u8::try_from(percent)
            .ok()
            .filter(|p| *p <= 100)
            .map(Self)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for EncounterChance {
    type Error = ProtocolError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            ProtocolError::InvalidMessage(format!(
                "encounter chance {value} outside 0..=100"
            ))
        })
    }
}

impl From<EncounterChance> for u32 {
    fn from(c: EncounterChance) -> Self {
        u32::from(c.0)
    }
}

/// A d100 roll from the random service, always in 1..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Roll(u8);

impl Roll {
    /// The value used when the random service cannot be reached.
    ///
    /// This is not random. Every encounter check against a tile with a
    /// chance below 50 misses and every flee succeeds while the service is
    /// down. Kept for compatibility with existing play behaviour.
    pub const NEUTRAL: Self = Self(50);

    pub fn new(value: u32) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| (1..=100).contains(v))
            .map(Self)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for Roll {
    type Error = ProtocolError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            ProtocolError::InvalidMessage(format!("roll {value} outside 1..=100"))
        })
    }
}

impl From<Roll> for u32 {
    fn from(r: Roll) -> Self {
        u32::from(r.0)
    }
}

// ---------------------------------------------------------------------------
// TileInfo
// ---------------------------------------------------------------------------

/// What the player knows about the tile they are standing on.
///
/// Always replaced as a whole: either the last good movement reply, a
/// rejection payload, or the fallback shown when the map is unreachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileInfo {
    pub narration: String,
    pub inspection: String,
    pub biome: String,
    pub encounter: EncounterChance,
}

impl TileInfo {
    /// A tile that can never start a fight, for errors and fallbacks.
    pub fn inert(narration: impl Into<String>, inspection: impl Into<String>) -> Self {
        Self {
            narration: narration.into(),
            inspection: inspection.into(),
            biome: String::new(),
            encounter: EncounterChance::NONE,
        }
    }
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// The current weather label. Lowercase on the wire: `"rain"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    #[default]
    Clear,
    Cloudy,
    Rain,
    Storm,
    Fog,
    Snow,
}

impl Weather {
    pub const ALL: [Weather; 6] = [
        Self::Clear,
        Self::Cloudy,
        Self::Rain,
        Self::Storm,
        Self::Fog,
        Self::Snow,
    ];
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::Storm => "storm",
            Self::Fog => "fog",
            Self::Snow => "snow",
        };
        f.write_str(label)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The persisted and wire layouts are fixed by existing backends and
    //! save files, so the JSON shapes are asserted directly.

    use super::*;
    use serde_json::json;

    #[test]
    fn test_coords_serialize_as_pair() {
        let json = serde_json::to_value(Coords::new(3, -1)).unwrap();
        assert_eq!(json, json!([3, -1]));
    }

    #[test]
    fn test_position_serializes_as_map_then_pair() {
        let pos = Position::new("test_map", Coords::new(2, 5));
        let json = serde_json::to_value(&pos).unwrap();
        assert_eq!(json, json!(["test_map", [2, 5]]));

        let back: Position = serde_json::from_value(json).unwrap();
        assert_eq!(back, pos);
    }

    #[test]
    fn test_coords_offset() {
        assert_eq!(Coords::new(1, 1).offset(0, -1), Coords::new(1, 0));
        assert_eq!(Coords::new(1, 1).offset(1, 0), Coords::new(2, 1));
        assert_eq!(
            Coords::new(i32::MAX, i32::MIN).offset(1, -1),
            Coords::new(i32::MAX, i32::MIN)
        );
    }

    #[test]
    fn test_stats_field_names() {
        let stats = Stats {
            health: 100,
            mana: 0,
            attack: 10,
            defense: 10,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(
            json,
            json!({"health": 100, "mana": 0, "attack": 10, "defense": 10})
        );
    }

    #[test]
    fn test_enemy_default_is_defeated_sentinel() {
        let enemy = EnemyState::default();
        assert_eq!(enemy.health, 0);
        assert!(enemy.is_defeated());
    }

    #[test]
    fn test_enemy_negative_health_is_defeated() {
        let enemy = EnemyState {
            health: -3,
            ..EnemyState::default()
        };
        assert!(enemy.is_defeated());
    }

    #[test]
    fn test_roll_range_edges() {
        assert!(Roll::new(0).is_none());
        assert_eq!(Roll::new(1).map(Roll::value), Some(1));
        assert_eq!(Roll::new(100).map(Roll::value), Some(100));
        assert!(Roll::new(101).is_none());
        assert!(Roll::new(u32::MAX).is_none());
    }

    #[test]
    fn test_roll_decode_rejects_out_of_range() {
        assert!(serde_json::from_str::<Roll>("0").is_err());
        assert!(serde_json::from_str::<Roll>("101").is_err());
        assert!(serde_json::from_str::<Roll>("-4").is_err());
        assert_eq!(serde_json::from_str::<Roll>("42").unwrap().value(), 42);
    }

    #[test]
    fn test_roll_neutral_is_fifty() {
        assert_eq!(Roll::NEUTRAL.value(), 50);
    }

    #[test]
    fn test_encounter_chance_accepts_zero_and_hundred() {
        assert_eq!(EncounterChance::new(0), Some(EncounterChance::NONE));
        assert_eq!(EncounterChance::new(100).map(EncounterChance::value), Some(100));
        assert!(EncounterChance::new(101).is_none());
        assert!(serde_json::from_str::<EncounterChance>("250").is_err());
    }

    #[test]
    fn test_weather_lowercase_on_wire() {
        assert_eq!(serde_json::to_string(&Weather::Storm).unwrap(), "\"storm\"");
        let w: Weather = serde_json::from_str("\"fog\"").unwrap();
        assert_eq!(w, Weather::Fog);
        assert!(serde_json::from_str::<Weather>("\"hail\"").is_err());
    }

    #[test]
    fn test_weather_default_and_display() {
        assert_eq!(Weather::default(), Weather::Clear);
        assert_eq!(Weather::Rain.to_string(), "rain");
    }

    #[test]
    fn test_service_kind_display() {
        assert_eq!(ServiceKind::Movement.to_string(), "movement");
        assert_eq!(ServiceKind::ALL.len(), 5);
    }

    #[test]
    fn test_inert_tile_never_triggers() {
        let tile = TileInfo::inert("a", "b");
        assert_eq!(tile.encounter, EncounterChance::NONE);
        assert!(tile.biome.is_empty());
    }
}
