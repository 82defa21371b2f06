//! Save records and the file they live in.
//!
//! A save is one JSON document:
//!
//! ```json
//! {
//!   "name": "placeholder",
//!   "stats": {"health": 100, "mana": 0, "attack": 10, "defense": 10},
//!   "inventory": ["Health Potion", "Old Broadsword"],
//!   "position": ["test_map", [2, 2]]
//! }
//! ```
//!
//! Items are stored by name and resolved against the catalog on load.
//! A missing, empty, or unreadable save is "no save", never an error.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use archon_protocol::{Codec, JsonCodec, Position, ProtocolError, Stats};
use serde::{Deserialize, Serialize};

use crate::item;
use crate::{GameError, PlayerState};

/// Default save file name, relative to the working directory.
pub const DEFAULT_SAVE_FILE: &str = "save_file.json";

// ---------------------------------------------------------------------------
// SaveRecord
// ---------------------------------------------------------------------------

/// The persisted form of a [`PlayerState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub name: String,
    pub stats: Stats,
    pub inventory: Vec<String>,
    pub position: Position,
}

impl SaveRecord {
    pub fn from_player(player: &PlayerState) -> Self {
        Self {
            name: player.name.clone(),
            stats: player.stats,
            inventory: player
                .inventory
                .iter()
                .map(|item| item.name.to_string())
                .collect(),
            position: player.position.clone(),
        }
    }

    /// Parses a save document.
    ///
    /// Returns `None` for blank or malformed input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            tracing::debug!("save is empty");
            return None;
        }
        match JsonCodec.decode(trimmed.as_bytes()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "save is malformed, ignoring it");
                None
            }
        }
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        let bytes = JsonCodec.encode(self)?;
        String::from_utf8(bytes).map_err(|e| ProtocolError::InvalidMessage(e.to_string()))
    }

    /// Rebuilds the player. Item names missing from the catalog are
    /// dropped.
    pub fn into_player(self) -> PlayerState {
        let inventory = self
            .inventory
            .iter()
            .filter_map(|name| {
                let found = item::lookup(name);
                if found.is_none() {
                    tracing::warn!(item = %name, "unknown item in save, dropping it");
                }
                found
            })
            .collect();

        PlayerState {
            name: self.name,
            stats: self.stats,
            inventory,
            position: self.position,
        }
    }
}

// ---------------------------------------------------------------------------
// SaveStore
// ---------------------------------------------------------------------------

/// The save file on disk.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the raw document. A missing file is `Ok(None)`.
    ///
    /// # Errors
    /// Any other I/O failure.
    pub async fn read(&self) -> Result<Option<String>, GameError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no save file");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Reads and parses the save. Every failure reads as "no save".
    pub async fn load(&self) -> Option<SaveRecord> {
        match self.read().await {
            Ok(raw) => raw.as_deref().and_then(SaveRecord::parse),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "save unreadable");
                None
            }
        }
    }

    /// Replaces the save file with `record`.
    pub async fn write(&self, record: &SaveRecord) -> Result<(), GameError> {
        let json = record.to_json()?;
        tokio::fs::write(&self.path, json).await?;
        tracing::info!(path = %self.path.display(), "game saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{HEALTH_POTION, OLD_BROADSWORD};
    use archon_protocol::Coords;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("archon-save-{tag}-{}.json", std::process::id()))
    }

    #[test]
    fn test_blank_and_malformed_are_no_save() {
        assert!(SaveRecord::parse("").is_none());
        assert!(SaveRecord::parse("   \n").is_none());
        assert!(SaveRecord::parse("{\"name\": ").is_none());
        assert!(SaveRecord::parse(r#"{"name": "x"}"#).is_none());
    }

    #[test]
    fn test_wire_layout() {
        let mut player = PlayerState::default();
        player.inventory.push(&HEALTH_POTION);
        let json: serde_json::Value =
            serde_json::from_str(&SaveRecord::from_player(&player).to_json().unwrap()).unwrap();

        assert_eq!(json["position"], serde_json::json!(["test_map", [2, 2]]));
        assert_eq!(json["inventory"], serde_json::json!(["Health Potion"]));
        assert_eq!(json["stats"]["defense"], 10);
    }

    #[test]
    fn test_unknown_items_are_dropped() {
        let record = SaveRecord {
            name: "hero".into(),
            stats: PlayerState::default().stats,
            inventory: vec!["Old Broadsword".into(), "Cursed Amulet".into()],
            position: Position::new("test_map", Coords::new(5, 5)),
        };
        let player = record.into_player();
        assert_eq!(player.inventory.len(), 1);
        assert!(std::ptr::eq(player.inventory[0], &OLD_BROADSWORD));
        assert_eq!(player.position.coords, Coords::new(5, 5));
    }

    #[tokio::test]
    async fn test_missing_file_is_no_save() {
        let store = SaveStore::new(temp_path("missing"));
        let _ = tokio::fs::remove_file(store.path()).await;
        assert!(store.read().await.unwrap().is_none());
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_write_then_load() {
        let store = SaveStore::new(temp_path("roundtrip"));
        let mut player = PlayerState::default();
        player.name = "Archon".into();
        player.inventory = vec![&HEALTH_POTION, &OLD_BROADSWORD];

        store.write(&SaveRecord::from_player(&player)).await.unwrap();
        let loaded = store.load().await.unwrap().into_player();
        assert_eq!(loaded, player);

        tokio::fs::remove_file(store.path()).await.unwrap();
    }
}
