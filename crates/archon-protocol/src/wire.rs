//! Request and reply records for each backend service.
//!
//! Field names here are the contract with the backends and must not drift:
//!
//! | Service  | Request                                   | Reply                                       |
//! |----------|-------------------------------------------|---------------------------------------------|
//! | Movement | `{service_key, data:{map, coords:[x,y]}}` | `{status, data:{narration, inspection, ..}}`|
//! | Random   | `"roll"`                                  | integer 1–100                               |
//! | Enemy    | `{service_key, data:{biome}}`             | `{name, health, attack, defense, biome}`    |
//! | Battle   | `{service_key, data:[stats, enemy]}`      | `[stats, enemy]`                            |
//! | Weather  | `{service_key}`                           | `{weather_state}`                           |

use serde::{Deserialize, Serialize};

use crate::{Coords, EncounterChance, EnemyState, ProtocolError, Stats, TileInfo, Weather};

/// Envelope for every keyed request: who is calling, plus the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest<T> {
    /// Identifies the calling application to a shared backend.
    pub service_key: String,
    pub data: T,
}

impl<T> ServiceRequest<T> {
    pub fn new(service_key: impl Into<String>, data: T) -> Self {
        Self {
            service_key: service_key.into(),
            data,
        }
    }
}

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

/// Body of a movement request: "I am on `map`, put me at `coords`".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub map: String,
    pub coords: Coords,
}

/// Outcome tag of a movement reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveStatus {
    /// The move is legal; `data` is the destination tile.
    Success,
    /// The map name in the request does not match the service's map.
    Error,
    /// The destination is off the map.
    OutOfBounds,
}

/// Tile fields as sent by the movement service.
///
/// `biome` and `encounter` are required on success and optional on the
/// two rejection statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileData {
    pub narration: String,
    pub inspection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encounter: Option<EncounterChance>,
}

/// A movement reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReply {
    pub status: MoveStatus,
    pub data: TileData,
}

impl MoveReply {
    /// Builds the tile for a `success` reply.
    ///
    /// # Errors
    /// `InvalidMessage` if the status is not `success` or the biome or
    /// encounter chance is missing.
    pub fn into_tile(self) -> Result<TileInfo, ProtocolError> {
        if self.status != MoveStatus::Success {
            return Err(ProtocolError::InvalidMessage(format!(
                "{:?} reply has no destination tile",
                self.status
            )));
        }
        let TileData {
            narration,
            inspection,
            biome,
            encounter,
        } = self.data;
        match (biome, encounter) {
            (Some(biome), Some(encounter)) => Ok(TileInfo {
                narration,
                inspection,
                biome,
                encounter,
            }),
            _ => Err(ProtocolError::InvalidMessage(
                "success reply without biome or encounter".into(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Random
// ---------------------------------------------------------------------------

/// The random service's only request. Serializes as the string `"roll"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomRequest {
    Roll,
}

// ---------------------------------------------------------------------------
// Enemy
// ---------------------------------------------------------------------------

/// Body of an enemy request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyRequest {
    pub biome: String,
}

// ---------------------------------------------------------------------------
// Battle
// ---------------------------------------------------------------------------

/// One combat turn's input or output. A tuple, so it is a two-element
/// JSON array: `[stats, enemy]`.
pub type BattleSnapshot = (Stats, EnemyState);

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// The weather request carries no body, only the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRequest {
    pub service_key: String,
}

/// A weather reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReply {
    pub weather_state: Weather,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// What a backend sends when it cannot parse a request. It matches none of
/// the reply shapes above, so the caller's decode fails and its fallback
/// applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_move_request_json_format() {
        let req = ServiceRequest::new(
            "archon",
            MoveRequest {
                map: "test_map".into(),
                coords: Coords::new(2, 3),
            },
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            json!({"service_key": "archon", "data": {"map": "test_map", "coords": [2, 3]}})
        );
    }

    #[test]
    fn test_success_reply_becomes_tile() {
        let reply: MoveReply = serde_json::from_value(json!({
            "status": "success",
            "data": {"narration": "n", "inspection": "i", "biome": "fields", "encounter": 15}
        }))
        .unwrap();

        let tile = reply.into_tile().unwrap();
        assert_eq!(tile.biome, "fields");
        assert_eq!(tile.encounter.value(), 15);
    }

    #[test]
    fn test_out_of_bounds_reply_decodes_without_biome() {
        let reply: MoveReply = serde_json::from_value(json!({
            "status": "out_of_bounds",
            "data": {"narration": "sea", "inspection": "salt"}
        }))
        .unwrap();

        assert_eq!(reply.status, MoveStatus::OutOfBounds);
        assert!(reply.data.biome.is_none());
        assert!(reply.into_tile().is_err());
    }

    #[test]
    fn test_success_reply_missing_encounter_is_invalid() {
        let reply: MoveReply = serde_json::from_value(json!({
            "status": "success",
            "data": {"narration": "n", "inspection": "i", "biome": "fields"}
        }))
        .unwrap();

        assert!(matches!(
            reply.into_tile(),
            Err(ProtocolError::InvalidMessage(_))
        ));
    }

    #[test]
    fn test_unknown_move_status_fails_decode() {
        let result = serde_json::from_value::<MoveReply>(json!({
            "status": "teleported",
            "data": {"narration": "n", "inspection": "i"}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_random_request_is_plain_string() {
        assert_eq!(serde_json::to_value(RandomRequest::Roll).unwrap(), json!("roll"));
    }

    #[test]
    fn test_battle_request_data_is_array() {
        let req = ServiceRequest::new(
            "archon",
            (
                Stats {
                    health: 100,
                    mana: 0,
                    attack: 10,
                    defense: 10,
                },
                EnemyState {
                    name: "Wolf".into(),
                    health: 12,
                    attack: 4,
                    defense: 3,
                    biome: "fields".into(),
                },
            ),
        );
        let json = serde_json::to_value(&req).unwrap();
        assert!(json["data"].is_array());
        assert_eq!(json["data"][1]["name"], "Wolf");
        assert_eq!(json["data"][0]["health"], 100);
    }

    #[test]
    fn test_weather_request_has_only_key() {
        let req = WeatherRequest {
            service_key: "archon".into(),
        };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({"service_key": "archon"}));
    }

    #[test]
    fn test_error_reply_does_not_decode_as_enemy() {
        let bytes = serde_json::to_vec(&ErrorReply {
            error: "bad request".into(),
        })
        .unwrap();
        assert!(serde_json::from_slice::<EnemyState>(&bytes).is_err());
    }
}
