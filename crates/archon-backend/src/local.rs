//! Running a service inside the caller's process.

use archon_protocol::JsonCodec;
use archon_transport::{LocalChannel, TransportError};

use crate::ServiceHandler;
use crate::handler::respond;

/// Wraps `handler` in a [`LocalChannel`] named `local:<service>`.
///
/// Requests never touch a socket; the handler answers them in place, with
/// the same decoding and error replies as over WebSocket.
pub fn local_channel<H: ServiceHandler>(mut handler: H) -> LocalChannel {
    LocalChannel::new(format!("local:{}", H::KIND), move |request: &[u8]| {
        respond(&mut handler, &JsonCodec, request)
            .map_err(|e| TransportError::Channel(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BattleService, MapService};
    use archon_protocol::{EnemyState, Stats};
    use archon_transport::Channel;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_local_channel_answers_like_the_service() {
        let mut channel = local_channel(MapService::test_map());
        assert_eq!(channel.endpoint(), "local:movement");

        let request = json!({"service_key": "k", "data": {"map": "test_map", "coords": [1, 1]}});
        let reply = channel
            .request(&serde_json::to_vec(&request).unwrap())
            .await
            .unwrap();
        let reply: Value = serde_json::from_slice(&reply).unwrap();
        assert_eq!(reply["status"], "success");
        assert_eq!(reply["data"]["biome"], "desert");
    }

    #[tokio::test]
    async fn test_garbage_gets_error_reply() {
        let mut channel = local_channel(BattleService);
        let reply = channel.request(b"not json").await.unwrap();
        let reply: Value = serde_json::from_slice(&reply).unwrap();
        assert!(reply["error"].as_str().unwrap().contains("battle"));
    }

    #[tokio::test]
    async fn test_battle_over_local_channel() {
        let mut channel = local_channel(BattleService);
        let stats = Stats {
            health: 100,
            mana: 0,
            attack: 10,
            defense: 10,
        };
        let enemy = EnemyState {
            name: "Goblin".into(),
            health: 10,
            attack: 3,
            defense: 5,
            biome: "fields".into(),
        };
        let request = json!({"service_key": "k", "data": [stats, enemy]});
        let reply = channel
            .request(&serde_json::to_vec(&request).unwrap())
            .await
            .unwrap();

        let (stats, enemy): (Stats, EnemyState) = serde_json::from_slice(&reply).unwrap();
        assert_eq!(enemy.health, 5);
        assert_eq!(stats.health, 99);
    }
}
