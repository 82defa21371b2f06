//! Service addresses, timeouts, and the caller's service key.

use std::time::Duration;

use archon_protocol::{Codec, JsonCodec, ProtocolError, ServiceKind};
use archon_transport::ChannelConfig;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// One address per backend service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub movement: String,
    pub random: String,
    pub enemy: String,
    pub battle: String,
    pub weather: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            random: "ws://127.0.0.1:5555".to_string(),
            movement: "ws://127.0.0.1:5557".to_string(),
            enemy: "ws://127.0.0.1:5558".to_string(),
            battle: "ws://127.0.0.1:5559".to_string(),
            weather: "ws://127.0.0.1:5560".to_string(),
        }
    }
}

impl Endpoints {
    /// Returns the address configured for `kind`.
    pub fn get(&self, kind: ServiceKind) -> &str {
        match kind {
            ServiceKind::Movement => &self.movement,
            ServiceKind::Random => &self.random,
            ServiceKind::Enemy => &self.enemy,
            ServiceKind::Battle => &self.battle,
            ServiceKind::Weather => &self.weather,
        }
    }

    /// Replaces the address configured for `kind`.
    pub fn set(&mut self, kind: ServiceKind, addr: impl Into<String>) {
        let slot = match kind {
            ServiceKind::Movement => &mut self.movement,
            ServiceKind::Random => &mut self.random,
            ServiceKind::Enemy => &mut self.enemy,
            ServiceKind::Battle => &mut self.battle,
            ServiceKind::Weather => &mut self.weather,
        };
        *slot = addr.into();
    }
}

// ---------------------------------------------------------------------------
// ServiceConfig
// ---------------------------------------------------------------------------

/// Everything needed to build the five service clients.
///
/// Every field has a default, so a JSON file only needs to name what it
/// changes:
///
/// ```rust
/// use archon_services::ServiceConfig;
///
/// let config = ServiceConfig::from_json(r#"{"recv_timeout_ms": 2500}"#).unwrap();
/// assert_eq!(config.recv_timeout_ms, 2500);
/// assert_eq!(config.send_timeout_ms, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Sent with every keyed request so shared backends know the caller.
    pub service_key: String,

    /// Connect + write bound for every channel, in milliseconds.
    pub send_timeout_ms: u64,

    /// Reply bound for every channel, in milliseconds.
    pub recv_timeout_ms: u64,

    pub endpoints: Endpoints,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_key: "archon".to_string(),
            send_timeout_ms: 1000,
            recv_timeout_ms: 1000,
            endpoints: Endpoints::default(),
        }
    }
}

impl ServiceConfig {
    /// Parses a (possibly partial) JSON config document.
    ///
    /// # Errors
    /// `ProtocolError::Decode` if the document is not valid JSON or a
    /// field has the wrong type.
    pub fn from_json(raw: &str) -> Result<Self, ProtocolError> {
        JsonCodec.decode(raw.as_bytes())
    }

    /// The timeouts every channel is built with.
    pub fn channel_config(&self) -> ChannelConfig {
        ChannelConfig {
            send_timeout: Duration::from_millis(self.send_timeout_ms),
            recv_timeout: Duration::from_millis(self.recv_timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.service_key, "archon");
        assert_eq!(config.channel_config(), ChannelConfig::default());
        assert_eq!(config.endpoints.get(ServiceKind::Movement), "ws://127.0.0.1:5557");
        assert_eq!(config.endpoints.get(ServiceKind::Enemy), "ws://127.0.0.1:5558");
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = ServiceConfig::from_json(
            r#"{"service_key": "tester", "endpoints": {"weather": "ws://10.0.0.2:9000"}}"#,
        )
        .unwrap();

        assert_eq!(config.service_key, "tester");
        assert_eq!(config.endpoints.weather, "ws://10.0.0.2:9000");
        assert_eq!(config.endpoints.random, "ws://127.0.0.1:5555");
        assert_eq!(config.recv_timeout_ms, 1000);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(ServiceConfig::from_json("{not json").is_err());
        assert!(ServiceConfig::from_json(r#"{"send_timeout_ms": "soon"}"#).is_err());
    }

    #[test]
    fn test_endpoints_set_then_get() {
        let mut endpoints = Endpoints::default();
        endpoints.set(ServiceKind::Battle, "ws://127.0.0.1:1");
        assert_eq!(endpoints.get(ServiceKind::Battle), "ws://127.0.0.1:1");
    }

    #[test]
    fn test_channel_config_uses_millis() {
        let config = ServiceConfig {
            send_timeout_ms: 250,
            recv_timeout_ms: 4000,
            ..ServiceConfig::default()
        };
        let channel = config.channel_config();
        assert_eq!(channel.send_timeout, Duration::from_millis(250));
        assert_eq!(channel.recv_timeout, Duration::from_secs(4));
    }
}
