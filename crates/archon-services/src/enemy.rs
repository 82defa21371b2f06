//! Enemy lookup service client.

use archon_protocol::{EnemyRequest, EnemyState, ServiceKind, ServiceRequest};
use archon_transport::Channel;

use crate::Endpoint;

/// Client for the enemy service.
pub struct EnemyClient<C: Channel> {
    endpoint: Endpoint<C>,
    service_key: String,
}

impl<C: Channel> EnemyClient<C> {
    pub fn new(channel: C, service_key: impl Into<String>) -> Self {
        Self {
            endpoint: Endpoint::new(ServiceKind::Enemy, channel),
            service_key: service_key.into(),
        }
    }

    /// Fetches an enemy native to `biome`.
    ///
    /// On failure the caller's `previous` enemy comes back unchanged.
    pub async fn fetch(&mut self, biome: &str, previous: &EnemyState) -> EnemyState {
        let request = ServiceRequest::new(
            self.service_key.as_str(),
            EnemyRequest {
                biome: biome.to_string(),
            },
        );
        match self.endpoint.call::<_, EnemyState>(&request).await {
            Ok(enemy) => {
                tracing::debug!(name = %enemy.name, biome, "enemy fetched");
                enemy
            }
            Err(e) => {
                tracing::warn!(
                    service = %self.endpoint.kind(),
                    endpoint = self.endpoint.address(),
                    error = %e,
                    "enemy unavailable, keeping previous enemy"
                );
                previous.clone()
            }
        }
    }
}
