//! Battle resolution service client.

use archon_protocol::{BattleSnapshot, EnemyState, ServiceKind, ServiceRequest, Stats};
use archon_transport::Channel;

use crate::Endpoint;

/// Client for the battle service.
pub struct BattleClient<C: Channel> {
    endpoint: Endpoint<C>,
    service_key: String,
}

impl<C: Channel> BattleClient<C> {
    pub fn new(channel: C, service_key: impl Into<String>) -> Self {
        Self {
            endpoint: Endpoint::new(ServiceKind::Battle, channel),
            service_key: service_key.into(),
        }
    }

    /// Resolves one combat turn from the given snapshots.
    ///
    /// Returns the updated pair. On failure the input pair comes back
    /// unchanged, i.e. the turn did nothing.
    pub async fn resolve(&mut self, player: &Stats, enemy: &EnemyState) -> BattleSnapshot {
        let request = ServiceRequest::new(self.service_key.as_str(), (*player, enemy.clone()));
        match self.endpoint.call::<_, BattleSnapshot>(&request).await {
            Ok((stats, foe)) => {
                tracing::debug!(
                    player_health = stats.health,
                    enemy_health = foe.health,
                    "turn resolved"
                );
                (stats, foe)
            }
            Err(e) => {
                tracing::warn!(
                    service = %self.endpoint.kind(),
                    endpoint = self.endpoint.address(),
                    error = %e,
                    "battle unavailable, turn has no effect"
                );
                request.data
            }
        }
    }
}
