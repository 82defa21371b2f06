//! The five service clients, built together.

use archon_protocol::ServiceKind;
use archon_transport::{Channel, WebSocketChannel};

use crate::{
    BattleClient, EnemyClient, MovementClient, RandomClient, ServiceConfig,
    WeatherClient,
};

/// One client per backend, each owning its own channel.
///
/// Channels are never shared between services: an outage or a stuck reply
/// on one cannot block another.
pub struct ServiceClients<C: Channel> {
    pub movement: MovementClient<C>,
    pub random: RandomClient<C>,
    pub enemy: EnemyClient<C>,
    pub battle: BattleClient<C>,
    pub weather: WeatherClient<C>,
}

impl<C: Channel> ServiceClients<C> {
    /// Builds every client from a channel factory called once per service.
    ///
    /// ```rust
    /// use archon_services::ServiceClients;
    /// use archon_transport::{Direction, LocalChannel, TransportError};
    ///
    /// // Every service "down": each call times out.
    /// let clients = ServiceClients::from_fn("archon", |kind| {
    ///     LocalChannel::new(kind.to_string(), |_: &[u8]| {
    ///         Err(TransportError::Timeout(Direction::Receive))
    ///     })
    /// });
    /// # drop(clients);
    /// ```
    pub fn from_fn<F>(service_key: &str, mut make: F) -> Self
    where
        F: FnMut(ServiceKind) -> C,
    {
        Self {
            movement: MovementClient::new(make(ServiceKind::Movement), service_key),
            random: RandomClient::new(make(ServiceKind::Random)),
            enemy: EnemyClient::new(make(ServiceKind::Enemy), service_key),
            battle: BattleClient::new(make(ServiceKind::Battle), service_key),
            weather: WeatherClient::new(make(ServiceKind::Weather), service_key),
        }
    }
}

impl ServiceClients<WebSocketChannel> {
    /// Builds WebSocket clients for the configured endpoints.
    ///
    /// Nothing connects here; each channel opens on its first request, so
    /// this succeeds even with every backend down.
    pub fn connect(config: &ServiceConfig) -> Self {
        let channel_config = config.channel_config();
        tracing::info!(
            service_key = %config.service_key,
            send_timeout_ms = config.send_timeout_ms,
            recv_timeout_ms = config.recv_timeout_ms,
            "building service clients"
        );
        Self::from_fn(&config.service_key, |kind| {
            WebSocketChannel::new(config.endpoints.get(kind), channel_config)
        })
    }
}
