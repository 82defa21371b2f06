//! Weather service client.

use archon_protocol::{ServiceKind, Weather, WeatherReply, WeatherRequest};
use archon_transport::Channel;

use crate::Endpoint;

/// Client for the weather service.
pub struct WeatherClient<C: Channel> {
    endpoint: Endpoint<C>,
    service_key: String,
}

impl<C: Channel> WeatherClient<C> {
    pub fn new(channel: C, service_key: impl Into<String>) -> Self {
        Self {
            endpoint: Endpoint::new(ServiceKind::Weather, channel),
            service_key: service_key.into(),
        }
    }

    /// Asks for the current weather. `current` is kept on any failure.
    pub async fn refresh(&mut self, current: Weather) -> Weather {
        let request = WeatherRequest {
            service_key: self.service_key.clone(),
        };
        match self.endpoint.call::<_, WeatherReply>(&request).await {
            Ok(reply) => {
                tracing::debug!(weather = %reply.weather_state, "weather refreshed");
                reply.weather_state
            }
            Err(e) => {
                tracing::warn!(
                    service = %self.endpoint.kind(),
                    endpoint = self.endpoint.address(),
                    error = %e,
                    %current,
                    "weather unavailable, keeping current"
                );
                current
            }
        }
    }
}
