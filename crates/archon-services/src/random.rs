//! Random-number service client.

use archon_protocol::{RandomRequest, Roll, ServiceKind};
use archon_transport::Channel;

use crate::Endpoint;

/// Client for the d100 random service.
pub struct RandomClient<C: Channel> {
    endpoint: Endpoint<C>,
}

impl<C: Channel> RandomClient<C> {
    pub fn new(channel: C) -> Self {
        Self {
            endpoint: Endpoint::new(ServiceKind::Random, channel),
        }
    }

    /// Draws one roll in 1..=100.
    ///
    /// Falls back to [`Roll::NEUTRAL`] (50) when the service is down or
    /// replies out of range. That value is a fixed default, not a random
    /// one, and it biases every check made while the service is away.
    pub async fn roll(&mut self) -> Roll {
        match self.endpoint.call::<_, Roll>(&RandomRequest::Roll).await {
            Ok(roll) => {
                tracing::debug!(roll = roll.value(), "rolled");
                roll
            }
            Err(e) => {
                tracing::warn!(
                    service = %self.endpoint.kind(),
                    endpoint = self.endpoint.address(),
                    error = %e,
                    fallback = Roll::NEUTRAL.value(),
                    "random unavailable, using neutral roll"
                );
                Roll::NEUTRAL
            }
        }
    }
}
