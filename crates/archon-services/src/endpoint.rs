//! One typed request/reply exchange over a [`Channel`].

use archon_protocol::{Codec, JsonCodec, ServiceKind};
use archon_transport::Channel;
use serde::{Serialize, de::DeserializeOwned};

use crate::ServiceError;

/// A channel plus the codec used on it, tagged with the service it reaches.
///
/// Every client holds exactly one of these for the whole session.
pub struct Endpoint<C: Channel> {
    kind: ServiceKind,
    channel: C,
    codec: JsonCodec,
}

impl<C: Channel> Endpoint<C> {
    pub fn new(kind: ServiceKind, channel: C) -> Self {
        Self {
            kind,
            channel,
            codec: JsonCodec,
        }
    }

    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// The channel's address, for logs.
    pub fn address(&self) -> &str {
        self.channel.endpoint()
    }

    /// Encodes `request`, sends it, and decodes the reply as `Rep`.
    ///
    /// # Errors
    /// Transport failures and undecodable replies, unchanged. Callers
    /// decide the fallback.
    pub async fn call<Req, Rep>(&mut self, request: &Req) -> Result<Rep, ServiceError>
    where
        Req: Serialize,
        Rep: DeserializeOwned,
    {
        let bytes = self.codec.encode(request)?;
        tracing::debug!(
            service = %self.kind,
            endpoint = self.channel.endpoint(),
            len = bytes.len(),
            "sending request"
        );
        let reply = self.channel.request(&bytes).await?;
        let decoded = self.codec.decode(&reply)?;
        Ok(decoded)
    }
}
