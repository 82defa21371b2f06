//! Error types for the service layer.
//!
//! A `ServiceError` is what a single exchange with a backend can fail with.
//! It never escapes a client's public operation: each client turns it into
//! that service's fallback value and logs it.

use archon_protocol::ProtocolError;
use archon_transport::TransportError;

/// Why one call to a backend service did not produce a usable reply.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The channel timed out or faulted.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The reply arrived but was not a valid record for this service.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl ServiceError {
    /// Returns `true` when the service simply did not answer in time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
