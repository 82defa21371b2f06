//! Unified error type for the backend services.

use archon_protocol::ProtocolError;
use archon_transport::TransportError;

/// Top-level error for running a service.
///
/// The `#[from]` attributes let `?` lift transport and protocol errors
/// into this one type.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encoding a reply).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The listener's local address could not be read.
    #[error("local address unavailable: {0}")]
    Address(#[from] std::io::Error),
}
