//! Transport layer for Archon.
//!
//! Two sides live here:
//!
//! - **Client side**: the [`Channel`] trait, a point-to-point request/reply
//!   connection to one backend service with independent send and receive
//!   timeouts ([`ChannelConfig`]). [`WebSocketChannel`] is the networked
//!   implementation; [`LocalChannel`] wires a request handler in-process.
//! - **Server side**: the [`Transport`] and [`Connection`] traits that
//!   backend services use to accept callers and exchange frames.
//!
//! Channels never retry. A failed exchange surfaces as
//! [`TransportError::Timeout`] or a channel-level fault and the caller
//! decides what to do with it.
//!
//! # Feature Flags
//!
//! - `websocket` (default): WebSocket transport via `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod channel;
mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use channel::{Channel, ChannelConfig, LocalChannel, LocalHandler};
pub use error::{Direction, TransportError};
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketChannel, WebSocketConnection, WebSocketTransport};

use std::fmt;

/// Process-unique tag for one accepted backend connection, used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// The listening half of a backend service.
pub trait Transport: Send + Sync + 'static {
    type Connection: Connection;
    type Error: std::error::Error + Send + Sync;

    /// Waits for the next caller and completes its handshake.
    async fn accept(&mut self) -> Result<Self::Connection, Self::Error>;
}

/// One caller's connection as seen by a backend service. Each frame in is
/// one request; each frame out is one reply.
pub trait Connection: Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync;

    async fn send(&self, data: &[u8]) -> Result<(), Self::Error>;

    /// Next request frame, or `Ok(None)` once the caller hangs up.
    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Sends a close frame to the caller.
    async fn close(&self) -> Result<(), Self::Error>;

    fn id(&self) -> ConnectionId;
}
