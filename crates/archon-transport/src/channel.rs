//! The client-side request/reply channel.
//!
//! A [`Channel`] is one long-lived link to one backend service. Every call
//! is a single exchange: write the request, wait for exactly one reply.
//! The two halves are bounded separately by [`ChannelConfig`].

use std::time::Duration;

use crate::TransportError;

// ---------------------------------------------------------------------------
// ChannelConfig
// ---------------------------------------------------------------------------

/// Per-channel timeouts.
///
/// Each service gets its own copy, so a slow weather service can be given
/// more room without loosening the movement service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Upper bound for connecting and writing the request.
    pub send_timeout: Duration,

    /// Upper bound for waiting on the reply once the request is written.
    pub recv_timeout: Duration,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            send_timeout: Duration::from_millis(1000),
            recv_timeout: Duration::from_millis(1000),
        }
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// A point-to-point request/reply connection.
///
/// `request` takes `&mut self`: a channel carries one exchange at a time,
/// and the owner (one service client) is the only caller.
pub trait Channel: Send + 'static {
    /// Sends one request and waits for its reply.
    ///
    /// # Errors
    /// [`TransportError::Timeout`] when either direction exceeds its
    /// window; any other variant for lower-level faults. No retry happens
    /// here.
    async fn request(&mut self, data: &[u8]) -> Result<Vec<u8>, TransportError>;

    /// The address (or name) this channel talks to, for logging.
    fn endpoint(&self) -> &str;
}

// ---------------------------------------------------------------------------
// LocalChannel
// ---------------------------------------------------------------------------

/// Boxed request handler used by [`LocalChannel`].
pub type LocalHandler =
    Box<dyn FnMut(&[u8]) -> Result<Vec<u8>, TransportError> + Send>;

/// A channel that hands requests straight to an in-process function.
///
/// Used to run backends inside the client process (offline play) and to
/// script replies or outages in tests. The handler's `Err` is returned as
/// is, so a handler can stand in for a timed-out or refused service.
pub struct LocalChannel {
    name: String,
    handler: LocalHandler,
}

impl LocalChannel {
    /// Creates a channel named `name` that answers with `handler`.
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: FnMut(&[u8]) -> Result<Vec<u8>, TransportError> + Send + 'static,
    {
        Self {
            name: name.into(),
            handler: Box::new(handler),
        }
    }
}

impl std::fmt::Debug for LocalChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalChannel")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Channel for LocalChannel {
    async fn request(&mut self, data: &[u8]) -> Result<Vec<u8>, TransportError> {
        (self.handler)(data)
    }

    fn endpoint(&self) -> &str {
        &self.name
    }
}
