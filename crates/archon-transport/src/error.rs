use std::fmt;

/// Which half of a request/reply exchange a timeout hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Connecting or writing the request.
    Send,
    /// Waiting for the reply.
    Receive,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Send => write!(f, "send"),
            Self::Receive => write!(f, "receive"),
        }
    }
}

/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// No progress within the configured window for one direction.
    #[error("{0} timed out")]
    Timeout(Direction),

    /// A lower-level fault on a client channel (refused, reset, bad frame).
    #[error("channel error: {0}")]
    Channel(String),

    /// The connection was closed.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),

    /// Sending data failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Receiving data failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// Binding or accepting connections failed.
    #[error("accept failed: {0}")]
    AcceptFailed(#[source] std::io::Error),
}

impl TransportError {
    /// Returns `true` for the `Timeout` condition, `false` for every
    /// channel-level fault.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display_names_direction() {
        assert_eq!(
            TransportError::Timeout(Direction::Receive).to_string(),
            "receive timed out"
        );
        assert_eq!(
            TransportError::Timeout(Direction::Send).to_string(),
            "send timed out"
        );
    }

    #[test]
    fn test_is_timeout() {
        assert!(TransportError::Timeout(Direction::Send).is_timeout());
        assert!(!TransportError::Channel("refused".into()).is_timeout());
        assert!(
            !TransportError::ConnectionClosed("peer".into()).is_timeout()
        );
    }
}
