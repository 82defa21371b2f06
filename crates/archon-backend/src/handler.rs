//! The `ServiceHandler` trait and the per-connection reply loop.
//!
//! A backend is one handler behind one address. Each accepted connection
//! gets its own task running [`serve_connection`]:
//!   1. Receive a request frame
//!   2. Decode it, hand it to the handler, encode the reply
//!   3. Send exactly one reply frame, then wait for the next request

use std::sync::Arc;

use archon_protocol::{Codec, ErrorReply, ProtocolError, ServiceKind};
use archon_transport::{Connection, WebSocketConnection};
use serde::{Serialize, de::DeserializeOwned};

use crate::BackendError;
use crate::server::ServerState;

/// The trait each backend service implements.
///
/// Associated types pin down the service's request and reply records; the
/// framework does the decoding and encoding around [`handle`](Self::handle).
pub trait ServiceHandler: Send + 'static {
    /// What callers send.
    type Request: DeserializeOwned;

    /// What the service answers.
    type Reply: Serialize;

    /// Which service this is, for logs and channel names.
    const KIND: ServiceKind;

    /// Answers one request. Called with exclusive access to the handler,
    /// so stateful services (RNGs) need no locking of their own.
    fn handle(&mut self, request: Self::Request) -> Self::Reply;
}

/// Runs one request through `handler` and returns the encoded reply.
///
/// A request that does not decode gets an [`ErrorReply`], never silence:
/// a caller waiting on a reply would otherwise sit until its timeout.
///
/// # Errors
/// Only if encoding the reply fails.
pub fn respond<H, C>(handler: &mut H, codec: &C, request: &[u8]) -> Result<Vec<u8>, ProtocolError>
where
    H: ServiceHandler,
    C: Codec,
{
    match codec.decode::<H::Request>(request) {
        Ok(req) => codec.encode(&handler.handle(req)),
        Err(e) => {
            tracing::debug!(service = %H::KIND, error = %e, "undecodable request");
            codec.encode(&ErrorReply {
                error: format!("invalid {} request: {e}", H::KIND),
            })
        }
    }
}

/// Serves one connection until the caller closes it.
pub(crate) async fn serve_connection<H, C>(
    conn: WebSocketConnection,
    state: Arc<ServerState<H, C>>,
) -> Result<(), BackendError>
where
    H: ServiceHandler,
    C: Codec,
{
    let conn_id = conn.id();
    tracing::debug!(%conn_id, service = %H::KIND, "serving connection");

    loop {
        let request = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::debug!(%conn_id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
        };

        // Lock only for the handler call, drop before network I/O.
        let reply = {
            let mut handler = state.handler.lock().await;
            respond(&mut *handler, &state.codec, &request)
        };
        let reply = match reply {
            Ok(reply) => reply,
            Err(e) => {
                // No reply can be encoded, so hang up.
                let _ = conn.close().await;
                return Err(e.into());
            }
        };

        conn.send(&reply).await?;
    }

    Ok(())
}
