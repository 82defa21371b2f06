//! `ServiceServer` builder and accept loop.
//!
//! Ties a [`ServiceHandler`] to a listening WebSocket address:
//! transport → per-connection task → handler.

use std::sync::Arc;

use archon_protocol::{Codec, JsonCodec};
use archon_transport::{Transport, WebSocketTransport};
use tokio::sync::Mutex;

use crate::handler::{ServiceHandler, serve_connection};
use crate::BackendError;

/// State shared by every connection task of one service.
pub(crate) struct ServerState<H: ServiceHandler, C: Codec> {
    pub(crate) handler: Mutex<H>,
    pub(crate) codec: C,
}

/// Builder for configuring and starting a service.
///
/// # Example
///
/// ```rust,no_run
/// use archon_backend::{MapService, ServiceServerBuilder};
///
/// # async fn run() -> Result<(), archon_backend::BackendError> {
/// let server = ServiceServerBuilder::new()
///     .bind("0.0.0.0:5557")
///     .build(MapService::test_map())
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct ServiceServerBuilder {
    bind_addr: String,
}

impl ServiceServerBuilder {
    /// Creates a new builder bound to `127.0.0.1:0` by default.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
        }
    }

    /// Sets the address to bind the service to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Binds the listener and wraps `handler` for serving.
    ///
    /// Uses `JsonCodec` and `WebSocketTransport`.
    pub async fn build<H: ServiceHandler>(
        self,
        handler: H,
    ) -> Result<ServiceServer<H, JsonCodec>, BackendError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            handler: Mutex::new(handler),
            codec: JsonCodec,
        });

        Ok(ServiceServer { transport, state })
    }
}

impl Default for ServiceServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound backend service.
///
/// Call [`run()`](Self::run) to start accepting callers.
pub struct ServiceServer<H: ServiceHandler, C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<H, C>>,
}

impl<H, C> ServiceServer<H, C>
where
    H: ServiceHandler,
    C: Codec,
{
    /// Returns the local address the service is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// The `ws://` URL a client channel should use to reach this service.
    pub fn url(&self) -> std::io::Result<String> {
        Ok(format!("ws://{}", self.local_addr()?))
    }

    /// Runs the accept loop until the process is terminated.
    ///
    /// Every connection gets its own task; requests from all of them are
    /// answered one at a time by the single handler.
    pub async fn run(mut self) -> Result<(), BackendError> {
        tracing::info!(service = %H::KIND, "service running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = serve_connection::<H, C>(conn, state).await {
                            tracing::debug!(
                                service = %H::KIND,
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(service = %H::KIND, error = %e, "accept failed");
                }
            }
        }
    }
}
