//! WebSocket transport implementation using `tokio-tungstenite`.
//!
//! One WebSocket message carries one request or one reply. The server half
//! ([`WebSocketTransport`], [`WebSocketConnection`]) is used by backend
//! services; the client half ([`WebSocketChannel`]) by service clients.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::{
    Channel, ChannelConfig, Connection, ConnectionId, Direction, Transport,
    TransportError,
};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

type WsStream = WebSocketStream<TcpStream>;
type WsClientStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ---------------------------------------------------------------------------
// Server side
// ---------------------------------------------------------------------------

/// A WebSocket-based [`Transport`] that listens for incoming connections.
pub struct WebSocketTransport {
    listener: TcpListener,
}

impl WebSocketTransport {
    /// Binds a new WebSocket transport to the given address.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::AcceptFailed)?;
        tracing::info!(addr, "WebSocket transport listening");
        Ok(Self { listener })
    }

    /// Returns the address the listener is bound to. Useful after binding
    /// to port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

impl Transport for WebSocketTransport {
    type Connection = WebSocketConnection;
    type Error = TransportError;

    async fn accept(&mut self) -> Result<Self::Connection, Self::Error> {
        let (stream, addr) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::AcceptFailed)?;

        let ws = tokio_tungstenite::accept_async(stream)
            .await
            .map_err(|e| {
                TransportError::AcceptFailed(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    e,
                ))
            })?;

        let id = ConnectionId::new(
            NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed),
        );
        tracing::debug!(%id, %addr, "accepted WebSocket connection");

        Ok(WebSocketConnection {
            id,
            ws: Arc::new(Mutex::new(ws)),
        })
    }
}

/// A single accepted WebSocket connection.
pub struct WebSocketConnection {
    id: ConnectionId,
    ws: Arc<Mutex<WsStream>>,
}

impl Connection for WebSocketConnection {
    type Error = TransportError;

    async fn send(&self, data: &[u8]) -> Result<(), Self::Error> {
        let msg = Message::Binary(data.to_vec().into());
        self.ws.lock().await.send(msg).await.map_err(|e| {
            TransportError::SendFailed(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                e,
            ))
        })
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error> {
        loop {
            let msg = self.ws.lock().await.next().await;
            match msg {
                Some(Ok(Message::Binary(data))) => {
                    return Ok(Some(data.into()));
                }
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(text.as_bytes().to_vec()));
                }
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // skip ping/pong/frame
                Some(Err(e)) => {
                    return Err(TransportError::ReceiveFailed(
                        std::io::Error::new(
                            std::io::ErrorKind::ConnectionReset,
                            e,
                        ),
                    ));
                }
            }
        }
    }

    async fn close(&self) -> Result<(), Self::Error> {
        self.ws.lock().await.close(None).await.map_err(|e| {
            TransportError::SendFailed(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                e,
            ))
        })
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}

// ---------------------------------------------------------------------------
// Client side
// ---------------------------------------------------------------------------

/// A [`Channel`] to one backend service over WebSocket.
///
/// The socket is opened lazily on the first request, so a client can be
/// built while its backend is still down. Any failed exchange drops the
/// socket: a reply that arrives after its timeout would otherwise be read
/// as the answer to the next request.
pub struct WebSocketChannel {
    url: String,
    config: ChannelConfig,
    stream: Option<WsClientStream>,
}

impl WebSocketChannel {
    /// Creates a channel to `url` (e.g. `ws://127.0.0.1:5557`). Nothing is
    /// connected until the first request.
    pub fn new(url: impl Into<String>, config: ChannelConfig) -> Self {
        Self {
            url: url.into(),
            config,
            stream: None,
        }
    }

    /// Returns `true` while a socket from a previous exchange is held open.
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    async fn connect(
        &mut self,
        wait: Duration,
    ) -> Result<&mut WsClientStream, TransportError> {
        if self.stream.is_none() {
            let (ws, _) = tokio::time::timeout(
                wait,
                tokio_tungstenite::connect_async(self.url.as_str()),
            )
            .await
            .map_err(|_| TransportError::Timeout(Direction::Send))?
            .map_err(|e| TransportError::Channel(e.to_string()))?;
            tracing::debug!(url = %self.url, "channel connected");
            self.stream = Some(ws);
        }
        self.stream
            .as_mut()
            .ok_or_else(|| TransportError::Channel("no open socket".into()))
    }

    async fn exchange(&mut self, data: &[u8]) -> Result<Vec<u8>, TransportError> {
        let ChannelConfig {
            send_timeout,
            recv_timeout,
        } = self.config;
        let stream = self.connect(send_timeout).await?;

        let msg = Message::Binary(data.to_vec().into());
        tokio::time::timeout(send_timeout, stream.send(msg))
            .await
            .map_err(|_| TransportError::Timeout(Direction::Send))?
            .map_err(|e| TransportError::Channel(e.to_string()))?;

        let reply = async {
            loop {
                match stream.next().await {
                    Some(Ok(Message::Binary(data))) => return Ok(data.to_vec()),
                    Some(Ok(Message::Text(text))) => {
                        return Ok(text.as_bytes().to_vec());
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        return Err(TransportError::ConnectionClosed(
                            "service closed the channel".into(),
                        ));
                    }
                    Some(Ok(_)) => continue, // skip ping/pong/frame
                    Some(Err(e)) => {
                        return Err(TransportError::Channel(e.to_string()));
                    }
                }
            }
        };

        tokio::time::timeout(recv_timeout, reply)
            .await
            .map_err(|_| TransportError::Timeout(Direction::Receive))?
    }
}

impl Channel for WebSocketChannel {
    async fn request(&mut self, data: &[u8]) -> Result<Vec<u8>, TransportError> {
        let result = self.exchange(data).await;
        if let Err(e) = &result {
            tracing::debug!(url = %self.url, error = %e, "exchange failed, dropping socket");
            self.stream = None;
        }
        result
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
