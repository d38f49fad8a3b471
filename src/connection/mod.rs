//! Transport connections to the collector
//!
//! The session never opens sockets itself. It asks a [`Connector`] for a fresh
//! byte stream on every connect attempt, which keeps the state machine
//! independent of TCP and lets tests script the collector side.

use async_trait::async_trait;
use std::io;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::trace;

/// Factory for transport streams
#[async_trait]
pub trait Connector: Send + Sync {
    /// Stream type produced by a successful connect
    type Stream: AsyncRead + AsyncWrite + Unpin + Send;

    /// Open a new stream to `address`
    ///
    /// Deadlines are applied by the caller; implementations may take as long
    /// as the underlying transport allows.
    async fn connect(&self, address: &str) -> io::Result<Self::Stream>;
}

/// Plain TCP connector
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

#[async_trait]
impl Connector for TcpConnector {
    type Stream = TcpStream;

    async fn connect(&self, address: &str) -> io::Result<TcpStream> {
        let stream = TcpStream::connect(address).await?;
        // packets are small and strictly request/response
        stream.set_nodelay(true)?;
        trace!(
            "TCP connected: local={:?} peer={:?}",
            stream.local_addr().ok(),
            stream.peer_addr().ok()
        );
        Ok(stream)
    }
}
