//! Session state machine
//!
//! A [`Session`] owns at most one transport at a time and drives it through
//!
//! ```text
//! Disconnected -> Connecting -> Authenticating -> Streaming
//!       ^              |               |              |
//!       +---- backoff -+---------------+--------------+
//! ```
//!
//! with `Terminated` reachable from anywhere once the shutdown token fires.
//! Every failure (connect error, rejected identifier, write or read error,
//! expired deadline) takes the same path: drop the transport, wait the
//! backoff, connect again.
//!
//! Waits (connect, tick, backoff) race the shutdown token. A packet write and
//! its acknowledgment read are never interrupted; shutdown is honored right
//! after them, so shutdown latency is bounded by the read timeout.

mod state;

pub use state::{SessionState, SessionStats, Timeouts};

use futures::{Stream, StreamExt};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::sync::watch;
use tokio::time::{sleep, timeout};
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::codec::handshake::{ACK_SIZE, AUTH_RESPONSE_SIZE};
use crate::codec::{AuthResponse, build_packet, decode_ack, encode_auth_request, encode_record};
use crate::connection::{Connector, TcpConnector};
use crate::provider::PositionSource;
use crate::stream::Paced;
use crate::types::{DeviceId, PositionReport};
use crate::{Result, TrackerError};

/// Per-send chatter goes to `info` when verbose, `debug` otherwise
macro_rules! chatter {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            info!($($arg)+)
        } else {
            debug!($($arg)+)
        }
    };
}

/// Settings a session is created from
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Collector address, `host:port`
    pub address: String,
    pub device_id: DeviceId,
    /// Period between reports while streaming; raised to
    /// [`MIN_PERIOD`](crate::stream::MIN_PERIOD) when shorter
    pub interval: Duration,
    pub verbose: bool,
    pub timeouts: Timeouts,
}

impl SessionConfig {
    pub fn new(address: impl Into<String>, device_id: DeviceId, interval: Duration) -> Self {
        Self {
            address: address.into(),
            device_id,
            interval,
            verbose: false,
            timeouts: Timeouts::default(),
        }
    }
}

/// Why a streaming phase ended without an error
enum StreamEnd {
    Shutdown,
    SourceExhausted,
}

/// Device session against one collector
pub struct Session<C = TcpConnector> {
    config: SessionConfig,
    connector: C,
    state: watch::Sender<SessionState>,
    stats: SessionStats,
}

impl Session<TcpConnector> {
    /// Session over plain TCP
    pub fn new(config: SessionConfig) -> Self {
        Self::with_connector(config, TcpConnector)
    }
}

impl<C: Connector> Session<C> {
    /// Session over a custom transport
    pub fn with_connector(config: SessionConfig, connector: C) -> Self {
        let (state, _) = watch::channel(SessionState::Disconnected);
        Self { config, connector, state, stats: SessionStats::default() }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Watch receiver following state transitions
    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// State changes as a stream, starting with the current state
    ///
    /// Watch semantics apply: a slow consumer only sees the latest state.
    pub fn state_updates(&self) -> impl Stream<Item = SessionState> + 'static {
        WatchStream::new(self.state.subscribe())
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Drive the session until `shutdown` is cancelled
    ///
    /// Never returns on transport failures; those are logged and retried after
    /// the backoff. Returns the counters once the session has terminated.
    pub async fn run<S>(&mut self, source: &mut S, shutdown: CancellationToken) -> SessionStats
    where
        S: PositionSource + ?Sized,
    {
        info!("Session started for device {} -> {}", self.config.device_id, self.config.address);

        while !shutdown.is_cancelled() {
            match self.connect_and_authenticate(&shutdown).await {
                Ok(Some(mut transport)) => {
                    let outcome = self.stream_reports(&mut transport, source, &shutdown).await;
                    debug!("Closing connection to {}", self.config.address);
                    drop(transport);
                    match outcome {
                        Ok(StreamEnd::Shutdown) => break,
                        Ok(StreamEnd::SourceExhausted) => {
                            warn!("Position source ended, reconnecting");
                        }
                        Err(e) => {
                            error!("Error sending AVL data: {}", e);
                            info!("Connection lost, reconnecting...");
                        }
                    }
                }
                Ok(None) => break,
                Err(e) => error!("Error: {}", e),
            }

            if shutdown.is_cancelled() {
                break;
            }
            self.set_state(SessionState::Disconnected);
            if !self.backoff(&shutdown).await {
                break;
            }
        }

        self.set_state(SessionState::Terminated);
        info!(
            "Session terminated: {} packets sent, {} records acknowledged, {} connect attempts",
            self.stats.packets_sent, self.stats.records_acknowledged, self.stats.connect_attempts
        );
        self.stats
    }

    /// Connect and exchange the identifier
    ///
    /// `Ok(None)` means shutdown was observed while connecting.
    async fn connect_and_authenticate(
        &mut self,
        shutdown: &CancellationToken,
    ) -> Result<Option<C::Stream>> {
        let Some(mut transport) = self.connect(shutdown).await? else {
            return Ok(None);
        };

        self.set_state(SessionState::Authenticating);
        self.authenticate(&mut transport).await?;
        self.stats.handshakes += 1;
        Ok(Some(transport))
    }

    async fn connect(&mut self, shutdown: &CancellationToken) -> Result<Option<C::Stream>> {
        self.set_state(SessionState::Connecting);
        self.stats.connect_attempts += 1;
        chatter!(self.config.verbose, "Connecting to {}...", self.config.address);

        let limit = self.config.timeouts.connect;
        let attempt = tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                debug!("Shutdown during connect");
                return Ok(None);
            }
            attempt = timeout(limit, self.connector.connect(&self.config.address)) => attempt,
        };

        match attempt {
            Ok(Ok(transport)) => {
                chatter!(self.config.verbose, "Connected to {}", self.config.address);
                Ok(Some(transport))
            }
            Ok(Err(e)) => Err(TrackerError::connection_failed_with_source(&self.config.address, e)),
            Err(_) => Err(TrackerError::timeout("connect", limit)),
        }
    }

    async fn authenticate(&self, transport: &mut C::Stream) -> Result<()> {
        chatter!(self.config.verbose, "Sending IMEI: {}", self.config.device_id);
        let request = encode_auth_request(&self.config.device_id);
        transport.write_all(&request).await.map_err(|e| TrackerError::transport("IMEI write", e))?;
        transport.flush().await.map_err(|e| TrackerError::transport("IMEI write", e))?;

        let mut response = [0u8; AUTH_RESPONSE_SIZE];
        read_exact_within(transport, &mut response, self.config.timeouts.read, "IMEI response read")
            .await?;

        match AuthResponse::from_byte(response[0]) {
            AuthResponse::Accepted => {
                chatter!(self.config.verbose, "IMEI accepted by server");
                Ok(())
            }
            AuthResponse::Rejected(byte) => Err(TrackerError::authentication_rejected(byte)),
        }
    }

    /// Send one report immediately, then one per interval, until a failure or
    /// shutdown
    async fn stream_reports<S>(
        &mut self,
        transport: &mut C::Stream,
        source: &mut S,
        shutdown: &CancellationToken,
    ) -> Result<StreamEnd>
    where
        S: PositionSource + ?Sized,
    {
        self.set_state(SessionState::Streaming);
        let mut reports = Paced::every(source, self.config.interval);

        loop {
            let report = tokio::select! {
                biased;
                _ = shutdown.cancelled() => return Ok(StreamEnd::Shutdown),
                next = reports.next() => match next {
                    Some(report) => report,
                    None => return Ok(StreamEnd::SourceExhausted),
                },
            };

            self.send_report(transport, &report).await?;

            // an in-flight exchange finishes before shutdown is honored
            if shutdown.is_cancelled() {
                return Ok(StreamEnd::Shutdown);
            }
        }
    }

    /// Write one single-record packet and read its acknowledgment
    async fn send_report(&mut self, transport: &mut C::Stream, report: &PositionReport) -> Result<u32> {
        let overflows = report.wire_overflows();
        if !overflows.is_empty() {
            warn!("Report fields truncated to wire width: {:?}", overflows);
        }

        let packet = build_packet(&[encode_record(report)]);
        chatter!(
            self.config.verbose,
            "Sending AVL data: lat={:.6} lon={:.6} alt={} speed={} heading={}",
            report.latitude,
            report.longitude,
            report.altitude,
            report.speed,
            report.heading
        );
        trace!("Packet ({} bytes): {:02X?}", packet.len(), packet.as_bytes());

        transport
            .write_all(packet.as_bytes())
            .await
            .map_err(|e| TrackerError::transport("AVL packet write", e))?;
        transport.flush().await.map_err(|e| TrackerError::transport("AVL packet write", e))?;
        self.stats.packets_sent += 1;

        let mut ack = [0u8; ACK_SIZE];
        read_exact_within(transport, &mut ack, self.config.timeouts.read, "AVL ack read").await?;
        let accepted = decode_ack(ack);
        self.stats.records_acknowledged += u64::from(accepted);

        chatter!(self.config.verbose, "Server accepted {} record(s)", accepted);
        Ok(accepted)
    }

    /// Wait out the backoff; `false` when shutdown arrived first
    async fn backoff(&mut self, shutdown: &CancellationToken) -> bool {
        let delay = self.config.timeouts.backoff;
        self.stats.reconnect_waits += 1;
        info!("Reconnecting in {:?}", delay);

        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                debug!("Shutdown during backoff");
                false
            }
            _ = sleep(delay) => true,
        }
    }

    fn set_state(&self, next: SessionState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            trace!("Session state {} -> {}", previous, next);
        }
    }
}

/// Fill `buf` from `reader` within `limit`
async fn read_exact_within<R>(
    reader: &mut R,
    buf: &mut [u8],
    limit: Duration,
    operation: &'static str,
) -> Result<()>
where
    R: AsyncRead + Unpin + ?Sized,
{
    match timeout(limit, reader.read_exact(buf)).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(TrackerError::transport(operation, e)),
        Err(_) => Err(TrackerError::timeout(operation, limit)),
    }
}
