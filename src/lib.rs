//! GNSS tracking device emulator for the Codec 8 AVL protocol.
//!
//! The tracker authenticates with a 15-digit device identifier, then streams
//! periodic position reports to a collector over one persistent TCP
//! connection, reconnecting with a fixed backoff whenever the link fails.
//!
//! # Layers
//!
//! - [`codec`]: CRC-16/ARC, 30-byte AVL record encoding and packet framing
//! - [`provider`] / [`providers`]: where position reports come from
//! - [`session`]: connect, handshake, send/acknowledge loop, backoff, shutdown
//! - [`config`] / [`cli`]: settings, validation and logging setup
//!
//! ## Example
//!
//! ```rust,no_run
//! use avl_tracker::{Tracker, TrackerConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> avl_tracker::Result<()> {
//!     let config = TrackerConfig {
//!         server: "localhost:5027".to_string(),
//!         imei: "359633107700001".to_string(),
//!         ..TrackerConfig::default()
//!     };
//!     let shutdown = CancellationToken::new();
//!     let stats = Tracker::run(&config, shutdown).await?;
//!     println!("{} packets sent", stats.packets_sent);
//!     Ok(())
//! }
//! ```

mod error;
pub mod types;

pub mod codec;
pub mod connection;
pub mod provider;
pub mod providers;
pub mod session;
pub mod stream;

pub mod cli;
pub mod config;

pub use error::*;
pub use types::*;

pub use codec::{EncodedRecord, Packet, build_packet, checksum16, encode_record};
pub use config::{TrackerConfig, ValidatedConfig};
pub use connection::{Connector, TcpConnector};
pub use provider::PositionSource;
pub use providers::SourceKind;
pub use session::{Session, SessionConfig, SessionState, SessionStats, Timeouts};

use tokio_util::sync::CancellationToken;

/// Unified entry point for running a tracker from configuration.
pub struct Tracker;

impl Tracker {
    /// Validate `config`, build its position source and run a TCP session
    /// until `shutdown` is cancelled.
    ///
    /// # Errors
    ///
    /// Only configuration errors are returned. Transport failures are retried
    /// inside the session and never surface here.
    pub async fn run(config: &TrackerConfig, shutdown: CancellationToken) -> Result<SessionStats> {
        let validated = config.validate()?;
        Ok(Self::run_validated(validated, shutdown).await)
    }

    /// Run a TCP session from settings that already passed validation
    pub async fn run_validated(config: ValidatedConfig, shutdown: CancellationToken) -> SessionStats {
        let mut source = config.simulation.build(config.anchor);
        let mut session = Session::new(config.session);
        session.run(&mut source, shutdown).await
    }
}
