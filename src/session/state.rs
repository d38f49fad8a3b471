//! Session lifecycle states and run statistics

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// No transport; either starting up or waiting out the backoff
    Disconnected,
    /// Opening the transport
    Connecting,
    /// Identifier sent, waiting for the verdict
    Authenticating,
    /// Sending reports on the timer
    Streaming,
    /// Shutdown observed, transport released
    Terminated,
}

impl SessionState {
    pub fn is_connected(self) -> bool {
        matches!(self, SessionState::Authenticating | SessionState::Streaming)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Disconnected => "disconnected",
            SessionState::Connecting => "connecting",
            SessionState::Authenticating => "authenticating",
            SessionState::Streaming => "streaming",
            SessionState::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Deadlines and delays used by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeouts {
    /// Bound on opening the transport
    pub connect: Duration,
    /// Bound on every response read
    pub read: Duration,
    /// Pause between a failure and the next connect attempt
    pub backoff: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            read: Duration::from_secs(10),
            backoff: Duration::from_secs(5),
        }
    }
}

/// Counters collected over one [`Session::run`](super::Session::run)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub connect_attempts: u64,
    pub handshakes: u64,
    pub packets_sent: u64,
    pub records_acknowledged: u64,
    pub reconnect_waits: u64,
}
