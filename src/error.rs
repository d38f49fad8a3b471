//! Error types for the tracker.
//!
//! All errors implement the `std::error::Error` trait and carry structured
//! context for logging and recovery decisions.
//!
//! ## Error Categories
//!
//! - **Connection Errors**: Failure to reach the collector
//! - **Transport Errors**: Write or read failures on an established connection
//! - **Timeouts**: Bounded connect or read deadlines that expired
//! - **Authentication Errors**: The collector refused the device identifier
//! - **Configuration Errors**: Invalid settings detected before the session starts
//!
//! ## Recovery and Retry
//!
//! The session treats every retryable error the same way: close the transport,
//! wait the backoff interval and connect again.
//!
//! ```rust
//! use avl_tracker::TrackerError;
//!
//! let error = TrackerError::authentication_rejected(0x00);
//! assert!(error.is_retryable());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for tracker operations.
pub type Result<T, E = TrackerError> = std::result::Result<T, E>;

/// Main error type for tracker operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TrackerError {
    #[error("Failed to connect to {address}: {reason}")]
    Connection {
        address: String,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{operation} timed out after {duration:?}")]
    Timeout { operation: &'static str, duration: Duration },

    #[error("Device identifier rejected by collector (response: {response:#04x})")]
    AuthenticationRejected { response: u8 },

    #[error("Transport failure during {operation}")]
    Transport {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    #[error("Invalid device identifier '{value}': {reason}")]
    InvalidDeviceId { value: String, reason: String },

    #[error("Config file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },
}

impl TrackerError {
    /// Returns whether the session should reconnect after this error.
    pub fn is_retryable(&self) -> bool {
        match self {
            TrackerError::Connection { .. } => true,
            TrackerError::Timeout { .. } => true,
            TrackerError::AuthenticationRejected { .. } => true,
            TrackerError::Transport { .. } => true,
            TrackerError::Config { .. } => false,
            TrackerError::InvalidDeviceId { .. } => false,
            TrackerError::File { .. } => false,
            TrackerError::Parse { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            TrackerError::Connection { .. } => vec![
                "Check the collector host and port",
                "Verify the collector process is listening",
                "Check firewall rules between device and collector",
            ],
            TrackerError::Timeout { .. } => vec![
                "Check network latency to the collector",
                "Verify the collector is responding",
                "Increase the configured timeout",
            ],
            TrackerError::AuthenticationRejected { .. } => vec![
                "Register the device IMEI on the collector",
                "Check the IMEI for typos",
            ],
            TrackerError::Transport { .. } => vec![
                "Check the collector logs for dropped connections",
                "Verify network stability",
            ],
            TrackerError::Config { .. } => {
                vec!["Review command-line flags and config file values", "Run with --help"]
            }
            TrackerError::InvalidDeviceId { .. } => {
                vec!["Use a 15-digit numeric IMEI", "Remove spaces or separators"]
            }
            TrackerError::File { .. } => {
                vec!["Check the config file exists and is readable", "Check file permissions"]
            }
            TrackerError::Parse { .. } => {
                vec!["Check the config file is valid YAML", "Compare field names with the docs"]
            }
        }
    }

    /// Helper constructor for connection errors.
    pub fn connection_failed(address: impl Into<String>, reason: impl Into<String>) -> Self {
        TrackerError::Connection { address: address.into(), reason: reason.into(), source: None }
    }

    /// Helper constructor for connection errors caused by an I/O error.
    pub fn connection_failed_with_source(address: impl Into<String>, source: std::io::Error) -> Self {
        TrackerError::Connection {
            address: address.into(),
            reason: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Helper constructor for expired deadlines.
    pub fn timeout(operation: &'static str, duration: Duration) -> Self {
        TrackerError::Timeout { operation, duration }
    }

    /// Helper constructor for a refused handshake.
    pub fn authentication_rejected(response: u8) -> Self {
        TrackerError::AuthenticationRejected { response }
    }

    /// Helper constructor for write/read failures.
    pub fn transport(operation: &'static str, source: std::io::Error) -> Self {
        TrackerError::Transport { operation, source }
    }

    /// Helper constructor for configuration errors.
    pub fn config(reason: impl Into<String>) -> Self {
        TrackerError::Config { reason: reason.into() }
    }

    /// Helper constructor for config file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        TrackerError::File { path, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
          #[test]
          fn error_messages_carry_their_context(
            address in "[a-z0-9.]{1,20}:[0-9]{1,5}",
            reason in ".*",
            response in any::<u8>(),
            duration_ms in 1u64..60000u64
          ) {
            let connection = TrackerError::connection_failed(address.clone(), reason.clone());
            let msg = connection.to_string();
            prop_assert!(msg.contains(&address));
            prop_assert!(msg.contains(&reason));

            let rejected = TrackerError::authentication_rejected(response);
            let hex = format!("{:#04x}", response);
            prop_assert!(rejected.to_string().contains(&hex));

            let timeout = TrackerError::timeout("ack read", Duration::from_millis(duration_ms));
            prop_assert!(timeout.to_string().starts_with("ack read timed out"));
          }
        }
    }

    #[test]
    fn transport_errors_are_retryable() {
        let errors = [
            TrackerError::connection_failed("localhost:5027", "refused"),
            TrackerError::timeout("connect", Duration::from_secs(10)),
            TrackerError::authentication_rejected(0x00),
            TrackerError::transport("packet write", std::io::ErrorKind::BrokenPipe.into()),
        ];
        for error in &errors {
            assert!(error.is_retryable(), "{error} should be retryable");
            assert!(!error.recovery_suggestions().is_empty());
        }
    }

    #[test]
    fn config_errors_are_fatal() {
        assert!(!TrackerError::config("interval must be positive").is_retryable());
        let bad_id = TrackerError::InvalidDeviceId { value: "12".into(), reason: "too short".into() };
        assert!(!bad_id.is_retryable());
    }

    #[test]
    fn connection_source_is_chained() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused by peer");
        let error = TrackerError::connection_failed_with_source("10.0.0.1:5027", io);
        let source = std::error::Error::source(&error).expect("source should be attached");
        assert_eq!(source.to_string(), "refused by peer");
    }

    #[test]
    fn error_traits_validation() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<TrackerError>();
    }
}
