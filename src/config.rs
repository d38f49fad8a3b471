//! Tracker configuration and logging setup
//!
//! Settings come from an optional YAML file with command-line overrides on
//! top. [`TrackerConfig::validate`] turns them into a [`ValidatedConfig`],
//! the only form the session and the sources are built from.
//!
//! ```yaml
//! server: collector.example.com:5027
//! imei: "359633107700001"
//! interval_secs: 30
//! latitude: 40.7128
//! longitude: -74.0060
//! simulation: buffer-recentfirst
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::providers::{Anchor, SourceKind};
use crate::session::{SessionConfig, Timeouts};
use crate::types::DeviceId;
use crate::{Result, TrackerError};

/// Raw, unvalidated tracker settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Collector address, `host:port`
    pub server: String,
    /// 15-digit device IMEI
    pub imei: String,
    /// Seconds between reports
    pub interval_secs: u64,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters
    pub altitude: i32,
    /// Degrees, 0-359
    pub heading: i32,
    pub simulation: SourceKind,
    pub verbose: bool,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    pub backoff_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        let timeouts = Timeouts::default();
        Self {
            server: String::new(),
            imei: String::new(),
            interval_secs: 30,
            latitude: 0.0,
            longitude: 0.0,
            altitude: 100,
            heading: 0,
            simulation: SourceKind::default(),
            verbose: false,
            connect_timeout_secs: timeouts.connect.as_secs(),
            read_timeout_secs: timeouts.read.as_secs(),
            backoff_secs: timeouts.backoff.as_secs(),
        }
    }
}

/// Settings that passed validation
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub session: SessionConfig,
    pub anchor: Anchor,
    pub simulation: SourceKind,
}

impl TrackerConfig {
    /// Load settings from a YAML file; missing keys keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| TrackerError::file_error(path.to_path_buf(), e))?;
        let config = Self::from_yaml(&text)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml_ng::from_str(text).map_err(|e| TrackerError::Parse {
            context: "tracker config".to_string(),
            details: e.to_string(),
        })
    }

    /// Check every field and build the session settings
    pub fn validate(&self) -> Result<ValidatedConfig> {
        if self.server.trim().is_empty() {
            return Err(TrackerError::config("server address is required"));
        }
        let device_id = DeviceId::new(self.imei.clone())?;
        if self.interval_secs == 0 {
            return Err(TrackerError::config("interval must be at least 1 second"));
        }
        if !(0..360).contains(&self.heading) {
            return Err(TrackerError::config(format!(
                "heading must be 0-359 degrees, got {}",
                self.heading
            )));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(TrackerError::config(format!("latitude {} out of range", self.latitude)));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(TrackerError::config(format!("longitude {} out of range", self.longitude)));
        }
        if self.connect_timeout_secs == 0 || self.read_timeout_secs == 0 {
            return Err(TrackerError::config("timeouts must be at least 1 second"));
        }
        if self.backoff_secs == 0 {
            return Err(TrackerError::config("reconnect backoff must be at least 1 second"));
        }

        let session = SessionConfig {
            address: self.server.clone(),
            device_id,
            interval: Duration::from_secs(self.interval_secs),
            verbose: self.verbose,
            timeouts: Timeouts {
                connect: Duration::from_secs(self.connect_timeout_secs),
                read: Duration::from_secs(self.read_timeout_secs),
                backoff: Duration::from_secs(self.backoff_secs),
            },
        };
        let anchor = Anchor {
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
            heading: self.heading,
        };

        Ok(ValidatedConfig { session, anchor, simulation: self.simulation })
    }
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` when verbose.
pub fn init_logging(verbose: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .map_err(|e| TrackerError::config(format!("Failed to init logging: {e}")))
}
