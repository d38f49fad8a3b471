//! Device identifier (IMEI) sent in the handshake

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Result, TrackerError};

/// Validated 15-digit device identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

impl DeviceId {
    /// Number of ASCII digits in an identifier
    pub const LEN: usize = 15;

    /// Validate and wrap an identifier
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.len() != Self::LEN {
            return Err(TrackerError::InvalidDeviceId {
                reason: format!("expected {} characters, got {}", Self::LEN, value.len()),
                value,
            });
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TrackerError::InvalidDeviceId {
                value,
                reason: "must contain only digits".to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl FromStr for DeviceId {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for DeviceId {
    type Error = TrackerError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
