//! Position report produced by a position source

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Record priority carried verbatim in the AVL record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Priority {
    #[default]
    Low = 0,
    High = 1,
    Panic = 2,
}

impl Priority {
    /// Wire value of the priority byte
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.as_u8()
    }
}

/// A single GNSS position reading
///
/// Reports are plain values. Sources create a fresh report on every call and
/// nothing holds on to them after encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    /// Time of the fix (millisecond precision on the wire)
    pub timestamp: SystemTime,

    /// Degrees, positive north
    pub latitude: f64,

    /// Degrees, positive east
    pub longitude: f64,

    /// Meters
    pub altitude: i32,

    /// km/h
    pub speed: i32,

    /// Degrees, conventionally 0-359
    pub heading: i32,

    /// Satellites in view, 0 means no fix
    pub satellite_count: i32,

    pub priority: Priority,
}

/// Fields of a report whose value does not fit its wire width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireOverflow {
    Altitude(i32),
    Speed(i32),
    Heading(i32),
    Satellites(i32),
    Latitude,
    Longitude,
}

impl PositionReport {
    /// Milliseconds since the Unix epoch
    ///
    /// Times before the epoch give negative milliseconds (floored), stored as
    /// their two's complement.
    pub fn timestamp_millis(&self) -> u64 {
        match self.timestamp.duration_since(UNIX_EPOCH) {
            Ok(since) => since.as_millis() as u64,
            Err(before) => {
                let millis = before.duration().as_nanos().div_ceil(1_000_000) as u64;
                millis.wrapping_neg()
            }
        }
    }

    /// Whether the report carries a valid GNSS fix
    pub fn has_fix(&self) -> bool {
        self.satellite_count > 0
    }

    /// Lists every field the encoder will wrap or saturate
    ///
    /// Integer fields wrap to their field width and coordinates saturate at the
    /// `i32` range after scaling. Encoding still succeeds, this only reports it.
    pub fn wire_overflows(&self) -> Vec<WireOverflow> {
        let mut overflows = Vec::new();
        if u16::try_from(self.altitude).is_err() {
            overflows.push(WireOverflow::Altitude(self.altitude));
        }
        if u16::try_from(self.heading).is_err() {
            overflows.push(WireOverflow::Heading(self.heading));
        }
        if u8::try_from(self.satellite_count).is_err() {
            overflows.push(WireOverflow::Satellites(self.satellite_count));
        }
        if u16::try_from(self.speed).is_err() {
            overflows.push(WireOverflow::Speed(self.speed));
        }
        if !coordinate_fits(self.latitude) {
            overflows.push(WireOverflow::Latitude);
        }
        if !coordinate_fits(self.longitude) {
            overflows.push(WireOverflow::Longitude);
        }
        overflows
    }
}

fn coordinate_fits(degrees: f64) -> bool {
    let scaled = (degrees * crate::codec::COORDINATE_SCALE).round();
    scaled.is_finite() && scaled >= i32::MIN as f64 && scaled <= i32::MAX as f64
}
