//! Source that keeps the device online without a valid fix

use std::time::SystemTime;

use crate::provider::PositionSource;
use crate::types::{PositionReport, Priority};

/// Reports the last known coordinates with zero satellites
///
/// Collectors see recent activity but no valid position, which most of them
/// show as a pending or stale fix.
#[derive(Debug, Clone)]
pub struct NoFix {
    latitude: f64,
    longitude: f64,
}

impl NoFix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl PositionSource for NoFix {
    fn next_report(&mut self) -> PositionReport {
        PositionReport {
            timestamp: SystemTime::now(),
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: 0,
            speed: 0,
            heading: 0,
            satellite_count: 0,
            priority: Priority::Low,
        }
    }
}
