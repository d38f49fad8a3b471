//! Fixed-position source

use std::time::SystemTime;

use super::{Anchor, FIX_SATELLITES};
use crate::provider::PositionSource;
use crate::types::{PositionReport, Priority};

/// Reports the anchor position with the current time and a good fix
#[derive(Debug, Clone)]
pub struct Stationary {
    anchor: Anchor,
}

impl Stationary {
    pub fn new(anchor: Anchor) -> Self {
        Self { anchor }
    }
}

impl PositionSource for Stationary {
    fn next_report(&mut self) -> PositionReport {
        PositionReport {
            timestamp: SystemTime::now(),
            latitude: self.anchor.latitude,
            longitude: self.anchor.longitude,
            altitude: self.anchor.altitude,
            speed: 0,
            heading: self.anchor.heading,
            satellite_count: FIX_SATELLITES,
            priority: Priority::Low,
        }
    }
}
