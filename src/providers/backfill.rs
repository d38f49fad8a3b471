//! Offline-buffer flush source
//!
//! Simulates a device that was offline and now flushes its buffer: a fixed
//! number of historical timestamps spaced [`BACKFILL_SPACING`] apart, ending
//! at "now". Once the backlog is drained every report uses the current time.

use std::collections::VecDeque;
use std::time::{Duration, SystemTime};

use super::{Anchor, FIX_SATELLITES};
use crate::provider::PositionSource;
use crate::types::{PositionReport, Priority};

/// Number of buffered records flushed on start
pub const BACKFILL_SIZE: usize = 30;

/// Gap between buffered records
pub const BACKFILL_SPACING: Duration = Duration::from_secs(10 * 60);

/// Order in which the backlog is replayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackfillOrder {
    /// Oldest record first, ending at "now"
    OldestFirst,
    /// "Now" first, then the rest of the backlog oldest to newest
    RecentFirst,
}

/// Replays a backlog of historical timestamps, then switches to real time
#[derive(Debug, Clone)]
pub struct Backfill {
    anchor: Anchor,
    order: BackfillOrder,
    backlog: VecDeque<SystemTime>,
}

impl Backfill {
    /// Build a backlog ending at the current time
    pub fn new(anchor: Anchor, order: BackfillOrder) -> Self {
        Self::starting_at(anchor, order, SystemTime::now())
    }

    /// Build a backlog ending at `now`
    pub fn starting_at(anchor: Anchor, order: BackfillOrder, now: SystemTime) -> Self {
        // slot i sits (BACKFILL_SIZE - 1 - i) spacings before now
        let slot = |i: usize| now - BACKFILL_SPACING * (BACKFILL_SIZE - 1 - i) as u32;

        let backlog = match order {
            BackfillOrder::OldestFirst => (0..BACKFILL_SIZE).map(slot).collect(),
            BackfillOrder::RecentFirst => {
                std::iter::once(now).chain((1..BACKFILL_SIZE).map(slot)).collect()
            }
        };

        Self { anchor, order, backlog }
    }

    pub fn order(&self) -> BackfillOrder {
        self.order
    }

    /// Buffered records not yet produced
    pub fn remaining(&self) -> usize {
        self.backlog.len()
    }
}

impl PositionSource for Backfill {
    fn next_report(&mut self) -> PositionReport {
        let timestamp = self.backlog.pop_front().unwrap_or_else(SystemTime::now);

        PositionReport {
            timestamp,
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::UNIX_EPOCH;

    fn anchor() -> Anchor {
        Anchor { latitude: 1.0, longitude: 2.0, altitude: 3, heading: 4 }
    }

    fn now() -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    #[test]
    fn oldest_first_walks_forward_to_now() {
        let mut source = Backfill::starting_at(anchor(), BackfillOrder::OldestFirst, now());
        assert_eq!(source.remaining(), BACKFILL_SIZE);

        let stamps: Vec<_> = (0..BACKFILL_SIZE).map(|_| source.next_report().timestamp).collect();
        assert_eq!(stamps[0], now() - Duration::from_secs(290 * 60));
        assert_eq!(stamps[BACKFILL_SIZE - 1], now());
        assert!(stamps.windows(2).all(|w| w[1].duration_since(w[0]).unwrap() == BACKFILL_SPACING));
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn recent_first_leads_with_now() {
        let mut source = Backfill::starting_at(anchor(), BackfillOrder::RecentFirst, now());
        let stamps: Vec<_> = (0..BACKFILL_SIZE).map(|_| source.next_report().timestamp).collect();

        assert_eq!(stamps[0], now());
        assert_eq!(stamps[1], now() - Duration::from_secs(280 * 60));
        assert_eq!(stamps[BACKFILL_SIZE - 1], now());
        assert!(stamps[1..].windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn switches_to_real_time_after_backlog() {
        let mut source = Backfill::starting_at(anchor(), BackfillOrder::OldestFirst, now());
        for _ in 0..BACKFILL_SIZE {
            source.next_report();
        }
        let before = SystemTime::now();
        let live = source.next_report();
        assert!(live.timestamp >= before);
        assert_eq!(live.satellite_count, 12);
        assert_eq!((live.latitude, live.longitude, live.altitude, live.heading), (1.0, 2.0, 3, 4));
    }
}
