//! Position source implementations
//!
//! - [`Stationary`]: fixed position, current time
//! - [`Backfill`]: offline-buffer flush, oldest first or most recent first
//! - [`NoFix`]: device online without a valid fix

mod backfill;
mod no_fix;
mod stationary;

pub use backfill::{BACKFILL_SIZE, BACKFILL_SPACING, Backfill, BackfillOrder};
pub use no_fix::NoFix;
pub use stationary::Stationary;

use serde::{Deserialize, Serialize};

use crate::provider::PositionSource;

/// Satellite count reported while a fix is available
pub const FIX_SATELLITES: i32 = 12;

/// Starting point shared by the sources
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Anchor {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: i32,
    pub heading: i32,
}

/// Source strategy selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// Fixed position, current time
    #[default]
    Stationary,
    /// 30 buffered records, 10 minutes apart, oldest first
    Buffer,
    /// Most recent record first, then the other 29 oldest to newest
    BufferRecentfirst,
    /// Online without a valid fix
    Pending,
}

impl SourceKind {
    /// Build the source for this strategy
    pub fn build(self, anchor: Anchor) -> Box<dyn PositionSource> {
        match self {
            SourceKind::Stationary => Box::new(Stationary::new(anchor)),
            SourceKind::Buffer => Box::new(Backfill::new(anchor, BackfillOrder::OldestFirst)),
            SourceKind::BufferRecentfirst => {
                Box::new(Backfill::new(anchor, BackfillOrder::RecentFirst))
            }
            SourceKind::Pending => Box::new(NoFix::new(anchor.latitude, anchor.longitude)),
        }
    }

    /// Short human description for the startup banner
    pub fn describe(self) -> &'static str {
        match self {
            SourceKind::Stationary => "stationary",
            SourceKind::Buffer => "buffer (30 records, 10 min apart, oldest first)",
            SourceKind::BufferRecentfirst => {
                "buffer-recentfirst (most recent first, then 29 oldest-to-newest)"
            }
            SourceKind::Pending => "pending (no GPS fix)",
        }
    }
}
