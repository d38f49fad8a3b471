//! Core value types shared by the encoder, the sources and the session.
//!
//! - [`PositionReport`] is one GNSS reading, produced by a
//!   [`PositionSource`](crate::provider::PositionSource)
//! - [`Priority`] is the record priority byte
//! - [`DeviceId`] is the validated 15-digit identifier used in the handshake
//!
//! ## Usage Example
//!
//! ```rust
//! use avl_tracker::types::{DeviceId, PositionReport, Priority};
//! use std::time::SystemTime;
//!
//! let id: DeviceId = "123456789012345".parse().unwrap();
//! let report = PositionReport {
//!     timestamp: SystemTime::now(),
//!     latitude: 40.7128,
//!     longitude: -74.0060,
//!     altitude: 100,
//!     speed: 0,
//!     heading: 0,
//!     satellite_count: 12,
//!     priority: Priority::Low,
//! };
//! assert!(report.has_fix());
//! assert_eq!(id.as_bytes().len(), 15);
//! ```

mod device_id;
mod report;

pub use device_id::DeviceId;
pub use report::{PositionReport, Priority, WireOverflow};
