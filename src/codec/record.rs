//! AVL record encoding
//!
//! ## Record Layout (30 bytes, big-endian)
//!
//! | Offset | Size | Field                                        |
//! |--------|------|----------------------------------------------|
//! | 0      | 8    | Timestamp, ms since Unix epoch               |
//! | 8      | 1    | Priority                                     |
//! | 9      | 4    | Longitude, degrees × 10^7, two's complement  |
//! | 13     | 4    | Latitude, degrees × 10^7, two's complement   |
//! | 17     | 2    | Altitude, meters                             |
//! | 19     | 2    | Heading, degrees                             |
//! | 21     | 1    | Satellites                                   |
//! | 22     | 2    | Speed, km/h                                  |
//! | 24     | 6    | I/O element, all zero (no properties)        |
//!
//! Out-of-range integer fields wrap to their width (`-1` altitude becomes
//! `0xFFFF`). Scaled coordinates saturate at the `i32` range.

use super::COORDINATE_SCALE;
use crate::types::PositionReport;

pub const TIMESTAMP_SIZE: usize = 8;
pub const PRIORITY_SIZE: usize = 1;
pub const GPS_ELEMENT_SIZE: usize = 15;
pub const IO_ELEMENT_SIZE: usize = 6;
pub const RECORD_SIZE: usize = TIMESTAMP_SIZE + PRIORITY_SIZE + GPS_ELEMENT_SIZE + IO_ELEMENT_SIZE;

const GPS_OFFSET: usize = TIMESTAMP_SIZE + PRIORITY_SIZE;

/// One position report in wire form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedRecord([u8; RECORD_SIZE]);

impl EncodedRecord {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        RECORD_SIZE
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl AsRef<[u8]> for EncodedRecord {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Encode one report into its fixed 30-byte record
pub fn encode_record(report: &PositionReport) -> EncodedRecord {
    let mut out = [0u8; RECORD_SIZE];

    out[..TIMESTAMP_SIZE].copy_from_slice(&report.timestamp_millis().to_be_bytes());
    out[TIMESTAMP_SIZE] = report.priority.as_u8();
    out[GPS_OFFSET..GPS_OFFSET + GPS_ELEMENT_SIZE].copy_from_slice(&gps_element(report));
    // I/O element: event id, total count and the four per-width counts stay zero

    EncodedRecord(out)
}

fn gps_element(report: &PositionReport) -> [u8; GPS_ELEMENT_SIZE] {
    let mut gps = [0u8; GPS_ELEMENT_SIZE];
    gps[0..4].copy_from_slice(&scale_coordinate(report.longitude).to_be_bytes());
    gps[4..8].copy_from_slice(&scale_coordinate(report.latitude).to_be_bytes());
    gps[8..10].copy_from_slice(&(report.altitude as u16).to_be_bytes());
    gps[10..12].copy_from_slice(&(report.heading as u16).to_be_bytes());
    gps[12] = report.satellite_count as u8;
    gps[13..15].copy_from_slice(&(report.speed as u16).to_be_bytes());
    gps
}

/// Degrees to the fixed-point wire value, `round(deg × 10^7)`
pub fn scale_coordinate(degrees: f64) -> i32 {
    (degrees * COORDINATE_SCALE).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;
    use proptest::prelude::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn new_york() -> PositionReport {
        PositionReport {
            timestamp: UNIX_EPOCH + Duration::from_millis(0x0000_018B_CFE5_6800),
            latitude: 40.7128,
            longitude: -74.0060,
            altitude: 100,
            speed: 0,
            heading: 0,
            satellite_count: 12,
            priority: Priority::Low,
        }
    }

    fn read_i32(bytes: &[u8], offset: usize) -> i32 {
        i32::from_be_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn read_u16(bytes: &[u8], offset: usize) -> u16 {
        u16::from_be_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn encodes_known_report_byte_exact() {
        let record = encode_record(&new_york());
        let b = record.as_bytes();

        assert_eq!(&b[0..8], &[0x00, 0x00, 0x01, 0x8B, 0xCF, 0xE5, 0x68, 0x00]);
        assert_eq!(b[8], 0x00);
        // -740060000 = 0xD3E3_94A0, 407128000 = 0x1844_47C0
        assert_eq!(&b[9..13], &[0xD3, 0xE3, 0x94, 0xA0]);
        assert_eq!(&b[13..17], &[0x18, 0x44, 0x47, 0xC0]);
        assert_eq!(&b[17..19], &[0x00, 0x64]);
        assert_eq!(&b[19..21], &[0x00, 0x00]);
        assert_eq!(b[21], 12);
        assert_eq!(&b[22..24], &[0x00, 0x00]);
        assert_eq!(&b[24..30], &[0u8; 6]);
    }

    #[test]
    fn priority_is_copied_verbatim() {
        let mut report = new_york();
        report.priority = Priority::Panic;
        assert_eq!(encode_record(&report).as_bytes()[8], 2);
    }

    #[test]
    fn negative_altitude_wraps() {
        let mut report = new_york();
        report.altitude = -1;
        report.speed = 65_537;
        let record = encode_record(&report);
        assert_eq!(read_u16(record.as_bytes(), 17), 0xFFFF);
        assert_eq!(read_u16(record.as_bytes(), 22), 1);
    }

    #[test]
    fn coordinates_round_to_nearest() {
        assert_eq!(scale_coordinate(0.000_000_06), 1);
        assert_eq!(scale_coordinate(-0.000_000_06), -1);
        assert_eq!(scale_coordinate(0.000_000_04), 0);
        assert_eq!(scale_coordinate(180.0), 1_800_000_000);
        assert_eq!(scale_coordinate(-180.0), -1_800_000_000);
    }

    proptest! {
        #[test]
        fn record_is_always_thirty_bytes(
            millis in 0u64..4_102_444_800_000,
            latitude in -90.0f64..=90.0,
            longitude in -180.0f64..=180.0,
            altitude in any::<i32>(),
            speed in any::<i32>(),
            heading in any::<i32>(),
            satellites in any::<i32>(),
        ) {
            let report = PositionReport {
                timestamp: UNIX_EPOCH + Duration::from_millis(millis),
                latitude,
                longitude,
                altitude,
                speed,
                heading,
                satellite_count: satellites,
                priority: Priority::High,
            };
            let record = encode_record(&report);
            prop_assert_eq!(record.as_bytes().len(), RECORD_SIZE);
            prop_assert_eq!(RECORD_SIZE, 30);
            prop_assert_eq!(u64::from_be_bytes(record.as_bytes()[0..8].try_into().unwrap()), millis);
        }

        #[test]
        fn coordinates_survive_within_rounding_error(
            latitude in -90.0f64..=90.0,
            longitude in -180.0f64..=180.0,
        ) {
            let mut report = new_york();
            report.latitude = latitude;
            report.longitude = longitude;
            let record = encode_record(&report);
            let b = record.as_bytes();

            let lon = f64::from(read_i32(b, 9)) / COORDINATE_SCALE;
            let lat = f64::from(read_i32(b, 13)) / COORDINATE_SCALE;
            prop_assert!((lon - longitude).abs() <= 5e-8 + f64::EPSILON * 180.0);
            prop_assert!((lat - latitude).abs() <= 5e-8 + f64::EPSILON * 90.0);
        }
    }
}
