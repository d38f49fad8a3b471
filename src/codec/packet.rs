//! AVL data packet framing
//!
//! ## Packet Layout
//!
//! ```text
//! 00 00 00 00 | u32 payload_len | 08 | n | record × n | n | u32 crc
//!             |<------------- payload ---------------->|
//! ```
//!
//! `payload_len` counts the codec id through the trailing record count and the
//! CRC-16/ARC covers the same span. The CRC field is 4 bytes wide with the top
//! two bytes always zero.

use super::crc::checksum16;
use super::record::EncodedRecord;
use super::CODEC_8;

pub const PREAMBLE_SIZE: usize = 4;
pub const LENGTH_SIZE: usize = 4;
pub const CRC_SIZE: usize = 4;
pub const HEADER_SIZE: usize = PREAMBLE_SIZE + LENGTH_SIZE;

/// Protocol limit on records per packet
pub const MAX_RECORDS: usize = u8::MAX as usize;

/// A framed packet ready for the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    bytes: Vec<u8>,
}

impl Packet {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Value of the length field
    pub fn payload_len(&self) -> u32 {
        u32::from_be_bytes(self.field(PREAMBLE_SIZE))
    }

    /// Codec id through the trailing record count
    pub fn payload(&self) -> &[u8] {
        &self.bytes[HEADER_SIZE..self.bytes.len() - CRC_SIZE]
    }

    pub fn codec_id(&self) -> u8 {
        self.bytes[HEADER_SIZE]
    }

    pub fn record_count(&self) -> u8 {
        self.bytes[HEADER_SIZE + 1]
    }

    /// Value of the checksum field
    pub fn crc(&self) -> u32 {
        u32::from_be_bytes(self.field(self.bytes.len() - CRC_SIZE))
    }

    fn field(&self, offset: usize) -> [u8; 4] {
        let mut field = [0u8; 4];
        field.copy_from_slice(&self.bytes[offset..offset + 4]);
        field
    }
}

impl AsRef<[u8]> for Packet {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Frame records into a Codec 8 packet
///
/// The record count is written as one byte; callers stay within
/// [`MAX_RECORDS`]. Larger slices wrap the count like any other field.
pub fn build_packet(records: &[EncodedRecord]) -> Packet {
    let count = records.len() as u8;
    let records_len: usize = records.iter().map(EncodedRecord::len).sum();

    let mut payload = Vec::with_capacity(records_len + 3);
    payload.push(CODEC_8);
    payload.push(count);
    for record in records {
        payload.extend_from_slice(record.as_bytes());
    }
    payload.push(count);

    let crc = u32::from(checksum16(&payload));

    let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len() + CRC_SIZE);
    bytes.extend_from_slice(&[0u8; PREAMBLE_SIZE]);
    bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    bytes.extend_from_slice(&payload);
    bytes.extend_from_slice(&crc.to_be_bytes());

    Packet { bytes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_record;
    use crate::codec::record::RECORD_SIZE;
    use crate::types::{PositionReport, Priority};
    use proptest::prelude::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn report(millis: u64, latitude: f64, longitude: f64) -> PositionReport {
        PositionReport {
            timestamp: UNIX_EPOCH + Duration::from_millis(millis),
            latitude,
            longitude,
            altitude: 100,
            speed: 0,
            heading: 0,
            satellite_count: 12,
            priority: Priority::Low,
        }
    }

    #[test]
    fn single_record_packet_layout() {
        let record = encode_record(&report(1_700_000_000_000, 40.7128, -74.0060));
        let packet = build_packet(&[record]);

        assert_eq!(packet.len(), HEADER_SIZE + 33 + CRC_SIZE);
        assert_eq!(&packet.as_bytes()[0..4], &[0, 0, 0, 0]);
        assert_eq!(packet.payload_len(), 33);
        assert_eq!(packet.codec_id(), 0x08);
        assert_eq!(packet.record_count(), 1);
        assert_eq!(packet.payload()[2..2 + RECORD_SIZE], *record.as_bytes());
        assert_eq!(*packet.payload().last().unwrap(), 1);
        assert_eq!(packet.crc(), u32::from(checksum16(packet.payload())));
        assert_eq!(packet.crc() >> 16, 0);
    }

    #[test]
    fn empty_packet_still_frames() {
        let packet = build_packet(&[]);
        assert_eq!(packet.payload(), &[0x08, 0x00, 0x00]);
        assert_eq!(packet.payload_len(), 3);
        assert_eq!(packet.crc(), u32::from(checksum16(&[0x08, 0x00, 0x00])));
    }

    proptest! {
        #[test]
        fn length_and_crc_fields_match_payload(
            fixes in prop::collection::vec(
                (0u64..4_102_444_800_000, -90.0f64..=90.0, -180.0f64..=180.0),
                1..20,
            )
        ) {
            let records: Vec<_> = fixes
                .iter()
                .map(|&(millis, lat, lon)| encode_record(&report(millis, lat, lon)))
                .collect();
            let packet = build_packet(&records);

            let expected_len = 2 + records.len() * RECORD_SIZE + 1;
            prop_assert_eq!(packet.payload_len() as usize, expected_len);
            prop_assert_eq!(packet.payload().len(), expected_len);
            prop_assert_eq!(packet.record_count() as usize, records.len());
            prop_assert_eq!(packet.crc(), u32::from(checksum16(packet.payload())));
        }
    }
}
