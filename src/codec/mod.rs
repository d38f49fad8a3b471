//! Codec 8 wire encoding
//!
//! Everything here is a pure function of its input. The session composes
//! [`encode_record`] and [`build_packet`] for every send, and uses the
//! handshake helpers for the identifier exchange and acknowledgments.

pub mod crc;
pub mod handshake;
pub mod packet;
pub mod record;

/// Codec identifier byte for Codec 8
pub const CODEC_8: u8 = 0x08;

/// Fixed-point scale of the coordinate fields
pub const COORDINATE_SCALE: f64 = 10_000_000.0;

pub use crc::checksum16;
pub use handshake::{AuthResponse, decode_ack, encode_auth_request};
pub use packet::{Packet, build_packet};
pub use record::{EncodedRecord, RECORD_SIZE, encode_record};
