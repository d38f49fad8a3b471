//! Handshake and acknowledgment messages
//!
//! ```text
//! device -> collector   u16 len (15) | IMEI ASCII digits
//! collector -> device   01 accepted, anything else rejected
//! device -> collector   AVL packet
//! collector -> device   u32 accepted record count
//! ```

use crate::types::DeviceId;

/// Authentication response byte that accepts the device
pub const AUTH_ACCEPTED: u8 = 0x01;

pub const AUTH_RESPONSE_SIZE: usize = 1;
pub const ACK_SIZE: usize = 4;

/// Collector verdict on the identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthResponse {
    Accepted,
    Rejected(u8),
}

impl AuthResponse {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            AUTH_ACCEPTED => AuthResponse::Accepted,
            other => AuthResponse::Rejected(other),
        }
    }

    pub fn is_accepted(self) -> bool {
        matches!(self, AuthResponse::Accepted)
    }
}

/// Length-prefixed identifier message
pub fn encode_auth_request(device_id: &DeviceId) -> Vec<u8> {
    let id = device_id.as_bytes();
    let mut msg = Vec::with_capacity(2 + id.len());
    msg.extend_from_slice(&(id.len() as u16).to_be_bytes());
    msg.extend_from_slice(id);
    msg
}

/// Number of records the collector accepted
pub fn decode_ack(bytes: [u8; ACK_SIZE]) -> u32 {
    u32::from_be_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_request_is_length_prefixed() {
        let id = DeviceId::new("123456789012345").unwrap();
        let msg = encode_auth_request(&id);
        assert_eq!(msg.len(), 17);
        assert_eq!(&msg[..2], &[0x00, 0x0F]);
        assert_eq!(&msg[2..], b"123456789012345");
    }

    #[test]
    fn only_one_accepts() {
        assert_eq!(AuthResponse::from_byte(0x01), AuthResponse::Accepted);
        assert_eq!(AuthResponse::from_byte(0x00), AuthResponse::Rejected(0x00));
        assert!(!AuthResponse::from_byte(0xFF).is_accepted());
    }

    #[test]
    fn ack_is_big_endian_count() {
        assert_eq!(decode_ack([0x00, 0x00, 0x00, 0x01]), 1);
        assert_eq!(decode_ack([0x00, 0x00, 0x01, 0x00]), 256);
    }
}
