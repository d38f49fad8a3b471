//! CRC-16/ARC (also known as CRC-16/IBM)
//!
//! Parameters:
//! - Poly:    0x8005 (reflected 0xA001)
//! - Init:    0x0000
//! - RefIn:   true
//! - RefOut:  true
//! - XorOut:  0x0000
//! - Check:   0xBB3D for `b"123456789"`

const POLYNOMIAL: u16 = 0xA001;

/// Per-byte contribution table, built at compile time
static TABLE: [u16; 256] = build_table();

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u16;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ POLYNOMIAL } else { crc >> 1 };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Compute the CRC-16/ARC of `bytes`
pub fn checksum16(bytes: &[u8]) -> u16 {
    bytes.iter().fold(0u16, |crc, &b| (crc >> 8) ^ TABLE[usize::from(crc as u8 ^ b)])
}
