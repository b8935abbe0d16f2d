//! Table-driven CRC-24 checksum for Mode S messages.

use std::sync::OnceLock;

/// CRC-24 generator polynomial used by ADS-B.
pub const GENERATOR: u32 = 0xFFF409;

const CRC_MASK: u32 = 0xFF_FFFF;
const TOP_BIT: u32 = 0x80_0000;

/// A CRC-24 engine with a precomputed 256-entry division table.
pub struct Crc24 {
    table: [u32; 256],
}

impl Crc24 {
    /// Builds an engine for a 24-bit `generator` polynomial.
    pub fn new(generator: u32) -> Self {
        let mut table = [0u32; 256];
        for (byte, entry) in table.iter_mut().enumerate() {
            // Simulate 8 steps of polynomial long division for this
            // candidate leading byte.
            let mut crc = (byte as u32) << 16;
            for _ in 0..8 {
                if crc & TOP_BIT != 0 {
                    crc = (crc << 1) ^ generator;
                } else {
                    crc <<= 1;
                }
            }
            *entry = crc & CRC_MASK;
        }
        Self { table }
    }

    /// Computes the 24-bit CRC residue over `bytes`.
    ///
    /// A valid frame (payload followed by its 3-byte checksum) has residue 0.
    pub fn crc(&self, bytes: &[u8]) -> u32 {
        let mut crc = 0u32;
        for &byte in bytes {
            crc = ((crc << 8) | u32::from(byte)) ^ self.table[(crc >> 16) as usize & 0xFF];
            crc &= CRC_MASK;
        }
        crc
    }

    /// Computes the checksum to transmit after `payload`, i.e. the value
    /// whose 3 big-endian bytes bring the residue of the whole frame to 0.
    pub fn checksum(&self, payload: &[u8]) -> u32 {
        let mut crc = self.crc(payload);
        for _ in 0..3 {
            crc = (crc << 8) ^ self.table[(crc >> 16) as usize & 0xFF];
            crc &= CRC_MASK;
        }
        crc
    }
}

/// The process-wide engine for the ADS-B generator polynomial.
pub fn mode_s() -> &'static Crc24 {
    static MODE_S: OnceLock<Crc24> = OnceLock::new();
    MODE_S.get_or_init(|| Crc24::new(GENERATOR))
}
