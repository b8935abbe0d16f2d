//! Validated 112-bit Mode S frames.

use crate::bytes::ByteString;

use super::crc;
use super::types::IcaoAddress;

/// Length of a long Mode S frame in bytes.
pub const FRAME_BYTES: usize = 14;

/// Downlink format carrying ADS-B extended squitters.
pub const DF_EXTENDED_SQUITTER: u8 = 17;

/// A CRC-valid 14-byte Mode S frame with its reception timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    timestamp_ns: u64,
    bytes: ByteString,
}

impl RawFrame {
    /// Wraps `bytes` as a frame received at `timestamp_ns`.
    ///
    /// Returns `None` unless `bytes` is exactly 14 bytes with a CRC-24
    /// residue of 0.
    pub fn new(timestamp_ns: u64, bytes: ByteString) -> Option<Self> {
        if bytes.len() != FRAME_BYTES || crc::mode_s().crc(bytes.as_slice()) != 0 {
            return None;
        }
        Some(Self { timestamp_ns, bytes })
    }

    /// Nanoseconds since the start of the sample stream.
    pub fn timestamp_ns(&self) -> u64 {
        self.timestamp_ns
    }

    /// Downlink format: the top 5 bits of byte 0.
    pub fn downlink_format(&self) -> u8 {
        self.bytes.byte_at(0) >> 3
    }

    /// ICAO address from bytes 1-3.
    pub fn icao_address(&self) -> IcaoAddress {
        IcaoAddress::new(self.bytes.bytes_in_range(1, 4) as u32)
    }

    /// The 56-bit ME payload, bytes 4-10 packed big-endian.
    pub fn payload(&self) -> u64 {
        self.bytes.bytes_in_range(4, 11)
    }

    /// Message type code: the top 5 bits of the ME payload.
    pub fn type_code(&self) -> u8 {
        (self.payload() >> 51) as u8
    }

    pub fn bytes(&self) -> &ByteString {
        &self.bytes
    }
}
