//! Immutable byte sequences with big-endian multi-byte reads and hex
//! (de)serialization.

use std::fmt;

/// An immutable, fixed-length byte sequence.
///
/// The bytes are copied on construction; equality and hashing are structural.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ByteString {
    bytes: Box<[u8]>,
}

impl ByteString {
    /// Copies `bytes` into a new sequence.
    pub fn new(bytes: &[u8]) -> Self {
        Self { bytes: bytes.into() }
    }

    /// Parses an even-length hexadecimal string (either case) into bytes.
    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        Ok(Self { bytes: hex::decode(hex)?.into_boxed_slice() })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The unsigned byte at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn byte_at(&self, index: usize) -> u8 {
        self.bytes[index]
    }

    /// Packs the bytes in `[from, to)` big-endian into a 64-bit value.
    ///
    /// # Panics
    /// Panics if the range is invalid or spans more than 8 bytes.
    pub fn bytes_in_range(&self, from: usize, to: usize) -> u64 {
        assert!(from <= to && to <= self.bytes.len(), "byte range out of bounds");
        assert!(to - from <= 8, "byte range spans more than 8 bytes");
        self.bytes[from..to]
            .iter()
            .fold(0u64, |word, &b| (word << 8) | u64::from(b))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(&self.bytes))
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteString({self})")
    }
}
