//! Fixed-width bit-field extraction from 64-bit words.
//!
//! Bit 0 is the least significant bit. Out-of-domain arguments are
//! precondition violations and panic.

/// Extract the `size`-bit unsigned field of `word` starting at bit `start`.
///
/// # Panics
/// Panics unless `1 <= size <= 31` and `start + size <= 64`.
pub fn extract_unsigned(word: u64, start: u32, size: u32) -> u32 {
    assert!((1..=31).contains(&size), "field size out of range: {size}");
    assert!(start <= 64 - size, "field [{start}, {start}+{size}) out of range");
    ((word >> start) & ((1 << size) - 1)) as u32
}

/// Test the bit of `word` at `index`.
///
/// # Panics
/// Panics unless `index < 64`.
pub fn test_bit(word: u64, index: u32) -> bool {
    assert!(index < 64, "bit index out of range: {index}");
    (word >> index) & 1 == 1
}
