//! Validated protocol-level identifier types.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::AdsbError;

/// A 24-bit ICAO aircraft address, rendered as 6 uppercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IcaoAddress(u32);

impl IcaoAddress {
    /// Builds an address from a 24-bit value.
    ///
    /// # Panics
    /// Panics if `address` exceeds 24 bits.
    pub fn new(address: u32) -> Self {
        assert!(address <= 0xFF_FFFF, "ICAO address exceeds 24 bits: {address:#X}");
        Self(address)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for IcaoAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}", self.0)
    }
}

impl FromStr for IcaoAddress {
    type Err = AdsbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 6 {
            return Err(AdsbError::InvalidAddress(s.to_string()));
        }
        u32::from_str_radix(s, 16)
            .map(Self)
            .map_err(|_| AdsbError::InvalidAddress(s.to_string()))
    }
}

impl Serialize for IcaoAddress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A flight call sign: at most 8 characters from `[A-Z0-9 ]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CallSign(String);

impl CallSign {
    pub fn new(call_sign: &str) -> Result<Self, AdsbError> {
        let valid = call_sign.len() <= 8
            && call_sign
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b' ');
        if valid {
            Ok(Self(call_sign.to_string()))
        } else {
            Err(AdsbError::InvalidCallSign(call_sign.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
