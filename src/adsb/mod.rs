//! Mode S extended-squitter wire format and typed message decoding.

pub mod cpr;
pub mod crc;
pub mod frame;
pub mod message;
pub mod types;

pub use cpr::resolve_position;
pub use frame::RawFrame;
pub use message::{Message, Parity};
pub use types::{CallSign, IcaoAddress};

/// Errors from parsing protocol-level values out of external input.
#[derive(Debug, thiserror::Error)]
pub enum AdsbError {
    #[error("invalid ICAO address: {0:?}")]
    InvalidAddress(String),

    #[error("invalid call sign: {0:?}")]
    InvalidCallSign(String),

    #[error(transparent)]
    InvalidHex(#[from] hex::FromHexError),
}
