//! Mode S / ADS-B decoding and fusion pipeline.
//!
//! The crate turns a raw stream of airborne-surveillance receiver samples
//! into continuous per-aircraft state:
//! 1. Decode 16-bit IQ samples and compute signal power ([`sdr`])
//! 2. Detect Mode S preambles and extract CRC-valid 112-bit frames ([`sdr::demod`])
//! 3. Decode frames into typed messages ([`adsb`])
//! 4. Resolve even/odd CPR position pairs ([`adsb::cpr`])
//! 5. Fuse messages into per-aircraft state with time-based eviction ([`aircraft`])
//!
//! The pipeline is single-threaded and pull-based: each stage only blocks on
//! its upstream reader, and end-of-stream is the sole termination signal.

pub mod adsb;
pub mod aircraft;
pub mod bits;
pub mod bytes;
pub mod config;
pub mod geo;
pub mod replay;
pub mod sdr;

pub use adsb::frame::RawFrame;
pub use adsb::message::Message;
pub use adsb::types::{CallSign, IcaoAddress};
pub use aircraft::registry::AircraftRegistry;
pub use geo::GeoPosition;
pub use sdr::demod::AdsbDemodulator;
