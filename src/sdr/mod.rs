//! Streaming sample pipeline and Mode S demodulation.
//!
//! Stages, each pulling from the previous:
//! 1. [`samples::SamplesDecoder`] — raw bytes to centered signed samples
//! 2. [`power::PowerComputer`] — quadrature signal power, one value per
//!    two input samples
//! 3. [`window::PowerWindow`] — random access into the last N power samples
//! 4. [`demod::AdsbDemodulator`] — preamble detection, pulse-position bit
//!    decoding, CRC validation

pub mod demod;
pub mod power;
pub mod samples;
pub mod window;

pub use demod::{AdsbDemodulator, DemodulatorStats};
pub use power::PowerComputer;
pub use samples::SamplesDecoder;
pub use window::PowerWindow;
