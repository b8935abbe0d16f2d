//! Per-aircraft state fusion.
//!
//! Decoded messages flow into an [`registry::AircraftRegistry`], which keeps
//! one [`accumulator::AircraftStateAccumulator`] per ICAO address. The
//! accumulator pairs even and odd position reports and pushes every decoded
//! field into an [`state::AircraftStateSetter`], of which
//! [`state::AircraftState`] is the production implementation.

pub mod accumulator;
pub mod database;
pub mod registry;
pub mod state;

pub use accumulator::AircraftStateAccumulator;
pub use database::{AircraftData, AircraftDatabase, NoDatabase, WakeTurbulenceCategory};
pub use registry::AircraftRegistry;
pub use state::{AircraftState, AircraftStateSetter, TrajectoryPoint};
