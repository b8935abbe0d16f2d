//! Mutable per-aircraft state.
//!
//! [`AircraftStateSetter`] is the capability the accumulator writes through;
//! [`AircraftState`] is the production implementation the registry stores and
//! serializes for presentation.

use serde::Serialize;

use crate::adsb::types::{CallSign, IcaoAddress};
use crate::geo::GeoPosition;

use super::database::AircraftData;

/// Sink for decoded message fields.
///
/// The accumulator calls `set_last_message_timestamp_ns` before the other
/// setters for each message, so implementations can associate every update
/// with its reception time.
pub trait AircraftStateSetter {
    fn set_last_message_timestamp_ns(&mut self, timestamp_ns: u64);
    fn set_category(&mut self, category: u8);
    fn set_call_sign(&mut self, call_sign: CallSign);
    fn set_position(&mut self, position: GeoPosition);
    fn set_altitude(&mut self, altitude_ft: i32);
    fn set_velocity(&mut self, speed_kts: f64);
    fn set_track_or_heading(&mut self, track_deg: f64);
}

/// One logged point of an aircraft's path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    pub position: GeoPosition,
    pub altitude_ft: Option<i32>,
}

/// Accumulated state of one aircraft, with a trajectory log.
#[derive(Debug, Clone, Serialize)]
pub struct AircraftState {
    pub icao_address: IcaoAddress,
    /// Static register data, when the address was found at first contact.
    pub data: Option<AircraftData>,
    pub last_message_timestamp_ns: u64,
    pub category: Option<u8>,
    pub call_sign: Option<CallSign>,
    pub position: Option<GeoPosition>,
    pub altitude_ft: Option<i32>,
    pub speed_kts: Option<f64>,
    pub track_deg: Option<f64>,
    pub trajectory: Vec<TrajectoryPoint>,
    #[serde(skip)]
    last_trajectory_timestamp_ns: Option<u64>,
}

impl AircraftState {
    pub fn new(icao_address: IcaoAddress, data: Option<AircraftData>) -> Self {
        Self {
            icao_address,
            data,
            last_message_timestamp_ns: 0,
            category: None,
            call_sign: None,
            position: None,
            altitude_ft: None,
            speed_kts: None,
            track_deg: None,
            trajectory: Vec::new(),
            last_trajectory_timestamp_ns: None,
        }
    }
}

impl AircraftStateSetter for AircraftState {
    fn set_last_message_timestamp_ns(&mut self, timestamp_ns: u64) {
        self.last_message_timestamp_ns = timestamp_ns;
    }

    fn set_category(&mut self, category: u8) {
        self.category = Some(category);
    }

    fn set_call_sign(&mut self, call_sign: CallSign) {
        self.call_sign = Some(call_sign);
    }

    fn set_position(&mut self, position: GeoPosition) {
        self.position = Some(position);
        // Log a new point whenever the position moves.
        if self.trajectory.last().map(|p| p.position) != Some(position) {
            self.trajectory.push(TrajectoryPoint {
                position,
                altitude_ft: self.altitude_ft,
            });
            self.last_trajectory_timestamp_ns = Some(self.last_message_timestamp_ns);
        }
    }

    fn set_altitude(&mut self, altitude_ft: i32) {
        self.altitude_ft = Some(altitude_ft);
        // An altitude from the same message as the last logged point refines
        // that point rather than waiting for the next position.
        if self.last_trajectory_timestamp_ns == Some(self.last_message_timestamp_ns) {
            if let Some(last) = self.trajectory.last_mut() {
                last.altitude_ft = Some(altitude_ft);
            }
        }
    }

    fn set_velocity(&mut self, speed_kts: f64) {
        self.speed_kts = Some(speed_kts);
    }

    fn set_track_or_heading(&mut self, track_deg: f64) {
        self.track_deg = Some(track_deg);
    }
}
