//! Message-to-state accumulation for a single aircraft.

use tracing::trace;

use crate::adsb::cpr;
use crate::adsb::message::{AirbornePositionMessage, Message, Parity};

use super::state::AircraftStateSetter;

/// Maximum reception gap between the even and odd reports of a CPR pair.
const POSITION_PAIR_WINDOW_NS: u64 = 10_000_000_000;

/// Accumulates decoded messages into a state sink, pairing even and odd
/// position reports to resolve absolute positions.
pub struct AircraftStateAccumulator<S> {
    state: S,
    last_even: Option<AirbornePositionMessage>,
    last_odd: Option<AirbornePositionMessage>,
}

impl<S: AircraftStateSetter> AircraftStateAccumulator<S> {
    pub fn new(state: S) -> Self {
        Self { state, last_even: None, last_odd: None }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Folds one decoded message into the state.
    ///
    /// Returns whether an absolute position was resolved by this update.
    pub fn update(&mut self, message: &Message) -> bool {
        self.state.set_last_message_timestamp_ns(message.timestamp_ns());
        match message {
            Message::Identification(m) => {
                self.state.set_category(m.category);
                self.state.set_call_sign(m.call_sign.clone());
                false
            }
            Message::AirbornePosition(m) => {
                self.state.set_altitude(m.altitude_ft);
                match m.parity {
                    Parity::Even => self.last_even = Some(m.clone()),
                    Parity::Odd => self.last_odd = Some(m.clone()),
                }
                self.try_resolve_position(m.parity)
            }
            Message::AirborneVelocity(m) => {
                self.state.set_velocity(m.speed_kts);
                self.state.set_track_or_heading(m.track_deg);
                false
            }
        }
    }

    fn try_resolve_position(&mut self, most_recent: Parity) -> bool {
        let (Some(even), Some(odd)) = (&self.last_even, &self.last_odd) else {
            return false;
        };
        if even.timestamp_ns.abs_diff(odd.timestamp_ns) > POSITION_PAIR_WINDOW_NS {
            return false;
        }

        match cpr::resolve_position(even.x, even.y, odd.x, odd.y, most_recent) {
            Some(position) => {
                trace!(address = %even.icao_address, %position, "position resolved");
                self.state.set_position(position);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::adsb::frame::RawFrame;
    use crate::adsb::types::CallSign;
    use crate::bytes::ByteString;
    use crate::geo::GeoPosition;

    pub(crate) const EVEN_POSITION_FRAME: &str = "8D40621D58C382D690C8AC2863A7";
    pub(crate) const ODD_POSITION_FRAME: &str = "8D40621D58C386435CC412692AD6";

    /// Setter double that just records what was pushed into it.
    #[derive(Default)]
    pub(crate) struct RecordingSetter {
        pub timestamps: Vec<u64>,
        pub category: Option<u8>,
        pub call_sign: Option<CallSign>,
        pub positions: Vec<GeoPosition>,
        pub altitudes: Vec<i32>,
        pub speed_kts: Option<f64>,
        pub track_deg: Option<f64>,
    }

    impl AircraftStateSetter for RecordingSetter {
        fn set_last_message_timestamp_ns(&mut self, timestamp_ns: u64) {
            self.timestamps.push(timestamp_ns);
        }
        fn set_category(&mut self, category: u8) {
            self.category = Some(category);
        }
        fn set_call_sign(&mut self, call_sign: CallSign) {
            self.call_sign = Some(call_sign);
        }
        fn set_position(&mut self, position: GeoPosition) {
            self.positions.push(position);
        }
        fn set_altitude(&mut self, altitude_ft: i32) {
            self.altitudes.push(altitude_ft);
        }
        fn set_velocity(&mut self, speed_kts: f64) {
            self.speed_kts = Some(speed_kts);
        }
        fn set_track_or_heading(&mut self, track_deg: f64) {
            self.track_deg = Some(track_deg);
        }
    }

    pub(crate) fn message(hex: &str, timestamp_ns: u64) -> Message {
        let frame = RawFrame::new(timestamp_ns, ByteString::from_hex(hex).unwrap())
            .expect("valid frame");
        Message::decode(&frame).expect("decodable message")
    }

    #[test]
    fn test_single_parity_never_resolves() {
        let mut acc = AircraftStateAccumulator::new(RecordingSetter::default());
        assert!(!acc.update(&message(ODD_POSITION_FRAME, 0)));
        assert!(!acc.update(&message(ODD_POSITION_FRAME, 1_000_000_000)));
        assert!(acc.state().positions.is_empty());
        assert_eq!(acc.state().altitudes.len(), 2);
    }

    #[test]
    fn test_even_odd_pair_resolves_position() {
        let mut acc = AircraftStateAccumulator::new(RecordingSetter::default());
        assert!(!acc.update(&message(ODD_POSITION_FRAME, 0)));
        assert!(acc.update(&message(EVEN_POSITION_FRAME, 1_000_000_000)));

        let position = acc.state().positions[0];
        assert!((position.latitude_deg() - 52.2572).abs() < 1e-3);
        assert!((position.longitude_deg() - 3.9197).abs() < 1e-3);
    }

    #[test]
    fn test_stale_pair_does_not_resolve() {
        let mut acc = AircraftStateAccumulator::new(RecordingSetter::default());
        assert!(!acc.update(&message(ODD_POSITION_FRAME, 0)));
        assert!(!acc.update(&message(EVEN_POSITION_FRAME, POSITION_PAIR_WINDOW_NS + 1)));
        assert!(acc.state().positions.is_empty());
    }

    #[test]
    fn test_pair_at_exact_window_boundary_resolves() {
        let mut acc = AircraftStateAccumulator::new(RecordingSetter::default());
        acc.update(&message(ODD_POSITION_FRAME, 0));
        assert!(acc.update(&message(EVEN_POSITION_FRAME, POSITION_PAIR_WINDOW_NS)));
    }

    #[test]
    fn test_identification_and_velocity_fill_scalars() {
        let mut acc = AircraftStateAccumulator::new(RecordingSetter::default());
        acc.update(&message("8D4840D6202CC371C32CE0576098", 5));
        acc.update(&message("8D485020994409940838175B284F", 6));

        let state = acc.state();
        assert_eq!(state.timestamps, vec![5, 6]);
        assert_eq!(state.category, Some(0xA0));
        assert_eq!(state.call_sign.as_ref().map(CallSign::as_str), Some("KLM1023"));
        assert!((state.speed_kts.unwrap() - 159.20).abs() < 0.01);
        assert!((state.track_deg.unwrap() - 182.88).abs() < 0.01);
    }

    #[test]
    fn test_altitude_lands_before_position() {
        // A resolving position message must push altitude first so the
        // trajectory point can carry it.
        struct OrderRecorder {
            altitude_seen: bool,
            position_after_altitude: bool,
        }
        impl AircraftStateSetter for OrderRecorder {
            fn set_last_message_timestamp_ns(&mut self, _: u64) {}
            fn set_category(&mut self, _: u8) {}
            fn set_call_sign(&mut self, _: CallSign) {}
            fn set_position(&mut self, _: GeoPosition) {
                self.position_after_altitude = self.altitude_seen;
            }
            fn set_altitude(&mut self, _: i32) {
                self.altitude_seen = true;
            }
            fn set_velocity(&mut self, _: f64) {}
            fn set_track_or_heading(&mut self, _: f64) {}
        }

        let recorder = OrderRecorder { altitude_seen: false, position_after_altitude: false };
        let mut acc = AircraftStateAccumulator::new(recorder);
        acc.update(&message(ODD_POSITION_FRAME, 0));
        acc.update(&message(EVEN_POSITION_FRAME, 1));
        assert!(acc.state().position_after_altitude);
    }
}
