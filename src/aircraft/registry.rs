//! Registry of all aircraft currently being tracked.

use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use crate::adsb::message::Message;
use crate::adsb::types::IcaoAddress;

use super::accumulator::AircraftStateAccumulator;
use super::database::AircraftDatabase;
use super::state::AircraftState;

/// An aircraft silent for this long is dropped from the registry.
const AIRCRAFT_TIMEOUT_NS: u64 = 60_000_000_000;

/// Keyed accumulation of aircraft state with time-based eviction.
///
/// Timestamps come from the message stream, so eviction is driven by stream
/// time, not wall-clock time.
pub struct AircraftRegistry<D> {
    database: D,
    aircraft: HashMap<IcaoAddress, AircraftStateAccumulator<AircraftState>>,
    positioned: HashSet<IcaoAddress>,
    latest_timestamp_ns: u64,
}

impl<D: AircraftDatabase> AircraftRegistry<D> {
    pub fn new(database: D) -> Self {
        Self {
            database,
            aircraft: HashMap::new(),
            positioned: HashSet::new(),
            latest_timestamp_ns: 0,
        }
    }

    /// Folds one decoded message into the registry, then evicts aircraft not
    /// heard from within the timeout.
    ///
    /// A database lookup failure for a first-contact address propagates; no
    /// entry is created and accumulated state is untouched.
    pub fn update_with(&mut self, message: &Message) -> std::io::Result<()> {
        let address = message.icao_address();

        let accumulator = match self.aircraft.entry(address) {
            std::collections::hash_map::Entry::Occupied(entry) => entry.into_mut(),
            std::collections::hash_map::Entry::Vacant(entry) => {
                let data = self.database.find(address)?;
                match &data {
                    Some(data) => debug!(%address, registration = %data.registration,
                        "new aircraft"),
                    None => debug!(%address, "new aircraft, not in database"),
                }
                entry.insert(AircraftStateAccumulator::new(AircraftState::new(
                    address, data,
                )))
            }
        };

        if accumulator.update(message) && self.positioned.insert(address) {
            info!(%address, "aircraft positioned");
        }

        self.latest_timestamp_ns = self.latest_timestamp_ns.max(message.timestamp_ns());
        self.purge_stale();
        Ok(())
    }

    fn purge_stale(&mut self) {
        let deadline = self.latest_timestamp_ns;
        let stale: Vec<IcaoAddress> = self
            .aircraft
            .iter()
            .filter(|(_, acc)| {
                deadline - acc.state().last_message_timestamp_ns >= AIRCRAFT_TIMEOUT_NS
            })
            .map(|(&address, _)| address)
            .collect();

        for address in stale {
            self.aircraft.remove(&address);
            self.positioned.remove(&address);
            debug!(%address, "aircraft evicted");
        }
    }

    /// All tracked aircraft, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &AircraftState> {
        self.aircraft.values().map(AircraftStateAccumulator::state)
    }

    pub fn state_of(&self, address: IcaoAddress) -> Option<&AircraftState> {
        self.aircraft.get(&address).map(AircraftStateAccumulator::state)
    }

    /// Number of tracked aircraft.
    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }

    /// Number of aircraft with a resolved position.
    pub fn positioned_count(&self) -> usize {
        self.positioned.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::accumulator::tests::{
        message, EVEN_POSITION_FRAME, ODD_POSITION_FRAME,
    };
    use crate::aircraft::database::{
        AircraftData, AircraftDatabase, NoDatabase, WakeTurbulenceCategory,
    };

    const IDENTIFICATION_FRAME: &str = "8D4840D6202CC371C32CE0576098";

    struct OneAircraftDb;

    impl AircraftDatabase for OneAircraftDb {
        fn find(&self, address: IcaoAddress) -> std::io::Result<Option<AircraftData>> {
            Ok((address == IcaoAddress::new(0x4840D6)).then(|| AircraftData {
                registration: "PH-BXO".into(),
                type_designator: "B739".into(),
                model: "BOEING 737-900".into(),
                description: "L2J".into(),
                wake_turbulence_category: WakeTurbulenceCategory::Medium,
            }))
        }
    }

    struct FailingDb;

    impl AircraftDatabase for FailingDb {
        fn find(&self, _: IcaoAddress) -> std::io::Result<Option<AircraftData>> {
            Err(std::io::Error::other("database unavailable"))
        }
    }

    #[test]
    fn test_tracks_aircraft_and_resolves_position() {
        let mut registry = AircraftRegistry::new(NoDatabase);
        registry.update_with(&message(ODD_POSITION_FRAME, 0)).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.positioned_count(), 0);

        registry.update_with(&message(EVEN_POSITION_FRAME, 1_000_000_000)).unwrap();
        assert_eq!(registry.positioned_count(), 1);

        let state = registry.state_of(IcaoAddress::new(0x40621D)).unwrap();
        let position = state.position.unwrap();
        assert!((position.latitude_deg() - 52.2572).abs() < 1e-3);
        assert!((position.longitude_deg() - 3.9197).abs() < 1e-3);
        assert_eq!(state.altitude_ft, Some(38_000));
    }

    #[test]
    fn test_attaches_database_record_at_first_contact() {
        let mut registry = AircraftRegistry::new(OneAircraftDb);
        registry.update_with(&message(IDENTIFICATION_FRAME, 0)).unwrap();

        let state = registry.state_of(IcaoAddress::new(0x4840D6)).unwrap();
        let data = state.data.as_ref().unwrap();
        assert_eq!(data.registration, "PH-BXO");
        assert_eq!(state.call_sign.as_ref().unwrap().as_str(), "KLM1023");
    }

    #[test]
    fn test_database_failure_propagates_without_creating_entry() {
        let mut registry = AircraftRegistry::new(FailingDb);
        assert!(registry.update_with(&message(IDENTIFICATION_FRAME, 0)).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_evicts_silent_aircraft() {
        let mut registry = AircraftRegistry::new(NoDatabase);
        registry.update_with(&message(ODD_POSITION_FRAME, 0)).unwrap();
        registry.update_with(&message(EVEN_POSITION_FRAME, 1_000_000_000)).unwrap();
        assert_eq!(registry.positioned_count(), 1);

        // A different aircraft 60 s later pushes stream time past the timeout.
        registry
            .update_with(&message(IDENTIFICATION_FRAME, 1_000_000_000 + AIRCRAFT_TIMEOUT_NS))
            .unwrap();

        assert!(registry.state_of(IcaoAddress::new(0x40621D)).is_none());
        assert_eq!(registry.positioned_count(), 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_recent_aircraft_survive_purge() {
        let mut registry = AircraftRegistry::new(NoDatabase);
        registry.update_with(&message(ODD_POSITION_FRAME, 0)).unwrap();
        registry
            .update_with(&message(IDENTIFICATION_FRAME, AIRCRAFT_TIMEOUT_NS - 1))
            .unwrap();
        assert_eq!(registry.len(), 2);
    }
}
