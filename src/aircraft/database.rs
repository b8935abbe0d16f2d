//! Static aircraft reference data.
//!
//! Fixed facts about an airframe keyed by its ICAO address, looked up once
//! when an aircraft first appears. The trait keeps the lookup source
//! pluggable; the registry only needs `find`.

use serde::{Deserialize, Serialize};

use crate::adsb::types::IcaoAddress;

/// Wake turbulence category from the aircraft register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WakeTurbulenceCategory {
    Light,
    Medium,
    Heavy,
    Unknown,
}

impl WakeTurbulenceCategory {
    /// Maps a register code (`L`, `M`, `H`) to a category; anything else is
    /// `Unknown`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "L" => Self::Light,
            "M" => Self::Medium,
            "H" => Self::Heavy,
            _ => Self::Unknown,
        }
    }
}

/// Fixed registration data for one airframe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftData {
    pub registration: String,
    pub type_designator: String,
    pub model: String,
    pub description: String,
    pub wake_turbulence_category: WakeTurbulenceCategory,
}

/// Lookup boundary for static aircraft data.
pub trait AircraftDatabase {
    /// Finds the record for `address`, `Ok(None)` when the address is not
    /// registered.
    fn find(&self, address: IcaoAddress) -> std::io::Result<Option<AircraftData>>;
}

/// Database that knows no aircraft.
pub struct NoDatabase;

impl AircraftDatabase for NoDatabase {
    fn find(&self, _address: IcaoAddress) -> std::io::Result<Option<AircraftData>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wake_turbulence_codes() {
        assert_eq!(WakeTurbulenceCategory::from_code("L"), WakeTurbulenceCategory::Light);
        assert_eq!(WakeTurbulenceCategory::from_code("M"), WakeTurbulenceCategory::Medium);
        assert_eq!(WakeTurbulenceCategory::from_code("H"), WakeTurbulenceCategory::Heavy);
        assert_eq!(WakeTurbulenceCategory::from_code(""), WakeTurbulenceCategory::Unknown);
        assert_eq!(WakeTurbulenceCategory::from_code("X"), WakeTurbulenceCategory::Unknown);
    }

    #[test]
    fn test_no_database_finds_nothing() {
        let found = NoDatabase.find(IcaoAddress::new(0x4840D6)).unwrap();
        assert!(found.is_none());
    }
}
