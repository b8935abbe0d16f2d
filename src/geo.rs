//! Geographic positions in T32 fixed-point angular units.
//!
//! A full turn equals 2^32 T32 units, so a 32-bit signed value spans exactly
//! the range (-180°, 180°]. Latitudes are constrained to ±2^30 (±90°).

use serde::Serialize;
use std::fmt;

/// T32 units per turn (2^32).
const T32_PER_TURN: f64 = 4_294_967_296.0;

/// Degrees per T32 unit.
const DEG_PER_T32: f64 = 360.0 / T32_PER_TURN;

/// A longitude/latitude pair in T32 units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GeoPosition {
    longitude_t32: i32,
    latitude_t32: i32,
}

impl GeoPosition {
    /// Builds a position from T32 coordinates.
    ///
    /// # Panics
    /// Panics if the latitude falls outside ±2^30 (±90°).
    pub fn new(longitude_t32: i32, latitude_t32: i32) -> Self {
        assert!(
            Self::is_valid_latitude_t32(latitude_t32),
            "latitude out of range: {latitude_t32}"
        );
        Self { longitude_t32, latitude_t32 }
    }

    /// Whether `latitude_t32` lies within ±2^30 (±90°).
    pub fn is_valid_latitude_t32(latitude_t32: i32) -> bool {
        (-(1 << 30)..=(1 << 30)).contains(&latitude_t32)
    }

    pub fn longitude_t32(&self) -> i32 {
        self.longitude_t32
    }

    pub fn latitude_t32(&self) -> i32 {
        self.latitude_t32
    }

    pub fn longitude_deg(&self) -> f64 {
        f64::from(self.longitude_t32) * DEG_PER_T32
    }

    pub fn latitude_deg(&self) -> f64 {
        f64::from(self.latitude_t32) * DEG_PER_T32
    }
}

impl fmt::Display for GeoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}°, {:.5}°)", self.longitude_deg(), self.latitude_deg())
    }
}

/// Converts an angle in turns within [-0.5, 0.5) to T32 units.
pub(crate) fn t32_from_turn(turn: f64) -> i32 {
    (turn * T32_PER_TURN).round_ties_even() as i64 as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_from_t32() {
        let pos = GeoPosition::new(1 << 30, 1 << 29);
        assert!((pos.longitude_deg() - 90.0).abs() < 1e-9);
        assert!((pos.latitude_deg() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_latitude_bounds_are_inclusive() {
        assert!(GeoPosition::is_valid_latitude_t32(1 << 30));
        assert!(GeoPosition::is_valid_latitude_t32(-(1 << 30)));
        assert!(!GeoPosition::is_valid_latitude_t32((1 << 30) + 1));
    }

    #[test]
    #[should_panic]
    fn test_new_rejects_out_of_range_latitude() {
        GeoPosition::new(0, (1 << 30) + 1);
    }

    #[test]
    fn test_turn_conversion_recenters_nothing() {
        assert_eq!(t32_from_turn(0.25), 1 << 30);
        assert_eq!(t32_from_turn(-0.25), -(1 << 30));
        assert_eq!(t32_from_turn(0.0), 0);
    }
}
