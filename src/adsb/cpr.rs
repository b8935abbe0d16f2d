//! Compact Position Reporting: global position recovery from an even/odd
//! pair of locally-encoded reports.
//!
//! All angles are computed in turns. Latitude zone counts are fixed at 60
//! (even) and 59 (odd); the longitude zone count depends on the resolved
//! latitude. Any inconsistency (zone mismatch, out-of-range latitude)
//! suppresses the position rather than failing.

use std::f64::consts::TAU;

use crate::geo::{t32_from_turn, GeoPosition};

use super::message::Parity;

/// Latitude zone count for even frames.
const LAT_ZONES_EVEN: f64 = 60.0;
/// Latitude zone count for odd frames.
const LAT_ZONES_ODD: f64 = 59.0;

/// Resolves an absolute position from an even report `(x0, y0)` and an odd
/// report `(x1, y1)`, both with coordinates in [0, 1).
///
/// `most_recent` selects which report's zone geometry and coordinates are
/// used as the reference, and therefore which report the resolved position
/// corresponds to.
pub fn resolve_position(
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    most_recent: Parity,
) -> Option<GeoPosition> {
    // Latitude zone index, normalized into the reference frame's zone range.
    let z_lat = (y0 * LAT_ZONES_ODD - y1 * LAT_ZONES_EVEN).round_ties_even();
    let z_lat_even = if z_lat < 0.0 { z_lat + LAT_ZONES_EVEN } else { z_lat };
    let z_lat_odd = if z_lat < 0.0 { z_lat + LAT_ZONES_ODD } else { z_lat };
    let lat_even = (z_lat_even + y0) / LAT_ZONES_EVEN;
    let lat_odd = (z_lat_odd + y1) / LAT_ZONES_ODD;

    // Both candidate latitudes must agree on the longitude zone count.
    let zones = lon_zone_count(lat_even);
    if zones != lon_zone_count(lat_odd) {
        return None;
    }

    let lat_turn = recenter(match most_recent {
        Parity::Even => lat_even,
        Parity::Odd => lat_odd,
    });
    let lat_t32 = t32_from_turn(lat_turn);
    if !GeoPosition::is_valid_latitude_t32(lat_t32) {
        return None;
    }

    let lon_turn = if zones == 1 {
        match most_recent {
            Parity::Even => x0,
            Parity::Odd => x1,
        }
    } else {
        let zones_even = f64::from(zones);
        let zones_odd = f64::from(zones - 1);
        let z_lon = (x0 * zones_odd - x1 * zones_even).round_ties_even();
        match most_recent {
            Parity::Even => {
                let z = if z_lon < 0.0 { z_lon + zones_even } else { z_lon };
                (z + x0) / zones_even
            }
            Parity::Odd => {
                let z = if z_lon < 0.0 { z_lon + zones_odd } else { z_lon };
                (z + x1) / zones_odd
            }
        }
    };

    Some(GeoPosition::new(t32_from_turn(recenter(lon_turn)), lat_t32))
}

/// Number of longitude zones at `lat_turn`, per the standard NL function.
fn lon_zone_count(lat_turn: f64) -> i32 {
    let cos_lat = (lat_turn * TAU).cos();
    let a = 1.0 - (1.0 - (TAU / LAT_ZONES_EVEN).cos()) / (cos_lat * cos_lat);
    let acos = a.acos();
    if acos.is_nan() {
        1
    } else {
        (TAU / acos).floor() as i32
    }
}

/// Recenters an angle from [0, 1) to [-0.5, 0.5) turns.
fn recenter(turn: f64) -> f64 {
    if turn >= 0.5 {
        turn - 1.0
    } else {
        turn
    }
}
