//! Typed ADS-B messages decoded from the 56-bit ME payload.
//!
//! Dispatch is by type code: 1-4 identification, 9-18 and 20-22 airborne
//! position, 19 airborne velocity. Any other type code carries no decodable
//! message and the frame is dropped, which is not an error.

use std::f64::consts::TAU;

use crate::bits::{extract_unsigned, test_bit};

use super::frame::{RawFrame, DF_EXTENDED_SQUITTER};
use super::types::{CallSign, IcaoAddress};

/// CPR frame parity: selects which of the two local encodings was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    Even = 0,
    Odd = 1,
}

/// A decoded ADS-B message.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Identification(IdentificationMessage),
    AirbornePosition(AirbornePositionMessage),
    AirborneVelocity(AirborneVelocityMessage),
}

impl Message {
    /// Decodes the typed message carried by `frame`, if any.
    pub fn decode(frame: &RawFrame) -> Option<Message> {
        if frame.downlink_format() != DF_EXTENDED_SQUITTER {
            return None;
        }
        match frame.type_code() {
            1..=4 => IdentificationMessage::decode(frame).map(Message::Identification),
            9..=18 | 20..=22 => {
                AirbornePositionMessage::decode(frame).map(Message::AirbornePosition)
            }
            19 => AirborneVelocityMessage::decode(frame).map(Message::AirborneVelocity),
            _ => None,
        }
    }

    pub fn timestamp_ns(&self) -> u64 {
        match self {
            Message::Identification(m) => m.timestamp_ns,
            Message::AirbornePosition(m) => m.timestamp_ns,
            Message::AirborneVelocity(m) => m.timestamp_ns,
        }
    }

    pub fn icao_address(&self) -> IcaoAddress {
        match self {
            Message::Identification(m) => m.icao_address,
            Message::AirbornePosition(m) => m.icao_address,
            Message::AirborneVelocity(m) => m.icao_address,
        }
    }
}

/// Aircraft identification and category (type codes 1-4).
#[derive(Debug, Clone, PartialEq)]
pub struct IdentificationMessage {
    pub timestamp_ns: u64,
    pub icao_address: IcaoAddress,
    /// Category byte composed from the type code and the CA sub-field.
    pub category: u8,
    pub call_sign: CallSign,
}

impl IdentificationMessage {
    fn decode(frame: &RawFrame) -> Option<Self> {
        let payload = frame.payload();
        let ca = extract_unsigned(payload, 48, 3) as u8;
        let category = ((14 - frame.type_code()) << 4) | ca;

        let mut call_sign = String::with_capacity(8);
        for i in 0..8 {
            let code = extract_unsigned(payload, 42 - 6 * i, 6);
            call_sign.push(call_sign_char(code)?);
        }
        let call_sign = CallSign::new(call_sign.trim_end()).ok()?;

        Some(Self {
            timestamp_ns: frame.timestamp_ns(),
            icao_address: frame.icao_address(),
            category,
            call_sign,
        })
    }
}

/// Maps a 6-bit call sign code to its character, or `None` if the code is
/// outside the restricted set.
fn call_sign_char(code: u32) -> Option<char> {
    match code {
        1..=26 => Some((b'A' + code as u8 - 1) as char),
        32 => Some(' '),
        48..=57 => Some((b'0' + code as u8 - 48) as char),
        _ => None,
    }
}

/// Airborne position with CPR-encoded local coordinates (type codes 9-18,
/// 20-22).
#[derive(Debug, Clone, PartialEq)]
pub struct AirbornePositionMessage {
    pub timestamp_ns: u64,
    pub icao_address: IcaoAddress,
    pub altitude_ft: i32,
    pub parity: Parity,
    /// CPR local longitude, in [0, 1).
    pub x: f64,
    /// CPR local latitude, in [0, 1).
    pub y: f64,
}

impl AirbornePositionMessage {
    fn decode(frame: &RawFrame) -> Option<Self> {
        let payload = frame.payload();
        let altitude_ft = decode_altitude(extract_unsigned(payload, 36, 12))?;
        let parity = if test_bit(payload, 34) { Parity::Odd } else { Parity::Even };
        let y = f64::from(extract_unsigned(payload, 17, 17)) / CPR_SCALE;
        let x = f64::from(extract_unsigned(payload, 0, 17)) / CPR_SCALE;

        Some(Self {
            timestamp_ns: frame.timestamp_ns(),
            icao_address: frame.icao_address(),
            altitude_ft,
            parity,
            x,
            y,
        })
    }
}

/// Normalization divisor for 17-bit CPR coordinates (2^17).
const CPR_SCALE: f64 = 131_072.0;

/// Decodes the 12-bit altitude field to feet.
///
/// With the Q bit set the field counts 25 ft multiples from -1000 ft.
/// Otherwise the bits are Gillham-coded: a Gray-coded 500 ft group plus a
/// Gray-coded 100 ft group whose invalid values (0, 5, 6) reject the message.
fn decode_altitude(alt: u32) -> Option<i32> {
    if test_bit(u64::from(alt), 4) {
        let n = ((alt & 0xFE0) >> 1) | (alt & 0x00F);
        return Some(n as i32 * 25 - 1000);
    }

    let d = untangle_gillham(alt);
    let mult500 = gray_decode(extract_unsigned(u64::from(d), 3, 9));
    let mut mult100 = gray_decode(extract_unsigned(u64::from(d), 0, 3));
    if mult100 == 0 || mult100 == 5 || mult100 == 6 {
        return None;
    }
    if mult100 == 7 {
        mult100 = 5;
    }
    if mult500 % 2 == 1 {
        mult100 = 6 - mult100;
    }
    Some(-1300 + mult100 as i32 * 100 + mult500 as i32 * 500)
}

/// Reorders the transmitted Gillham bits (C1 A1 C2 A2 C4 A4 B1 D1 B2 D2 B4
/// D4, MSB first) into D1 D2 D4 A1 A2 A4 B1 B2 B4 followed by C1 C2 C4.
fn untangle_gillham(alt: u32) -> u32 {
    // (source bit, destination bit) pairs
    const MOVES: [(u32, u32); 12] = [
        (4, 11), (2, 10), (0, 9),  // D1 D2 D4
        (10, 8), (8, 7), (6, 6),   // A1 A2 A4
        (5, 5), (3, 4), (1, 3),    // B1 B2 B4
        (11, 2), (9, 1), (7, 0),   // C1 C2 C4
    ];
    MOVES
        .iter()
        .fold(0, |acc, &(src, dst)| acc | (((alt >> src) & 1) << dst))
}

/// Decodes a Gray-coded value.
fn gray_decode(gray: u32) -> u32 {
    let mut value = gray;
    let mut shift = 1;
    while (gray >> shift) != 0 {
        value ^= gray >> shift;
        shift += 1;
    }
    value
}

/// Airborne ground speed or airspeed with track/heading (type code 19).
#[derive(Debug, Clone, PartialEq)]
pub struct AirborneVelocityMessage {
    pub timestamp_ns: u64,
    pub icao_address: IcaoAddress,
    pub speed_kts: f64,
    /// Track or heading in degrees clockwise from north.
    pub track_deg: f64,
}

impl AirborneVelocityMessage {
    fn decode(frame: &RawFrame) -> Option<Self> {
        let payload = frame.payload();
        let subtype = extract_unsigned(payload, 48, 3);
        let (speed_kts, track_deg) = match subtype {
            1 | 2 => decode_ground_speed(payload, subtype)?,
            3 | 4 => decode_airspeed(payload, subtype)?,
            _ => return None,
        };

        Some(Self {
            timestamp_ns: frame.timestamp_ns(),
            icao_address: frame.icao_address(),
            speed_kts,
            track_deg,
        })
    }
}

/// Subtypes 1/2: signed east-west and north-south components, vector-summed.
fn decode_ground_speed(payload: u64, subtype: u32) -> Option<(f64, f64)> {
    let vew = extract_unsigned(payload, 32, 10);
    let vns = extract_unsigned(payload, 21, 10);
    if vew == 0 || vns == 0 {
        return None;
    }

    let unit = if subtype == 2 { 4.0 } else { 1.0 };
    let mut east = f64::from(vew - 1) * unit;
    let mut north = f64::from(vns - 1) * unit;
    if test_bit(payload, 42) {
        east = -east;
    }
    if test_bit(payload, 31) {
        north = -north;
    }

    let speed = east.hypot(north);
    let mut track = east.atan2(north).to_degrees();
    if track < 0.0 {
        track += 360.0;
    }
    Some((speed, track))
}

/// Subtypes 3/4: airspeed magnitude plus a 10-bit magnetic heading.
fn decode_airspeed(payload: u64, subtype: u32) -> Option<(f64, f64)> {
    if !test_bit(payload, 42) {
        return None; // heading unavailable
    }
    let airspeed = extract_unsigned(payload, 21, 10);
    if airspeed == 0 {
        return None;
    }

    let unit = if subtype == 4 { 4.0 } else { 1.0 };
    let speed = f64::from(airspeed - 1) * unit;
    let heading_turn = f64::from(extract_unsigned(payload, 32, 10)) / 1024.0;
    Some((speed, (heading_turn * TAU).to_degrees()))
}
