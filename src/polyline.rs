// polyline.rs
//
// Copyright (c) 2019-2024 Minnesota Department of Transportation
//
//! Encoded polyline codec.
//!
//! Coördinates are scaled to integers with 5 decimal places of precision,
//! delta encoded against the previous point, zig-zag encoded and then
//! written as 5-bit chunks of printable ASCII.
//!
//! # Example
//! ```
//! use staticmap::{polyline, LatLon};
//! let pts = [
//!     LatLon::new(38.5, -120.2),
//!     LatLon::new(40.7, -120.95),
//!     LatLon::new(43.252, -126.453),
//! ];
//! assert_eq!(polyline::encode(&pts, false), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
//! ```
use crate::geo::LatLon;
use crate::Error;

/// Scale from degrees to encoded integers
const SCALE: f64 = 1e5;

/// Offset added to each 5-bit chunk
const OFFSET: u8 = 63;

/// Flag for chunks followed by another chunk of the same value
const CONTINUE: u64 = 0x20;

/// Zig-zag encoded delta value
struct ParamInt {
    value: i64,
}

impl ParamInt {
    fn new(value: i64) -> Self {
        ParamInt { value }
    }

    /// Zig-zag encode, so small negative values stay small
    fn encode(&self) -> u64 {
        ((self.value << 1) ^ (self.value >> 63)) as u64
    }

    /// Decode a zig-zag value
    fn decode(v: u64) -> i64 {
        ((v >> 1) as i64) ^ -((v & 1) as i64)
    }

    /// Write chunks of the value, low-order first
    fn write_to(&self, out: &mut String) {
        let mut v = self.encode();
        while v >= CONTINUE {
            out.push(char::from((CONTINUE | (v & 0x1f)) as u8 + OFFSET));
            v >>= 5;
        }
        out.push(char::from(v as u8 + OFFSET));
    }
}

/// Polyline encoder with relative position state
struct PolylineEncoder {
    lat: i64,
    lon: i64,
    out: String,
}

impl PolylineEncoder {
    fn new(capacity: usize) -> Self {
        PolylineEncoder {
            lat: 0,
            lon: 0,
            out: String::with_capacity(capacity),
        }
    }

    /// Encode one point relative to the previous one
    fn add_point(&mut self, pos: &LatLon) {
        let lat = (pos.lat * SCALE).round() as i64;
        let lon = (pos.lon * SCALE).round() as i64;
        ParamInt::new(lat.saturating_sub(self.lat)).write_to(&mut self.out);
        ParamInt::new(lon.saturating_sub(self.lon)).write_to(&mut self.out);
        trace!("point: {},{}", lat, lon);
        self.lat = lat;
        self.lon = lon;
    }

    fn into_string(self) -> String {
        self.out
    }
}

/// Encode a sequence of positions as a polyline.
///
/// * `vertices` Positions, in order.
/// * `close` Append the first vertex again, closing a ring.
pub fn encode(vertices: &[LatLon], close: bool) -> String {
    let mut enc = PolylineEncoder::new(vertices.len() * 8);
    for pos in vertices {
        enc.add_point(pos);
    }
    if close {
        if let Some(first) = vertices.first() {
            enc.add_point(first);
        }
    }
    enc.into_string()
}

/// Decode a polyline into a sequence of positions.
///
/// Returns [Error::InvalidPolyline](../enum.Error.html) if the data
/// contains invalid characters, or ends in the middle of a point.
pub fn decode(encoded: &str) -> Result<Vec<LatLon>, Error> {
    let mut bytes = encoded.bytes();
    let mut vertices = vec![];
    let (mut lat, mut lon) = (0, 0);
    while let Some(dlat) = read_value(&mut bytes)? {
        let dlon = read_value(&mut bytes)?.ok_or(Error::InvalidPolyline())?;
        lat = i64::checked_add(lat, dlat).ok_or(Error::InvalidPolyline())?;
        lon = i64::checked_add(lon, dlon).ok_or(Error::InvalidPolyline())?;
        vertices.push(LatLon::new(lat as f64 / SCALE, lon as f64 / SCALE));
    }
    Ok(vertices)
}

/// Read one value, or `None` at end of data
fn read_value<I>(bytes: &mut I) -> Result<Option<i64>, Error>
where
    I: Iterator<Item = u8>,
{
    let mut v = 0;
    let mut shift = 0;
    let mut first = true;
    loop {
        let b = match bytes.next() {
            Some(b) => b,
            None if first => return Ok(None),
            None => return Err(Error::InvalidPolyline()),
        };
        first = false;
        if !(OFFSET..=OFFSET + 0x3f).contains(&b) || shift > 60 {
            return Err(Error::InvalidPolyline());
        }
        let chunk = u64::from(b - OFFSET);
        v |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < CONTINUE {
            return Ok(Some(ParamInt::decode(v)));
        }
    }
}
