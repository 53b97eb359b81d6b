// geo.rs
//
// Copyright (C) 2019-2024  Minnesota Department of Transportation
//
use crate::coord::format_coord;

/// WGS-84 position, in degrees.
///
/// Values are not clamped or normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLon {
    /// Latitude (degrees)
    pub lat: f64,
    /// Longitude (degrees)
    pub lon: f64,
}

impl LatLon {
    /// Smallest magnitude treated as a real coördinate
    const SENTINEL_DEG: f64 = 0.0001;

    /// Create a new position
    pub fn new(lat: f64, lon: f64) -> Self {
        LatLon { lat, lon }
    }

    /// Check whether both axes are clear of the "no center" sentinel.
    ///
    /// Positions within 0.0001° of the equator or prime meridian are
    /// treated as unset.
    pub fn is_set(&self) -> bool {
        self.lat.abs() > Self::SENTINEL_DEG && self.lon.abs() > Self::SENTINEL_DEG
    }

    /// Format as `lat,lon` with 5 decimal places (at most)
    pub fn to_query(&self) -> String {
        format!("{},{}", format_coord(self.lat), format_coord(self.lon))
    }
}

impl From<(f64, f64)> for LatLon {
    fn from(pos: (f64, f64)) -> Self {
        LatLon::new(pos.0, pos.1)
    }
}
