// lib.rs      staticmap crate.
//
// Copyright (c) 2019-2024 Minnesota Department of Transportation
//
//! A library for encoding static map image request URLs.
//!
//! A [Scene](struct.Scene.html) holds a map center, point markers and
//! paths.  It is encoded into a request URL which stays within a maximum
//! length by compressing paths, then dropping paths, then dropping
//! markers.
//!
//! # Example
//! ```
//! use staticmap::{LatLon, Scene, Size, build_url};
//! let mut scene = Scene::new(Size::new(300, 200));
//! scene.center = Some(LatLon::new(40.0, -75.0));
//! scene.zoom = 10;
//! let url = build_url(&scene, true);
//! assert!(url.ends_with("center=40.0,-75.0&zoom=10&size=300x200\
//!     &style=feature:poi%7Cvisibility:off"));
//! ```
#[macro_use]
extern crate log;

mod coord;
mod error;
mod geo;
mod marker;
mod params;
mod path;
pub mod polyline;
mod scene;
mod url;

pub use crate::coord::format_coord;
pub use crate::error::Error;
pub use crate::geo::LatLon;
pub use crate::marker::{Anchor, Marker, MarkerGroups, MarkerSeries, MarkerStyle};
pub use crate::params::scene_from_json;
pub use crate::path::{PathMode, PathSpec};
pub use crate::scene::{Scene, Size, DEFAULT_ZOOM};
pub use crate::url::{
    build_url, max_url_length, set_max_url_length, Stage, UrlEncoder,
    DEFAULT_BASE_URL, DEFAULT_MAX_URL_LENGTH,
};

/// Separator between values within one query parameter
pub(crate) const PIPE: &str = "%7C";
