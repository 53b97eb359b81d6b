// url.rs
//
// Copyright (c) 2024 Minnesota Department of Transportation
//
//! Request URL encoding, within a maximum length.
//!
//! When the full URL is too long, it is reduced in stages:
//!
//! 1. Path vertices are written as encoded polylines
//! 2. Paths are dropped
//! 3. Markers are dropped
//!
use crate::marker::MarkerGroups;
use crate::path::PathMode;
use crate::scene::Scene;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Default static map API endpoint
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/staticmap?";

/// Default maximum URL length (characters)
pub const DEFAULT_MAX_URL_LENGTH: usize = 8192;

/// Process-wide maximum URL length
static MAX_URL_LENGTH: AtomicUsize = AtomicUsize::new(DEFAULT_MAX_URL_LENGTH);

/// Get the process-wide maximum URL length
pub fn max_url_length() -> usize {
    MAX_URL_LENGTH.load(Ordering::Relaxed)
}

/// Set the process-wide maximum URL length.
///
/// Encoders without an explicit limit read this value for each URL.
pub fn set_max_url_length(len: usize) {
    MAX_URL_LENGTH.store(len, Ordering::Relaxed);
}

/// Reduction stage of an encoded URL
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Paths with literal coördinates
    LiteralPaths,
    /// Paths with encoded polylines
    EncodedPaths,
    /// Paths dropped
    NoPaths,
    /// Paths and markers dropped
    NoMarkers,
}

/// Encoder for static map request URLs.
///
/// # Example
/// ```
/// use staticmap::{LatLon, Scene, Size, Stage, UrlEncoder};
/// let enc = UrlEncoder::new()
///     .with_base_url("https://example.com/staticmap?")
///     .with_max_len(2048);
/// let mut scene = Scene::new(Size::new(300, 200));
/// scene.center = Some(LatLon::new(40.0, -75.0));
/// scene.zoom = 10;
/// let (stage, url) = enc.encode_staged(&scene, true);
/// assert_eq!(stage, Stage::LiteralPaths);
/// assert_eq!(url, "https://example.com/staticmap?center=40.0,-75.0\
///     &zoom=10&size=300x200&style=feature:poi%7Cvisibility:off");
/// ```
#[derive(Clone, Debug)]
pub struct UrlEncoder {
    base_url: String,
    max_len: Option<usize>,
}

/// Query fragments of one scene
struct Fragments {
    base: String,
    markers: String,
    extra: String,
}

impl Default for UrlEncoder {
    fn default() -> Self {
        UrlEncoder {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_len: None,
        }
    }
}

impl Fragments {
    /// Build the fragments shared by all stages
    fn new(base_url: &str, scene: &Scene) -> Self {
        let base = base_query(base_url, scene);
        let markers = MarkerGroups::from_series(&scene.markers).to_query();
        let extra = match scene.req_params.as_deref() {
            Some(p) if !p.trim().is_empty() => format!("&{}", p),
            _ => String::new(),
        };
        trace!(
            "fragments: base {}, markers {}, extra {}",
            base.len(),
            markers.len(),
            extra.len()
        );
        Fragments {
            base,
            markers,
            extra,
        }
    }

    /// Get length of the URL with the given paths
    fn len(&self, paths: &str, markers: bool) -> usize {
        let markers = if markers { self.markers.len() } else { 0 };
        self.base.len() + markers + paths.len() + self.extra.len()
    }

    /// Join fragments into a URL
    fn join(&self, paths: &str, markers: bool) -> String {
        let mut url = String::with_capacity(self.len(paths, markers));
        url.push_str(&self.base);
        if markers {
            url.push_str(&self.markers);
        }
        url.push_str(paths);
        url.push_str(&self.extra);
        url
    }
}

impl UrlEncoder {
    /// Create a new URL encoder with default base URL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL, including the trailing `?`
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Set the maximum URL length, overriding the process-wide value
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Get the maximum URL length
    pub fn max_len(&self) -> usize {
        self.max_len.unwrap_or_else(max_url_length)
    }

    /// Encode a scene as a request URL.
    ///
    /// * `scene` Scene to encode.
    /// * `enforce` Reduce the URL to fit within the maximum length.
    ///   Otherwise, paths are encoded as polylines if needed, but nothing
    ///   is dropped.
    pub fn encode(&self, scene: &Scene, enforce: bool) -> String {
        self.encode_staged(scene, enforce).1
    }

    /// Encode a scene, returning the reduction stage with the URL.
    pub fn encode_staged(&self, scene: &Scene, enforce: bool) -> (Stage, String) {
        let max_len = self.max_len();
        let frags = Fragments::new(&self.base_url, scene);
        let paths = path_query(scene, PathMode::Literal);
        if frags.len(&paths, true) < max_len {
            return (Stage::LiteralPaths, frags.join(&paths, true));
        }
        debug!(
            "URL length {} exceeds {}; encoding paths",
            frags.len(&paths, true),
            max_len
        );
        let paths = path_query(scene, PathMode::Polyline);
        if !enforce || frags.len(&paths, true) < max_len {
            return (Stage::EncodedPaths, frags.join(&paths, true));
        }
        debug!("URL length {} exceeds {}; dropping paths", frags.len(&paths, true), max_len);
        if frags.len("", true) < max_len {
            return (Stage::NoPaths, frags.join("", true));
        }
        debug!("URL length {} exceeds {}; dropping markers", frags.len("", true), max_len);
        (Stage::NoMarkers, frags.join("", false))
    }

    /// Check whether a scene fits within the maximum length without
    /// dropping any paths or markers.
    pub fn fits(&self, scene: &Scene) -> bool {
        self.encode(scene, false).len() < self.max_len()
    }
}

/// Encode a scene as a request URL, using the process-wide maximum length.
pub fn build_url(scene: &Scene, enforce: bool) -> String {
    UrlEncoder::new().encode(scene, enforce)
}

/// Build the query shared by every stage: center, size, options and style
fn base_query(base_url: &str, scene: &Scene) -> String {
    let mut q = String::from(base_url);
    if let Some(center) = scene.center() {
        q.push_str(&format!(
            "center={:?},{:?}&zoom={}&",
            center.lat, center.lon, scene.zoom
        ));
    }
    q.push_str(&format!("size={}x{}", scene.size.width, scene.size.height));
    push_option(&mut q, "&maptype=", &scene.map_type);
    push_option(&mut q, "&format=", &scene.format);
    push_option(&mut q, "&scale=", &scene.scale);
    q.push_str(scene.style());
    q
}

fn push_option(q: &mut String, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        q.push_str(key);
        q.push_str(value);
    }
}

/// Serialize all paths of a scene
fn path_query(scene: &Scene, mode: PathMode) -> String {
    scene.paths.iter().map(|p| p.serialize(mode)).collect()
}
