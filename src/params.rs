// params.rs
//
// Copyright (c) 2024 Minnesota Department of Transportation
//
//! Scenes built from a JSON parameter store.
//!
//! Numeric values may be JSON numbers or strings.  Missing, null and empty
//! values are treated as absent, but a value which is present and cannot be
//! parsed is an error.
//!
use crate::geo::LatLon;
use crate::marker::{Marker, MarkerSeries, MarkerStyle};
use crate::path::PathSpec;
use crate::scene::{Scene, Size, DEFAULT_ZOOM};
use crate::Error;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::convert::TryFrom;

/// Map parameters
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneParams {
    latitude: Option<Value>,
    longitude: Option<Value>,
    zoom: Option<Value>,
    map_type: Option<Value>,
    map_scale: Option<Value>,
    image_type: Option<Value>,
    req_params: Option<Value>,
    /// Marker series, by name
    markers: Option<Map<String, Value>>,
    paths: Option<Vec<Value>>,
}

/// One marker series
#[derive(Debug, Deserialize)]
struct SeriesParams {
    markers: Option<Vec<Value>>,
}

/// Marker parameters
#[derive(Debug, Deserialize)]
struct MarkerParams {
    latitude: Option<Value>,
    longitude: Option<Value>,
    size: Option<Value>,
    color: Option<Value>,
    label: Option<Value>,
    icon: Option<Value>,
    #[serde(rename = "icon.url")]
    icon_url: Option<Value>,
    #[serde(rename = "icon.anchor.x")]
    anchor_x: Option<Value>,
    #[serde(rename = "icon.anchor.y")]
    anchor_y: Option<Value>,
}

/// Path parameters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PathParams {
    stroke_color: Option<Value>,
    stroke_opacity: Option<Value>,
    stroke_weight: Option<Value>,
    is_polygon: Option<Value>,
    fill_color: Option<Value>,
    fill_opacity: Option<Value>,
    locations: Option<Vec<LocationParams>>,
}

/// Path vertex parameters
#[derive(Debug, Deserialize)]
struct LocationParams {
    latitude: Option<Value>,
    longitude: Option<Value>,
}

/// Parse a scene from JSON parameters.
///
/// * `json` Parameter object.
/// * `size` Image size (pixels).
///
/// # Example
/// ```
/// # use staticmap::Error;
/// # fn main() -> Result<(), Error> {
///       use staticmap::{scene_from_json, Size};
///       let scene = scene_from_json(r#"{
///           "latitude": 45.0, "longitude": -93.0, "zoom": "12",
///           "paths": [{ "strokeWeight": 3, "locations": [
///               { "latitude": 45.0, "longitude": -93.0 },
///               { "latitude": 45.1, "longitude": -93.1 }
///           ] }]
///       }"#, Size::new(640, 480))?;
///       assert_eq!(scene.zoom, 12);
///       assert_eq!(scene.paths[0].stroke_weight, Some(3));
/// #     Ok(())
/// # }
/// ```
pub fn scene_from_json(json: &str, size: Size) -> Result<Scene, Error> {
    let value: Value = serde_json::from_str(json)?;
    Scene::from_params(&value, size)
}

impl Scene {
    /// Build a scene from a parameter value.
    ///
    /// Missing latitude / longitude default to 0, which leaves the map
    /// without a center.
    pub fn from_params(params: &Value, size: Size) -> Result<Self, Error> {
        let params: SceneParams = match params {
            Value::Null => SceneParams::default(),
            v => SceneParams::deserialize(v)?,
        };
        let lat = number("latitude", &params.latitude)?.unwrap_or(0.0);
        let lon = number("longitude", &params.longitude)?.unwrap_or(0.0);
        let mut scene = Scene::new(size);
        scene.center = Some(LatLon::new(lat, lon));
        scene.zoom = integer("zoom", &params.zoom)?.unwrap_or(DEFAULT_ZOOM);
        scene.map_type = string(&params.map_type);
        scene.scale = string(&params.map_scale);
        scene.format = string(&params.image_type);
        scene.req_params = string(&params.req_params);
        if let Some(series) = &params.markers {
            scene.markers = marker_series(series)?;
        }
        if let Some(paths) = &params.paths {
            for path in paths.iter().filter(|p| !is_empty(p)) {
                scene.paths.push(path_spec(path)?);
            }
        }
        debug!(
            "scene: {} marker series, {} paths",
            scene.markers.len(),
            scene.paths.len()
        );
        Ok(scene)
    }
}

/// Parse marker series, skipping null and empty markers
fn marker_series(series: &Map<String, Value>) -> Result<MarkerSeries, Error> {
    let mut all = vec![];
    for (name, value) in series.iter().filter(|(_, v)| !v.is_null()) {
        let series = SeriesParams::deserialize(value)?;
        let mut markers = vec![];
        for marker in series.markers.iter().flatten().filter(|m| !is_empty(m)) {
            markers.push(self::marker(marker)?);
        }
        trace!("series {}: {} markers", name, markers.len());
        all.push(markers);
    }
    Ok(all)
}

fn marker(value: &Value) -> Result<Marker, Error> {
    let params = MarkerParams::deserialize(value)?;
    let lat = number("latitude", &params.latitude)?
        .ok_or(Error::MissingField("latitude"))?;
    let lon = number("longitude", &params.longitude)?
        .ok_or(Error::MissingField("longitude"))?;
    let style = MarkerStyle {
        size: string(&params.size),
        color: string(&params.color),
        label: string(&params.label),
        ..Default::default()
    }
    .with_icon(string(&params.icon_url), string(&params.icon))
    .with_anchor(
        integer("icon.anchor.x", &params.anchor_x)?,
        integer("icon.anchor.y", &params.anchor_y)?,
    );
    Ok(Marker::new(LatLon::new(lat, lon), style))
}

fn path_spec(value: &Value) -> Result<PathSpec, Error> {
    let params = PathParams::deserialize(value)?;
    let mut vertices = vec![];
    for loc in params.locations.iter().flatten() {
        let lat = number("latitude", &loc.latitude)?
            .ok_or(Error::MissingField("latitude"))?;
        let lon = number("longitude", &loc.longitude)?
            .ok_or(Error::MissingField("longitude"))?;
        vertices.push(LatLon::new(lat, lon));
    }
    Ok(PathSpec {
        stroke_color: string(&params.stroke_color),
        stroke_opacity: number("strokeOpacity", &params.stroke_opacity)?,
        stroke_weight: integer("strokeWeight", &params.stroke_weight)?,
        polygon: boolean(&params.is_polygon),
        fill_color: string(&params.fill_color),
        fill_opacity: number("fillOpacity", &params.fill_opacity)?,
        vertices,
    })
}

/// Check for null or empty objects
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Get a value as a string, if present
fn string(value: &Option<Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(v) => Some(v.to_string()),
    }
}

/// Get a boolean value; anything other than `true` is false
fn boolean(value: &Option<Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        v => string(v).map_or(false, |s| s.trim().eq_ignore_ascii_case("true")),
    }
}

/// Get a floating-point value
fn number(field: &'static str, value: &Option<Value>) -> Result<Option<f64>, Error> {
    match value {
        Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(|| invalid(field, n)),
        v => match string(v) {
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| invalid(field, &s)),
            None => Ok(None),
        },
    }
}

/// Get an integer value
fn integer(field: &'static str, value: &Option<Value>) -> Result<Option<i32>, Error> {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| invalid(field, n)),
        v => match string(v) {
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => s
                .trim()
                .parse::<i32>()
                .map(Some)
                .map_err(|_| invalid(field, &s)),
            None => Ok(None),
        },
    }
}

fn invalid<V: ToString>(field: &'static str, value: V) -> Error {
    Error::InvalidNumber {
        field,
        value: value.to_string(),
    }
}
