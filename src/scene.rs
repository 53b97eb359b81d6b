// scene.rs
//
// Copyright (c) 2024 Minnesota Department of Transportation
//
//! Scene to be rendered as a static map image.
//!
use crate::geo::LatLon;
use crate::marker::MarkerSeries;
use crate::path::PathSpec;

/// Zoom level used when none is given
pub const DEFAULT_ZOOM: i32 = 0;

/// Zoom code selecting the environment style (no map center)
const ZOOM_STYLE_ENVIRONMENT: i32 = 30;

/// Zoom code selecting the flood style (no map center)
const ZOOM_STYLE_FLOOD: i32 = 31;

/// Default style: hide points of interest
const STYLE_DEFAULT: &str = "&style=feature:poi%7Cvisibility:off";

/// Natural features and attractions, with transit icons hidden
const STYLE_ENVIRONMENT: &str = "&style=feature:poi%7Cvisibility:off\
    &style=feature:poi.attraction%7Cvisibility:on\
    &style=feature:poi.park%7Cvisibility:on\
    &style=feature:transit%7Celement:labels.icon%7Cvisibility:off";

/// Natural features, with transit icons hidden
const STYLE_FLOOD: &str = "&style=feature:poi%7Cvisibility:off\
    &style=feature:poi.park%7Cvisibility:on\
    &style=feature:transit%7Celement:labels.icon%7Cvisibility:off";

/// Image size (pixels)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    /// Width (pixels)
    pub width: u32,
    /// Height (pixels)
    pub height: u32,
}

/// A scene contains the center, markers and paths of a map image.
///
/// # Example
/// ```
/// use staticmap::{LatLon, PathSpec, Scene, Size};
/// let mut scene = Scene::new(Size::new(640, 480));
/// scene.center = Some(LatLon::new(45.0, -93.0));
/// scene.zoom = 12;
/// scene.paths.push(PathSpec::new(vec![
///     LatLon::new(45.0, -93.0),
///     LatLon::new(45.1, -93.1),
/// ]));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Map center; `None` lets the map fit its features
    pub center: Option<LatLon>,
    /// Zoom level
    pub zoom: i32,
    /// Image size
    pub size: Size,
    /// Map type (roadmap, satellite, terrain, hybrid)
    pub map_type: Option<String>,
    /// Image format (png, jpg, gif)
    pub format: Option<String>,
    /// Scale factor
    pub scale: Option<String>,
    /// Extra request parameters, `&` separated
    pub req_params: Option<String>,
    /// Point markers
    pub markers: MarkerSeries,
    /// Paths and polygons
    pub paths: Vec<PathSpec>,
}

impl Size {
    /// Create a new image size
    pub fn new(width: u32, height: u32) -> Self {
        Size { width, height }
    }
}

impl Scene {
    /// Create an empty scene with no center
    pub fn new(size: Size) -> Self {
        Scene {
            center: None,
            zoom: DEFAULT_ZOOM,
            size,
            map_type: None,
            format: None,
            scale: None,
            req_params: None,
            markers: vec![],
            paths: vec![],
        }
    }

    /// Get the map center, if it is clear of the "no center" sentinel
    pub fn center(&self) -> Option<LatLon> {
        self.center.filter(LatLon::is_set)
    }

    /// Get the style parameters.
    ///
    /// Without a center, zoom codes above the usable range select a
    /// named style preset.
    pub fn style(&self) -> &'static str {
        if self.center().is_some() {
            return STYLE_DEFAULT;
        }
        match self.zoom {
            ZOOM_STYLE_ENVIRONMENT => STYLE_ENVIRONMENT,
            ZOOM_STYLE_FLOOD => STYLE_FLOOD,
            _ => STYLE_DEFAULT,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zoom_styles() {
        let mut s = Scene::new(Size::new(100, 100));
        s.zoom = 30;
        assert_eq!(s.style(), STYLE_ENVIRONMENT);
        s.zoom = 31;
        assert_eq!(s.style(), STYLE_FLOOD);
        for z in &[0, 10, 29, 32, 99] {
            s.zoom = *z;
            assert_eq!(s.style(), STYLE_DEFAULT);
        }
    }

    #[test]
    fn zoom_styles_with_center() {
        let mut s = Scene::new(Size::new(100, 100));
        s.center = Some(LatLon::new(45.0, -93.0));
        s.zoom = 30;
        assert_eq!(s.style(), STYLE_DEFAULT);
    }

    #[test]
    fn sentinel_center() {
        let mut s = Scene::new(Size::new(100, 100));
        s.center = Some(LatLon::new(0.0, 0.0));
        assert_eq!(s.center(), None);
        s.zoom = 31;
        assert_eq!(s.style(), STYLE_FLOOD);
        s.center = Some(LatLon::new(0.00001, 45.0));
        assert_eq!(s.center(), None);
        s.center = Some(LatLon::new(51.5, -0.1));
        assert!(s.center().is_some());
    }

    #[test]
    fn preset_text() {
        assert_eq!(
            STYLE_FLOOD,
            "&style=feature:poi%7Cvisibility:off&style=feature:poi.park%7Cvisibility:on&style=feature:transit%7Celement:labels.icon%7Cvisibility:off"
        );
    }
}
