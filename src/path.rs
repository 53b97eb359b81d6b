// path.rs
//
// Copyright (c) 2024 Minnesota Department of Transportation
//
//! Path and polygon serialization.
//!
use crate::geo::LatLon;
use crate::polyline;
use crate::PIPE;

/// Encoding for path vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathMode {
    /// Each vertex written as `lat,lon`
    Literal,
    /// Vertices written as an encoded polyline
    Polyline,
}

/// A path (or polygon) with its style.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathSpec {
    /// Stroke color (hex RGB)
    pub stroke_color: Option<String>,
    /// Stroke opacity (0.0 to 1.0)
    pub stroke_opacity: Option<f64>,
    /// Stroke weight (pixels)
    pub stroke_weight: Option<i32>,
    /// Closed, filled polygon
    pub polygon: bool,
    /// Fill color (hex RGB); polygons only
    pub fill_color: Option<String>,
    /// Fill opacity (0.0 to 1.0); polygons only
    pub fill_opacity: Option<f64>,
    /// Vertices, in order
    pub vertices: Vec<LatLon>,
}

impl PathSpec {
    /// Create a new path with default style
    pub fn new(vertices: Vec<LatLon>) -> Self {
        PathSpec {
            vertices,
            ..Default::default()
        }
    }

    /// Create a new polygon with default style
    pub fn new_polygon(vertices: Vec<LatLon>) -> Self {
        PathSpec {
            polygon: true,
            vertices,
            ..Default::default()
        }
    }

    /// Serialize as a `&path=` query fragment.
    ///
    /// Polygons are closed by repeating the first vertex.
    pub fn serialize(&self, mode: PathMode) -> String {
        let mut out = String::from("&path=");
        if let Some(color) = non_empty(&self.stroke_color) {
            // Stroke alpha is scaled by 255
            let alpha = alpha_hex(self.stroke_opacity, 255.0, "ff");
            write_color(&mut out, "color:0x", color, &alpha);
        }
        if self.polygon {
            if let Some(color) = non_empty(&self.fill_color) {
                // Fill alpha is scaled by 256
                let alpha = alpha_hex(self.fill_opacity, 256.0, "00");
                write_color(&mut out, "fillcolor:0x", color, &alpha);
            }
        }
        if let Some(weight) = self.stroke_weight {
            out.push_str(&format!("weight:{}{}", weight, PIPE));
        }
        if !self.vertices.is_empty() {
            match mode {
                PathMode::Literal => self.write_literal(&mut out),
                PathMode::Polyline => {
                    out.push_str("enc:");
                    out.push_str(&polyline::encode(&self.vertices, self.polygon));
                }
            }
        }
        out
    }

    /// Write vertices as `lat,lon` pairs
    fn write_literal(&self, out: &mut String) {
        let closing = if self.polygon {
            self.vertices.first()
        } else {
            None
        };
        let locations: Vec<String> = self
            .vertices
            .iter()
            .chain(closing)
            .map(LatLon::to_query)
            .collect();
        out.push_str(&locations.join(PIPE));
    }
}

/// Format an opacity as an unpadded hex alpha value
fn alpha_hex(opacity: Option<f64>, scale: f64, default: &str) -> String {
    match opacity {
        Some(o) => format!("{:x}", (scale * o) as i32),
        None => default.to_string(),
    }
}

fn write_color(out: &mut String, key: &str, color: &str, alpha: &str) {
    out.push_str(key);
    out.push_str(&color.trim_start_matches('#').to_lowercase());
    out.push_str(alpha);
    out.push_str(PIPE);
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod test {
    use super::*;

    fn pts(v: &[(f64, f64)]) -> Vec<LatLon> {
        v.iter().map(|p| LatLon::from(*p)).collect()
    }

    #[test]
    fn no_style() {
        let p = PathSpec::new(pts(&[(45.0, -93.0), (45.5, -93.25)]));
        assert_eq!(p.serialize(PathMode::Literal), "&path=45,-93%7C45.5,-93.25");
    }

    #[test]
    fn no_vertices() {
        let mut p = PathSpec::new(vec![]);
        p.stroke_weight = Some(3);
        assert_eq!(p.serialize(PathMode::Literal), "&path=weight:3%7C");
        assert_eq!(p.serialize(PathMode::Polyline), "&path=weight:3%7C");
    }

    #[test]
    fn stroke_alpha() {
        let mut p = PathSpec::new(vec![]);
        p.stroke_color = Some("FF0000".into());
        assert_eq!(p.serialize(PathMode::Literal), "&path=color:0xff0000ff%7C");
        p.stroke_opacity = Some(0.5);
        p.fill_color = Some("00ff00".into());
        p.fill_opacity = Some(0.5);
        // Fill is ignored for paths which are not polygons
        assert_eq!(p.serialize(PathMode::Literal), "&path=color:0xff00007f%7C");
        p.stroke_opacity = Some(0.05);
        assert_eq!(p.serialize(PathMode::Literal), "&path=color:0xff0000c%7C");
    }

    #[test]
    fn fill_alpha() {
        let mut p = PathSpec::new_polygon(vec![]);
        p.fill_color = Some("#00FF00".into());
        assert_eq!(p.serialize(PathMode::Literal), "&path=fillcolor:0x00ff0000%7C");
        p.fill_opacity = Some(0.5);
        assert_eq!(p.serialize(PathMode::Literal), "&path=fillcolor:0x00ff0080%7C");
        p.stroke_color = Some("0000ff".into());
        p.stroke_opacity = Some(1.0);
        p.stroke_weight = Some(2);
        assert_eq!(
            p.serialize(PathMode::Literal),
            "&path=color:0x0000ffff%7Cfillcolor:0x00ff0080%7Cweight:2%7C"
        );
    }

    #[test]
    fn polygon_literal() {
        let p = PathSpec::new_polygon(pts(&[(1.0, 1.0), (1.0, 2.0), (2.0, 2.0)]));
        assert_eq!(p.serialize(PathMode::Literal), "&path=1,1%7C1,2%7C2,2%7C1,1");
    }

    #[test]
    fn polyline_mode() {
        let p = PathSpec::new(pts(&[(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)]));
        assert_eq!(
            p.serialize(PathMode::Polyline),
            "&path=enc:_p~iF~ps|U_ulLnnqC_mqNvxq`@"
        );
    }

    #[test]
    fn polygon_rings_match() {
        let v = pts(&[(1.0, 1.0), (1.0, 2.0), (2.0, 2.0)]);
        let p = PathSpec::new_polygon(v.clone());
        let enc = p.serialize(PathMode::Polyline);
        let data = enc.trim_start_matches("&path=enc:");
        let ring = polyline::decode(data).unwrap();
        assert_eq!(ring.len(), v.len() + 1);
        assert_eq!(ring.first(), ring.last());
        let literal = p.serialize(PathMode::Literal);
        let decoded: Vec<String> = ring.iter().map(LatLon::to_query).collect();
        assert_eq!(literal, format!("&path={}", decoded.join(PIPE)));
    }
}
