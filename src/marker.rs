// marker.rs
//
// Copyright (c) 2024 Minnesota Department of Transportation
//
//! Marker styles and grouping.
//!
//! Markers sharing a style are written as one `markers` parameter, with
//! the style given once followed by every location.
//!
use crate::geo::LatLon;
use crate::PIPE;

/// Icon anchor point, aligned with the marker location.
///
/// Bottom center is the default, so it has no variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    BottomRight,
}

/// Visual style of a marker.
///
/// Two markers with equal styles are grouped together.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MarkerStyle {
    /// Size (tiny, mid, small)
    pub size: Option<String>,
    /// Color (hex, without `0x` prefix)
    pub color: Option<String>,
    /// Label (only the first character is used)
    pub label: Option<String>,
    /// Custom icon URL
    pub icon: Option<String>,
    /// Icon anchor
    pub anchor: Option<Anchor>,
}

/// A styled point marker.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    /// Location
    pub pos: LatLon,
    /// Style
    pub style: MarkerStyle,
}

/// Markers, in series.
pub type MarkerSeries = Vec<Vec<Marker>>;

/// Markers grouped by style, in order of first occurrence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkerGroups {
    groups: Vec<(MarkerStyle, Vec<String>)>,
}

impl Anchor {
    /// Resolve an anchor from a 3x3 grid position.
    ///
    /// * `x` -1 (left), 0 (center) or 1 (right).
    /// * `y` 1 (top), 0 (center) or -1 (bottom).
    ///
    /// A missing axis, an unknown `x`, or bottom center resolve to `None`.
    /// Any `y` other than 1 or 0 selects the bottom row.
    pub fn from_grid(x: Option<i32>, y: Option<i32>) -> Option<Self> {
        let (x, y) = (x?, y?);
        match (x, y) {
            (-1, 1) => Some(Anchor::TopLeft),
            (-1, 0) => Some(Anchor::Left),
            (-1, _) => Some(Anchor::BottomLeft),
            (0, 1) => Some(Anchor::Top),
            (0, 0) => Some(Anchor::Center),
            (1, 1) => Some(Anchor::TopRight),
            (1, 0) => Some(Anchor::Right),
            (1, _) => Some(Anchor::BottomRight),
            _ => None,
        }
    }

    /// Get the anchor name used in requests
    pub fn name(self) -> &'static str {
        match self {
            Anchor::TopLeft => "topleft",
            Anchor::Top => "top",
            Anchor::TopRight => "topright",
            Anchor::Left => "left",
            Anchor::Center => "center",
            Anchor::Right => "right",
            Anchor::BottomLeft => "bottomleft",
            Anchor::BottomRight => "bottomright",
        }
    }
}

impl MarkerStyle {
    /// Set the icon, preferring an explicit icon URL over a legacy icon.
    pub fn with_icon(mut self, url: Option<String>, legacy: Option<String>) -> Self {
        self.icon = url.or(legacy);
        self
    }

    /// Set the anchor from a 3x3 grid position
    pub fn with_anchor(mut self, x: Option<i32>, y: Option<i32>) -> Self {
        self.anchor = Anchor::from_grid(x, y);
        self
    }

    /// Write style attributes, each followed by a separator
    fn write_to(&self, out: &mut String) {
        if let Some(anchor) = self.anchor {
            write_attr(out, "anchor:", anchor.name());
        }
        if let Some(size) = non_empty(&self.size) {
            write_attr(out, "size:", size);
        }
        if let Some(color) = non_empty(&self.color) {
            write_attr(out, "color:0x", color);
        }
        if let Some(label) = non_empty(&self.label).and_then(|l| l.chars().next()) {
            write_attr(out, "label:", &upper(label).to_string());
        }
        if let Some(icon) = non_empty(&self.icon) {
            write_attr(out, "icon:", icon);
        }
    }
}

impl Marker {
    /// Create a new marker
    pub fn new(pos: LatLon, style: MarkerStyle) -> Self {
        Marker { pos, style }
    }
}

impl MarkerGroups {
    /// Group all markers from a series by style.
    pub fn from_series(series: &[Vec<Marker>]) -> Self {
        let mut groups = MarkerGroups::default();
        for marker in series.iter().flatten() {
            groups.add(marker);
        }
        debug!("marker groups: {}", groups.len());
        groups
    }

    /// Add a marker to the group for its style
    fn add(&mut self, marker: &Marker) {
        let i = self.style_pos(&marker.style);
        self.groups[i].1.push(marker.pos.to_query());
    }

    /// Get position of a style in the groups.  If the style is not found,
    /// a new group is added last.
    fn style_pos(&mut self, style: &MarkerStyle) -> usize {
        self.groups
            .iter()
            .position(|(s, _)| s == style)
            .unwrap_or_else(|| {
                self.groups.push((style.clone(), vec![]));
                self.groups.len() - 1
            })
    }

    /// Get the number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over groups: style and formatted locations
    pub fn iter(&self) -> impl Iterator<Item = (&MarkerStyle, &[String])> {
        self.groups.iter().map(|(s, l)| (s, &l[..]))
    }

    /// Render all groups as `&markers=` query fragments
    pub fn to_query(&self) -> String {
        let mut out = String::new();
        for (style, locations) in &self.groups {
            out.push_str("&markers=");
            style.write_to(&mut out);
            out.push_str(&locations.join(PIPE));
        }
        out
    }
}

/// Uppercase a character, unless that would expand it
fn upper(c: char) -> char {
    let mut up = c.to_uppercase();
    match (up.next(), up.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn write_attr(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push_str(value);
    out.push_str(PIPE);
}

#[cfg(test)]
mod test {
    use super::*;

    fn marker(lat: f64, lon: f64, style: &MarkerStyle) -> Marker {
        Marker::new(LatLon::new(lat, lon), style.clone())
    }

    #[test]
    fn anchor_grid() {
        use Anchor::*;
        let grid = [
            ((-1, 1), Some(TopLeft)),
            ((0, 1), Some(Top)),
            ((1, 1), Some(TopRight)),
            ((-1, 0), Some(Left)),
            ((0, 0), Some(Center)),
            ((1, 0), Some(Right)),
            ((-1, -1), Some(BottomLeft)),
            ((0, -1), None),
            ((1, -1), Some(BottomRight)),
        ];
        for ((x, y), a) in grid.iter() {
            assert_eq!(Anchor::from_grid(Some(*x), Some(*y)), *a);
        }
        assert_eq!(Anchor::from_grid(Some(-1), Some(1)).map(Anchor::name), Some("topleft"));
    }

    #[test]
    fn anchor_missing() {
        assert_eq!(Anchor::from_grid(None, Some(1)), None);
        assert_eq!(Anchor::from_grid(Some(1), None), None);
        assert_eq!(Anchor::from_grid(None, None), None);
        assert_eq!(Anchor::from_grid(Some(2), Some(0)), None);
        assert_eq!(Anchor::from_grid(Some(1), Some(5)), Some(Anchor::BottomRight));
        assert_eq!(Anchor::from_grid(Some(0), Some(5)), None);
    }

    #[test]
    fn icon_preference() {
        let s = MarkerStyle::default()
            .with_icon(Some("http://a/b.png".into()), Some("legacy".into()));
        assert_eq!(s.icon.as_deref(), Some("http://a/b.png"));
        let s = MarkerStyle::default().with_icon(None, Some("legacy".into()));
        assert_eq!(s.icon.as_deref(), Some("legacy"));
    }

    #[test]
    fn empty() {
        let g = MarkerGroups::from_series(&[]);
        assert!(g.is_empty());
        assert_eq!(g.to_query(), "");
        let g = MarkerGroups::from_series(&[vec![], vec![]]);
        assert!(g.is_empty());
    }

    #[test]
    fn grouping() {
        let red = MarkerStyle {
            color: Some("ff0000".into()),
            ..Default::default()
        };
        let blue = MarkerStyle {
            color: Some("0000ff".into()),
            ..Default::default()
        };
        let series = vec![
            vec![marker(45.0, -93.0, &blue), marker(45.5, -93.5, &red)],
            vec![marker(44.0, -92.0, &blue)],
        ];
        let g = MarkerGroups::from_series(&series);
        assert_eq!(g.len(), 2);
        let groups: Vec<_> = g.iter().collect();
        assert_eq!(groups[0].0, &blue);
        assert_eq!(groups[0].1, &["45,-93".to_string(), "44,-92".to_string()][..]);
        assert_eq!(groups[1].0, &red);
        assert_eq!(
            g.to_query(),
            "&markers=color:0x0000ff%7C45,-93%7C44,-92\
             &markers=color:0xff0000%7C45.5,-93.5"
        );
        assert_eq!(MarkerGroups::from_series(&series), g);
    }

    #[test]
    fn attribute_order() {
        let style = MarkerStyle {
            size: Some("mid".into()),
            color: Some("00ff00".into()),
            label: Some("station".into()),
            icon: Some("http://x/i.png".into()),
            anchor: None,
        }
        .with_anchor(Some(1), Some(0));
        let g = MarkerGroups::from_series(&[vec![marker(1.0, 2.0, &style)]]);
        assert_eq!(
            g.to_query(),
            "&markers=anchor:right%7Csize:mid%7Ccolor:0x00ff00%7C\
             label:S%7Cicon:http://x/i.png%7C1,2"
        );
    }

    #[test]
    fn label_case() {
        assert_eq!(upper('a'), 'A');
        assert_eq!(upper('é'), 'É');
        assert_eq!(upper('7'), '7');
        assert_eq!(upper('ß'), 'ß');
        let style = MarkerStyle {
            label: Some("ßig".into()),
            ..Default::default()
        };
        let g = MarkerGroups::from_series(&[vec![marker(1.0, 2.0, &style)]]);
        assert_eq!(g.to_query(), "&markers=label:ß%7C1,2");
    }

    #[test]
    fn empty_attributes() {
        let style = MarkerStyle {
            size: Some("".into()),
            label: Some("".into()),
            ..Default::default()
        }
        .with_anchor(Some(0), Some(-1));
        let g = MarkerGroups::from_series(&[vec![marker(1.0, 2.0, &style)]]);
        assert_eq!(g.to_query(), "&markers=1,2");
    }
}
