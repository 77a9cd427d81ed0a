//! Core geometry types for visited-map.
//!
//! Everything here lives in geographic space: longitude/latitude degrees
//! straight out of the boundary dataset. Pixel space lives in `projection`.
//!
//! ## Rust Lesson #3: Enums carry data
//!
//! A GeoJSON geometry is *either* a Polygon *or* a MultiPolygon. In JS you'd
//! check `geometry.type === "Polygon"` everywhere. In Rust, the enum variant
//! IS the type tag, and `match` forces every caller to handle both shapes.

use serde::{Deserialize, Serialize};

/// A geographic position in degrees.
///
/// Deserializes from a GeoJSON position array `[lon, lat]`. Extra values
/// (altitude) are accepted and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

/// A pixel-space point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One closed boundary loop. Closure is implicit: the last point is not
/// required to repeat the first.
pub type Ring = Vec<GeoPoint>;

/// Boundary geometry of a feature.
///
/// Only the two area shapes are supported; any other GeoJSON `type` fails
/// to parse.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

/// One named entity (a country) and its boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// `properties.name`, if present and a string
    pub name: Option<String>,
    pub geometry: Option<Geometry>,
}

/// Features in dataset order. Order is paint order: later features paint
/// over earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// Which geometries contribute to the bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtentMode {
    /// Only Polygon features. MultiPolygon points are ignored, so a
    /// MultiPolygon-only dataset yields a degenerate box.
    #[default]
    PolygonsOnly,
    /// Polygon and MultiPolygon features.
    AllGeometries,
}

/// Axis-aligned geographic extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl GeoPoint {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl TryFrom<Vec<f64>> for GeoPoint {
    type Error = String;

    fn try_from(position: Vec<f64>) -> Result<Self, Self::Error> {
        match position.as_slice() {
            [lon, lat, ..] => Ok(Self::new(*lon, *lat)),
            _ => Err(format!(
                "position needs at least 2 values, got {}",
                position.len()
            )),
        }
    }
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Geometry {
    /// Iterate every ring, flattening MultiPolygon parts in order.
    pub fn rings(&self) -> Box<dyn Iterator<Item = &Ring> + '_> {
        match self {
            Geometry::Polygon(rings) => Box::new(rings.iter()),
            Geometry::MultiPolygon(polygons) => Box::new(polygons.iter().flatten()),
        }
    }
}

impl Feature {
    pub fn new(name: Option<String>, geometry: Option<Geometry>) -> Self {
        Self { name, geometry }
    }
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Compute the extent used for scaling.
    ///
    /// Starts from [`BoundingBox::EMPTY`], so when nothing qualifies the
    /// result is degenerate (min > max) and projection will refuse it.
    pub fn bounding_box(&self, mode: ExtentMode) -> BoundingBox {
        let mut bbox = BoundingBox::EMPTY;

        for geometry in self.features.iter().filter_map(|f| f.geometry.as_ref()) {
            let counts = match (geometry, mode) {
                (Geometry::Polygon(_), _) => true,
                (Geometry::MultiPolygon(_), ExtentMode::AllGeometries) => true,
                (Geometry::MultiPolygon(_), ExtentMode::PolygonsOnly) => false,
            };
            if !counts {
                continue;
            }
            for point in geometry.rings().flatten() {
                bbox.include(*point);
            }
        }

        bbox
    }
}

impl BoundingBox {
    /// "Nothing seen yet": any real coordinate moves every edge.
    pub const EMPTY: BoundingBox = BoundingBox {
        min_lon: 180.0,
        min_lat: 90.0,
        max_lon: -180.0,
        max_lat: -90.0,
    };

    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self { min_lon, min_lat, max_lon, max_lat }
    }

    /// Grow the box to contain `point`.
    #[inline]
    pub fn include(&mut self, point: GeoPoint) {
        self.min_lon = self.min_lon.min(point.lon);
        self.max_lon = self.max_lon.max(point.lon);
        self.min_lat = self.min_lat.min(point.lat);
        self.max_lat = self.max_lat.max(point.lat);
    }

    #[inline]
    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    #[inline]
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// True when either span is zero, negative or not finite.
    pub fn is_degenerate(&self) -> bool {
        let (w, h) = (self.lon_span(), self.lat_span());
        !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Ring {
        vec![
            GeoPoint::new(min_lon, min_lat),
            GeoPoint::new(max_lon, min_lat),
            GeoPoint::new(max_lon, max_lat),
            GeoPoint::new(min_lon, max_lat),
        ]
    }

    fn polygon(name: &str, ring: Ring) -> Feature {
        Feature::new(Some(name.to_string()), Some(Geometry::Polygon(vec![ring])))
    }

    #[test]
    fn bbox_from_polygon_points() {
        let fc = FeatureCollection::new(vec![polygon(
            "A",
            vec![GeoPoint::new(-10.0, -5.0), GeoPoint::new(10.0, 5.0)],
        )]);
        let bbox = fc.bounding_box(ExtentMode::PolygonsOnly);
        assert_eq!(bbox, BoundingBox::new(-10.0, -5.0, 10.0, 5.0));
        assert!(!bbox.is_degenerate());
    }

    #[test]
    fn bbox_ignores_multipolygons_by_default() {
        let fc = FeatureCollection::new(vec![
            polygon("A", square(0.0, 0.0, 10.0, 10.0)),
            Feature::new(
                Some("B".to_string()),
                Some(Geometry::MultiPolygon(vec![vec![square(50.0, 40.0, 60.0, 45.0)]])),
            ),
        ]);
        let bbox = fc.bounding_box(ExtentMode::PolygonsOnly);
        assert_eq!(bbox, BoundingBox::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn bbox_multipolygon_only_stays_at_sentinels() {
        let fc = FeatureCollection::new(vec![Feature::new(
            Some("B".to_string()),
            Some(Geometry::MultiPolygon(vec![
                vec![square(1.0, 1.0, 2.0, 2.0)],
                vec![square(3.0, 3.0, 4.0, 4.0)],
            ])),
        )]);
        let bbox = fc.bounding_box(ExtentMode::PolygonsOnly);
        assert_eq!(bbox, BoundingBox::EMPTY);
        assert_eq!(bbox.min_lon, 180.0);
        assert_eq!(bbox.min_lat, 90.0);
        assert_eq!(bbox.max_lon, -180.0);
        assert_eq!(bbox.max_lat, -90.0);
        assert!(bbox.is_degenerate());
    }

    #[test]
    fn bbox_all_geometries_includes_multipolygons() {
        let fc = FeatureCollection::new(vec![
            polygon("A", square(0.0, 0.0, 10.0, 10.0)),
            Feature::new(
                Some("B".to_string()),
                Some(Geometry::MultiPolygon(vec![vec![square(50.0, -40.0, 60.0, 45.0)]])),
            ),
        ]);
        let bbox = fc.bounding_box(ExtentMode::AllGeometries);
        assert_eq!(bbox, BoundingBox::new(0.0, -40.0, 60.0, 45.0));
    }

    #[test]
    fn bbox_skips_missing_geometry() {
        let fc = FeatureCollection::new(vec![
            Feature::new(Some("Nowhere".to_string()), None),
            polygon("A", square(-1.0, -1.0, 1.0, 1.0)),
        ]);
        assert_eq!(
            fc.bounding_box(ExtentMode::PolygonsOnly),
            BoundingBox::new(-1.0, -1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn single_point_is_degenerate() {
        let mut bbox = BoundingBox::EMPTY;
        bbox.include(GeoPoint::new(3.0, 4.0));
        assert_eq!(bbox.lon_span(), 0.0);
        assert!(bbox.is_degenerate());
    }

    #[test]
    fn rings_flatten_multipolygon_in_order() {
        let geometry = Geometry::MultiPolygon(vec![
            vec![square(0.0, 0.0, 1.0, 1.0), square(0.2, 0.2, 0.8, 0.8)],
            vec![square(5.0, 5.0, 6.0, 6.0)],
        ]);
        let firsts: Vec<GeoPoint> = geometry.rings().map(|r| r[0]).collect();
        assert_eq!(
            firsts,
            vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(0.2, 0.2),
                GeoPoint::new(5.0, 5.0),
            ]
        );
    }

    #[test]
    fn position_needs_two_values() {
        assert!(GeoPoint::try_from(vec![1.0]).is_err());
        assert_eq!(
            GeoPoint::try_from(vec![1.0, 2.0, 300.0]),
            Ok(GeoPoint::new(1.0, 2.0))
        );
    }
}
