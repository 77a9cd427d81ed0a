//! Geographic -> pixel mapping.
//!
//! Not a cartographic projection, just a linear stretch of the bounding box
//! onto the canvas. Latitude grows upward but pixel Y grows downward, so Y
//! is measured from `max_lat`.

use crate::error::MapError;
use crate::geometry::{BoundingBox, GeoPoint, Point};

/// Linear mapping from a bounding box to a `width` x `height` canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    min_lon: f64,
    max_lat: f64,
    scale_x: f64,
    scale_y: f64,
}

impl Projector {
    /// Build the mapping, refusing extents with no usable span.
    pub fn new(bbox: BoundingBox, width: u32, height: u32) -> Result<Self, MapError> {
        if bbox.is_degenerate() {
            return Err(MapError::DegenerateExtent(bbox));
        }

        Ok(Self {
            min_lon: bbox.min_lon,
            max_lat: bbox.max_lat,
            scale_x: f64::from(width) / bbox.lon_span(),
            scale_y: f64::from(height) / bbox.lat_span(),
        })
    }

    #[inline]
    pub fn project(&self, point: GeoPoint) -> Point {
        Point::new(
            (point.lon - self.min_lon) * self.scale_x,
            (self.max_lat - point.lat) * self.scale_y,
        )
    }

    /// Pixels per degree along (x, y).
    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }
}
