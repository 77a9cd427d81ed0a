//! Polygon rasterization - painting features onto the canvas.
//!
//! Each feature becomes ONE tiny-skia path holding a subpath per ring, and
//! that path is filled once. Paint order is dataset order.
//!
//! ## Holes
//!
//! Inner rings get no special treatment. The path is filled with the
//! non-zero winding rule, so an inner ring wound opposite to its outer ring
//! cuts a hole, while a ring wound the same way (or one belonging to a
//! different MultiPolygon part) is filled like any outer ring. Datasets
//! that don't follow the GeoJSON winding convention can therefore paint
//! over enclaves.

use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Transform};

use crate::geometry::{Feature, FeatureCollection, Geometry, Ring};
use crate::projection::Projector;
use crate::visited::VisitedSet;

/// Canvas background, light gray.
pub const BACKGROUND_RGB: [u8; 3] = [229, 229, 229];
/// Fill for visited countries, gold.
pub const VISITED_RGB: [u8; 3] = [212, 172, 13];
/// Fill for everything else, gray.
pub const UNVISITED_RGB: [u8; 3] = [200, 200, 200];

/// How a feature gets painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Visited,
    Unvisited,
}

impl Fill {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Fill::Visited => VISITED_RGB,
            Fill::Unvisited => UNVISITED_RGB,
        }
    }

    fn paint(self) -> Paint<'static> {
        let [r, g, b] = self.rgb();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, 255);
        paint.anti_alias = true;
        paint
    }
}

/// Counters from one rasterization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// Features filled (visited + unvisited)
    pub painted: usize,
    /// Of those, how many were visited
    pub visited: usize,
    pub skipped_no_geometry: usize,
    pub skipped_no_name: usize,
    /// Geometry present but every ring was empty
    pub skipped_empty: usize,
}

/// Pick a fill for a feature. Features without a string name can't be
/// classified and get `None`, whatever the visited set holds.
pub fn classify(feature: &Feature, visited: &VisitedSet) -> Option<Fill> {
    let name = feature.name.as_deref()?;
    Some(if visited.contains(name) {
        Fill::Visited
    } else {
        Fill::Unvisited
    })
}

/// Add one closed subpath for a ring. Empty rings add nothing.
fn push_ring(pb: &mut PathBuilder, ring: &Ring, projector: &Projector) {
    let Some((first, rest)) = ring.split_first() else {
        return;
    };

    let start = projector.project(*first);
    pb.move_to(start.x as f32, start.y as f32);
    for point in rest {
        let p = projector.project(*point);
        pb.line_to(p.x as f32, p.y as f32);
    }
    pb.close();
}

/// Build the fill path for a geometry: one subpath per ring, MultiPolygon
/// parts flattened. `None` if there's nothing to draw.
pub fn geometry_path(geometry: &Geometry, projector: &Projector) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for ring in geometry.rings() {
        push_ring(&mut pb, ring, projector);
    }
    pb.finish()
}

/// Paint every feature in collection order.
///
/// Missing geometry, missing names and empty geometries are skipped and
/// counted, never reported as errors.
pub fn paint_features(
    pixmap: &mut Pixmap,
    collection: &FeatureCollection,
    visited: &VisitedSet,
    projector: &Projector,
) -> RasterStats {
    let mut stats = RasterStats::default();

    for feature in &collection.features {
        let Some(geometry) = feature.geometry.as_ref() else {
            stats.skipped_no_geometry += 1;
            continue;
        };
        let Some(fill) = classify(feature, visited) else {
            stats.skipped_no_name += 1;
            continue;
        };
        let Some(path) = geometry_path(geometry, projector) else {
            stats.skipped_empty += 1;
            continue;
        };

        pixmap.fill_path(
            &path,
            &fill.paint(),
            FillRule::Winding,
            Transform::identity(),
            None,
        );

        stats.painted += 1;
        if fill == Fill::Visited {
            stats.visited += 1;
        }
    }

    stats
}

// ============================================================================
// TESTS
// ============================================================================
