//! The render pipeline: dataset -> bounding box -> projector -> canvas -> PNG.
//!
//! Nothing is cached between calls. Every render reads the dataset again and
//! owns its own canvas, so concurrent renders need no coordination.

use std::path::Path;

use tiny_skia::{Color, Pixmap};

use crate::dataset::load_dataset;
use crate::encode::encode_png;
use crate::error::MapError;
use crate::geometry::{ExtentMode, FeatureCollection};
use crate::projection::Projector;
use crate::raster::{BACKGROUND_RGB, paint_features};
use crate::visited::VisitedSet;

/// Output width in pixels.
pub const MAP_WIDTH: u32 = 1024;
/// Output height in pixels.
pub const MAP_HEIGHT: u32 = 512;

/// Knobs for a render call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Which geometries define the map extent
    pub extent: ExtentMode,
}

/// Render the dataset at `dataset` with `visited` highlighted, as PNG bytes.
pub fn render(dataset: impl AsRef<Path>, visited: &VisitedSet) -> Result<Vec<u8>, MapError> {
    render_with(dataset, visited, &RenderOptions::default())
}

/// [`render`] with explicit options.
pub fn render_with(
    dataset: impl AsRef<Path>,
    visited: &VisitedSet,
    options: &RenderOptions,
) -> Result<Vec<u8>, MapError> {
    let collection = load_dataset(dataset)?;
    render_collection(&collection, visited, options)
}

/// Render an already-loaded collection to PNG bytes.
pub fn render_collection(
    collection: &FeatureCollection,
    visited: &VisitedSet,
    options: &RenderOptions,
) -> Result<Vec<u8>, MapError> {
    let pixmap = render_pixmap(collection, visited, options)?;
    encode_png(&pixmap)
}

/// Rasterize a collection without encoding it.
pub fn render_pixmap(
    collection: &FeatureCollection,
    visited: &VisitedSet,
    options: &RenderOptions,
) -> Result<Pixmap, MapError> {
    let bbox = collection.bounding_box(options.extent);
    tracing::debug!(?bbox, extent = ?options.extent, "computed map extent");

    let projector = Projector::new(bbox, MAP_WIDTH, MAP_HEIGHT)?;

    let mut pixmap = Pixmap::new(MAP_WIDTH, MAP_HEIGHT).ok_or_else(|| {
        MapError::Encode(format!("could not allocate {MAP_WIDTH}x{MAP_HEIGHT} canvas"))
    })?;
    let [r, g, b] = BACKGROUND_RGB;
    pixmap.fill(Color::from_rgba8(r, g, b, 255));

    let stats = paint_features(&mut pixmap, collection, visited, &projector);
    tracing::debug!(
        features = collection.len(),
        painted = stats.painted,
        visited = stats.visited,
        skipped_no_geometry = stats.skipped_no_geometry,
        skipped_no_name = stats.skipped_no_name,
        skipped_empty = stats.skipped_empty,
        "rasterized features"
    );

    Ok(pixmap)
}

// ============================================================================
// TESTS
// ============================================================================
