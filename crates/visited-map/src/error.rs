//! Error type for rendering.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Every stage of the pipeline returns `Result<T, MapError>`, and `?` hands
//! the first failure straight back to the caller. There's no partial image:
//! either you get PNG bytes or you get one of these.

use std::path::PathBuf;

use crate::geometry::BoundingBox;

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// The boundary dataset could not be read.
    #[error("failed to read boundary dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not a well-formed feature collection.
    #[error("malformed boundary dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// The extent has zero (or negative) width or height, so no scale exists.
    #[error(
        "degenerate extent: lon {}..{}, lat {}..{}",
        .0.min_lon, .0.max_lon, .0.min_lat, .0.max_lat
    )]
    DegenerateExtent(BoundingBox),

    /// The canvas could not be serialized to PNG.
    #[error("failed to encode map image: {0}")]
    Encode(String),
}
