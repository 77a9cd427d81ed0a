//! # visited-map
//!
//! Renders a flat world map with the countries a user has visited filled
//! in gold and everything else in gray.
//!
//! ## Pipeline
//!
//! 1. [`dataset`] - read a GeoJSON FeatureCollection of country boundaries
//! 2. [`geometry`] - compute the bounding box used for scaling
//! 3. [`projection`] - linear stretch of that box onto a 1024x512 canvas
//! 4. [`raster`] - fill one path per country, gold or gray
//! 5. [`encode`] - PNG bytes out
//!
//! [`render()`] runs the whole thing. Everything is rebuilt on every call.

pub mod dataset;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod raster;
pub mod render;
pub mod store;
pub mod visited;

// Re-export common types at crate root for convenience.
pub use dataset::{load_dataset, parse_dataset};
pub use encode::encode_png;
pub use error::MapError;
pub use geometry::{BoundingBox, ExtentMode, Feature, FeatureCollection, GeoPoint, Geometry, Point, Ring};
pub use projection::Projector;
pub use raster::{Fill, RasterStats, classify, paint_features};
pub use render::{MAP_HEIGHT, MAP_WIDTH, RenderOptions, render, render_collection, render_pixmap, render_with};
pub use store::{JsonFileStore, MemoryStore, StoreError, UserId, VisitedStore};
pub use visited::VisitedSet;
