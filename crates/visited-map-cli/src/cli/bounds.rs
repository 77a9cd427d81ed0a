//! Bounds command - print the map extent a dataset would render with.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use visited_map::{BoundingBox, load_dataset};

use super::common::{CliError, Config, extent_mode};

#[derive(Debug, Args)]
pub struct BoundsArgs {
    /// Boundary dataset (GeoJSON FeatureCollection)
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Let MultiPolygon countries widen the extent
    #[arg(long)]
    pub include_multipolygon_extent: bool,
}

/// JSON output for the bounds command.
#[derive(Serialize)]
struct BoundsReport {
    features: usize,
    #[serde(flatten)]
    bbox: BoundingBox,
    degenerate: bool,
}

/// Execute the bounds command.
pub fn cmd_bounds(args: &BoundsArgs, config: &Config) -> Result<(), CliError> {
    let dataset = args.dataset.as_deref().unwrap_or(&config.dataset);
    let collection = load_dataset(dataset)?;
    let bbox = collection.bounding_box(extent_mode(args.include_multipolygon_extent));

    let report = BoundsReport {
        features: collection.len(),
        bbox,
        degenerate: bbox.is_degenerate(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
