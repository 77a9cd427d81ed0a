//! Render command implementation.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;

use visited_map::{RenderOptions, UserId, VisitedSet, VisitedStore, render_with};

use super::common::{CliError, Config, extent_mode, open_store};

/// Shown instead of a map when a stored user has nothing to highlight.
pub const NO_COUNTRIES_NOTICE: &str = "You haven't added any countries yet. Use `visited-map add` to add some!";

/// Shown when rendering fails.
pub const RENDER_FAILED_NOTICE: &str = "Sorry, I couldn't generate your map.";

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Boundary dataset (GeoJSON FeatureCollection)
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Output PNG file, or `-` for stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Visited country names (comma-separated, exact match)
    #[arg(long, value_delimiter = ',')]
    pub visited: Vec<String>,

    /// Also highlight this user's stored countries
    #[arg(short, long)]
    pub user: Option<UserId>,

    /// Visited-country store file
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Let MultiPolygon countries widen the map extent
    #[arg(long)]
    pub include_multipolygon_extent: bool,
}

/// Execute the render command.
pub fn cmd_render(args: &RenderArgs, config: &Config) -> Result<(), CliError> {
    let mut visited: VisitedSet = args.visited.iter().map(String::as_str).collect();

    if let Some(user) = args.user {
        let store = open_store(args.store.as_deref(), config)?;
        let countries = store.countries(user);
        if countries.is_empty() && visited.is_empty() {
            println!("{}", NO_COUNTRIES_NOTICE);
            return Ok(());
        }
        for country in countries {
            visited.insert(country);
        }
    }

    let dataset = args.dataset.as_deref().unwrap_or(&config.dataset);
    let options = RenderOptions {
        extent: extent_mode(args.include_multipolygon_extent),
    };

    tracing::debug!(
        dataset = %dataset.display(),
        visited = ?visited.iter().collect::<Vec<_>>(),
        "rendering map"
    );
    let png = match render_with(dataset, &visited, &options) {
        Ok(png) => png,
        Err(e) => {
            eprintln!("{}", RENDER_FAILED_NOTICE);
            return Err(e.into());
        }
    };

    let output = args.output.as_deref().unwrap_or(&config.output);
    write_output(output, &png)?;
    Ok(())
}

fn write_output(output: &Path, png: &[u8]) -> Result<(), CliError> {
    if output == Path::new("-") {
        let mut stdout = io::stdout().lock();
        return stdout
            .write_all(png)
            .and_then(|()| stdout.flush())
            .map_err(|source| CliError::Output {
                path: output.to_path_buf(),
                source,
            });
    }

    fs::write(output, png).map_err(|source| CliError::Output {
        path: output.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %output.display(), bytes = png.len(), "wrote map");
    Ok(())
}
