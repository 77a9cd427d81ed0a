//! Common utilities shared across CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use visited_map::{ExtentMode, JsonFileStore, MapError, StoreError};

/// Errors surfaced by any command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to read config {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),
}

/// Settings from the optional YAML config file.
///
/// ```yaml
/// dataset: data/countries.geo.json
/// store: data/visited.json
/// output: map.png
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Boundary dataset (GeoJSON FeatureCollection)
    #[serde(default = "default_dataset")]
    pub dataset: PathBuf,

    /// Visited-country store file
    #[serde(default = "default_store")]
    pub store: PathBuf,

    /// Where `render` writes the PNG
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_dataset() -> PathBuf {
    PathBuf::from("data/countries.geo.json")
}

fn default_store() -> PathBuf {
    PathBuf::from("data/visited.json")
}

fn default_output() -> PathBuf {
    PathBuf::from("map.png")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            store: default_store(),
            output: default_output(),
        }
    }
}

impl Config {
    /// Load the config file, or defaults when none was given.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| CliError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, CliError> {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Map the `--include-multipolygon-extent` flag to an extent mode.
pub fn extent_mode(include_multipolygons: bool) -> ExtentMode {
    if include_multipolygons {
        ExtentMode::AllGeometries
    } else {
        ExtentMode::PolygonsOnly
    }
}

/// Open the store, preferring a command-line path over the config.
pub fn open_store(flag: Option<&Path>, config: &Config) -> Result<JsonFileStore, CliError> {
    let path = flag.unwrap_or(&config.store);
    Ok(JsonFileStore::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("dataset: world.geo.json\n").unwrap();
        assert_eq!(config.dataset, PathBuf::from("world.geo.json"));
        assert_eq!(config.store, default_store());
        assert_eq!(config.output, default_output());
    }

    #[test]
    fn empty_mapping_is_all_defaults() {
        assert_eq!(Config::from_yaml("{}").unwrap(), Config::default());
    }

    #[test]
    fn bad_yaml_is_config_error() {
        assert!(matches!(
            Config::from_yaml("dataset: [unterminated"),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn no_config_path_gives_defaults() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }
}
