//! Boundary dataset loading - GeoJSON feature collections.
//!
//! The raw document is deserialized with serde into private mirror types,
//! then flattened into our [`FeatureCollection`]. Only `properties.name` is
//! kept from the properties object, and only when it's a string.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::MapError;
use crate::geometry::{Feature, FeatureCollection, Geometry};

#[derive(Deserialize)]
struct RawCollection {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

impl From<RawFeature> for Feature {
    fn from(raw: RawFeature) -> Self {
        let name = raw
            .properties
            .as_ref()
            .and_then(|props| props.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string);
        Feature::new(name, raw.geometry)
    }
}

/// Read and parse a boundary dataset file.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<FeatureCollection, MapError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let collection = parse_dataset(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        features = collection.len(),
        "loaded boundary dataset"
    );
    Ok(collection)
}

/// Parse a GeoJSON FeatureCollection document.
pub fn parse_dataset(bytes: &[u8]) -> Result<FeatureCollection, MapError> {
    let raw: RawCollection = serde_json::from_slice(bytes)?;

    if let Some(kind) = raw.kind.as_deref() {
        if kind != "FeatureCollection" {
            return Err(MapError::Parse(serde::de::Error::custom(format!(
                "expected a FeatureCollection, got {kind:?}"
            ))));
        }
    }

    Ok(FeatureCollection::new(
        raw.features.into_iter().map(Feature::from).collect(),
    ))
}

// ============================================================================
// TESTS
// ============================================================================
