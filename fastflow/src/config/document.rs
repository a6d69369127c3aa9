//! Whole sequence configurations read from YAML or JSON documents.
//!
//! A document is a mapping with a `stages` list, an optional `general` block,
//! and one top-level key per stage description:
//!
//! ```yaml
//! general:
//!   backend: mymod
//! stages:
//!   - histogram: Histogram
//!   - cuts: selection.CutFlow
//! histogram:
//!   bins: 10
//! cuts: [pt_above_20, eta_below_2]
//! ```

use super::{GeneralSettings, StageDescriptions};
use crate::errors::{ConfigError, FastflowError};
use crate::registry::TypeResolver;
use crate::sequence::{sequence_from_dict, value_kind};
use crate::stages::Stage;
use std::path::Path;
use tracing::debug;

/// A parsed sequence configuration document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceConfig {
    /// The raw stage list, validated when the sequence is built.
    pub stages: serde_json::Value,
    /// General settings.
    pub general: GeneralSettings,
    /// Every other top-level key, as stage descriptions.
    pub descriptions: StageDescriptions,
}

impl SequenceConfig {
    /// Splits a top-level mapping into stages, general settings and descriptions.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let mut map = match value {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(ConfigError::Invalid(format!(
                    "expected a mapping at the top level, got a '{}'",
                    value_kind(&other)
                )))
            }
        };

        let stages = map
            .remove("stages")
            .ok_or_else(|| ConfigError::Invalid("missing 'stages' key".to_string()))?;
        let general =
            GeneralSettings::from_value(map.remove("general").unwrap_or(serde_json::Value::Null))?;

        Ok(Self {
            stages,
            general,
            descriptions: StageDescriptions::from_map(map),
        })
    }

    /// Parses a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_yaml::from_str(contents)?;
        Self::from_value(value)
    }

    /// Parses a JSON document.
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(contents)?;
        Self::from_value(value)
    }

    /// Reads a document from disk. Files ending in `.json` are parsed as JSON,
    /// everything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&contents)?
        } else {
            Self::from_yaml_str(&contents)?
        };

        debug!(
            path = %path.display(),
            descriptions = config.descriptions.len(),
            "Loaded sequence config"
        );
        Ok(config)
    }

    /// Builds the stage sequence described by this document.
    pub fn build(&self, resolver: &TypeResolver) -> Result<Vec<Box<dyn Stage>>, FastflowError> {
        sequence_from_dict(&self.stages, &self.general, &self.descriptions, resolver)
    }
}
