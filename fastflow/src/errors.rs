//! Error types for the fastflow framework.
//!
//! Configuration problems detected while turning a stage list into stages are
//! reported as [`BadStageListError`] or [`BadStagesDescriptionError`]. Failures
//! raised by collaborators (module loaders, stage factories) pass through
//! [`FastflowError`] with their original error attached.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for fastflow operations.
#[derive(Debug, Error)]
pub enum FastflowError {
    /// The top-level stage list is not a sequence.
    #[error("{0}")]
    BadStageList(#[from] BadStageListError),

    /// A stage entry or its description is malformed or missing.
    #[error("{0}")]
    BadStagesDescription(#[from] BadStagesDescriptionError),

    /// A type tag could not be resolved and the caller asked for a hard failure.
    #[error("Unknown stage class, '{name}'")]
    UnknownStageType {
        /// The simple name that was looked up.
        name: String,
    },

    /// The module loader could not provide the requested namespace.
    #[error("{0}")]
    ModuleLoad(#[from] ModuleLoadError),

    /// A stage factory returned an error. Passed through untouched.
    #[error(transparent)]
    StageConstruction(anyhow::Error),

    /// A configuration document could not be read or parsed.
    #[error("{0}")]
    Config(#[from] ConfigError),
}

impl FastflowError {
    /// Creates an unknown stage type error.
    #[must_use]
    pub fn unknown_stage_type(name: impl Into<String>) -> Self {
        Self::UnknownStageType { name: name.into() }
    }

    /// True for the errors that describe a malformed sequence configuration.
    #[must_use]
    pub fn is_bad_config(&self) -> bool {
        matches!(self, Self::BadStageList(_) | Self::BadStagesDescription(_))
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = match self {
            Self::BadStageList(err) => err.to_dict(),
            Self::BadStagesDescription(err) => err.to_dict(),
            Self::UnknownStageType { name } => {
                let mut map = HashMap::new();
                map.insert("type".to_string(), serde_json::json!("UnknownStageType"));
                map.insert("name".to_string(), serde_json::json!(name));
                map
            }
            Self::ModuleLoad(err) => {
                let mut map = HashMap::new();
                map.insert("type".to_string(), serde_json::json!("ModuleLoad"));
                map.insert("module".to_string(), serde_json::json!(err.module));
                map
            }
            Self::StageConstruction(_) => {
                let mut map = HashMap::new();
                map.insert("type".to_string(), serde_json::json!("StageConstruction"));
                map
            }
            Self::Config(_) => {
                let mut map = HashMap::new();
                map.insert("type".to_string(), serde_json::json!("Config"));
                map
            }
        };
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

/// Error raised when the top-level stage list is not a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Bad stage list: Should be a list, but instead got a '{found}'")]
pub struct BadStageListError {
    /// The kind of value that was supplied instead.
    pub found: String,
}

impl BadStageListError {
    /// Creates a new bad stage list error.
    #[must_use]
    pub fn new(found: impl Into<String>) -> Self {
        Self {
            found: found.into(),
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("type".to_string(), serde_json::json!("BadStageList"));
        map.insert("found".to_string(), serde_json::json!(self.found));
        map
    }
}

/// Error raised when a stage entry or stage description is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct BadStagesDescriptionError {
    /// The error message.
    pub message: String,
    /// Position of the offending entry in the stage list, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// Name of the offending stage, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

impl BadStagesDescriptionError {
    /// Creates a new bad stages description error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            index: None,
            stage: None,
        }
    }

    /// Sets the stage list index.
    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Sets the stage name.
    #[must_use]
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("type".to_string(), serde_json::json!("BadStagesDescription"));
        if let Some(index) = self.index {
            map.insert("index".to_string(), serde_json::json!(index));
        }
        if let Some(ref stage) = self.stage {
            map.insert("stage".to_string(), serde_json::json!(stage));
        }
        map
    }
}

/// Error raised by a module loader that cannot provide a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No module named '{module}'{}", .reason.as_ref().map(|r| format!(": {r}")).unwrap_or_default())]
pub struct ModuleLoadError {
    /// The dotted module path that was requested.
    pub module: String,
    /// Optional loader-specific reason.
    pub reason: Option<String>,
}

impl ModuleLoadError {
    /// Creates a new module load error.
    #[must_use]
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            reason: None,
        }
    }

    /// Attaches a loader-specific reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Errors raised while reading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document could not be read.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        /// Path of the document.
        path: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML.
    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document is not valid JSON.
    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but has the wrong structure.
    #[error("Invalid config document: {0}")]
    Invalid(String),
}
