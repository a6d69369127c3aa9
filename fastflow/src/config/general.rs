//! General settings shared by every stage in a sequence.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Settings read once at the start of sequence resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Directory forwarded to keyed stages as `out_dir`. Defaults to the
    /// current working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
    /// Dotted module path searched for bare type tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    /// Any other keys, kept but not interpreted.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl GeneralSettings {
    /// Creates empty settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads settings from a dynamic value. `null` means empty settings.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<String>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    /// Sets the backend module.
    #[must_use]
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// The output directory, falling back to the current working directory.
    pub fn resolve_output_dir(&self) -> Result<String, ConfigError> {
        if let Some(ref dir) = self.output_dir {
            return Ok(dir.clone());
        }
        let cwd = std::env::current_dir().map_err(|source| ConfigError::Io {
            path: ".".to_string(),
            source,
        })?;
        Ok(cwd.to_string_lossy().into_owned())
    }

    /// The backend module path, if one is configured. Empty strings count as unset.
    #[must_use]
    pub fn backend_module(&self) -> Option<&str> {
        self.backend.as_deref().filter(|b| !b.is_empty())
    }
}
