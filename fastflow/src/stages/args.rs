//! Constructor arguments handed to a stage factory.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The calling convention used to construct a stage.
///
/// Which variant a factory receives is decided by the shape of the stage's
/// description: a mapping becomes named arguments, a sequence becomes
/// positional arguments, anything else is passed as a single value together
/// with the stage name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "convention", rename_all = "snake_case")]
pub enum StageArgs {
    /// Named arguments.
    Keyed {
        /// Argument name to value.
        fields: serde_json::Map<String, serde_json::Value>,
    },
    /// Positional arguments, in order.
    Positional {
        /// The argument values.
        values: Vec<serde_json::Value>,
    },
    /// One positional value plus the stage name.
    Scalar {
        /// The single positional value.
        value: serde_json::Value,
        /// The stage name, passed by keyword.
        name: String,
    },
}

impl StageArgs {
    /// Creates keyed arguments.
    #[must_use]
    pub fn keyed(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::Keyed { fields }
    }

    /// Creates positional arguments.
    #[must_use]
    pub fn positional(values: Vec<serde_json::Value>) -> Self {
        Self::Positional { values }
    }

    /// Creates scalar arguments.
    #[must_use]
    pub fn scalar(value: serde_json::Value, name: impl Into<String>) -> Self {
        Self::Scalar {
            value,
            name: name.into(),
        }
    }

    /// Short label for the calling convention.
    #[must_use]
    pub fn convention(&self) -> &'static str {
        match self {
            Self::Keyed { .. } => "keyed",
            Self::Positional { .. } => "positional",
            Self::Scalar { .. } => "scalar",
        }
    }

    /// The stage name carried by the arguments.
    ///
    /// Positional arguments never carry one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Keyed { fields } => fields.get("name").and_then(serde_json::Value::as_str),
            Self::Positional { .. } => None,
            Self::Scalar { name, .. } => Some(name),
        }
    }

    /// Looks up a named argument.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        match self {
            Self::Keyed { fields } => fields.get(key),
            _ => None,
        }
    }

    /// Looks up a positional argument. The scalar value sits at index 0.
    #[must_use]
    pub fn positional_at(&self, index: usize) -> Option<&serde_json::Value> {
        match self {
            Self::Positional { values } => values.get(index),
            Self::Scalar { value, .. } if index == 0 => Some(value),
            _ => None,
        }
    }

    /// Deserializes the arguments into a concrete type.
    ///
    /// Keyed arguments are read as a map, positional arguments as a sequence,
    /// and scalar arguments from the single value alone (the name is still
    /// available through [`StageArgs::name`]).
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match self {
            Self::Keyed { fields } => serde_json::from_value(serde_json::Value::Object(fields.clone())),
            Self::Positional { values } => serde_json::from_value(serde_json::Value::Array(values.clone())),
            Self::Scalar { value, .. } => serde_json::from_value(value.clone()),
        }
    }
}
