//! Per-stage parameter blocks.

use std::collections::HashMap;

/// The parameter block configured for one stage.
///
/// The variant decides how the stage's factory is called.
#[derive(Debug, Clone, PartialEq)]
pub enum StageDescription {
    /// A mapping of named constructor arguments.
    Keyed {
        /// Argument name to value.
        fields: serde_json::Map<String, serde_json::Value>,
    },
    /// An ordered list of positional constructor arguments.
    Positional {
        /// The argument values.
        values: Vec<serde_json::Value>,
    },
    /// A single value.
    Scalar {
        /// The value.
        value: serde_json::Value,
    },
}

impl StageDescription {
    /// Classifies a dynamic value. `null` is treated as no description at all.
    #[must_use]
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::Object(fields) => Some(Self::Keyed { fields }),
            serde_json::Value::Array(values) => Some(Self::Positional { values }),
            value => Some(Self::Scalar { value }),
        }
    }

    /// Short label for the shape of the description.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Keyed { .. } => "keyed",
            Self::Positional { .. } => "positional",
            Self::Scalar { .. } => "scalar",
        }
    }
}

/// Stage descriptions keyed by stage name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageDescriptions {
    entries: HashMap<String, StageDescription>,
}

impl StageDescriptions {
    /// Creates an empty set of descriptions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a description from a dynamic value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a description from a dynamic value.
    ///
    /// A `null` value removes any existing description for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: serde_json::Value) {
        let name = name.into();
        match StageDescription::from_value(value) {
            Some(description) => {
                self.entries.insert(name, description);
            }
            None => {
                self.entries.remove(&name);
            }
        }
    }

    /// Builds descriptions from every entry of a mapping.
    #[must_use]
    pub fn from_map(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter().collect()
    }

    /// Looks up the description for a stage.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StageDescription> {
        self.entries.get(name)
    }

    /// Checks whether a stage has a description.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Lists described stage names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of descriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no descriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, serde_json::Value)> for StageDescriptions {
    fn from_iter<I: IntoIterator<Item = (K, serde_json::Value)>>(iter: I) -> Self {
        let mut descriptions = Self::new();
        for (name, value) in iter {
            descriptions.insert(name, value);
        }
        descriptions
    }
}
