//! Named tables of stage factories.

use crate::stages::StageFactory;
use std::collections::HashMap;
use std::fmt;

/// Name of the crate's own namespace, searched when no backend is configured.
pub const BUILTIN_MODULE: &str = "fastflow";

/// A named set of stage factories, the unit a [`super::ModuleLoader`] hands out.
#[derive(Clone, Default)]
pub struct Namespace {
    name: String,
    factories: HashMap<String, StageFactory>,
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("name", &self.name)
            .field("stages", &self.stage_names())
            .finish()
    }
}

impl Namespace {
    /// Creates a new empty namespace.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            factories: HashMap::new(),
        }
    }

    /// Creates the empty builtin namespace.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(BUILTIN_MODULE)
    }

    /// Adds a stage factory.
    #[must_use]
    pub fn with_stage(mut self, name: impl Into<String>, factory: StageFactory) -> Self {
        self.register(name, factory);
        self
    }

    /// Registers a stage factory, replacing any factory with the same name.
    pub fn register(&mut self, name: impl Into<String>, factory: StageFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Returns the namespace name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a factory by its simple name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<StageFactory> {
        self.factories.get(name).cloned()
    }

    /// Checks whether a factory is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Lists registered stage names, sorted.
    #[must_use]
    pub fn stage_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of registered factories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
