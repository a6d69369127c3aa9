//! Module loaders: turn a dotted module path into a [`Namespace`].

use super::Namespace;
use crate::errors::ModuleLoadError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Trait for resolving dotted module paths to namespaces.
///
/// Implementations may load code on demand or serve namespaces registered at
/// startup. Errors are handed back to the caller as-is.
#[cfg_attr(test, mockall::automock)]
pub trait ModuleLoader: Send + Sync {
    /// Loads the namespace for a dotted module path such as `pkg.mod`.
    fn load(&self, path: &str) -> Result<Arc<Namespace>, ModuleLoadError>;
}

/// A loader serving namespaces registered ahead of time.
#[derive(Debug, Default)]
pub struct InMemoryModuleLoader {
    modules: RwLock<HashMap<String, Arc<Namespace>>>,
}

impl InMemoryModuleLoader {
    /// Creates a new empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a namespace under its own name.
    #[must_use]
    pub fn with_module(self, namespace: Namespace) -> Self {
        self.register(namespace);
        self
    }

    /// Registers a namespace under its own name, replacing any previous one.
    pub fn register(&self, namespace: Namespace) {
        let path = namespace.name().to_string();
        self.register_as(path, namespace);
    }

    /// Registers a namespace under an explicit module path.
    pub fn register_as(&self, path: impl Into<String>, namespace: Namespace) {
        self.modules.write().insert(path.into(), Arc::new(namespace));
    }

    /// Removes a module, returning it if it was registered.
    pub fn unregister(&self, path: &str) -> Option<Arc<Namespace>> {
        self.modules.write().remove(path)
    }

    /// Checks whether a module path is registered.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.modules.read().contains_key(path)
    }

    /// Lists registered module paths, sorted.
    #[must_use]
    pub fn list_modules(&self) -> Vec<String> {
        let mut paths: Vec<_> = self.modules.read().keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl ModuleLoader for InMemoryModuleLoader {
    fn load(&self, path: &str) -> Result<Arc<Namespace>, ModuleLoadError> {
        self.modules
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| ModuleLoadError::new(path))
    }
}

impl<L: ModuleLoader + ?Sized> ModuleLoader for Arc<L> {
    fn load(&self, path: &str) -> Result<Arc<Namespace>, ModuleLoadError> {
        (**self).load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::recording_factory;

    #[test]
    fn test_in_memory_loader_load() {
        let loader = InMemoryModuleLoader::new()
            .with_module(Namespace::new("pkg.mod").with_stage("Baz", recording_factory("Baz")));

        let ns = loader.load("pkg.mod").unwrap();
        assert!(ns.contains("Baz"));
    }

    #[test]
    fn test_in_memory_loader_missing_module() {
        let loader = InMemoryModuleLoader::new();
        let err = loader.load("nope").unwrap_err();

        assert_eq!(err.module, "nope");
        assert_eq!(err.to_string(), "No module named 'nope'");
    }

    #[test]
    fn test_register_as_and_unregister() {
        let loader = InMemoryModuleLoader::new();
        loader.register_as("alias.path", Namespace::new("real"));

        assert!(loader.contains("alias.path"));
        assert!(!loader.contains("real"));
        assert_eq!(loader.list_modules(), vec!["alias.path".to_string()]);

        assert!(loader.unregister("alias.path").is_some());
        assert!(loader.load("alias.path").is_err());
    }

    #[test]
    fn test_register_replaces_module() {
        let loader = InMemoryModuleLoader::new();
        loader.register(Namespace::new("m").with_stage("Old", recording_factory("Old")));
        loader.register(Namespace::new("m").with_stage("New", recording_factory("New")));

        let ns = loader.load("m").unwrap();
        assert!(ns.contains("New"));
        assert!(!ns.contains("Old"));
    }

    #[test]
    fn test_shared_loader_through_arc() {
        let loader = Arc::new(InMemoryModuleLoader::new().with_module(Namespace::new("m")));
        let shared: Arc<dyn ModuleLoader> = loader.clone();

        assert!(shared.load("m").is_ok());
        assert!(loader.load("m").is_ok());
    }
}
