//! Resolution of stage type tags to factories.

use super::{ModuleLoader, Namespace};
use crate::errors::FastflowError;
use crate::stages::StageFactory;
use std::fmt;
use std::sync::Arc;
use tracing::error;

/// Splits a type tag into its module path and simple name.
///
/// `pkg.mod.Baz` yields `(Some("pkg.mod"), "Baz")`; a bare `Baz` yields
/// `(None, "Baz")`.
#[must_use]
pub fn split_type_tag(tag: &str) -> (Option<&str>, &str) {
    match tag.rsplit_once('.') {
        Some((module, name)) => (Some(module), name),
        None => (None, tag),
    }
}

/// Resolves type tags against a default namespace or dynamically loaded modules.
#[derive(Clone)]
pub struct TypeResolver {
    loader: Arc<dyn ModuleLoader>,
    builtin: Arc<Namespace>,
}

impl fmt::Debug for TypeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeResolver")
            .field("builtin", &self.builtin.name())
            .finish_non_exhaustive()
    }
}

impl TypeResolver {
    /// Creates a resolver over a module loader, with an empty builtin namespace.
    #[must_use]
    pub fn new(loader: Arc<dyn ModuleLoader>) -> Self {
        Self {
            loader,
            builtin: Arc::new(Namespace::builtin()),
        }
    }

    /// Replaces the namespace searched when no default module is given.
    #[must_use]
    pub fn with_builtin(mut self, builtin: Namespace) -> Self {
        self.builtin = Arc::new(builtin);
        self
    }

    /// Returns the builtin namespace.
    #[must_use]
    pub fn builtin(&self) -> &Namespace {
        &self.builtin
    }

    /// Loads a module through the loader. Loader errors pass through unchanged.
    pub fn load_module(&self, path: &str) -> Result<Arc<Namespace>, FastflowError> {
        Ok(self.loader.load(path)?)
    }

    /// Resolves a type tag to a stage factory.
    ///
    /// Dotted tags load their module prefix and look up the last segment in
    /// it. Bare tags are looked up in `default_module`, or in the builtin
    /// namespace when that is `None`. A miss yields `Ok(None)` unless
    /// `raise_on_miss` is set, in which case it is an
    /// [`FastflowError::UnknownStageType`].
    pub fn resolve(
        &self,
        tag: &str,
        default_module: Option<&Namespace>,
        raise_on_miss: bool,
    ) -> Result<Option<StageFactory>, FastflowError> {
        let default_module = default_module.unwrap_or(self.builtin.as_ref());

        let (module_path, name) = split_type_tag(tag);
        let factory = match module_path {
            Some(path) => self.load_module(path)?.get(name),
            None => default_module.get(name),
        };

        if factory.is_none() && raise_on_miss {
            error!(
                type_tag = tag,
                module = module_path.unwrap_or_else(|| default_module.name()),
                "Unknown stage class, '{}'",
                name
            );
            return Err(FastflowError::unknown_stage_type(name));
        }

        Ok(factory)
    }
}
