//! Stage type registry.
//!
//! This module provides:
//! - Namespaces mapping simple names to stage factories
//! - Module loaders that serve namespaces by dotted path
//! - The type resolver used when building a stage sequence

mod loader;
mod namespace;
mod resolver;

pub use loader::{InMemoryModuleLoader, ModuleLoader};
#[cfg(test)]
pub use loader::MockModuleLoader;
pub use namespace::{BUILTIN_MODULE, Namespace};
pub use resolver::{TypeResolver, split_type_tag};
