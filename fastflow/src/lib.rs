//! # Fastflow
//!
//! Builds ordered stage sequences from declarative configuration.
//!
//! A configuration names each stage, gives its type as a tag, and supplies a
//! parameter block per stage. Fastflow provides:
//!
//! - **Stage list validation**: single-key `{name: type_tag}` entries, checked in order
//! - **Type resolution**: bare tags from a backend module, dotted tags from loaded modules
//! - **Calling conventions**: keyed, positional or scalar, picked by each parameter block
//! - **Documents**: whole configurations read from YAML or JSON
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fastflow::prelude::*;
//! use serde_json::json;
//!
//! let loader = InMemoryModuleLoader::new()
//!     .with_module(Namespace::new("mymod").with_stage("Histogram", deserialize_factory::<Histogram>()));
//! let resolver = TypeResolver::new(Arc::new(loader));
//!
//! let stages = SequenceBuilder::new(resolver)
//!     .with_backend("mymod")
//!     .description("hist", json!({"bins": 10}))
//!     .build(&json!([{"hist": "Histogram"}]))?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod errors;
pub mod observability;
pub mod registry;
pub mod sequence;
pub mod stages;
pub mod testing;

pub use errors::FastflowError;
pub use sequence::sequence_from_dict;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{GeneralSettings, SequenceConfig, StageDescription, StageDescriptions};
    pub use crate::errors::{
        BadStageListError, BadStagesDescriptionError, ConfigError, FastflowError,
        ModuleLoadError,
    };
    pub use crate::observability::{init_tracing, LogFormat};
    pub use crate::registry::{InMemoryModuleLoader, ModuleLoader, Namespace, TypeResolver};
    pub use crate::sequence::{sequence_from_dict, SequenceBuilder};
    pub use crate::stages::{deserialize_factory, stage_factory, Stage, StageArgs, StageFactory};
    pub use std::sync::Arc;
}
