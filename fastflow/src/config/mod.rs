//! Sequence configuration.
//!
//! This module provides:
//! - General settings (output directory, backend module)
//! - Stage descriptions, the per-stage parameter blocks
//! - Loading whole configurations from YAML or JSON documents

mod description;
mod document;
mod general;

pub use description::{StageDescription, StageDescriptions};
pub use document::SequenceConfig;
pub use general::GeneralSettings;
