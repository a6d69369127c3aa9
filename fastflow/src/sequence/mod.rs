//! Stage sequence construction.
//!
//! This module provides:
//! - Validation of the stage list and its single-key entries
//! - Construction of each stage with the calling convention its description implies
//! - The `sequence_from_dict` entry point and a fluent builder over it

mod builder;
mod validation;

#[cfg(test)]
mod integration_tests;

pub use builder::{configure_stage, sequence_from_dict, SequenceBuilder};
pub use validation::{infer_stage_name_type, validate_stage_list, value_kind};
