//! Shape checks for the stage list and its entries.

use crate::errors::{BadStageListError, BadStagesDescriptionError, FastflowError};
use tracing::error;

/// Names the kind of a dynamic value for diagnostics.
#[must_use]
pub fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Confirms the top-level stage list is a sequence and returns its entries.
pub fn validate_stage_list(stages: &serde_json::Value) -> Result<&[serde_json::Value], FastflowError> {
    match stages {
        serde_json::Value::Array(entries) => Ok(entries.as_slice()),
        other => {
            let found = value_kind(other);
            error!(found, "Bad stage list: Should be a list, but instead got a '{}'", found);
            Err(BadStageListError::new(found).into())
        }
    }
}

/// Extracts the `(name, type tag)` pair from one stage list entry.
///
/// The only accepted shape is a mapping with exactly one key whose value is
/// a string.
pub fn infer_stage_name_type(
    index: usize,
    entry: &serde_json::Value,
) -> Result<(&str, &str), FastflowError> {
    let Some(map) = entry.as_object() else {
        let msg = format!("Bad stage configuration, for stage {index} in stages list");
        error!(
            index,
            found = value_kind(entry),
            "{msg}. Each stage config must be a dictionary with single key"
        );
        return Err(BadStagesDescriptionError::new(msg).with_index(index).into());
    };

    let mut items = map.iter();
    let (name, stage_type) = match (items.next(), items.next()) {
        (Some(item), None) => item,
        (None, _) => {
            let msg = format!("No key in dictionary spec for stage {index} in stages list");
            error!(index, "{msg}. Each stage config must be a dictionary with single key");
            return Err(BadStagesDescriptionError::new(msg).with_index(index).into());
        }
        (Some(_), Some(_)) => {
            let msg = format!("More than one key in dictionary spec for stage {index} in stages list");
            error!(index, "{msg}\n dictionary given: {entry}");
            return Err(BadStagesDescriptionError::new(msg).with_index(index).into());
        }
    };

    let Some(stage_type) = stage_type.as_str() else {
        let msg = format!("Type of stage {index} in stages list should be specified as a string");
        error!(index, stage = %name, "{msg}\n Stage Type provided: {stage_type}");
        return Err(BadStagesDescriptionError::new(msg)
            .with_index(index)
            .with_stage(name.as_str())
            .into());
    };

    Ok((name.as_str(), stage_type))
}
