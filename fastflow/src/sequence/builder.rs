//! Stage construction and the sequence entry points.

use super::validation::{infer_stage_name_type, validate_stage_list};
use crate::config::{GeneralSettings, StageDescription, StageDescriptions};
use crate::errors::{BadStagesDescriptionError, FastflowError};
use crate::registry::{Namespace, TypeResolver};
use crate::stages::{Stage, StageArgs, StageFactory};
use tracing::{debug, error};

/// Builds the ordered stage sequence described by a stage list.
///
/// `stages` must be a list of single-key mappings `{name: type_tag}`. Each
/// entry's type tag is resolved through `resolver`, with bare tags looked up
/// in the `backend` module from `general` (or the builtin namespace), and the
/// stage is constructed from `descriptions[name]`.
///
/// The first bad entry aborts the whole sequence.
pub fn sequence_from_dict(
    stages: &serde_json::Value,
    general: &GeneralSettings,
    descriptions: &StageDescriptions,
    resolver: &TypeResolver,
) -> Result<Vec<Box<dyn Stage>>, FastflowError> {
    let output_dir = general.resolve_output_dir()?;
    let default_module = general
        .backend_module()
        .map(|backend| resolver.load_module(backend))
        .transpose()?;

    create_stages(
        stages,
        &output_dir,
        descriptions,
        default_module.as_deref(),
        resolver,
    )
}

fn create_stages(
    stages: &serde_json::Value,
    output_dir: &str,
    descriptions: &StageDescriptions,
    default_module: Option<&Namespace>,
    resolver: &TypeResolver,
) -> Result<Vec<Box<dyn Stage>>, FastflowError> {
    let entries = validate_stage_list(stages)?;

    let mut out_stages = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let (name, stage_type) = infer_stage_name_type(index, entry)?;

        let Some(factory) = resolver.resolve(stage_type, default_module, false)? else {
            let msg = format!("Unknown type for stage '{name}': {stage_type}");
            error!(index, stage = name, type_tag = stage_type, "{msg}");
            return Err(BadStagesDescriptionError::new(msg)
                .with_index(index)
                .with_stage(name)
                .into());
        };

        out_stages.extend(configure_stage(name, &factory, output_dir, descriptions)?);
    }

    Ok(out_stages)
}

/// Constructs one stage from its description.
///
/// The description's shape picks the calling convention: keyed descriptions
/// get `name` and `out_dir` filled in where absent, positional descriptions
/// are passed through untouched, and scalars are passed with the stage name.
/// Returns a list so that one entry may expand to several stages.
pub fn configure_stage(
    name: &str,
    factory: &StageFactory,
    out_dir: &str,
    descriptions: &StageDescriptions,
) -> Result<Vec<Box<dyn Stage>>, FastflowError> {
    let Some(description) = descriptions.get(name) else {
        let msg = format!("Missing description for stage '{name}'");
        error!(stage = name, "{msg}");
        return Err(BadStagesDescriptionError::new(msg).with_stage(name).into());
    };

    let args = match description {
        StageDescription::Keyed { fields } => keyed_args(name, out_dir, fields),
        StageDescription::Positional { values } => positional_args(values),
        StageDescription::Scalar { value } => scalar_args(name, value),
    };

    debug!(stage = name, convention = args.convention(), "Constructing stage");
    let stage = factory(args).map_err(FastflowError::StageConstruction)?;
    Ok(vec![stage])
}

fn keyed_args(
    name: &str,
    out_dir: &str,
    fields: &serde_json::Map<String, serde_json::Value>,
) -> StageArgs {
    // Caller-supplied keys win.
    let mut merged = fields.clone();
    merged
        .entry("name")
        .or_insert_with(|| serde_json::Value::String(name.to_string()));
    merged
        .entry("out_dir")
        .or_insert_with(|| serde_json::Value::String(out_dir.to_string()));
    StageArgs::keyed(merged)
}

fn positional_args(values: &[serde_json::Value]) -> StageArgs {
    StageArgs::positional(values.to_vec())
}

fn scalar_args(name: &str, value: &serde_json::Value) -> StageArgs {
    StageArgs::scalar(value.clone(), name)
}

/// Fluent front end over [`sequence_from_dict`].
///
/// ```rust,ignore
/// let stages = SequenceBuilder::new(resolver)
///     .with_backend("mymod")
///     .description("a", json!({"x": 1}))
///     .build(&json!([{"a": "Foo"}]))?;
/// ```
#[derive(Debug, Clone)]
pub struct SequenceBuilder {
    resolver: TypeResolver,
    general: GeneralSettings,
    descriptions: StageDescriptions,
}

impl SequenceBuilder {
    /// Creates a builder with empty settings and no descriptions.
    #[must_use]
    pub fn new(resolver: TypeResolver) -> Self {
        Self {
            resolver,
            general: GeneralSettings::default(),
            descriptions: StageDescriptions::default(),
        }
    }

    /// Replaces the general settings.
    #[must_use]
    pub fn with_general(mut self, general: GeneralSettings) -> Self {
        self.general = general;
        self
    }

    /// Sets the backend module for bare type tags.
    #[must_use]
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.general.backend = Some(backend.into());
        self
    }

    /// Sets the output directory handed to keyed stages.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<String>) -> Self {
        self.general.output_dir = Some(output_dir.into());
        self
    }

    /// Adds one stage description.
    #[must_use]
    pub fn description(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.descriptions.insert(name, value);
        self
    }

    /// Replaces all stage descriptions.
    #[must_use]
    pub fn with_descriptions(mut self, descriptions: StageDescriptions) -> Self {
        self.descriptions = descriptions;
        self
    }

    /// Returns the general settings.
    #[must_use]
    pub fn general(&self) -> &GeneralSettings {
        &self.general
    }

    /// Returns the stage descriptions.
    #[must_use]
    pub fn descriptions(&self) -> &StageDescriptions {
        &self.descriptions
    }

    /// Builds the stage sequence for `stages`.
    pub fn build(&self, stages: &serde_json::Value) -> Result<Vec<Box<dyn Stage>>, FastflowError> {
        sequence_from_dict(stages, &self.general, &self.descriptions, &self.resolver)
    }
}
