//! Mock stages and factories for testing.

use std::any::Any;
use std::sync::Arc;

use crate::stages::{stage_factory, Stage, StageArgs, StageFactory};

/// A stage that remembers which type built it and with what arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingStage {
    type_name: String,
    args: StageArgs,
}

impl RecordingStage {
    /// Creates a new recording stage.
    #[must_use]
    pub fn new(type_name: impl Into<String>, args: StageArgs) -> Self {
        Self {
            type_name: type_name.into(),
            args,
        }
    }

    /// Returns the name of the type that built this stage.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the arguments the stage was constructed with.
    #[must_use]
    pub fn args(&self) -> &StageArgs {
        &self.args
    }
}

impl Stage for RecordingStage {
    fn name(&self) -> Option<&str> {
        self.args.name()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A factory producing [`RecordingStage`]s tagged with `type_name`.
#[must_use]
pub fn recording_factory(type_name: impl Into<String>) -> StageFactory {
    let type_name = type_name.into();
    stage_factory(move |args| Ok(RecordingStage::new(type_name.clone(), args)))
}

/// A factory that always fails with `message`.
#[must_use]
pub fn failing_factory(message: impl Into<String>) -> StageFactory {
    let message = message.into();
    Arc::new(move |_args: StageArgs| -> anyhow::Result<Box<dyn Stage>> {
        Err(anyhow::anyhow!(message.clone()))
    })
}

/// Downcasts a constructed stage to a [`RecordingStage`].
///
/// # Panics
///
/// Panics if the stage was not built by [`recording_factory`].
#[must_use]
pub fn as_recording(stage: &dyn Stage) -> &RecordingStage {
    stage
        .as_any()
        .downcast_ref::<RecordingStage>()
        .unwrap_or_else(|| panic!("Expected a RecordingStage, got {stage:?}"))
}

/// Returns the arguments a recording stage was constructed with.
///
/// # Panics
///
/// Panics if the stage was not built by [`recording_factory`].
#[must_use]
pub fn recorded_args(stage: &dyn Stage) -> &StageArgs {
    as_recording(stage).args()
}
