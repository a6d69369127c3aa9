//! Testing utilities for stage sequences.
//!
//! This module provides:
//! - Recording stages that capture their constructor arguments
//! - In-memory resolver fixtures
//! - Log capture for asserting on diagnostics

mod fixtures;
mod mocks;

pub use fixtures::{capture_logs, recording_namespace, recording_resolver, CapturedLogs};
pub use mocks::{as_recording, failing_factory, recorded_args, recording_factory, RecordingStage};
