//! Test fixtures for sequence testing.

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

use super::recording_factory;
use crate::registry::{InMemoryModuleLoader, Namespace, TypeResolver};

/// Builds a resolver over in-memory modules whose stages are all recording stages.
///
/// `modules` pairs a module path with the stage names it exports; `builtin`
/// lists the stage names placed in the builtin namespace.
#[must_use]
pub fn recording_resolver(modules: &[(&str, &[&str])], builtin: &[&str]) -> TypeResolver {
    let loader = InMemoryModuleLoader::new();
    for (path, stages) in modules {
        loader.register(recording_namespace(path, stages));
    }
    TypeResolver::new(Arc::new(loader)).with_builtin(recording_namespace(
        crate::registry::BUILTIN_MODULE,
        builtin,
    ))
}

/// A namespace exporting a recording factory for each name.
#[must_use]
pub fn recording_namespace(name: &str, stages: &[&str]) -> Namespace {
    stages
        .iter()
        .fold(Namespace::new(name), |ns, stage| {
            ns.with_stage(*stage, recording_factory(*stage))
        })
}

/// Log output captured from a `tracing` subscriber.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    /// Returns everything logged so far.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Checks whether the captured output contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }

    /// Counts the captured lines at `ERROR` level.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.contents()
            .lines()
            .filter(|line| line.contains("ERROR"))
            .count()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a thread-local subscriber and returns its result with the logs.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, CapturedLogs) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs)
}
