//! No-op implementations of the facade.
//!
//! Useful as a default binding and in tests: computations still run and their
//! results and failures propagate unchanged, but no telemetry is emitted.

use crate::{Level, LogEntry, Logger, LoggerFactory};

/// A [`Logger`] that discards all telemetry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger(());

impl NoopLogger {
    /// Creates a new no-op logger.
    pub fn new() -> Self {
        NoopLogger(())
    }
}

impl Logger for NoopLogger {
    fn event(&self, _level: Level, _name: &str, _entries: &[LogEntry]) {
        // Ignored
    }

    fn span<T, E, F>(&self, _level: Level, _name: &str, _entries: &[LogEntry], f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: std::error::Error,
    {
        f()
    }

    fn with_context<T, F>(&self, _entries: &[LogEntry], f: F) -> T
    where
        F: FnOnce() -> T,
    {
        f()
    }
}

/// A [`LoggerFactory`] that hands out [`NoopLogger`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLoggerFactory(());

impl NoopLoggerFactory {
    /// Creates a new no-op factory.
    pub fn new() -> Self {
        NoopLoggerFactory(())
    }
}

impl LoggerFactory for NoopLoggerFactory {
    type Logger = NoopLogger;

    fn create_logger(&self, _namespace: &str) -> Self::Logger {
        NoopLogger::new()
    }
}
