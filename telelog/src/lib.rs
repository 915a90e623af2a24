//! A backend-agnostic facade for structured, leveled, scoped telemetry.
//!
//! The facade is three operations on a [`Logger`]:
//!
//! - [`event`](Logger::event): a named, leveled, point-in-time occurrence
//!   carrying structured key/value entries.
//! - [`span`](Logger::span): a scoped unit of work wrapped around a
//!   computation, with attributes, an outcome status, and guaranteed closure.
//! - [`with_context`](Logger::with_context): key/value pairs attached to
//!   everything emitted within a computation's dynamic extent, restored on
//!   exit.
//!
//! Loggers are obtained from a [`LoggerFactory`], the dependency-injection
//! seam where applications bind the facade to a concrete backend. This crate
//! defines only the contract plus a [`noop`] binding; backend adapters live in
//! their own crates.

pub mod noop;
mod value;

pub use value::{LazyValue, OpaqueValue, Value};

use std::fmt;

/// Severity of a telemetry event, ordered from least to most severe.
///
/// Every level maps to exactly one backend severity; the mapping is total and
/// fixed per adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Fine-grained tracing detail.
    Trace,
    /// Diagnostic information.
    Debug,
    /// Normal operational messages.
    Info,
    /// Something unexpected that did not prevent the operation.
    Warn,
    /// The operation failed.
    Error,
}

impl Level {
    /// Returns the upper-case name of the level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable key/value pair attached to an event, span, or context scope.
#[derive(Debug, Clone)]
pub struct LogEntry {
    key: String,
    value: Value,
}

impl LogEntry {
    /// Creates an entry from a key and anything convertible into a [`Value`].
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        LogEntry {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The entry's key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The entry's value, possibly still lazy.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// The facade's logging capability.
///
/// Implementations translate these calls into backend primitives. They must be
/// transparent to the wrapped computations: results and failures propagate
/// unchanged, and telemetry emission never alters the caller-visible outcome.
pub trait Logger {
    /// Emits one point-in-time record at `level`, identified by `name` and
    /// carrying `entries` as a key-to-value mapping.
    ///
    /// Lazy values are resolved before emission. If `entries` contains
    /// duplicate keys, the last occurrence wins. Must not fail for well-formed
    /// input; values the backend cannot represent natively degrade to their
    /// string rendering.
    fn event(&self, level: Level, name: &str, entries: &[LogEntry]);

    /// Runs `f` inside a span named `name`, returning its result.
    ///
    /// Attributes from `entries` are attached before `f` runs, and the span is
    /// current for `f`'s full extent. On `Ok` the span status is set to ok; on
    /// `Err` the status is set to error, the failure is recorded on the span,
    /// and the identical `Err` is returned. The span is ended exactly once on
    /// every exit path, including unwinding, after status recording and before
    /// the current-span scope is released.
    ///
    /// `level` exists for interface symmetry with [`event`](Logger::event);
    /// backends without a native span severity ignore it.
    fn span<T, E, F>(&self, level: Level, name: &str, entries: &[LogEntry], f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: std::error::Error;

    /// Runs `f` with `entries` overlaid onto the current scoped context,
    /// returning its result.
    ///
    /// Values are resolved and rendered as strings. The overlay nests: outer
    /// entries stay visible unless shadowed, and the prior context is restored
    /// exactly on every exit path, including unwinding. Empty `entries` must
    /// not touch the context at all. This wrapper performs no error
    /// translation, so a `Result`-returning `f` propagates untouched.
    fn with_context<T, F>(&self, entries: &[LogEntry], f: F) -> T
    where
        F: FnOnce() -> T;
}

/// Constructs [`Logger`] instances bound to a namespace.
pub trait LoggerFactory {
    /// The [`Logger`] type this factory produces.
    type Logger: Logger;

    /// Returns a fresh logger bound to `namespace`.
    ///
    /// Factories do not cache or deduplicate by namespace, and they do not
    /// validate it; an empty namespace passes through unchanged.
    fn create_logger(&self, namespace: &str) -> Self::Logger;
}
