//! An OpenTelemetry adapter for the [`telelog`] facade.
//!
//! [`OtelLogger`] implements the facade's three operations against
//! OpenTelemetry primitives: [`event`](telelog::Logger::event) becomes a log
//! record emitted through the logs bridge API, [`span`](telelog::Logger::span)
//! becomes a tracer span made current for the computation's extent, and
//! [`with_context`](telelog::Logger::with_context) becomes baggage carried by
//! an attached [`Context`].
//!
//! The backend is injected: the adapter is generic over a
//! [`LoggerProvider`](opentelemetry::logs::LoggerProvider) and a
//! [`TracerProvider`](opentelemetry::trace::TracerProvider), so it can drive
//! the real SDK in production and in-memory exporters in tests. It never
//! initializes or configures telemetry itself.
//!
//! ```
//! use opentelemetry_sdk::logs::SdkLoggerProvider;
//! use opentelemetry_sdk::trace::SdkTracerProvider;
//! use telelog::{Level, LogEntry, Logger, LoggerFactory, Value};
//! use telelog_otel::OtelLoggerFactory;
//!
//! let factory = OtelLoggerFactory::new(
//!     SdkLoggerProvider::builder().build(),
//!     SdkTracerProvider::builder().build(),
//! );
//! let logger = factory.create_logger("my-service");
//! logger.event(
//!     Level::Info,
//!     "user.login",
//!     &[LogEntry::new("user_id", Value::Int(42))],
//! );
//! ```

use std::thread;

use opentelemetry::baggage::{Baggage, BaggageExt};
use opentelemetry::logs::{AnyValue, LogRecord as _, Logger as _, LoggerProvider, Severity};
use opentelemetry::trace::{Span as _, Status, TraceContextExt, Tracer, TracerProvider};
use opentelemetry::{Context, Key, KeyValue};
use telelog::{Level, LogEntry, Logger, LoggerFactory, Value};

/// Implements the `telelog` facade against OpenTelemetry.
///
/// Bound to a namespace at construction: the backend logger and tracer handles
/// are resolved once from the given providers, keyed by that namespace. The
/// adapter holds no other state; everything else lives and dies within a
/// single call.
///
/// Scope activation (current span, baggage) is confined to the calling
/// thread — OpenTelemetry's current-context store is thread-local, and this
/// adapter introduces no cross-thread propagation of its own.
pub struct OtelLogger<LP, TP>
where
    LP: LoggerProvider + Send + Sync,
    TP: TracerProvider + Send + Sync,
{
    logger: LP::Logger,
    tracer: TP::Tracer,
}

impl<LP, TP> OtelLogger<LP, TP>
where
    LP: LoggerProvider + Send + Sync,
    TP: TracerProvider + Send + Sync,
{
    /// Creates an adapter bound to `namespace`.
    ///
    /// The namespace is passed through unvalidated; deduplication of repeated
    /// lookups is the providers' concern, not the adapter's.
    pub fn new(logger_provider: &LP, tracer_provider: &TP, namespace: &str) -> Self {
        OtelLogger {
            logger: logger_provider.logger(namespace.to_owned()),
            tracer: tracer_provider.tracer(namespace.to_owned()),
        }
    }
}

impl<LP, TP> Logger for OtelLogger<LP, TP>
where
    LP: LoggerProvider + Send + Sync,
    TP: TracerProvider + Send + Sync,
    <TP::Tracer as Tracer>::Span: Send + Sync + 'static,
{
    fn event(&self, level: Level, name: &str, entries: &[LogEntry]) {
        let mut record = self.logger.create_log_record();
        record.set_severity_number(map_severity(level));
        record.set_severity_text(level.as_str());
        // The backend's event-name slot wants a 'static str, which the facade
        // cannot promise, so the logical event identifier rides in the body.
        record.set_body(AnyValue::from(name.to_owned()));
        record.add_attributes(event_attributes(entries));
        self.logger.emit(record);
    }

    /// Runs `f` inside a span named `name`.
    ///
    /// `level` is ignored: OpenTelemetry spans have no native severity, and no
    /// synthetic severity attribute is invented here.
    fn span<T, E, F>(&self, _level: Level, name: &str, entries: &[LogEntry], f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: std::error::Error,
    {
        let mut span = self.tracer.start(name.to_owned());
        for entry in entries {
            span.set_attribute(span_attribute(entry));
        }

        // Drop order is load-bearing: `_closer` ends the span first, then
        // `_scope` restores the prior current-span context, on normal return
        // and during unwinding alike.
        let cx = Context::current_with_span(span);
        let _scope = cx.clone().attach();
        let _closer = SpanCloser { cx: &cx };

        let result = f();

        let span = cx.span();
        match &result {
            Ok(_) => span.set_status(Status::Ok),
            Err(error) => {
                span.set_status(Status::error(error.to_string()));
                span.record_error(error);
            }
        }
        result
    }

    fn with_context<T, F>(&self, entries: &[LogEntry], f: F) -> T
    where
        F: FnOnce() -> T,
    {
        if entries.is_empty() {
            return f();
        }

        // `Context::with_baggage` replaces the whole baggage set, so the
        // current entries are merged in by hand; outer scopes stay visible and
        // shadowed values come back when the guard restores the snapshot.
        let cx = Context::map_current(|current| {
            let mut baggage: Baggage = current
                .baggage()
                .iter()
                .map(|(key, (value, metadata))| (key.clone(), (value.clone(), metadata.clone())))
                .collect();
            for entry in entries {
                // Insertion can be refused (invalid key, W3C limits); that is
                // backend policy and never aborts the call.
                let _ = baggage.insert(entry.key().to_owned(), entry.value().to_string());
            }
            current.with_baggage(baggage)
        });
        let _scope = cx.attach();
        f()
    }
}

/// Ends the wrapped span when dropped.
///
/// During unwinding the span is additionally marked failed before ending, so
/// a panicking computation still leaves a status behind. Ending the span is
/// the last guaranteed action before the current-span scope is released.
struct SpanCloser<'a> {
    cx: &'a Context,
}

impl Drop for SpanCloser<'_> {
    fn drop(&mut self) {
        let span = self.cx.span();
        if thread::panicking() {
            span.set_status(Status::error("computation panicked"));
        }
        span.end();
    }
}

/// Constructs [`OtelLogger`]s bound to namespaces.
///
/// Owns the injected providers; [`create_logger`](LoggerFactory::create_logger)
/// is a pure constructor returning a fresh binding per call, with no caching
/// or namespace validation.
pub struct OtelLoggerFactory<LP, TP>
where
    LP: LoggerProvider + Send + Sync,
    TP: TracerProvider + Send + Sync,
{
    logger_provider: LP,
    tracer_provider: TP,
}

impl<LP, TP> OtelLoggerFactory<LP, TP>
where
    LP: LoggerProvider + Send + Sync,
    TP: TracerProvider + Send + Sync,
{
    /// Creates a factory from already-configured providers.
    pub fn new(logger_provider: LP, tracer_provider: TP) -> Self {
        OtelLoggerFactory {
            logger_provider,
            tracer_provider,
        }
    }
}

impl<LP, TP> LoggerFactory for OtelLoggerFactory<LP, TP>
where
    LP: LoggerProvider + Send + Sync,
    TP: TracerProvider + Send + Sync,
    <TP::Tracer as Tracer>::Span: Send + Sync + 'static,
{
    type Logger = OtelLogger<LP, TP>;

    fn create_logger(&self, namespace: &str) -> Self::Logger {
        OtelLogger::new(&self.logger_provider, &self.tracer_provider, namespace)
    }
}

/// Total, fixed mapping from facade levels to backend severities.
fn map_severity(level: Level) -> Severity {
    match level {
        Level::Trace => Severity::Trace,
        Level::Debug => Severity::Debug,
        Level::Info => Severity::Info,
        Level::Warn => Severity::Warn,
        Level::Error => Severity::Error,
    }
}

/// Builds the record's attribute mapping from the entry sequence.
///
/// Keys are unique in the result; a duplicated key keeps its first position
/// but takes the value of its last occurrence.
fn event_attributes(entries: &[LogEntry]) -> Vec<(Key, AnyValue)> {
    let mut attributes: Vec<(Key, AnyValue)> = Vec::with_capacity(entries.len());
    for entry in entries {
        let value = event_value(entry.value());
        match attributes
            .iter_mut()
            .find(|(key, _)| key.as_str() == entry.key())
        {
            Some(existing) => existing.1 = value,
            None => attributes.push((Key::new(entry.key().to_owned()), value)),
        }
    }
    attributes
}

/// Maps a facade value to its native log-attribute representation.
fn event_value(value: &Value) -> AnyValue {
    match value.resolve() {
        Value::Bool(v) => AnyValue::from(v),
        Value::Byte(v) => AnyValue::from(v),
        Value::Short(v) => AnyValue::from(v),
        Value::Int(v) => AnyValue::from(v),
        Value::Long(v) => AnyValue::from(v),
        Value::Float(v) => AnyValue::from(v),
        Value::Double(v) => AnyValue::from(v),
        other @ (Value::Lazy(_) | Value::Opaque(_)) => AnyValue::from(other.to_string()),
    }
}

/// Maps an entry to a span attribute with type-directed dispatch.
///
/// Booleans and numerics keep their native backend type (integers widened to
/// i64, `f32` to `f64`, both lossless); anything else falls back to the string
/// rendering of the underlying value.
fn span_attribute(entry: &LogEntry) -> KeyValue {
    let key = Key::new(entry.key().to_owned());
    match entry.value().resolve() {
        Value::Bool(v) => KeyValue::new(key, v),
        Value::Byte(v) => KeyValue::new(key, i64::from(v)),
        Value::Short(v) => KeyValue::new(key, i64::from(v)),
        Value::Int(v) => KeyValue::new(key, i64::from(v)),
        Value::Long(v) => KeyValue::new(key, v),
        Value::Float(v) => KeyValue::new(key, f64::from(v)),
        Value::Double(v) => KeyValue::new(key, v),
        other @ (Value::Lazy(_) | Value::Opaque(_)) => KeyValue::new(key, other.to_string()),
    }
}
