//! run with `$ cargo run --example basic`
//!
//! Wires the telelog facade to OpenTelemetry with in-memory exporters, so the
//! telemetry produced by all three facade operations can be printed at the
//! end without any collector running.

use opentelemetry_sdk::logs::{InMemoryLogExporter, SdkLoggerProvider};
use opentelemetry_sdk::trace::{InMemorySpanExporter, SdkTracerProvider};
use telelog::{Level, LogEntry, Logger, LoggerFactory, Value};
use telelog_otel::OtelLoggerFactory;

fn main() {
    let log_exporter = InMemoryLogExporter::default();
    let span_exporter = InMemorySpanExporter::default();
    let factory = OtelLoggerFactory::new(
        SdkLoggerProvider::builder()
            .with_simple_exporter(log_exporter.clone())
            .build(),
        SdkTracerProvider::builder()
            .with_simple_exporter(span_exporter.clone())
            .build(),
    );

    let logger = factory.create_logger("examples.basic");

    logger.with_context(&[LogEntry::new("req_id", "abc-123")], || {
        logger.event(
            Level::Info,
            "user.login",
            &[
                LogEntry::new("user_id", Value::Int(42)),
                LogEntry::new("expensive", Value::lazy(|| Value::from(6i64 * 7))),
            ],
        );

        let total = logger
            .span(
                Level::Info,
                "checkout",
                &[LogEntry::new("items", Value::Int(3))],
                || Ok::<_, std::convert::Infallible>(3 * 995),
            )
            .expect("infallible");
        logger.event(
            Level::Debug,
            "checkout.total",
            &[LogEntry::new("cents", Value::Long(i64::from(total)))],
        );
    });

    for log in log_exporter.get_emitted_logs().expect("emitted logs") {
        println!("log: {:?}", log.record);
    }
    for span in span_exporter.get_finished_spans().expect("finished spans") {
        println!("span: {} -> {:?}", span.name, span.status);
    }
}
