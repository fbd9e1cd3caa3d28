//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! Spans land in `~/.local/share/zellij/tierdex/tierdex-otlp.json` as OTLP/JSON,
//! one batch per line, rotated by size. The verbosity comes from the
//! `trace_level` plugin option (an `EnvFilter` directive, default `info`).
//!
//! Messages to the worker carry the sender's trace context, so a key press,
//! the repository request it triggers on the worker and the response all
//! share one trace.
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`tracer`]: tracer provider with the file exporter
//! - [`span_formatter`]: OTLP/JSON encoding
//! - [`file_writer`]: rotating line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE};
