//! OpenTelemetry tracing exported to a local OTLP JSON file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → FileSpanExporter → cinemapa-otlp.json
//! ```
//!
//! The plugin has no network sink of its own for telemetry, so every finished
//! span lands as one OTLP JSON line in
//! `~/.local/share/zellij/cinemapa/cinemapa-otlp.json`, rotated at 5 MB with
//! three backups kept.
//!
//! The filter comes from the `trace_level` plugin option and defaults to
//! `info`. Any `EnvFilter` directive works, e.g. `cinemapa=debug`.
//!
//! ```rust,no_run
//! use cinemapa::{observability::init_tracing, Config};
//!
//! init_tracing(&Config::default());
//! tracing::info!("tracing is now active");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;

/// `service.name` resource attribute and instrumentation scope name.
pub const SERVICE_NAME: &str = "Cinemapa";
