//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → OtlpFileExporter → JSON lines
//! ```
//!
//! Spans land in `<data dir>/cineverse-otlp.json`, one OTLP JSON document per
//! exported batch. The file rotates at 10 MB and keeps 3 timestamped backups.
//!
//! The level comes from the `trace_level` plugin option (default `info`) and
//! accepts any `EnvFilter` directive, e.g. `cineverse=debug`.
//!
//! Both the plugin and the storage worker call [`init_tracing`]; each runs in
//! its own wasm instance with its own subscriber, and worker spans are linked
//! to plugin spans through the trace context carried in every worker message.
//!
//! # Modules
//!
//! - `init`: subscriber assembly
//! - `exporter`: `SpanExporter` writing to the rotating file
//! - `otlp_json`: span batch to OTLP JSON encoding
//! - `rotating_file`: size-based rotation with backup retention

mod exporter;
mod init;
mod otlp_json;
mod rotating_file;

pub use init::init_tracing;

/// Service and instrumentation scope name reported on every span.
const SERVICE_NAME: &str = "Cineverse";

/// File name of the active trace file inside the data directory.
const TRACE_FILE_NAME: &str = "cineverse-otlp.json";
