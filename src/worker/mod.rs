//! Background worker thread for asynchronous storage operations.
//!
//! All key-value I/O happens here so the plugin's render loop never blocks on
//! the filesystem. From the plugin's side every read and write is a posted
//! message whose result arrives later as a `CustomMessage` event.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Storage-owning worker and message processing logic

pub mod handler;
pub mod messages;

pub use handler::StoreWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};

/// Name used both for the registered worker and for routing its responses.
pub const WORKER_NAME: &str = "cineverse";
