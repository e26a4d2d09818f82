//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the main plugin
//! thread and the background worker that owns the key-value storage. It also
//! carries distributed tracing context across the thread boundary.

use crate::storage::StoreKey;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid (for example when
    /// no OpenTelemetry layer is installed).
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors for `WorkerMessage` variants that attach the
/// current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_entry(LoadEntry { key: StoreKey }),
    persist_entry(PersistEntry { key: StoreKey, payload: String }),
}

/// Messages sent from the main thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read the blob stored under `key`.
    LoadEntry {
        key: StoreKey,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Overwrite the blob stored under `key` with `payload`.
    PersistEntry {
        key: StoreKey,

        /// Serialized map, already encoded by the status store.
        payload: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    pub(crate) const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadEntry { trace_context, .. } | Self::PersistEntry { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Responses sent from the worker thread back to the main thread.
///
/// Every response names the key it concerns, so the plugin can account for
/// each startup read whether it succeeded or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// A read completed. `payload` is `None` when the key was never written.
    EntryLoaded {
        key: StoreKey,
        payload: Option<String>,
    },

    /// A read failed; the plugin falls back to an empty map.
    LoadFailed { key: StoreKey, message: String },

    /// A write landed on disk.
    EntryPersisted { key: StoreKey },

    /// A write failed; in-memory state is kept regardless.
    PersistFailed { key: StoreKey, message: String },
}
