//! Worker-side handling of storage messages.
//!
//! [`StoreWorker`] owns the key-value backend and turns each [`WorkerMessage`]
//! into exactly one [`WorkerResponse`]. It is free of Zellij host calls; the
//! plugin binary wraps it in the `ZellijWorker` shim that moves payloads across
//! the thread boundary.

use crate::domain::error::{CineverseError, Result};
use crate::infrastructure::paths;
use crate::storage::{JsonStorage, Storage, StoreKey};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Worker thread state for handling storage operations.
///
/// The storage backend is initialized lazily on the first message, so a
/// backend that cannot be opened turns into per-message failures instead of a
/// dead worker.
#[derive(Default)]
pub struct StoreWorker {
    storage: Option<Box<dyn Storage>>,
}

impl std::fmt::Debug for StoreWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreWorker")
            .field("initialized", &self.storage.is_some())
            .finish()
    }
}

impl StoreWorker {
    /// Creates a worker backed by an already opened storage.
    #[must_use]
    pub fn with_storage(storage: Box<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    /// Returns the storage backend, opening the JSON store in the plugin data
    /// directory on first use.
    fn get_storage(&mut self) -> Result<&mut Box<dyn Storage>> {
        if self.storage.is_none() {
            let storage = JsonStorage::new(paths::get_data_dir()).map_err(|e| {
                CineverseError::Worker(format!("failed to initialize storage: {e}"))
            })?;
            self.storage = Some(Box::new(storage));
        }

        self.storage
            .as_mut()
            .ok_or_else(|| CineverseError::Worker("Storage not initialized".to_string()))
    }

    fn handle_load_entry(&mut self, key: StoreKey) -> WorkerResponse {
        match self.get_storage().and_then(|storage| storage.get(key.as_str())) {
            Ok(payload) => {
                tracing::debug!(key = %key, found = payload.is_some(), "entry loaded");
                WorkerResponse::EntryLoaded { key, payload }
            }
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "entry load failed");
                WorkerResponse::LoadFailed {
                    key,
                    message: e.to_string(),
                }
            }
        }
    }

    fn handle_persist_entry(&mut self, key: StoreKey, payload: &str) -> WorkerResponse {
        match self
            .get_storage()
            .and_then(|storage| storage.set(key.as_str(), payload))
        {
            Ok(()) => {
                tracing::debug!(key = %key, bytes = payload.len(), "entry persisted");
                WorkerResponse::EntryPersisted { key }
            }
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "entry persist failed");
                WorkerResponse::PersistFailed {
                    key,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Attaches the parent trace context carried by `message` to this thread.
    ///
    /// Returns a guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Processes a worker message and returns its response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadEntry { key, .. } => self.handle_load_entry(key),
            WorkerMessage::PersistEntry { key, payload, .. } => {
                self.handle_persist_entry(key, &payload)
            }
        }
    }

    /// Decodes a JSON message payload, handles it and encodes the response.
    ///
    /// Returns `None` if the payload is not a valid message or the response
    /// cannot be encoded; both cases are logged.
    pub fn handle_payload(&mut self, payload: &str) -> Option<String> {
        let message: WorkerMessage = match serde_json::from_str(payload) {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return None;
            }
        };

        let response = self.handle_message(message);

        serde_json::to_string(&response)
            .map_err(|e| tracing::debug!(error = %e, "failed to serialize worker response"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker_in(dir: &tempfile::TempDir) -> StoreWorker {
        let storage = JsonStorage::new(dir.path().to_path_buf()).unwrap();
        StoreWorker::with_storage(Box::new(storage))
    }

    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(CineverseError::Storage("disk on fire".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(CineverseError::Storage("disk on fire".to_string()))
        }
    }

    #[test]
    fn load_of_unwritten_key_has_no_payload() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = worker_in(&dir);

        let response = worker.handle_message(WorkerMessage::load_entry(StoreKey::Status));

        assert_eq!(
            response,
            WorkerResponse::EntryLoaded {
                key: StoreKey::Status,
                payload: None
            }
        );
    }

    #[test]
    fn persisted_entry_is_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = worker_in(&dir);
        let payload = r#"{"27205":{"liked":false,"disliked":false,"saved":true}}"#;

        let persisted = worker.handle_message(WorkerMessage::persist_entry(
            StoreKey::Status,
            payload.to_string(),
        ));
        let loaded = worker.handle_message(WorkerMessage::load_entry(StoreKey::Status));

        assert_eq!(
            persisted,
            WorkerResponse::EntryPersisted {
                key: StoreKey::Status
            }
        );
        assert_eq!(
            loaded,
            WorkerResponse::EntryLoaded {
                key: StoreKey::Status,
                payload: Some(payload.to_string())
            }
        );
    }

    #[test]
    fn storage_failures_name_their_key() {
        let mut worker = StoreWorker::with_storage(Box::new(BrokenStorage));

        let load = worker.handle_message(WorkerMessage::load_entry(StoreKey::Catalog));
        let persist = worker.handle_message(WorkerMessage::persist_entry(
            StoreKey::Status,
            "{}".to_string(),
        ));

        assert!(matches!(
            load,
            WorkerResponse::LoadFailed {
                key: StoreKey::Catalog,
                ..
            }
        ));
        assert!(matches!(
            persist,
            WorkerResponse::PersistFailed {
                key: StoreKey::Status,
                ..
            }
        ));
    }

    #[test]
    fn payload_round_trip_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = worker_in(&dir);
        let request = serde_json::to_string(&WorkerMessage::load_entry(StoreKey::Catalog)).unwrap();

        let encoded = worker.handle_payload(&request).unwrap();
        let response: WorkerResponse = serde_json::from_str(&encoded).unwrap();

        assert_eq!(
            response,
            WorkerResponse::EntryLoaded {
                key: StoreKey::Catalog,
                payload: None
            }
        );
    }

    #[test]
    fn malformed_payload_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = worker_in(&dir);

        assert!(worker.handle_payload("{\"Bogus\":{}}").is_none());
    }
}
