//! The status store: catalog + per-movie flags, loaded once and written through.
//!
//! [`StatusStore`] is the single source of truth for liked / disliked / saved
//! state during a session. It is constructed empty and `loading`, receives the
//! two persisted blobs as the worker reads them, and from then on is mutated
//! only by the three toggle operations.
//!
//! # Write-through Contract
//!
//! Every toggle mutates memory synchronously and returns the [`StoreKey`]s
//! whose blobs changed. The caller encodes them with [`StatusStore::encode`]
//! and schedules a best-effort write. Nothing waits for the write, and a failed
//! write never rolls the in-memory state back.
//!
//! ```text
//! toggle_*(movie) ─► catalog.insert_if_absent ─► status map replace ─► [StoreKey] ─► worker
//! ```

use super::catalog::Catalog;
use crate::domain::error::{CineverseError, Result};
use crate::domain::{Movie, StatusRecord};
use crate::storage::StoreKey;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// In-memory catalog and status map with startup load tracking.
#[derive(Debug, Clone)]
pub struct StatusStore {
    /// Keys still waiting for their startup read to resolve.
    pending_loads: BTreeSet<StoreKey>,

    /// Every movie that has ever carried a status.
    catalog: Catalog,

    /// Flags per movie id. Ids missing here are all-false.
    statuses: HashMap<String, StatusRecord>,
}

impl Default for StatusStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusStore {
    /// Creates an empty store that is still loading both persisted keys.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending_loads: StoreKey::ALL.into_iter().collect(),
            catalog: Catalog::default(),
            statuses: HashMap::new(),
        }
    }

    /// Returns `true` until both startup reads have resolved.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        !self.pending_loads.is_empty()
    }

    /// Applies the result of a startup read.
    ///
    /// `None` means the key was never written. A payload that fails to parse is
    /// logged and treated as an empty map. Reads for keys that already resolved
    /// are ignored, so startup state is applied at most once per key.
    pub fn apply_loaded(&mut self, key: StoreKey, payload: Option<&str>) {
        let _span = tracing::debug_span!("store_apply_loaded", key = %key).entered();

        if !self.pending_loads.contains(&key) {
            tracing::debug!("key already loaded, ignoring late read");
            return;
        }

        match key {
            StoreKey::Catalog => {
                self.catalog = payload
                    .map(Catalog::from_json)
                    .transpose()
                    .unwrap_or_else(|e| {
                        tracing::error!(error = %e, "discarding unreadable catalog");
                        None
                    })
                    .unwrap_or_default();
                tracing::debug!(movie_count = self.catalog.len(), "catalog loaded");
            }
            StoreKey::Status => {
                self.statuses = payload
                    .map(decode_statuses)
                    .transpose()
                    .unwrap_or_else(|e| {
                        tracing::error!(error = %e, "discarding unreadable status map");
                        None
                    })
                    .unwrap_or_default();
                tracing::debug!(status_count = self.statuses.len(), "status map loaded");
            }
        }

        self.resolve(key);
    }

    /// Marks a startup read as failed; the key keeps its empty default.
    pub fn apply_load_failed(&mut self, key: StoreKey, message: &str) {
        tracing::error!(key = %key, error = %message, "failed to load persisted data");
        self.resolve(key);
    }

    fn resolve(&mut self, key: StoreKey) {
        self.pending_loads.remove(&key);
        if self.pending_loads.is_empty() {
            tracing::info!(
                movie_count = self.catalog.len(),
                status_count = self.statuses.len(),
                "status store ready"
            );
        }
    }

    /// Flips `liked` for `movie`, clearing `disliked`.
    ///
    /// Returns the keys that must be persisted.
    pub fn toggle_liked(&mut self, movie: &Movie) -> Vec<StoreKey> {
        self.toggle(movie, "liked", StatusRecord::toggled_liked)
    }

    /// Flips `disliked` for `movie`, clearing `liked`.
    ///
    /// Returns the keys that must be persisted.
    pub fn toggle_disliked(&mut self, movie: &Movie) -> Vec<StoreKey> {
        self.toggle(movie, "disliked", StatusRecord::toggled_disliked)
    }

    /// Flips `saved` for `movie`.
    ///
    /// Returns the keys that must be persisted.
    pub fn toggle_saved(&mut self, movie: &Movie) -> Vec<StoreKey> {
        self.toggle(movie, "saved", StatusRecord::toggled_saved)
    }

    fn toggle(
        &mut self,
        movie: &Movie,
        flag: &'static str,
        next: fn(StatusRecord) -> StatusRecord,
    ) -> Vec<StoreKey> {
        let mut changed = Vec::with_capacity(2);

        if self.catalog.insert_if_absent(movie) {
            changed.push(StoreKey::Catalog);
        }

        let updated = next(self.status(&movie.id));
        self.statuses.insert(movie.id.clone(), updated);
        changed.push(StoreKey::Status);

        tracing::debug!(
            movie_id = %movie.id,
            flag = flag,
            liked = updated.liked,
            disliked = updated.disliked,
            saved = updated.saved,
            "status toggled"
        );

        changed
    }

    /// Current flags for `id`, all false when no record exists.
    #[must_use]
    pub fn status(&self, id: &str) -> StatusRecord {
        self.statuses.get(id).copied().unwrap_or_default()
    }

    /// The raw status map.
    #[must_use]
    pub const fn statuses(&self) -> &HashMap<String, StatusRecord> {
        &self.statuses
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Every catalog movie in first-seen order.
    #[must_use]
    pub fn all_movies(&self) -> Vec<&Movie> {
        self.catalog.iter().collect()
    }

    #[must_use]
    pub fn liked_movies(&self) -> Vec<&Movie> {
        self.filtered(|s| s.liked)
    }

    #[must_use]
    pub fn disliked_movies(&self) -> Vec<&Movie> {
        self.filtered(|s| s.disliked)
    }

    #[must_use]
    pub fn saved_movies(&self) -> Vec<&Movie> {
        self.filtered(|s| s.saved)
    }

    fn filtered(&self, keep: impl Fn(StatusRecord) -> bool) -> Vec<&Movie> {
        self.catalog
            .iter()
            .filter(|movie| keep(self.status(&movie.id)))
            .collect()
    }

    /// Serializes the blob stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CineverseError::Storage`] if serialization fails.
    pub fn encode(&self, key: StoreKey) -> Result<String> {
        match key {
            StoreKey::Catalog => self.catalog.to_json(),
            StoreKey::Status => {
                let stored: BTreeMap<&str, &StatusRecord> = self
                    .statuses
                    .iter()
                    .map(|(id, record)| (id.as_str(), record))
                    .collect();
                serde_json::to_string(&stored).map_err(|e| {
                    CineverseError::Storage(format!("failed to serialize status map: {e}"))
                })
            }
        }
    }
}

fn decode_statuses(payload: &str) -> Result<HashMap<String, StatusRecord>> {
    serde_json::from_str(payload)
        .map_err(|e| CineverseError::Storage(format!("failed to parse status map: {e}")))
}
