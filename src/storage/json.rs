//! JSON file-based storage backend.
//!
//! Each key is stored in its own file inside a data directory. Writes go to a
//! temporary file first and are then renamed over the target, so a crash never
//! leaves a half-written blob behind.
//!
//! # File Layout
//!
//! ```text
//! <data dir>/
//!   cineverse-allmovies.json    ← "@Cineverse:allMovies"
//!   cineverse-moviestatus.json  ← "@Cineverse:movieStatus"
//! ```

use crate::domain::error::Result;
use crate::storage::backend::Storage;
use std::path::{Path, PathBuf};

/// JSON file storage backend.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. It's designed to be owned by the single
/// worker thread, matching the Zellij plugin architecture.
#[derive(Debug)]
pub struct JsonStorage {
    /// Directory holding one file per key.
    dir: PathBuf,
}

impl JsonStorage {
    /// Opens a JSON storage backend rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: PathBuf) -> Result<Self> {
        tracing::debug!(dir = ?dir, "initializing JSON storage");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Returns the directory this backend writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Maps a storage key to its file path.
    ///
    /// Non-alphanumeric characters become `-` and the name is lowercased, so
    /// `@Cineverse:movieStatus` lands in `cineverse-moviestatus.json`.
    fn path_for(&self, key: &str) -> PathBuf {
        let mut stem = String::with_capacity(key.len());
        for c in key.chars() {
            if c.is_ascii_alphanumeric() {
                stem.push(c.to_ascii_lowercase());
            } else if !stem.is_empty() && !stem.ends_with('-') {
                stem.push('-');
            }
        }
        let stem = stem.trim_end_matches('-');
        let stem = if stem.is_empty() { "entry" } else { stem };

        self.dir.join(format!("{stem}.json"))
    }
}

impl Storage for JsonStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        let _span = tracing::debug_span!("json_get", key = %key, path = ?path).entered();

        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(bytes = contents.len(), "entry read");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no entry stored yet");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let _span = tracing::debug_span!("json_set", key = %key, bytes = value.len()).entered();

        let tmp_path = path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, value)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!(path = ?path, "entry saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().to_path_buf()).unwrap();

        assert_eq!(storage.get("@Cineverse:movieStatus").unwrap(), None);
    }

    #[test]
    fn set_then_get_returns_latest_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path().to_path_buf()).unwrap();

        storage.set("@Cineverse:movieStatus", "{}").unwrap();
        storage
            .set("@Cineverse:movieStatus", r#"{"1":{"liked":true}}"#)
            .unwrap();

        assert_eq!(
            storage.get("@Cineverse:movieStatus").unwrap().as_deref(),
            Some(r#"{"1":{"liked":true}}"#)
        );
    }

    #[test]
    fn keys_map_to_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path().to_path_buf()).unwrap();

        storage.set("@Cineverse:allMovies", "[1]").unwrap();
        storage.set("@Cineverse:movieStatus", "[2]").unwrap();

        assert!(dir.path().join("cineverse-allmovies.json").exists());
        assert!(dir.path().join("cineverse-moviestatus.json").exists());
        assert!(!dir.path().join("cineverse-moviestatus.tmp").exists());
    }

    #[test]
    fn creates_missing_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("share").join("cineverse");

        let storage = JsonStorage::new(nested.clone()).unwrap();

        assert!(nested.is_dir());
        assert_eq!(storage.dir(), nested.as_path());
    }
}
