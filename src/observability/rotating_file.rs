//! Append-only line writer with size-based rotation.
//!
//! When the active file grows past the size limit it is renamed to
//! `<name>.<UTC timestamp>` and a fresh file is started. Only the newest
//! backups are kept.

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Rotate once the active file exceeds 10 MB.
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Rotated files kept next to the active one.
const MAX_BACKUP_FILES: usize = 3;

#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    handle: Option<File>,
}

impl RotatingFile {
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub const fn with_limits(path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            max_backups,
            handle: None,
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is too big.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        if fs::metadata(&self.path).is_ok_and(|m| m.len() > self.max_bytes) {
            self.handle = None;
            self.rotate()?;
        }

        let file = match &mut self.handle {
            Some(file) => file,
            empty => empty.insert(OpenOptions::new().create(true).append(true).open(&self.path)?),
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.6fZ").to_string();
        let mut backup = self.backup_path(&stamp);
        let mut n = 1;
        while backup.exists() {
            backup = self.backup_path(&format!("{stamp}-{n}"));
            n += 1;
        }

        fs::rename(&self.path, &backup)?;
        self.prune_backups()
    }

    fn backup_path(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".");
        name.push(suffix);
        self.path.with_file_name(name)
    }

    /// Deletes all but the newest `max_backups` rotated files.
    ///
    /// Backup suffixes are UTC timestamps, so name order is age order.
    fn prune_backups(&self) -> io::Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let Some(prefix) = self.path.file_name().and_then(|n| n.to_str()).map(|n| format!("{n}.")) else {
            return Ok(());
        };

        let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix))
            })
            .collect();

        backups.sort();
        let excess = backups.len().saturating_sub(self.max_backups);
        for old in &backups[..excess] {
            if let Err(e) = fs::remove_file(old) {
                tracing::warn!(path = %old.display(), error = %e, "failed to remove old trace backup");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cineverse-otlp.json");
        let mut file = RotatingFile::new(path.clone());

        file.write_line("{\"a\":1}").unwrap();
        file.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_past_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cineverse-otlp.json");
        let mut file = RotatingFile::with_limits(path.clone(), 8, 3);

        file.write_line("0123456789").unwrap();
        file.write_line("next").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "next\n");
        let names = files_in(dir.path());
        assert_eq!(names.len(), 2);
        assert!(names.iter().any(|n| n.starts_with("cineverse-otlp.json.")));
    }

    #[test]
    fn keeps_only_newest_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cineverse-otlp.json");
        let mut file = RotatingFile::with_limits(path, 1, 2);

        for i in 0..6 {
            file.write_line(&format!("line {i}")).unwrap();
        }

        let names = files_in(dir.path());
        let backups = names.iter().filter(|n| n.starts_with("cineverse-otlp.json.")).count();
        assert_eq!(backups, 2);
        assert!(names.contains(&"cineverse-otlp.json".to_string()));
    }
}
