//! Path utilities for the Zellij sandbox environment.
//!
//! In the plugin sandbox the host filesystem is mounted under `/host`, which
//! normally resolves to the directory Zellij was started from (usually `$HOME`).

use std::path::PathBuf;

/// Returns the data directory for Cineverse storage and traces.
///
/// Resolves to `/host/.local/share/zellij/cineverse` in the sandbox, i.e.
/// `~/.local/share/zellij/cineverse` on the host when Zellij runs from the
/// home directory. The persisted catalog and status map live here.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("cineverse")
}

/// Expands tilde paths to use the `/host` prefix for the Zellij sandbox.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
