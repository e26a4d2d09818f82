//! Cineverse: a Zellij plugin for browsing movies and keeping personal lists.
//!
//! Cineverse shows the popular listing of The Movie Database, searches it by
//! title as you type, and lets you mark each movie as liked, disliked or saved.
//! Marks persist locally across sessions.
//!
//! - Debounced remote search where only the latest response is applied
//! - Status store with a first-seen movie catalog and write-through persistence
//! - Saved and Profile screens with fuzzy local filtering
//! - JSON file storage owned by a Zellij worker thread
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, debounce, request guard          │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Status store  │   │ TMDB client   │   │ Worker        │
//! │ (status/)     │   │ (tmdb/)       │   │ (worker/)     │
//! │ - Catalog     │   │ - URLs        │   │ - Storage I/O │
//! │ - Toggles     │   │ - Listing     │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage (storage/), Domain (domain/),              │
//! │  Infrastructure (infrastructure/), UI (ui/)         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/cineverse.wasm" {
//!         api_key "<tmdb v3 api key>"
//!         language "pt-BR"
//!         debounce_ms "500"
//!         theme "cineverse-dark"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse configuration, initialize tracing,
//!    build `AppState`, subscribe to events, request permissions
//! 2. **Permissions Granted**: post one `LoadEntry` per store key to the
//!    worker and fetch the popular listing
//! 3. **Worker Replies**: the store leaves its loading state once both keys
//!    resolved, whether or not the reads succeeded
//! 4. **Interaction**: typing arms debounce timers, toggles persist through
//!    the worker, web results are applied only for the latest request

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod status;
pub mod storage;
pub mod tmdb;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, Screen, SearchFocus};
pub use domain::{CineverseError, Movie, Result, StatusRecord};
pub use ui::Theme;

use std::collections::BTreeMap;
use tmdb::TmdbEndpoint;

/// Language used for listings when none is configured.
pub const DEFAULT_LANGUAGE: &str = "pt-BR";

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/cineverse.wasm" {
///     api_key "0123abcd"
///     language "en-US"
///     debounce_ms "300"
///     theme_file "~/.config/cineverse/theme.toml"
///     trace_level "cineverse=debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// TMDB v3 API key sent with every request.
    ///
    /// Without it every listing request fails with HTTP 401, which the Search
    /// screen reports as a load failure.
    pub api_key: String,

    /// Response language (`language` query parameter). Default: `pt-BR`
    pub language: String,

    /// Delay between the last keystroke and the search it triggers. Default: 500
    pub debounce_ms: u64,

    /// Built-in theme name to use.
    ///
    /// Options: `cineverse-dark`, `catppuccin-mocha`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file, `~` resolving to the `/host` mount.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing filter directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            debounce_ms: app::state::DEFAULT_DEBOUNCE_MS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - `api_key`: trimmed string, empty when absent
    /// - `language`: non-empty string, falls back to `pt-BR`
    /// - `debounce_ms`: `u64`, falls back to 500 on parse error
    /// - `theme`, `theme_file`, `trace_level`: optional strings
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let api_key = config
            .get("api_key")
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        let language = config
            .get("language")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map_or(defaults.language, String::from);

        let debounce_ms = config
            .get("debounce_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(defaults.debounce_ms);

        Self {
            api_key,
            language,
            debounce_ms,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// Resolves the configured theme: file first, then name, then default.
    ///
    /// Unknown names and unreadable files are logged and fall back to the
    /// default theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial application state from configuration.
///
/// The store starts out loading; nothing is read or fetched until the runtime
/// feeds in `Event::PermissionsGranted`.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(language = %config.language, debounce_ms = config.debounce_ms, "initializing cineverse plugin");

    if config.api_key.is_empty() {
        tracing::warn!("no api_key configured, listing requests will be rejected");
    }

    let endpoint = TmdbEndpoint::new(config.api_key.clone(), config.language.clone());
    let mut state = AppState::new(endpoint, config.theme());
    state.debounce_ms = config.debounce_ms;
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_configuration_uses_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());

        assert!(config.api_key.is_empty());
        assert_eq!(config.language, "pt-BR");
        assert_eq!(config.debounce_ms, 500);
        assert!(config.theme_name.is_none());
    }

    #[test]
    fn values_are_parsed() {
        let config = Config::from_zellij(&map(&[
            ("api_key", " abc123 "),
            ("language", "en-US"),
            ("debounce_ms", "250"),
            ("theme", "catppuccin-mocha"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.language, "en-US");
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.theme().name, "catppuccin-mocha");
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[("debounce_ms", "soon"), ("language", "  "), ("theme", "nope")]));

        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.language, "pt-BR");
        assert_eq!(config.theme().name, ui::theme::DEFAULT_THEME);
    }

    #[test]
    fn theme_file_takes_precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let custom = include_str!("../themes/catppuccin-mocha.toml").replace("catppuccin-mocha", "custom");
        file.write_all(custom.as_bytes()).unwrap();

        let config = Config::from_zellij(&map(&[
            ("theme", "catppuccin-mocha"),
            ("theme_file", file.path().to_str().unwrap()),
        ]));

        assert_eq!(config.theme().name, "custom");
    }

    #[test]
    fn initialize_applies_debounce_and_starts_loading() {
        let config = Config::from_zellij(&map(&[("api_key", "k"), ("debounce_ms", "120")]));

        let state = initialize(&config);

        assert_eq!(state.debounce_ms, 120);
        assert!(state.store.is_loading());
        assert_eq!(state.screen, Screen::Search);
    }
}
