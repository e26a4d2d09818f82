//! Theme management and ANSI escape sequence generation.
//!
//! Color schemes are TOML documents. Built-in themes are embedded at compile
//! time; custom ones are read from a file path given in the plugin
//! configuration.
//!
//! # Built-in Themes
//!
//! - `cineverse-dark`: charcoal surfaces with red, green and blue accents (default)
//! - `catppuccin-mocha`: dark theme with warm pastel tones
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#ffffff"
//! header_bg = "#2c2c2e"          # optional
//! tab_active_fg = "#007aff"
//! selection_fg = "#ffffff"
//! selection_bg = "#3a3a3c"
//! text_normal = "#e5e5ea"
//! text_dim = "#8e8e93"
//! border = "#2c2c2e"
//! search_bar_border = "#007aff"
//! match_highlight_fg = "#1c1c1e"
//! match_highlight_bg = "#ffd60a"
//! empty_state_fg = "#8e8e93"
//! error_fg = "#ff3b30"
//! liked_fg = "#34c759"
//! disliked_fg = "#ff3b30"
//! saved_fg = "#007aff"
//! ```

use crate::domain::error::{CineverseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "cineverse-dark";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,
    /// Label of the active tab.
    pub tab_active_fg: String,

    /// Selected card foreground color.
    pub selection_fg: String,
    /// Selected card background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, synopsis, poster URL).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Query box border color.
    pub search_bar_border: String,
    /// Fuzzy match highlight foreground.
    pub match_highlight_fg: String,
    /// Fuzzy match highlight background.
    pub match_highlight_bg: String,

    /// Loading and empty message color.
    pub empty_state_fg: String,
    /// Fetch failure message color.
    pub error_fg: String,

    /// Active like indicator.
    pub liked_fg: String,
    /// Active dislike indicator.
    pub disliked_fg: String,
    /// Active save indicator.
    pub saved_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name, or `None` if the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "cineverse-dark" => include_str!("../../themes/cineverse-dark.toml"),
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CineverseError::Theme`] if the file cannot be read or its
    /// content is not a complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CineverseError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| CineverseError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to an RGB tuple; malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color escape sequence for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling (colors, bold, dim).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    /// Palette used if the embedded default ever fails to parse.
    fn fallback() -> Self {
        let c = |hex: &str| hex.to_string();
        Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors {
                header_fg: c("#ffffff"),
                header_bg: None,
                tab_active_fg: c("#007aff"),
                selection_fg: c("#ffffff"),
                selection_bg: c("#3a3a3c"),
                text_normal: c("#e5e5ea"),
                text_dim: c("#8e8e93"),
                border: c("#2c2c2e"),
                search_bar_border: c("#007aff"),
                match_highlight_fg: c("#1c1c1e"),
                match_highlight_bg: c("#ffd60a"),
                empty_state_fg: c("#8e8e93"),
                error_fg: c("#ff3b30"),
                liked_fg: c("#34c759"),
                disliked_fg: c("#ff3b30"),
                saved_fg: c("#007aff"),
            },
        }
    }
}

impl Default for Theme {
    /// Returns the default theme (Cineverse Dark).
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| {
            tracing::error!("embedded default theme failed to parse");
            Self::fallback()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        for name in ["cineverse-dark", "catppuccin-mocha"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn default_is_cineverse_dark() {
        let theme = Theme::default();

        assert_eq!(theme.name, DEFAULT_THEME);
        assert_eq!(theme.colors.disliked_fg.to_lowercase(), "#ff3b30");
    }

    #[test]
    fn custom_theme_file_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let body = toml::to_string(&Theme::fallback()).unwrap().replace(DEFAULT_THEME, "mine");
        file.write_all(body.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();

        assert_eq!(theme.name, "mine");
    }

    #[test]
    fn incomplete_theme_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = \"broken\"\n[colors]\nheader_fg = \"#fff\"\n").unwrap();

        let err = Theme::from_file(file.path()).unwrap_err();

        assert!(matches!(err, CineverseError::Theme(_)));
    }

    #[test]
    fn escapes_encode_rgb() {
        assert_eq!(Theme::fg("#FF3B30"), "\u{1b}[38;2;255;59;48m");
        assert_eq!(Theme::bg("1c1c1e"), "\u{1b}[48;2;28;28;30m");
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
    }
}
