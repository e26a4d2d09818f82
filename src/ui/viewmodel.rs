//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They carry no
//! business logic, only display-ready data: truncated text, highlight ranges,
//! selection and status flags.

use crate::domain::StatusRecord;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Title bar.
    pub header: HeaderInfo,

    /// One tab per screen, in navigation order.
    pub tabs: Vec<TabInfo>,

    /// Query box, if visible on this screen and mode.
    pub search_bar: Option<SearchBarInfo>,

    /// Windowed list content: section titles and movie cards.
    pub entries: Vec<ListEntry>,

    /// Inline notice shown below the list (for example a refresh in progress).
    pub status_line: Option<String>,

    /// Replaces the list when set (loading, error or nothing to show).
    pub empty_state: Option<EmptyState>,

    /// Keybinding hints.
    pub footer: FooterInfo,
}

/// One row group in the list area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    /// Section title, one row.
    Section(String),
    /// Movie card, [`CARD_HEIGHT`] rows.
    Card(MovieCardView),
}

/// Rows occupied by one movie card.
pub const CARD_HEIGHT: usize = 3;

/// Columns before a card's text (selection marker and gap).
pub const CARD_INDENT: usize = 2;

/// Columns reserved on the title row for `✗ dislike  ★ save  ♥ like `.
pub const BADGES_WIDTH: usize = 26;

impl ListEntry {
    /// Number of terminal rows the entry occupies.
    #[must_use]
    pub const fn height(&self) -> usize {
        match self {
            Self::Section(_) => 1,
            Self::Card(_) => CARD_HEIGHT,
        }
    }
}

/// Display data for one movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCardView {
    /// Title, truncated to the available width.
    pub title: String,

    /// Synopsis excerpt, single line.
    pub synopsis: String,

    /// Poster URL, truncated to the available width.
    pub poster_url: String,

    /// Toggle indicators, drawn as dislike, save, like.
    pub status: StatusRecord,

    /// Whether this card holds the cursor.
    pub is_selected: bool,

    /// Character ranges of the title to highlight, `(start, end)` exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

/// One entry of the tab bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    /// Label including the shortcut digit, e.g. `1 Search`.
    pub label: String,
    pub is_active: bool,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "j/k: navigate  l: like  q: quit").
    pub keybindings: String,
}

/// What an [`EmptyState`] stands for; selects its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyKind {
    Loading,
    Error,
    Empty,
}

/// Message shown in place of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "You haven't saved any movies yet.").
    pub message: String,

    /// Secondary explanatory text, may be empty.
    pub subtitle: String,

    pub kind: EmptyKind,
}

/// Query box display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// `Search` on the search screen, `Filter` on local lists.
    pub label: &'static str,

    /// Current query text.
    pub query: String,

    /// Whether keystrokes currently go to the box.
    pub is_focused: bool,
}
