//! Screen and input mode state types for the application.
//!
//! The plugin shows one of three screens. Independently, input is either in
//! command mode (`Normal`) or directed at the query box (`Search`). On the
//! Search screen the query box drives the remote search; on Saved and Profile
//! it filters the local lists.

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the query box.
    ///
    /// Accepts character input, backspace, and enter (to switch to Navigating).
    Typing,

    /// User is navigating the result list while the query stays visible.
    ///
    /// Accepts j/k for movement, l/d/s to rate, and / to return to Typing.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation and command mode.
    Normal,

    /// Query box is open, with the given focus.
    Search(SearchFocus),
}

/// Navigable destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Popular listing or remote search results.
    Search,
    /// Movies flagged as saved.
    Saved,
    /// Liked, disliked and saved sections.
    Profile,
}

impl Screen {
    /// All screens in tab order.
    pub const ALL: [Self; 3] = [Self::Search, Self::Saved, Self::Profile];

    /// Short label used in the tab bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::Saved => "Saved",
            Self::Profile => "Profile",
        }
    }

    /// Header title shown while the screen is active.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Search => "Search Movies",
            Self::Saved => "Saved Movies",
            Self::Profile => "My Profile",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Search => Self::Saved,
            Self::Saved => Self::Profile,
            Self::Profile => Self::Search,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Search => Self::Profile,
            Self::Saved => Self::Search,
            Self::Profile => Self::Saved,
        }
    }
}
