//! Movie and status domain types.
//!
//! A [`Movie`] is the local projection of a remote listing entry. A
//! [`StatusRecord`] carries the three per-movie flags. Both are plain data: the
//! rules that keep the flags consistent live in the status store, which is the
//! only code allowed to produce new records.

use serde::{Deserialize, Serialize};

/// A movie as seen by the plugin.
///
/// Immutable once created. The identifier is the remote numeric id rendered as
/// a string, which is also the key used by the catalog and status map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub synopsis: String,
    #[serde(default)]
    pub poster_url: String,
}

impl Movie {
    /// Creates a movie from its four fields.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        synopsis: impl Into<String>,
        poster_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            synopsis: synopsis.into(),
            poster_url: poster_url.into(),
        }
    }
}

/// Liked / disliked / saved flags for one movie.
///
/// `liked` and `disliked` are never both set. A movie without a record is
/// treated as [`StatusRecord::default`], all flags cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub disliked: bool,
    #[serde(default)]
    pub saved: bool,
}

impl StatusRecord {
    /// Record after pressing "like": flips `liked`, always clears `disliked`.
    #[must_use]
    pub const fn toggled_liked(self) -> Self {
        Self {
            liked: !self.liked,
            disliked: false,
            saved: self.saved,
        }
    }

    /// Record after pressing "dislike": flips `disliked`, always clears `liked`.
    #[must_use]
    pub const fn toggled_disliked(self) -> Self {
        Self {
            liked: false,
            disliked: !self.disliked,
            saved: self.saved,
        }
    }

    /// Record after pressing "save": flips `saved` only.
    #[must_use]
    pub const fn toggled_saved(self) -> Self {
        Self {
            liked: self.liked,
            disliked: self.disliked,
            saved: !self.saved,
        }
    }
}
