//! The two fixed keys under which the status store persists its maps.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one of the persisted blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StoreKey {
    /// Every movie ever seen, keyed by id.
    Catalog,
    /// Liked / disliked / saved flags, keyed by id.
    Status,
}

impl StoreKey {
    /// Both keys, in the order they are requested at startup.
    pub const ALL: [Self; 2] = [Self::Status, Self::Catalog];

    /// Storage key string for this blob.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Catalog => "@Cineverse:allMovies",
            Self::Status => "@Cineverse:movieStatus",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
