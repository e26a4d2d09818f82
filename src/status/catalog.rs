//! Append-only catalog of every movie the user has interacted with.
//!
//! The catalog exists so the Saved and Profile screens can show full movie
//! details for ids that are no longer part of the live search results. An id,
//! once inserted, is never removed and its record is never replaced.

use crate::domain::error::{CineverseError, Result};
use crate::domain::Movie;
use std::collections::{BTreeMap, HashMap};

/// Movies keyed by id, remembering first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    order: Vec<String>,
    movies: HashMap<String, Movie>,
}

impl Catalog {
    /// Inserts `movie` unless its id is already known.
    ///
    /// Returns `true` if the catalog grew. A known id keeps its first-seen
    /// record even if `movie` carries fresher title, synopsis or poster data.
    pub fn insert_if_absent(&mut self, movie: &Movie) -> bool {
        if self.movies.contains_key(&movie.id) {
            return false;
        }
        self.order.push(movie.id.clone());
        self.movies.insert(movie.id.clone(), movie.clone());
        true
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Movie> {
        self.movies.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates movies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.order.iter().filter_map(|id| self.movies.get(id))
    }

    /// Decodes a persisted catalog (a JSON object of id to movie).
    ///
    /// The order of the previous session is not recoverable from the stored
    /// object. Numeric ids are inserted in ascending numeric order (`"155"`,
    /// `"603"`, `"27205"`), followed by any other ids in lexical order.
    ///
    /// # Errors
    ///
    /// Returns [`CineverseError::Storage`] if the payload is not a JSON object of movies.
    pub fn from_json(payload: &str) -> Result<Self> {
        let stored: BTreeMap<String, Movie> = serde_json::from_str(payload)
            .map_err(|e| CineverseError::Storage(format!("failed to parse catalog: {e}")))?;

        let mut entries: Vec<(String, Movie)> = stored.into_iter().collect();
        entries.sort_by_key(|(id, _)| id.parse::<u64>().map_or((1, 0), |n| (0, n)));

        let mut catalog = Self::default();
        for (id, mut movie) in entries {
            if movie.id != id {
                tracing::warn!(key = %id, movie_id = %movie.id, "catalog entry id mismatch, keeping key");
                movie.id = id;
            }
            catalog.insert_if_absent(&movie);
        }
        Ok(catalog)
    }

    /// Encodes the catalog as a JSON object of id to movie.
    ///
    /// # Errors
    ///
    /// Returns [`CineverseError::Storage`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let stored: BTreeMap<&str, &Movie> = self
            .movies
            .iter()
            .map(|(id, movie)| (id.as_str(), movie))
            .collect();

        serde_json::to_string(&stored)
            .map_err(|e| CineverseError::Storage(format!("failed to serialize catalog: {e}")))
    }
}
