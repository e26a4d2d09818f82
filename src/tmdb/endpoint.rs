//! Request URLs for the two TMDB listing endpoints.

use crate::domain::error::{CineverseError, Result};
use url::Url;

/// Root of the TMDB v3 API.
pub const API_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Prefix prepended to `poster_path` to obtain a displayable poster.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Which listing to fetch for a settled query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieQuery {
    /// First page of the popular listing.
    Popular,
    /// Free-text search.
    Search(String),
}

impl MovieQuery {
    /// Chooses the listing for a settled query: empty text means popular.
    #[must_use]
    pub fn from_settled(query: &str) -> Self {
        if query.is_empty() {
            Self::Popular
        } else {
            Self::Search(query.to_string())
        }
    }
}

/// Credentials and locale shared by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmdbEndpoint {
    api_key: String,
    language: String,
}

impl TmdbEndpoint {
    #[must_use]
    pub fn new(api_key: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            language: language.into(),
        }
    }

    /// Builds the GET URL for `query`, with every parameter percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`CineverseError::Fetch`] if the URL cannot be assembled.
    pub fn url(&self, query: &MovieQuery) -> Result<String> {
        let (path, extra) = match query {
            MovieQuery::Popular => ("movie/popular", ("page", "1")),
            MovieQuery::Search(text) => ("search/movie", ("query", text.as_str())),
        };

        let params = [
            ("api_key", self.api_key.as_str()),
            ("language", self.language.as_str()),
            extra,
        ];

        Url::parse_with_params(&format!("{API_BASE_URL}/{path}"), params)
            .map(String::from)
            .map_err(|e| CineverseError::Fetch(format!("invalid request URL: {e}")))
    }
}
