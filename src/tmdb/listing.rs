//! Parsing TMDB listing responses into [`Movie`]s.
//!
//! Both endpoints answer with the same envelope; only `results` is read. The
//! projection renames fields, stringifies the numeric id and drops every entry
//! without a poster.

use super::endpoint::POSTER_BASE_URL;
use crate::domain::error::{CineverseError, Result};
use crate::domain::Movie;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ListingPage {
    results: Vec<ListingEntry>,
}

#[derive(Debug, Deserialize)]
struct ListingEntry {
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
}

impl ListingEntry {
    fn into_movie(self) -> Option<Movie> {
        let poster_path = self.poster_path.filter(|p| !p.is_empty())?;
        Some(Movie {
            id: self.id.to_string(),
            title: self.title,
            synopsis: self.overview.unwrap_or_default(),
            poster_url: format!("{POSTER_BASE_URL}{poster_path}"),
        })
    }
}

/// Interprets a web request result as a movie listing.
///
/// # Errors
///
/// Returns [`CineverseError::Fetch`] for any non-2xx status or a body that is
/// not a listing. The status code itself is only reported, never acted on.
pub fn parse_listing(status: u16, body: &[u8]) -> Result<Vec<Movie>> {
    if !(200..300).contains(&status) {
        let detail = String::from_utf8_lossy(body);
        tracing::debug!(status = status, body = %detail, "listing request failed");
        return Err(CineverseError::Fetch(format!("HTTP status {status}")));
    }

    let page: ListingPage = serde_json::from_slice(body)
        .map_err(|e| CineverseError::Fetch(format!("invalid listing body: {e}")))?;

    let total = page.results.len();
    let movies: Vec<Movie> = page
        .results
        .into_iter()
        .filter_map(ListingEntry::into_movie)
        .collect();

    tracing::debug!(
        total = total,
        kept = movies.len(),
        "listing parsed (entries without poster dropped)"
    );

    Ok(movies)
}
