//! Debounced search-to-fetch pipeline.
//!
//! Every keystroke arms one host timer. Zellij timer events carry no identity,
//! so the flow counts outstanding timers instead: the query settles when the
//! last one fires, which is exactly one debounce interval after the last
//! keystroke. A settled query that differs from the previous one selects the
//! listing to fetch.
//!
//! Fetches are never cancelled. Each one gets a fresh request id and only the
//! response to the most recent id is applied; anything older is dropped.

use crate::domain::error::Result;
use crate::domain::Movie;
use crate::tmdb::MovieQuery;

/// State of the search screen's query and results.
#[derive(Debug, Clone, Default)]
pub struct SearchFlow {
    /// Text as currently typed.
    pub query: String,

    /// Last query that triggered a fetch; `None` before the first fetch.
    settled: Option<String>,

    /// Debounce timers armed but not yet fired.
    pending_timers: usize,

    /// Id handed to the most recent fetch.
    last_request_id: u64,

    /// Id of the fetch whose response is still awaited.
    in_flight: Option<u64>,

    /// Movies from the latest applied response.
    pub results: Vec<Movie>,

    /// Message of the latest failed fetch, cleared when a new fetch starts.
    pub error: Option<String>,

    /// Web access was refused; no fetch can ever be answered.
    web_denied: bool,
}

impl SearchFlow {
    /// The query the current results belong to.
    #[must_use]
    pub fn settled_query(&self) -> &str {
        self.settled.as_deref().unwrap_or_default()
    }

    /// Returns `true` while the latest fetch has not answered.
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Records a keystroke; the caller arms one debounce timer for it.
    pub fn note_keystroke(&mut self) {
        self.pending_timers += 1;
    }

    /// Settles the query for the very first fetch, without debouncing.
    ///
    /// Returns `None` if a query has already settled.
    pub fn settle_initial(&mut self) -> Option<MovieQuery> {
        if self.settled.is_some() {
            return None;
        }
        self.settled = Some(self.query.clone());
        Some(MovieQuery::from_settled(&self.query))
    }

    /// Consumes one debounce timer.
    ///
    /// Returns the listing to fetch when this was the last outstanding timer
    /// and the query differs from the last settled one. Never returns a
    /// listing once web access has been denied.
    pub fn on_timer(&mut self) -> Option<MovieQuery> {
        if self.pending_timers == 0 {
            tracing::trace!("timer without pending keystroke");
            return None;
        }

        self.pending_timers -= 1;
        if self.pending_timers > 0 {
            return None;
        }

        if self.web_denied {
            tracing::debug!(query = %self.query, "web access denied, not fetching");
            return None;
        }

        if self.settled.as_deref() == Some(self.query.as_str()) {
            tracing::debug!(query = %self.query, "query settled unchanged");
            return None;
        }

        tracing::debug!(query = %self.query, "query settled");
        self.settled = Some(self.query.clone());
        Some(MovieQuery::from_settled(&self.query))
    }

    /// Registers a new fetch and returns its request id.
    pub fn begin_request(&mut self) -> u64 {
        self.last_request_id += 1;
        self.in_flight = Some(self.last_request_id);
        self.error = None;
        self.last_request_id
    }

    /// Applies the outcome of fetch `request_id`.
    ///
    /// Returns `false` (and changes nothing) if a newer fetch has been issued
    /// since, or if the response was already applied.
    pub fn complete(&mut self, request_id: u64, outcome: Result<Vec<Movie>>) -> bool {
        if self.in_flight != Some(request_id) {
            tracing::debug!(
                request_id = request_id,
                latest = self.last_request_id,
                "dropping stale listing response"
            );
            return false;
        }

        self.in_flight = None;
        match outcome {
            Ok(movies) => {
                tracing::debug!(count = movies.len(), query = %self.settled_query(), "listing applied");
                self.results = movies;
            }
            Err(e) => {
                tracing::warn!(error = %e, "listing fetch failed");
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// Marks web access as refused and keeps `message` as the standing error.
    pub fn deny_web(&mut self, message: impl Into<String>) {
        self.web_denied = true;
        self.fail(message);
    }

    /// Records a failure that happened before any request could be issued.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.in_flight = None;
        self.error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CineverseError;

    fn type_text(flow: &mut SearchFlow, text: &str) {
        for c in text.chars() {
            flow.query.push(c);
            flow.note_keystroke();
        }
    }

    fn movie(id: &str) -> Movie {
        Movie::new(id, format!("Movie {id}"), "", format!("https://img/{id}.jpg"))
    }

    #[test]
    fn initial_settle_requests_popular_once() {
        let mut flow = SearchFlow::default();

        assert_eq!(flow.settle_initial(), Some(MovieQuery::Popular));
        assert_eq!(flow.settle_initial(), None);
    }

    #[test]
    fn only_last_timer_settles_the_query() {
        let mut flow = SearchFlow::default();
        flow.settle_initial();
        type_text(&mut flow, "Matrix");

        for _ in 0..5 {
            assert_eq!(flow.on_timer(), None);
        }

        assert_eq!(
            flow.on_timer(),
            Some(MovieQuery::Search("Matrix".to_string()))
        );
        assert_eq!(flow.settled_query(), "Matrix");
    }

    #[test]
    fn clearing_the_query_returns_to_popular() {
        let mut flow = SearchFlow::default();
        flow.settle_initial();
        type_text(&mut flow, "Up");
        flow.on_timer();
        flow.on_timer();

        flow.query.clear();
        flow.note_keystroke();

        assert_eq!(flow.on_timer(), Some(MovieQuery::Popular));
    }

    #[test]
    fn unchanged_settled_query_does_not_refetch() {
        let mut flow = SearchFlow::default();
        flow.settle_initial();
        type_text(&mut flow, "a");
        flow.query.pop();
        flow.note_keystroke();

        assert_eq!(flow.on_timer(), None);
        assert_eq!(flow.on_timer(), None);
    }

    #[test]
    fn denied_web_settles_nothing_and_keeps_error() {
        let mut flow = SearchFlow::default();
        flow.deny_web("denied");
        type_text(&mut flow, "Up");

        assert_eq!(flow.on_timer(), None);
        assert_eq!(flow.on_timer(), None);

        assert!(!flow.is_fetching());
        assert_eq!(flow.error.as_deref(), Some("denied"));
    }

    #[test]
    fn stray_timer_is_ignored() {
        let mut flow = SearchFlow::default();

        assert_eq!(flow.on_timer(), None);
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut flow = SearchFlow::default();
        let slow = flow.begin_request();
        let fast = flow.begin_request();

        assert!(flow.complete(fast, Ok(vec![movie("2")])));
        assert!(!flow.complete(slow, Ok(vec![movie("1")])));

        assert_eq!(flow.results, vec![movie("2")]);
        assert!(!flow.is_fetching());
    }

    #[test]
    fn failure_keeps_previous_results() {
        let mut flow = SearchFlow::default();
        let first = flow.begin_request();
        flow.complete(first, Ok(vec![movie("1")]));

        let second = flow.begin_request();
        assert!(flow.is_fetching());
        flow.complete(second, Err(CineverseError::Fetch("HTTP status 500".to_string())));

        assert_eq!(flow.results, vec![movie("1")]);
        assert!(flow.error.as_deref().unwrap().contains("500"));
    }

    #[test]
    fn new_request_clears_error() {
        let mut flow = SearchFlow::default();
        flow.fail("boom");

        flow.begin_request();

        assert!(flow.error.is_none());
    }
}
