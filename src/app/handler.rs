//! Event handling and state transition logic.
//!
//! # Architecture
//!
//! 1. Events arrive from the plugin runtime (keys, timers, web results) or the
//!    storage worker
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` and its store / search flow
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `ShowScreen`, `NextScreen`, `PreviousScreen`
//! - **Input**: `Char`, `Backspace`, `Escape`, `SearchMode`, `FocusSearchBar`, `FocusResults`
//! - **Rating**: `ToggleLiked`, `ToggleDisliked`, `ToggleSaved`
//! - **System**: `PermissionsGranted`, `PermissionsDenied`, `Timer`, `FetchCompleted`
//! - **Worker**: `WorkerResponse` with typed message variants

use super::modes::{InputMode, Screen, SearchFocus};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::Movie;
use crate::status::StatusStore;
use crate::storage::StoreKey;
use crate::tmdb::{parse_listing, MovieQuery};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, host callbacks, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection cursor down by one card (wraps to top).
    KeyDown,
    /// Moves selection cursor up by one card (wraps to bottom).
    KeyUp,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
    /// Opens the query box with typing focus.
    SearchMode,
    /// Focuses the query box (from navigating mode).
    FocusSearchBar,
    /// Moves focus from the query box to the list.
    FocusResults,
    /// Leaves search mode and clears the query.
    ExitSearch,
    /// Appends a character to the active query.
    Char(char),
    /// Removes the last character from the active query.
    Backspace,
    /// Clears the active query and returns to normal mode.
    Escape,

    /// Jumps to a screen.
    ShowScreen(Screen),
    /// Cycles forward through the screens.
    NextScreen,
    /// Cycles backward through the screens.
    PreviousScreen,

    /// Flips `liked` on the selected movie.
    ToggleLiked,
    /// Flips `disliked` on the selected movie.
    ToggleDisliked,
    /// Flips `saved` on the selected movie.
    ToggleSaved,

    /// Host permissions were granted: start loading and fetching.
    PermissionsGranted,

    /// Host permissions were refused; persistence still loads, fetching cannot.
    PermissionsDenied,

    /// A debounce timer fired.
    Timer,

    /// A listing request answered.
    FetchCompleted {
        /// Id the request was issued with.
        request_id: u64,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
    },

    /// Wraps a response from the storage worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The returned flag tells the runtime whether a re-render is needed.
///
/// # Errors
///
/// Reserved for failures the runtime must see; every failure currently known
/// is recovered from here (logged, or surfaced as a search error).
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventKind(event)).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SearchMode | Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            state.input_mode = if state.active_query().is_empty() {
                InputMode::Normal
            } else {
                InputMode::Search(SearchFocus::Navigating)
            };
            Ok((true, vec![]))
        }
        Event::ExitSearch | Event::Escape => {
            tracing::debug!(query = %state.active_query(), "exiting search mode");
            state.input_mode = InputMode::Normal;
            if state.active_query().is_empty() {
                return Ok((true, vec![]));
            }
            Ok((true, edit_query(state, String::clear)))
        }
        Event::Char(c) => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            let c = *c;
            Ok((true, edit_query(state, |query| query.push(c))))
        }
        Event::Backspace => {
            if !matches!(state.input_mode, InputMode::Search(_)) || state.active_query().is_empty() {
                return Ok((false, vec![]));
            }
            Ok((true, edit_query(state, |query| {
                query.pop();
            })))
        }
        Event::ShowScreen(screen) => Ok((state.show_screen(*screen), vec![])),
        Event::NextScreen => {
            let next = state.screen.next();
            Ok((state.show_screen(next), vec![]))
        }
        Event::PreviousScreen => {
            let previous = state.screen.previous();
            Ok((state.show_screen(previous), vec![]))
        }
        Event::ToggleLiked => Ok(toggle(state, StatusStore::toggle_liked)),
        Event::ToggleDisliked => Ok(toggle(state, StatusStore::toggle_disliked)),
        Event::ToggleSaved => Ok(toggle(state, StatusStore::toggle_saved)),
        Event::PermissionsGranted => {
            tracing::info!("permissions granted, loading persisted state");
            let mut actions = load_actions();
            if let Some(query) = state.search.settle_initial() {
                actions.extend(fetch(state, &query));
            }
            Ok((true, actions))
        }
        Event::PermissionsDenied => {
            tracing::warn!("permissions denied, remote listings unavailable");
            state.search.deny_web("Web access permission was denied");
            Ok((true, load_actions()))
        }
        Event::Timer => {
            let Some(query) = state.search.on_timer() else {
                return Ok((false, vec![]));
            };
            Ok((true, fetch(state, &query)))
        }
        Event::FetchCompleted { request_id, status, body } => {
            let outcome = parse_listing(*status, body);
            if !state.search.complete(*request_id, outcome) {
                return Ok((false, vec![]));
            }
            if state.screen == Screen::Search {
                state.selected_index = 0;
            }
            Ok((state.screen == Screen::Search, vec![]))
        }
        Event::WorkerResponse(response) => match response {
            WorkerResponse::EntryLoaded { key, payload } => {
                state.store.apply_loaded(*key, payload.as_deref());
                state.clamp_selection();
                Ok((true, vec![]))
            }
            WorkerResponse::LoadFailed { key, message } => {
                state.store.apply_load_failed(*key, message);
                state.clamp_selection();
                Ok((true, vec![]))
            }
            WorkerResponse::EntryPersisted { key } => {
                tracing::debug!(key = %key, "entry persisted");
                Ok((false, vec![]))
            }
            WorkerResponse::PersistFailed { key, message } => {
                tracing::error!(key = %key, error = %message, "failed to persist entry, keeping in-memory state");
                Ok((false, vec![]))
            }
        },
    }
}

/// Applies `edit` to the active query and returns the follow-up actions.
///
/// On the search screen every edit counts as a keystroke and arms one
/// debounce timer. Local filters apply immediately.
fn edit_query(state: &mut AppState, edit: impl FnOnce(&mut String)) -> Vec<Action> {
    match state.screen {
        Screen::Search => {
            edit(&mut state.search.query);
            state.search.note_keystroke();
            tracing::trace!(query = %state.search.query, "search query updated");
            vec![Action::StartTimer {
                millis: state.debounce_ms,
            }]
        }
        Screen::Saved | Screen::Profile => {
            edit(&mut state.filter_query);
            state.selected_index = 0;
            tracing::trace!(filter = %state.filter_query, "filter updated");
            vec![]
        }
    }
}

/// Runs a toggle on the selected movie and schedules persistence of every key
/// it changed.
fn toggle(
    state: &mut AppState,
    op: fn(&mut StatusStore, &Movie) -> Vec<StoreKey>,
) -> (bool, Vec<Action>) {
    if state.store.is_loading() {
        tracing::debug!("store still loading, ignoring toggle");
        return (false, vec![]);
    }
    let Some(movie) = state.selected_movie() else {
        tracing::debug!("no movie selected");
        return (false, vec![]);
    };

    let keys = op(&mut state.store, &movie);
    tracing::debug!(movie_id = %movie.id, status = ?state.store.status(&movie.id), "status toggled");
    state.clamp_selection();

    (true, persist_actions(&state.store, &keys))
}

fn persist_actions(store: &StatusStore, keys: &[StoreKey]) -> Vec<Action> {
    keys.iter()
        .filter_map(|&key| match store.encode(key) {
            Ok(payload) => Some(Action::PostToWorker(WorkerMessage::persist_entry(key, payload))),
            Err(e) => {
                tracing::error!(key = %key, error = %e, "failed to encode entry, skipping write");
                None
            }
        })
        .collect()
}

fn load_actions() -> Vec<Action> {
    StoreKey::ALL
        .into_iter()
        .map(|key| Action::PostToWorker(WorkerMessage::load_entry(key)))
        .collect()
}

fn fetch(state: &mut AppState, query: &MovieQuery) -> Vec<Action> {
    match state.endpoint.url(query) {
        Ok(url) => {
            let request_id = state.search.begin_request();
            tracing::debug!(request_id = request_id, query = ?query, "fetching listing");
            vec![Action::FetchMovies { url, request_id }]
        }
        Err(e) => {
            tracing::error!(error = %e, "cannot build listing request");
            state.search.fail(e.to_string());
            vec![]
        }
    }
}

/// Debug view of an event that leaves response bodies out of span fields.
struct EventKind<'a>(&'a Event);

impl std::fmt::Debug for EventKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::FetchCompleted { request_id, status, body } => f
                .debug_struct("FetchCompleted")
                .field("request_id", request_id)
                .field("status", status)
                .field("body_len", &body.len())
                .finish(),
            Event::WorkerResponse(WorkerResponse::EntryLoaded { key, payload }) => f
                .debug_struct("EntryLoaded")
                .field("key", key)
                .field("payload_len", &payload.as_ref().map(String::len))
                .finish(),
            other => std::fmt::Debug::fmt(other, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmdb::TmdbEndpoint;
    use crate::ui::theme::Theme;

    const POPULAR_BODY: &str = r#"{"results":[
        {"id":27205,"title":"A Origem","overview":"Dom Cobb...","poster_path":"/inception.jpg"},
        {"id":603,"title":"Matrix","overview":"Neo...","poster_path":"/matrix.jpg"},
        {"id":1,"title":"Sem poster","overview":"","poster_path":null}
    ]}"#;

    fn new_state() -> AppState {
        AppState::new(TmdbEndpoint::new("k3y", "pt-BR"), Theme::default())
    }

    fn ready_state() -> AppState {
        let mut state = new_state();
        for key in StoreKey::ALL {
            handle(&mut state, Event::WorkerResponse(WorkerResponse::EntryLoaded { key, payload: None }));
        }
        state
    }

    fn handle(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).unwrap()
    }

    fn fetch_of(actions: &[Action]) -> Option<(&str, u64)> {
        actions.iter().find_map(|a| match a {
            Action::FetchMovies { url, request_id } => Some((url.as_str(), *request_id)),
            _ => None,
        })
    }

    fn complete(state: &mut AppState, request_id: u64, body: &str) {
        handle(
            state,
            Event::FetchCompleted {
                request_id,
                status: 200,
                body: body.as_bytes().to_vec(),
            },
        );
    }

    fn type_query(state: &mut AppState, text: &str) -> usize {
        let mut timers = 0;
        for c in text.chars() {
            let (_, actions) = handle(state, Event::Char(c));
            timers += actions
                .iter()
                .filter(|a| matches!(a, Action::StartTimer { millis: 500 }))
                .count();
        }
        timers
    }

    fn fire_timers(state: &mut AppState, count: usize) -> Vec<Action> {
        let mut actions = vec![];
        for _ in 0..count {
            actions.extend(handle(state, Event::Timer).1);
        }
        actions
    }

    #[test]
    fn permissions_load_both_keys_and_fetch_popular() {
        let mut state = new_state();

        let (_, actions) = handle(&mut state, Event::PermissionsGranted);

        let loads: Vec<_> = actions
            .iter()
            .filter_map(|a| match a {
                Action::PostToWorker(WorkerMessage::LoadEntry { key, .. }) => Some(*key),
                _ => None,
            })
            .collect();
        assert_eq!(loads.len(), 2);
        assert!(loads.contains(&StoreKey::Catalog) && loads.contains(&StoreKey::Status));

        let (url, _) = fetch_of(&actions).unwrap();
        assert!(url.starts_with("https://api.themoviedb.org/3/movie/popular?"));
        assert!(url.contains("page=1"));
        assert!(url.contains("language=pt-BR"));
    }

    #[test]
    fn debounced_query_fetches_search_endpoint() {
        let mut state = ready_state();
        handle(&mut state, Event::PermissionsGranted);
        handle(&mut state, Event::SearchMode);

        let timers = type_query(&mut state, "Matrix");
        assert_eq!(timers, 6);

        let early = fire_timers(&mut state, 5);
        assert!(fetch_of(&early).is_none());

        let last = fire_timers(&mut state, 1);
        let (url, _) = fetch_of(&last).unwrap();
        assert!(url.starts_with("https://api.themoviedb.org/3/search/movie?"));
        assert!(url.contains("query=Matrix"));
    }

    #[test]
    fn cleared_query_fetches_popular_again() {
        let mut state = ready_state();
        handle(&mut state, Event::PermissionsGranted);
        handle(&mut state, Event::SearchMode);
        let timers = type_query(&mut state, "Up");
        fire_timers(&mut state, timers);

        let (_, actions) = handle(&mut state, Event::Escape);
        assert!(matches!(actions.as_slice(), [Action::StartTimer { .. }]));

        let refetch = fire_timers(&mut state, 1);
        let (url, _) = fetch_of(&refetch).unwrap();
        assert!(url.contains("/movie/popular?"));
    }

    #[test]
    fn search_query_is_percent_encoded() {
        let mut state = ready_state();
        handle(&mut state, Event::PermissionsGranted);
        handle(&mut state, Event::SearchMode);
        let timers = type_query(&mut state, "cidade de deus");

        let actions = fire_timers(&mut state, timers);

        let (url, _) = fetch_of(&actions).unwrap();
        assert!(url.contains("query=cidade+de+deus") || url.contains("query=cidade%20de%20deus"));
    }

    #[test]
    fn fetched_listing_drops_posterless_movies() {
        let mut state = ready_state();
        let (_, actions) = handle(&mut state, Event::PermissionsGranted);
        let (_, id) = fetch_of(&actions).unwrap();

        complete(&mut state, id, POPULAR_BODY);

        let ids: Vec<_> = state.search.results.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["27205", "603"]);
        assert_eq!(state.search.results[0].poster_url, "https://image.tmdb.org/t/p/w500/inception.jpg");
    }

    #[test]
    fn stale_response_does_not_override_latest() {
        let mut state = ready_state();
        let (_, actions) = handle(&mut state, Event::PermissionsGranted);
        let (_, popular_id) = fetch_of(&actions).unwrap();

        handle(&mut state, Event::SearchMode);
        let timers = type_query(&mut state, "x");
        let (_, search_id) = fetch_of(&fire_timers(&mut state, timers)).unwrap();

        complete(&mut state, search_id, r#"{"results":[]}"#);
        let (render, _) = handle(
            &mut state,
            Event::FetchCompleted {
                request_id: popular_id,
                status: 200,
                body: POPULAR_BODY.as_bytes().to_vec(),
            },
        );

        assert!(!render);
        assert!(state.search.results.is_empty());
    }

    #[test]
    fn http_error_surfaces_as_search_error() {
        let mut state = ready_state();
        let (_, actions) = handle(&mut state, Event::PermissionsGranted);
        let (_, id) = fetch_of(&actions).unwrap();

        handle(
            &mut state,
            Event::FetchCompleted {
                request_id: id,
                status: 401,
                body: br#"{"status_message":"Invalid API key"}"#.to_vec(),
            },
        );

        assert!(state.search.error.is_some());
        assert!(!state.search.is_fetching());
    }

    #[test]
    fn toggle_persists_catalog_then_status() {
        let mut state = ready_state();
        let (_, actions) = handle(&mut state, Event::PermissionsGranted);
        let (_, id) = fetch_of(&actions).unwrap();
        complete(&mut state, id, POPULAR_BODY);

        let (render, actions) = handle(&mut state, Event::ToggleSaved);

        assert!(render);
        let keys: Vec<_> = actions
            .iter()
            .map(|a| match a {
                Action::PostToWorker(WorkerMessage::PersistEntry { key, .. }) => *key,
                other => panic!("unexpected action {other:?}"),
            })
            .collect();
        assert_eq!(keys, vec![StoreKey::Catalog, StoreKey::Status]);
        assert!(state.store.status("27205").saved);

        let (_, again) = handle(&mut state, Event::ToggleSaved);
        assert_eq!(again.len(), 1);
        assert!(!state.store.status("27205").saved);
    }

    #[test]
    fn toggles_ignored_while_loading() {
        let mut state = new_state();
        state.search.results = vec![Movie::new("1", "Up", "", "https://img/up.jpg")];

        let (render, actions) = handle(&mut state, Event::ToggleLiked);

        assert!(!render);
        assert!(actions.is_empty());
        assert!(!state.store.status("1").liked);
    }

    #[test]
    fn like_then_dislike_is_exclusive() {
        let mut state = ready_state();
        state.search.results = vec![Movie::new("603", "Matrix", "", "https://img/m.jpg")];

        handle(&mut state, Event::ToggleLiked);
        handle(&mut state, Event::ToggleDisliked);

        let status = state.store.status("603");
        assert!(status.disliked);
        assert!(!status.liked);
    }

    #[test]
    fn unsaving_on_saved_screen_clamps_cursor() {
        let mut state = ready_state();
        state.search.results = vec![
            Movie::new("1", "A", "", "https://img/a.jpg"),
            Movie::new("2", "B", "", "https://img/b.jpg"),
        ];
        handle(&mut state, Event::ToggleSaved);
        handle(&mut state, Event::KeyDown);
        handle(&mut state, Event::ToggleSaved);

        handle(&mut state, Event::ShowScreen(Screen::Saved));
        handle(&mut state, Event::KeyDown);
        assert_eq!(state.selected_index, 1);

        handle(&mut state, Event::ToggleSaved);

        assert_eq!(state.selected_index, 0);
        assert_eq!(state.visible_movies().len(), 1);
    }

    #[test]
    fn filter_typing_does_not_arm_timers() {
        let mut state = ready_state();
        handle(&mut state, Event::ShowScreen(Screen::Saved));
        handle(&mut state, Event::SearchMode);

        let timers = type_query(&mut state, "up");

        assert_eq!(timers, 0);
        assert_eq!(state.filter_query, "up");
        assert!(state.search.query.is_empty());
    }

    #[test]
    fn chars_ignored_outside_search_mode() {
        let mut state = ready_state();

        let (render, actions) = handle(&mut state, Event::Char('x'));

        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.search.query.is_empty());
    }

    #[test]
    fn focus_results_with_empty_query_returns_to_normal() {
        let mut state = ready_state();
        handle(&mut state, Event::SearchMode);

        handle(&mut state, Event::FocusResults);
        assert_eq!(state.input_mode, InputMode::Normal);

        handle(&mut state, Event::SearchMode);
        type_query(&mut state, "a");
        handle(&mut state, Event::FocusResults);
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Navigating));
    }

    #[test]
    fn screens_cycle_in_both_directions() {
        let mut state = ready_state();

        handle(&mut state, Event::NextScreen);
        assert_eq!(state.screen, Screen::Saved);
        handle(&mut state, Event::PreviousScreen);
        handle(&mut state, Event::PreviousScreen);
        assert_eq!(state.screen, Screen::Profile);
    }

    #[test]
    fn load_failure_still_finishes_loading() {
        let mut state = new_state();

        handle(
            &mut state,
            Event::WorkerResponse(WorkerResponse::LoadFailed {
                key: StoreKey::Catalog,
                message: "disk on fire".to_string(),
            }),
        );
        assert!(state.store.is_loading());
        handle(
            &mut state,
            Event::WorkerResponse(WorkerResponse::EntryLoaded {
                key: StoreKey::Status,
                payload: Some(r#"{"27205":{"liked":true,"disliked":false,"saved":false}}"#.to_string()),
            }),
        );

        assert!(!state.store.is_loading());
        assert!(state.store.status("27205").liked);
    }

    #[test]
    fn denied_permissions_still_load_store() {
        let mut state = new_state();

        let (_, actions) = handle(&mut state, Event::PermissionsDenied);

        assert_eq!(actions.len(), 2);
        assert!(fetch_of(&actions).is_none());
        assert!(state.search.error.is_some());
    }

    #[test]
    fn typing_after_denied_permissions_does_not_fetch() {
        let mut state = ready_state();
        handle(&mut state, Event::PermissionsDenied);
        handle(&mut state, Event::SearchMode);

        let timers = type_query(&mut state, "x");
        let actions = fire_timers(&mut state, timers);

        assert!(fetch_of(&actions).is_none());
        assert!(!state.search.is_fetching());
        assert_eq!(state.search.error.as_deref(), Some("Web access permission was denied"));
        let empty = state.compute_viewmodel(40, 100).empty_state.unwrap();
        assert_eq!(empty.message, "Failed to load movies.");
        assert_eq!(empty.subtitle, "Web access permission was denied");
    }

    #[test]
    fn failed_write_keeps_memory() {
        let mut state = ready_state();
        let (_, actions) = handle(&mut state, Event::PermissionsGranted);
        let (_, id) = fetch_of(&actions).unwrap();
        complete(&mut state, id, POPULAR_BODY);
        handle(&mut state, Event::ToggleSaved);

        handle(
            &mut state,
            Event::WorkerResponse(WorkerResponse::PersistFailed {
                key: StoreKey::Status,
                message: "disk full".to_string(),
            }),
        );

        assert!(state.store.status("27205").saved);
        let saved = state.store.saved_movies();
        let ids: Vec<_> = saved.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["27205"]);
    }

    #[test]
    fn persist_acknowledgements_do_not_render() {
        let mut state = ready_state();

        let (ok, _) = handle(
            &mut state,
            Event::WorkerResponse(WorkerResponse::EntryPersisted { key: StoreKey::Status }),
        );
        let (failed, _) = handle(
            &mut state,
            Event::WorkerResponse(WorkerResponse::PersistFailed {
                key: StoreKey::Status,
                message: "read-only".to_string(),
            }),
        );

        assert!(!ok && !failed);
    }
}
