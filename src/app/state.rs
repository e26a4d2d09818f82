//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of everything the plugin knows during a
//! session: the status store, the search flow, the active screen, the input
//! mode and the cursor. It is mutated only by the event handler.
//!
//! # Visible Movies
//!
//! Each screen derives its list on demand, so toggles on one screen are
//! reflected everywhere without bookkeeping:
//!
//! - **Search**: the latest applied listing, unfiltered
//! - **Saved**: `saved_movies()`, fuzzy filtered by the local query
//! - **Profile**: liked, disliked and saved sections, each filtered, empty
//!   sections omitted
//!
//! The cursor indexes the flattened card sequence and is clamped after every
//! list change.
//!
//! # View Model Computation
//!
//! `compute_viewmodel` windows the list around the cursor, truncates text to
//! the terminal width, computes match highlights and chooses which notice
//! (loading, error, empty) replaces the list.

use super::modes::{InputMode, Screen, SearchFocus};
use super::search::SearchFlow;
use crate::domain::Movie;
use crate::status::StatusStore;
use crate::tmdb::TmdbEndpoint;
use crate::ui::helpers::{single_line, truncate_chars, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyKind, EmptyState, FooterInfo, HeaderInfo, ListEntry, MovieCardView, SearchBarInfo,
    TabInfo, UIViewModel, BADGES_WIDTH, CARD_INDENT,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::ops::Range;

/// Default delay between the last keystroke and the fetch it triggers.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// A titled (or untitled) group of movies on the current screen.
#[derive(Debug)]
struct Section<'a> {
    title: Option<&'static str>,
    movies: Vec<&'a Movie>,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Catalog and liked / disliked / saved flags.
    pub store: StatusStore,

    /// Query, debounce and latest listing of the search screen.
    pub search: SearchFlow,

    /// URL builder for the remote listings.
    pub endpoint: TmdbEndpoint,

    /// Debounce interval armed on every search keystroke.
    pub debounce_ms: u64,

    /// Screen currently shown.
    pub screen: Screen,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Local filter applied on Saved and Profile.
    ///
    /// Cleared when switching screens.
    pub filter_query: String,

    /// Zero-based index into the flattened cards of the current screen.
    pub selected_index: usize,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates the state for a fresh session: store loading, Search screen,
    /// no results yet.
    #[must_use]
    pub fn new(endpoint: TmdbEndpoint, theme: Theme) -> Self {
        Self {
            store: StatusStore::new(),
            search: SearchFlow::default(),
            endpoint,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            screen: Screen::Search,
            input_mode: InputMode::Normal,
            filter_query: String::new(),
            selected_index: 0,
            theme,
        }
    }

    /// The query box text for the current screen.
    #[must_use]
    pub fn active_query(&self) -> &str {
        match self.screen {
            Screen::Search => &self.search.query,
            Screen::Saved | Screen::Profile => &self.filter_query,
        }
    }

    fn sections(&self) -> Vec<Section<'_>> {
        let filter = FilterTokens::new(&self.filter_query);

        match self.screen {
            Screen::Search => vec![Section {
                title: None,
                movies: self.search.results.iter().collect(),
            }],
            Screen::Saved => vec![Section {
                title: None,
                movies: filter.apply(self.store.saved_movies()),
            }],
            Screen::Profile => [
                ("Movies I liked", self.store.liked_movies()),
                ("Movies I disliked", self.store.disliked_movies()),
                ("Saved for later", self.store.saved_movies()),
            ]
            .into_iter()
            .map(|(title, movies)| Section {
                title: Some(title),
                movies: filter.apply(movies),
            })
            .filter(|section| !section.movies.is_empty())
            .collect(),
        }
    }

    /// Every card of the current screen, in display order.
    ///
    /// On Profile a movie appears once per section it belongs to.
    #[must_use]
    pub fn visible_movies(&self) -> Vec<&Movie> {
        self.sections()
            .into_iter()
            .flat_map(|section| section.movies)
            .collect()
    }

    /// Returns the movie under the cursor, if any.
    #[must_use]
    pub fn selected_movie(&self) -> Option<Movie> {
        self.visible_movies()
            .get(self.selected_index)
            .map(|movie| (*movie).clone())
    }

    /// Moves the cursor down by one card, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let count = self.visible_movies().len();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Moves the cursor up by one card, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let count = self.visible_movies().len();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Keeps the cursor within the current list.
    pub fn clamp_selection(&mut self) {
        let count = self.visible_movies().len();
        self.selected_index = if count == 0 {
            0
        } else {
            self.selected_index.min(count - 1)
        };
    }

    /// Switches to `screen`, resetting cursor, filter and input mode.
    ///
    /// Returns `false` if `screen` is already shown.
    pub fn show_screen(&mut self, screen: Screen) -> bool {
        if self.screen == screen {
            return false;
        }
        tracing::debug!(from = ?self.screen, to = ?screen, "switching screen");
        self.screen = screen;
        self.selected_index = 0;
        self.filter_query.clear();
        self.input_mode = InputMode::Normal;
        true
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Calculate available rows after subtracting UI chrome
    /// 2. Place the selected card, then fill up to half the space above it
    /// 3. Fill downwards, then top up above if the list ends early
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::debug_span!("compute_viewmodel",
            screen = ?self.screen,
            rows = rows,
            cols = cols
        )
        .entered();

        let sections = self.sections();
        let card_count: usize = sections.iter().map(|s| s.movies.len()).sum();

        let empty_state = self.compute_empty_state(card_count);
        let status_line = if empty_state.is_none()
            && self.screen == Screen::Search
            && self.search.is_fetching()
        {
            Some("Loading movies...".to_string())
        } else {
            None
        };
        let search_bar = self.compute_search_bar();

        let entries = if empty_state.is_some() {
            vec![]
        } else {
            let mut available = Self::calculate_available_rows(rows, search_bar.is_some());
            if status_line.is_some() {
                available = available.saturating_sub(1);
            }
            self.compute_entries(&sections, available, cols)
        };

        UIViewModel {
            header: self.compute_header(card_count),
            tabs: self.compute_tabs(),
            search_bar,
            entries,
            status_line,
            empty_state,
            footer: self.compute_footer(),
        }
    }

    fn compute_entries(&self, sections: &[Section<'_>], available: usize, cols: usize) -> Vec<ListEntry> {
        let highlight_query = match self.screen {
            Screen::Search => self.search.settled_query(),
            Screen::Saved | Screen::Profile => self.filter_query.as_str(),
        };
        let matcher = if highlight_query.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };

        let mut heights = Vec::new();
        let mut selected_entry = None;
        let mut card_index = 0;
        for section in sections {
            if section.title.is_some() {
                heights.push(1);
            }
            for _ in &section.movies {
                if card_index == self.selected_index {
                    selected_entry = Some(heights.len());
                }
                heights.push(crate::ui::viewmodel::CARD_HEIGHT);
                card_index += 1;
            }
        }

        let window = visible_window(&heights, selected_entry, available);

        let mut entries = Vec::with_capacity(window.len());
        let mut entry_index = 0;
        let mut card_index = 0;
        for section in sections {
            if let Some(title) = section.title {
                if window.contains(&entry_index) {
                    entries.push(ListEntry::Section(title.to_string()));
                }
                entry_index += 1;
            }
            for movie in &section.movies {
                if window.contains(&entry_index) {
                    entries.push(ListEntry::Card(self.compute_card(
                        movie,
                        card_index == self.selected_index,
                        cols,
                        matcher.as_ref().map(|m| (m, highlight_query)),
                    )));
                }
                entry_index += 1;
                card_index += 1;
            }
        }

        entries
    }

    fn compute_card(
        &self,
        movie: &Movie,
        is_selected: bool,
        cols: usize,
        matcher: Option<(&SkimMatcherV2, &str)>,
    ) -> MovieCardView {
        let title_width = cols.saturating_sub(CARD_INDENT + BADGES_WIDTH + 1);
        let text_width = cols.saturating_sub(CARD_INDENT + 1);

        let title = truncate_chars(&movie.title, title_width);
        let synopsis = if movie.synopsis.trim().is_empty() {
            "No synopsis available.".to_string()
        } else {
            truncate_chars(&single_line(&movie.synopsis), text_width)
        };

        let highlight_ranges = matcher.map_or_else(Vec::new, |(m, query)| {
            let shown = if title == movie.title {
                visual_len(&title)
            } else {
                visual_len(&title).saturating_sub(3)
            };
            highlight_ranges(&movie.title, query, m)
                .into_iter()
                .filter(|&(start, _)| start < shown)
                .map(|(start, end)| (start, end.min(shown)))
                .collect()
        });

        MovieCardView {
            title,
            synopsis,
            poster_url: truncate_chars(&movie.poster_url, text_width),
            status: self.store.status(&movie.id),
            is_selected,
            highlight_ranges,
        }
    }

    fn compute_empty_state(&self, card_count: usize) -> Option<EmptyState> {
        if self.store.is_loading() {
            return Some(EmptyState {
                message: "Loading your movies...".to_string(),
                subtitle: String::new(),
                kind: EmptyKind::Loading,
            });
        }

        match self.screen {
            Screen::Search => {
                if let Some(error) = &self.search.error {
                    return Some(EmptyState {
                        message: "Failed to load movies.".to_string(),
                        subtitle: error.clone(),
                        kind: EmptyKind::Error,
                    });
                }
                if card_count > 0 {
                    return None;
                }
                let settled = self.search.settled_query();
                Some(if self.search.is_fetching() {
                    EmptyState {
                        message: "Loading movies...".to_string(),
                        subtitle: String::new(),
                        kind: EmptyKind::Loading,
                    }
                } else if settled.is_empty() {
                    EmptyState {
                        message: "No movies to show.".to_string(),
                        subtitle: "Press / to search by title".to_string(),
                        kind: EmptyKind::Empty,
                    }
                } else {
                    EmptyState {
                        message: format!("No movies found for \"{settled}\""),
                        subtitle: "Try a different title".to_string(),
                        kind: EmptyKind::Empty,
                    }
                })
            }
            Screen::Saved | Screen::Profile if card_count > 0 => None,
            Screen::Saved | Screen::Profile if !self.filter_query.is_empty() => Some(EmptyState {
                message: format!("Nothing matches \"{}\"", self.filter_query),
                subtitle: "Press ESC to clear the filter".to_string(),
                kind: EmptyKind::Empty,
            }),
            Screen::Saved => Some(EmptyState {
                message: "You haven't saved any movies yet.".to_string(),
                subtitle: "Press s on a movie to save it for later".to_string(),
                kind: EmptyKind::Empty,
            }),
            Screen::Profile => Some(EmptyState {
                message: "Your lists are empty. Start rating movies!".to_string(),
                subtitle: "Press l to like or d to dislike a movie".to_string(),
                kind: EmptyKind::Empty,
            }),
        }
    }

    fn compute_header(&self, count: usize) -> HeaderInfo {
        HeaderInfo {
            title: format!(" Cineverse · {} ({count}) ", self.screen.title()),
        }
    }

    fn compute_tabs(&self) -> Vec<TabInfo> {
        Screen::ALL
            .iter()
            .enumerate()
            .map(|(i, &screen)| {
                let label = match screen {
                    Screen::Saved if !self.store.is_loading() => {
                        format!("{} {} ({})", i + 1, screen.label(), self.store.saved_movies().len())
                    }
                    _ => format!("{} {}", i + 1, screen.label()),
                };
                TabInfo {
                    label,
                    is_active: screen == self.screen,
                }
            })
            .collect()
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.screen) {
            (InputMode::Search(SearchFocus::Typing), Screen::Search) => {
                "ESC: clear  Enter: results  Ctrl+n/p: navigate  Type to search"
            }
            (InputMode::Search(SearchFocus::Typing), _) => {
                "ESC: clear  Enter: results  Ctrl+n/p: navigate  Type to filter"
            }
            (InputMode::Search(SearchFocus::Navigating), _) => {
                "ESC: clear  /: edit query  j/k: navigate  l: like  d: dislike  s: save"
            }
            (InputMode::Normal, Screen::Search) => {
                "j/k: navigate  l: like  d: dislike  s: save  /: search  Tab: screens  q: quit"
            }
            (InputMode::Normal, _) => {
                "j/k: navigate  l: like  d: dislike  s: save  /: filter  Tab: screens  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        let is_focused = self.input_mode == InputMode::Search(SearchFocus::Typing);
        match (self.screen, self.input_mode) {
            (Screen::Search, _) => Some(SearchBarInfo {
                label: "Search",
                query: self.search.query.clone(),
                is_focused,
            }),
            (_, InputMode::Search(_)) => Some(SearchBarInfo {
                label: "Filter",
                query: self.filter_query.clone(),
                is_focused,
            }),
            (_, InputMode::Normal) => None,
        }
    }

    /// Rows left for the list after the chrome: blank line, header, tabs and
    /// border on top (4), border and footer at the bottom plus the last row
    /// (3), and the search box when shown (3).
    const fn calculate_available_rows(total_rows: usize, with_search_bar: bool) -> usize {
        if with_search_bar {
            total_rows.saturating_sub(10)
        } else {
            total_rows.saturating_sub(7)
        }
    }
}

/// Lower-cased whitespace tokens of a local filter query.
struct FilterTokens {
    tokens: Vec<String>,
    matcher: SkimMatcherV2,
}

impl FilterTokens {
    fn new(query: &str) -> Self {
        Self {
            tokens: query.split_whitespace().map(str::to_lowercase).collect(),
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Keeps movies whose title fuzzy-matches every token.
    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        if self.tokens.is_empty() {
            return movies;
        }
        movies
            .into_iter()
            .filter(|movie| {
                let title = movie.title.to_lowercase();
                self.tokens
                    .iter()
                    .all(|token| self.matcher.fuzzy_match(&title, token).is_some())
            })
            .collect()
    }
}

/// Coalesces the fuzzy match indices of every whitespace token of `query` in
/// `text` into `(start, end)` runs.
fn highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    let mut indices: Vec<usize> = query
        .split_whitespace()
        .filter_map(|token| matcher.fuzzy_indices(text, &token.to_lowercase()))
        .flat_map(|(_score, token_indices)| token_indices)
        .collect();
    indices.sort_unstable();
    indices.dedup();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Picks the range of entries to draw so the selected one is fully visible.
///
/// `heights` holds the row count of each entry. Without a selection the
/// window starts at the top.
fn visible_window(heights: &[usize], selected: Option<usize>, available: usize) -> Range<usize> {
    let Some(selected) = selected else {
        let mut used = 0;
        let end = heights
            .iter()
            .take_while(|&&h| {
                used += h;
                used <= available
            })
            .count();
        return 0..end;
    };

    let mut start = selected;
    let mut end = selected + 1;
    let mut used = heights[selected];

    let half = available.saturating_sub(used) / 2;
    let mut above = 0;
    while start > 0 && above + heights[start - 1] <= half {
        start -= 1;
        above += heights[start];
    }
    used += above;

    while end < heights.len() && used + heights[end] <= available {
        used += heights[end];
        end += 1;
    }

    while start > 0 && used + heights[start - 1] <= available {
        start -= 1;
        used += heights[start];
    }

    start..end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoreKey;

    fn movie(id: &str, title: &str) -> Movie {
        Movie::new(id, title, format!("About {title}"), format!("https://img/{id}.jpg"))
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::new(TmdbEndpoint::new("key", "pt-BR"), Theme::default());
        state.store.apply_loaded(StoreKey::Catalog, None);
        state.store.apply_loaded(StoreKey::Status, None);
        state
    }

    fn cards(vm: &UIViewModel) -> Vec<&MovieCardView> {
        vm.entries
            .iter()
            .filter_map(|e| match e {
                ListEntry::Card(card) => Some(card),
                ListEntry::Section(_) => None,
            })
            .collect()
    }

    fn sections(vm: &UIViewModel) -> Vec<&str> {
        vm.entries
            .iter()
            .filter_map(|e| match e {
                ListEntry::Section(title) => Some(title.as_str()),
                ListEntry::Card(_) => None,
            })
            .collect()
    }

    #[test]
    fn loading_store_hides_every_screen() {
        let mut state = AppState::new(TmdbEndpoint::new("key", "pt-BR"), Theme::default());
        state.search.results = vec![movie("1", "Inception")];

        for screen in Screen::ALL {
            state.screen = screen;
            let vm = state.compute_viewmodel(40, 100);
            assert_eq!(vm.empty_state.unwrap().kind, EmptyKind::Loading);
            assert!(vm.entries.is_empty());
        }
    }

    #[test]
    fn search_screen_shows_results_once_loaded() {
        let mut state = loaded_state();
        state.search.results = vec![movie("1", "Inception"), movie("2", "Up")];

        let vm = state.compute_viewmodel(40, 100);

        assert!(vm.empty_state.is_none());
        assert_eq!(cards(&vm).len(), 2);
        assert!(cards(&vm)[0].is_selected);
        assert_eq!(vm.search_bar.unwrap().label, "Search");
    }

    #[test]
    fn fetch_error_replaces_results() {
        let mut state = loaded_state();
        state.search.results = vec![movie("1", "Inception")];
        state.search.fail("HTTP status 401");

        let empty = state.compute_viewmodel(40, 100).empty_state.unwrap();

        assert_eq!(empty.kind, EmptyKind::Error);
        assert_eq!(empty.message, "Failed to load movies.");
    }

    #[test]
    fn empty_search_result_names_the_query() {
        let mut state = loaded_state();
        state.search.query = "zzzz".to_string();
        state.search.settle_initial();
        let id = state.search.begin_request();
        state.search.complete(id, Ok(vec![]));

        let empty = state.compute_viewmodel(40, 100).empty_state.unwrap();

        assert_eq!(empty.message, "No movies found for \"zzzz\"");
    }

    #[test]
    fn refresh_with_results_uses_status_line() {
        let mut state = loaded_state();
        state.search.results = vec![movie("1", "Inception")];
        state.search.begin_request();

        let vm = state.compute_viewmodel(40, 100);

        assert!(vm.empty_state.is_none());
        assert_eq!(vm.status_line.as_deref(), Some("Loading movies..."));
    }

    #[test]
    fn saved_screen_lists_saved_movies() {
        let mut state = loaded_state();
        state.store.toggle_saved(&movie("27205", "Inception"));
        state.store.toggle_liked(&movie("13", "Forrest Gump"));
        state.show_screen(Screen::Saved);

        let vm = state.compute_viewmodel(40, 100);

        let titles: Vec<_> = cards(&vm).iter().map(|c| c.title.clone()).collect();
        assert_eq!(titles, vec!["Inception"]);
        assert!(cards(&vm)[0].status.saved);
    }

    #[test]
    fn saved_screen_empty_message() {
        let mut state = loaded_state();
        state.show_screen(Screen::Saved);

        let empty = state.compute_viewmodel(40, 100).empty_state.unwrap();

        assert_eq!(empty.message, "You haven't saved any movies yet.");
    }

    #[test]
    fn profile_omits_empty_sections() {
        let mut state = loaded_state();
        state.store.toggle_liked(&movie("1", "Inception"));
        state.store.toggle_saved(&movie("2", "Up"));
        state.show_screen(Screen::Profile);

        let vm = state.compute_viewmodel(40, 100);

        assert_eq!(sections(&vm), vec!["Movies I liked", "Saved for later"]);
        assert_eq!(state.visible_movies().len(), 2);
    }

    #[test]
    fn profile_empty_message() {
        let mut state = loaded_state();
        state.show_screen(Screen::Profile);

        let empty = state.compute_viewmodel(40, 100).empty_state.unwrap();

        assert_eq!(empty.message, "Your lists are empty. Start rating movies!");
    }

    #[test]
    fn filter_narrows_local_lists() {
        let mut state = loaded_state();
        state.store.toggle_saved(&movie("1", "The Matrix"));
        state.store.toggle_saved(&movie("2", "Toy Story"));
        state.show_screen(Screen::Saved);
        state.filter_query = "matr".to_string();

        let titles: Vec<_> = state.visible_movies().iter().map(|m| m.title.clone()).collect();

        assert_eq!(titles, vec!["The Matrix"]);
    }

    #[test]
    fn filter_highlights_title() {
        let mut state = loaded_state();
        state.store.toggle_saved(&movie("1", "The Matrix"));
        state.show_screen(Screen::Saved);
        state.input_mode = InputMode::Search(SearchFocus::Typing);
        state.filter_query = "matrix".to_string();

        let vm = state.compute_viewmodel(40, 100);

        assert_eq!(cards(&vm)[0].highlight_ranges, vec![(4, 10)]);
        assert_eq!(vm.search_bar.unwrap().label, "Filter");
    }

    #[test]
    fn multi_word_search_highlights_each_word() {
        let mut state = loaded_state();
        state.search.query = "dark knight".to_string();
        state.search.settle_initial();
        let id = state.search.begin_request();
        state.search.complete(id, Ok(vec![movie("155", "The Dark Knight")]));

        let vm = state.compute_viewmodel(40, 100);

        assert_eq!(cards(&vm)[0].highlight_ranges, vec![(4, 8), (9, 15)]);
    }

    #[test]
    fn selection_wraps_and_clamps() {
        let mut state = loaded_state();
        state.search.results = vec![movie("1", "A"), movie("2", "B"), movie("3", "C")];

        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);

        state.selected_index = 2;
        state.search.results.truncate(1);
        state.clamp_selection();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn show_screen_resets_cursor_and_filter() {
        let mut state = loaded_state();
        state.selected_index = 4;
        state.filter_query = "x".to_string();
        state.input_mode = InputMode::Search(SearchFocus::Typing);

        assert!(state.show_screen(Screen::Profile));
        assert!(!state.show_screen(Screen::Profile));
        assert_eq!(state.selected_index, 0);
        assert!(state.filter_query.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn window_keeps_selected_card_visible() {
        let mut state = loaded_state();
        state.search.results = (0..30).map(|i| movie(&i.to_string(), &format!("Movie {i}"))).collect();
        state.selected_index = 25;

        let vm = state.compute_viewmodel(24, 100);

        let shown = cards(&vm);
        assert!(shown.iter().any(|c| c.is_selected && c.title == "Movie 25"));
        let used: usize = vm.entries.iter().map(ListEntry::height).sum();
        assert!(used <= AppState::calculate_available_rows(24, true));
    }

    #[test]
    fn window_fills_from_top_without_selection() {
        assert_eq!(visible_window(&[3, 3, 3], None, 7), 0..2);
        assert_eq!(visible_window(&[1, 3, 3, 3], Some(3), 7), 2..4);
        assert_eq!(visible_window(&[1, 3, 3], Some(1), 20), 0..3);
    }

    #[test]
    fn long_titles_are_truncated() {
        let mut state = loaded_state();
        state.search.results = vec![movie("1", &"Very Long Title ".repeat(10))];

        let vm = state.compute_viewmodel(40, 60);

        let card = cards(&vm)[0];
        assert!(visual_len(&card.title) <= 60 - CARD_INDENT - BADGES_WIDTH - 1);
        assert!(card.title.ends_with("..."));
    }

    #[test]
    fn tabs_mark_active_screen() {
        let mut state = loaded_state();
        state.store.toggle_saved(&movie("1", "Up"));
        state.show_screen(Screen::Saved);

        let tabs = state.compute_viewmodel(40, 100).tabs;

        assert_eq!(tabs[1].label, "2 Saved (1)");
        assert!(tabs[1].is_active);
        assert!(!tabs[0].is_active);
    }
}
