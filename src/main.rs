//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Cineverse library and the Zellij plugin
//! system. Every host call (web requests, timers, worker messaging, pane
//! visibility) is made from this file; the library only returns [`Action`]s.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling, web requests
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │ CineverseWorker  │   │  ← Key-value storage I/O
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Event Mapping
//!
//! - `PermissionRequestResult` → `Event::PermissionsGranted` / `PermissionsDenied`
//! - `Timer` → `Event::Timer`
//! - `WebRequestResult` → `Event::FetchCompleted` (request id read from the context)
//! - `CustomMessage` from the worker → `Event::WorkerResponse`
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//!
//! In normal mode:
//! - `j`/`Down`, `k`/`Up`: Move
//! - `l`, `d`, `s`: Toggle liked, disliked, saved
//! - `1`, `2`, `3`: Search, Saved, Profile screens
//! - `Tab`/`Shift+Tab`: Next/previous screen
//! - `/`: Open the query box
//! - `q`/`Esc`: Close plugin
//!
//! While typing:
//! - Any character: Edit the query
//! - `Enter`: Focus results
//! - `Esc`: Clear the query and leave search
//!
//! While navigating results:
//! - `j`/`k`, `l`/`d`/`s`: As in normal mode
//! - `/`: Return to the query box
//! - `Esc`: Clear the query and leave search

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use cineverse::worker::{StoreWorker, WorkerMessage, WorkerResponse, WORKER_NAME};
use cineverse::{handle_event, Action, AppState, Config, Event, InputMode, Screen, SearchFocus};

register_plugin!(State);
register_worker!(CineverseWorker, cineverse_worker, CINEVERSE_WORKER);

/// Web request context key carrying the listing request id.
const REQUEST_ID_KEY: &str = "request_id";

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: cineverse::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the application state, requests
    /// permissions and subscribes to events.
    ///
    /// Nothing is loaded or fetched until the permission result arrives.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        cineverse::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        self.app = cineverse::initialize(&config);

        request_permission(&[PermissionType::WebAccess, PermissionType::FullHdAccess]);

        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result_event(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_) => Event::Timer,
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Granted) => {
                Event::PermissionsGranted
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Denied) => {
                Event::PermissionsDenied
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        cineverse::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events according to the input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        match self.app.input_mode {
            InputMode::Search(SearchFocus::Typing) => Some(match key.bare_key {
                BareKey::Esc => Event::ExitSearch,
                BareKey::Enter => Event::FocusResults,
                BareKey::Backspace => Event::Backspace,
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::Search(SearchFocus::Navigating) => Some(match key.bare_key {
                BareKey::Esc => Event::ExitSearch,
                BareKey::Char('/') => Event::FocusSearchBar,
                BareKey::Backspace => Event::Backspace,
                _ => return Self::map_command_key(key),
            }),
            InputMode::Normal => Some(match key.bare_key {
                BareKey::Esc | BareKey::Char('q') => Event::CloseFocus,
                BareKey::Char('/') => Event::SearchMode,
                BareKey::Char('1') => Event::ShowScreen(Screen::Search),
                BareKey::Char('2') => Event::ShowScreen(Screen::Saved),
                BareKey::Char('3') => Event::ShowScreen(Screen::Profile),
                BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::PreviousScreen,
                BareKey::Tab => Event::NextScreen,
                _ => return Self::map_command_key(key),
            }),
        }
    }

    /// Movement and toggle keys shared by normal and navigating modes.
    fn map_command_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Char('l') => Event::ToggleLiked,
            BareKey::Char('d') => Event::ToggleDisliked,
            BareKey::Char('s') => Event::ToggleSaved,
            _ => return None,
        })
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Maps a web response to `FetchCompleted`; responses without our request
    /// id in their context are not ours and are dropped.
    fn map_web_result_event(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let request_id = context.get(REQUEST_ID_KEY)?.parse::<u64>().ok()?;
        tracing::debug!(request_id, status, body_len = body.len(), "web request result");
        Some(Event::FetchCompleted {
            request_id,
            status,
            body,
        })
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::PostToWorker(message) => Self::post_worker_message(message),
            Action::StartTimer { millis } => {
                #[allow(clippy::cast_precision_loss)]
                let seconds = *millis as f64 / 1000.0;
                set_timeout(seconds);
            }
            Action::FetchMovies { url, request_id } => {
                let mut context = BTreeMap::new();
                context.insert(REQUEST_ID_KEY.to_string(), request_id.to_string());
                web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], context);
            }
        }
    }
}

/// Zellij worker shim around [`StoreWorker`].
#[derive(Serialize, Deserialize, Default)]
pub struct CineverseWorker {
    #[serde(skip)]
    inner: StoreWorker,
    #[serde(skip)]
    tracing_ready: bool,
}

impl ZellijWorker<'_> for CineverseWorker {
    /// Handles one storage message from the plugin thread and posts the
    /// response back under the message's name.
    fn on_message(&mut self, message: String, payload: String) {
        if !self.tracing_ready {
            cineverse::observability::init_tracing(&Config::default());
            self.tracing_ready = true;
        }

        if let Some(payload) = self.inner.handle_payload(&payload) {
            post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            });
        }
    }
}
