//! Zellij plugin wrapper and entry point.
//!
//! The thin layer between the Tierdex library and the Zellij host. It maps
//! host events (keys, timers, worker messages, HTTP answers) to library
//! [`Event`]s and carries out the [`Action`]s the library returns.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────┐
//! │     Zellij Main Thread      │
//! │  ┌──────────────────────┐   │
//! │  │    State (plugin)    │───┼──► web_request (supabase backend)
//! │  └──────────────────────┘   │
//! │          │ IPC              │
//! │          ▼                  │
//! │  ┌──────────────────────┐   │
//! │  │    TierdexWorker     │   │  ← local catalog, preference file
//! │  └──────────────────────┘   │
//! └─────────────────────────────┘
//! ```
//!
//! # Repository dispatch
//!
//! - `local`: [`Action::Dispatch`] becomes [`WorkerMessage::Repository`];
//!   the worker answers with [`WorkerResponse::Repository`].
//! - `supabase`: the request is built by [`RestClient`] and sent with
//!   `web_request`; the request id and request travel in the call's context
//!   and come back with `WebRequestResult`.
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+c`: Hide the plugin
//! - `Esc`: Back (leaves search, cancels a delete prompt, pops a screen)
//!
//! Listings (browser, tier list, tier detail):
//! - `j`/`Down`, `k`/`Up`: Move
//! - `h`/`Left`, `l`/`Right`: Previous/next page
//! - `Enter`: Open
//! - `/`: Search (browser only), `Ctrl+u` clears it
//! - `a`: Add character, `t`: Tier list, `r`: Refresh
//! - `T`: Toggle light/dark theme
//! - `q`: Back, or hide on the browser
//!
//! Character detail:
//! - `e`: Edit, `d`: Delete (then `y`/`n`)
//!
//! Form:
//! - `Tab`/`Down`, `Shift+Tab`/`Up`: Next/previous field
//! - `Enter`: Save

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use tierdex::repository::rest::{self, HttpMethod};
use tierdex::repository::{RepoOutcome, RepoRequest, RequestId, RestClient};
use tierdex::worker::{TierdexWorker, WorkerMessage, WorkerResponse};
use tierdex::{handle_event, Action, Backend, Config, Event, InputMode, Screen};

register_plugin!(State);
register_worker!(TierdexWorker, tierdex_worker, TIERDEX_WORKER);

const WORKER_NAME: &str = "tierdex";

struct State {
    app: tierdex::AppState,

    /// Set for the supabase backend; `None` routes requests to the worker.
    rest: Option<RestClient>,

    /// `Event::Mount` is fired once, after the permission answer.
    mounted: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: tierdex::initialize(&Config::default()),
            rest: None,
            mounted: false,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        tierdex::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(backend = ?config.backend, "parsed configuration");
        self.app = tierdex::initialize(&config);

        let mut permissions = vec![PermissionType::ChangeApplicationState];
        match &config.backend {
            Backend::Local => {
                self.post_worker_message(&WorkerMessage::open_catalog(config.catalog_file.clone()));
            }
            Backend::Supabase { url, key } => {
                self.rest = Some(RestClient::new(url, key));
                permissions.push(PermissionType::WebAccess);
            }
        }

        request_permission(&permissions);
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::CustomMessage,
            EventType::WebRequestResult,
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
            zellij_tile::prelude::Event::Timer(_) => Event::DebounceElapsed,
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::WebRequestResult(status, headers, body, context) => {
                match Self::map_web_result_event(status, &headers, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                if matches!(permissions, PermissionStatus::Denied) {
                    tracing::warn!("permissions denied - remote backend and hiding unavailable");
                }
                if self.mounted {
                    return false;
                }
                self.mounted = true;
                Event::Mount
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        tierdex::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps a key press to an application event for the screen on top.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('c') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::CloseFocus);
        }
        if key.bare_key == BareKey::Esc {
            return Some(Event::Back);
        }
        if self.app.alert.is_some() {
            return match key.bare_key {
                BareKey::Enter => Some(Event::DismissAlert),
                _ => None,
            };
        }

        match self.app.screen() {
            Screen::CharacterForm => Self::map_form_key(key),
            Screen::Browser if self.app.input_mode == InputMode::Search => Self::map_search_key(key),
            Screen::CharacterDetail if self.app.detail.confirm_delete => match key.bare_key {
                BareKey::Char('y' | 'Y') => Some(Event::ConfirmDelete),
                BareKey::Char('n' | 'N') => Some(Event::CancelDelete),
                _ => None,
            },
            _ => Self::map_command_key(key),
        }
    }

    fn map_form_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::PrevField,
            BareKey::Tab | BareKey::Down => Event::NextField,
            BareKey::Up => Event::PrevField,
            BareKey::Enter => Event::Submit,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_search_key(key: &KeyWithModifier) -> Option<Event> {
        if key.bare_key == BareKey::Char('u') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::ClearSearch);
        }
        Some(match key.bare_key {
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Enter => Event::Select,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_command_key(key: &KeyWithModifier) -> Option<Event> {
        if key.bare_key == BareKey::Char('u') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::ClearSearch);
        }
        if key.bare_key == BareKey::Char('t') && key.has_modifiers(&[KeyModifier::Shift]) {
            return Some(Event::ToggleTheme);
        }
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Left | BareKey::Char('h') => Event::PrevPage,
            BareKey::Right | BareKey::Char('l') => Event::NextPage,
            BareKey::Enter => Event::Select,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('a') => Event::AddCharacter,
            BareKey::Char('e') => Event::EditCharacter,
            BareKey::Char('d') => Event::DeleteCharacter,
            BareKey::Char('t') => Event::OpenTierList,
            BareKey::Char('r') => Event::Refresh,
            BareKey::Char('T') => Event::ToggleTheme,
            BareKey::Char('q') => Event::Back,
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
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Decodes a PostgREST answer. Undecodable bodies still reach the app as
    /// a failed outcome so the screen leaves its loading state.
    fn map_web_result_event(
        status: u16,
        headers: &BTreeMap<String, String>,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let (request_id, request) = match rest::parse_context(context) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "web request result without a repository context");
                return None;
            }
        };
        let outcome = rest::decode(&request, status, headers, body).unwrap_or_else(|e| {
            tracing::warn!(operation = request.kind(), status, error = %e, "remote request failed");
            RepoOutcome::Failed {
                message: e.to_string(),
            }
        });
        Some(Event::RepositoryResponse { request_id, outcome })
    }

    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker message"),
        }
    }

    fn send_web_request(&mut self, client: &RestClient, request_id: RequestId, request: RepoRequest) {
        let prepared = client
            .build(&request)
            .and_then(|http| Ok((http, rest::context_for(request_id, &request)?)));

        match prepared {
            Ok((http, context)) => {
                let verb = match http.method {
                    HttpMethod::Get => HttpVerb::Get,
                    HttpMethod::Post => HttpVerb::Post,
                    HttpMethod::Delete => HttpVerb::Delete,
                };
                tracing::debug!(operation = request.kind(), url = %http.url, "sending web request");
                web_request(http.url, verb, http.headers, http.body, context);
            }
            Err(e) => {
                tracing::warn!(operation = request.kind(), error = %e, "failed to build web request");
                let failed = Event::RepositoryResponse {
                    request_id,
                    outcome: RepoOutcome::Failed {
                        message: e.to_string(),
                    },
                };
                if let Ok((_, actions)) = handle_event(&mut self.app, &failed) {
                    for action in actions {
                        self.execute_action(action);
                    }
                }
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::PostToWorker(message) => self.post_worker_message(&message),
            Action::Dispatch {
                request_id,
                request,
            } => match self.rest.clone() {
                Some(client) => self.send_web_request(&client, request_id, request),
                None => self.post_worker_message(&WorkerMessage::repository(request_id, request)),
            },
            Action::ArmTimer { seconds } => set_timeout(seconds),
        }
    }
}
