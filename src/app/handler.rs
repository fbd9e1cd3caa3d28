//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point for user input, host timers and
//! backend answers. It mutates [`AppState`] and returns the [`Action`]s the
//! plugin shim must carry out, together with a flag telling whether the UI
//! needs a redraw.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `NextPage`, `PrevPage`, `Select`, `Back`
//! - **Search**: `SearchMode`, `ExitSearch`, `ClearSearch`, `Char`, `Backspace`
//! - **Editing**: `AddCharacter`, `EditCharacter`, `NextField`, `Submit`, ...
//! - **System**: `Mount`, `DebounceElapsed`, `RepositoryResponse`, `WorkerResponse`

use crate::app::modes::{InputMode, Screen};
use crate::app::state::{Alert, FormState};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{Character, FormMode};
use crate::repository::{RepoOutcome, RepoRequest, RequestId, RequestTarget};
use crate::worker::{WorkerMessage, WorkerResponse};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Plugin became visible for the first time.
    Mount,

    /// Moves the list cursor down (wraps to top).
    KeyDown,
    /// Moves the list cursor up (wraps to bottom).
    KeyUp,
    NextPage,
    PrevPage,
    /// Opens the highlighted character or tier.
    Select,
    /// Leaves the current screen. On the root screen, hides the plugin.
    Back,
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends typed letters to the search field.
    SearchMode,
    /// Returns letters to command mode, keeping the search text.
    ExitSearch,
    ClearSearch,
    /// Typed character: search text or form field, depending on screen.
    Char(char),
    Backspace,

    Refresh,
    OpenTierList,
    AddCharacter,
    EditCharacter,
    /// Asks for confirmation before deleting the character on screen.
    DeleteCharacter,
    ConfirmDelete,
    CancelDelete,
    ToggleTheme,

    NextField,
    PrevField,
    /// Validates and saves the form.
    Submit,

    DismissAlert,

    /// A host timer fired.
    DebounceElapsed,

    /// Answer to an [`Action::Dispatch`].
    RepositoryResponse {
        request_id: RequestId,
        outcome: RepoOutcome,
    },

    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Keyboard-originated events. Any of these dismisses an open alert.
    #[must_use]
    pub const fn is_input(&self) -> bool {
        !matches!(
            self,
            Self::Mount
                | Self::DebounceElapsed
                | Self::RepositoryResponse { .. }
                | Self::WorkerResponse(_)
        )
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for handlers that fail.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    if state.alert.is_some() && event.is_input() {
        tracing::debug!("alert dismissed");
        state.alert = None;
        return Ok((true, vec![]));
    }

    match event {
        Event::Mount => {
            let mut actions = state.mount();
            actions.push(Action::PostToWorker(WorkerMessage::load_preferences()));
            Ok((true, actions))
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::NextPage | Event::PrevPage => {
            let delta = if *event == Event::NextPage { 1 } else { -1 };
            Ok(change_page(state, delta))
        }
        Event::Select => Ok(select(state)),
        Event::Back => {
            if state.screen() == Screen::Browser {
                if state.input_mode == InputMode::Search {
                    state.input_mode = InputMode::Normal;
                    return Ok((true, vec![]));
                }
                return Ok((false, vec![Action::CloseFocus]));
            }
            if state.screen() == Screen::CharacterDetail && state.detail.confirm_delete {
                state.detail.confirm_delete = false;
                return Ok((true, vec![]));
            }
            Ok(state.pop_screen())
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SearchMode => {
            if state.screen() != Screen::Browser {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::ClearSearch => {
            if state.screen() != Screen::Browser {
                return Ok((false, vec![]));
            }
            let effect = state.browser.clear();
            Ok((true, AppState::root_browser_action(effect)))
        }
        Event::Char(c) => Ok(type_char(state, *c)),
        Event::Backspace => Ok(backspace(state)),
        Event::Refresh => Ok(refresh(state)),
        Event::OpenTierList => {
            if state.screen() == Screen::CharacterForm {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Normal;
            Ok((true, state.open_tier_list()))
        }
        Event::AddCharacter => {
            if state.screen() == Screen::CharacterForm {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Normal;
            state.open_add_form();
            Ok((true, vec![]))
        }
        Event::EditCharacter => {
            if state.screen() != Screen::CharacterDetail || state.detail.confirm_delete {
                return Ok((false, vec![]));
            }
            Ok((state.open_edit_form(), vec![]))
        }
        Event::DeleteCharacter => {
            if state.screen() != Screen::CharacterDetail || state.detail.character.is_none() {
                return Ok((false, vec![]));
            }
            state.detail.confirm_delete = true;
            Ok((true, vec![]))
        }
        Event::ConfirmDelete => Ok(confirm_delete(state)),
        Event::CancelDelete => {
            state.detail.confirm_delete = false;
            Ok((true, vec![]))
        }
        Event::ToggleTheme => {
            state.theme_mode = state.theme_mode.toggled();
            tracing::debug!(mode = ?state.theme_mode, "theme toggled");
            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::save_theme(state.theme_mode))],
            ))
        }
        Event::NextField | Event::PrevField => {
            let Some(form) = state.form.as_mut().filter(|f| !f.saving) else {
                return Ok((false, vec![]));
            };
            if *event == Event::NextField {
                form.form.focus_next();
            } else {
                form.form.focus_prev();
            }
            Ok((true, vec![]))
        }
        Event::Submit => Ok(submit(state)),
        Event::DismissAlert => Ok((false, vec![])),
        Event::DebounceElapsed => {
            let effect = state.browser.debounce_elapsed();
            Ok((effect.is_some(), AppState::root_browser_action(effect)))
        }
        Event::RepositoryResponse {
            request_id,
            outcome,
        } => Ok(apply_response(state, *request_id, outcome.clone())),
        Event::WorkerResponse(response) => Ok(apply_worker_response(state, response)),
    }
}

fn change_page(state: &mut AppState, delta: i64) -> (bool, Vec<Action>) {
    let shift = |page: u64| i64::try_from(page).unwrap_or(i64::MAX).saturating_add(delta);
    match state.screen() {
        Screen::Browser => {
            let target = shift(state.browser.page);
            let effect = state.browser.change_page(target);
            if effect.is_some() {
                state.browser_selected = 0;
            }
            (effect.is_some(), AppState::root_browser_action(effect))
        }
        Screen::TierDetail => {
            let Some(browser) = state.tier_browser.as_mut() else {
                return (false, vec![]);
            };
            let effect = browser.change_page(shift(browser.page));
            if effect.is_some() {
                state.tier_browser_selected = 0;
            }
            (effect.is_some(), AppState::tier_browser_action(effect))
        }
        _ => (false, vec![]),
    }
}

fn select(state: &mut AppState) -> (bool, Vec<Action>) {
    match state.screen() {
        Screen::Browser if state.input_mode == InputMode::Search => {
            state.input_mode = InputMode::Normal;
            (true, vec![])
        }
        Screen::Browser | Screen::TierDetail => {
            let Some(id) = state.selected_character().map(|c| c.id) else {
                tracing::debug!("no character selected");
                return (false, vec![]);
            };
            (true, state.open_detail(id))
        }
        Screen::TierList => {
            let Some(code) = state.selected_tier().map(|t| t.tier_code.clone()) else {
                return (false, vec![]);
            };
            tracing::debug!(tier_code = %code, "opening tier");
            (true, state.open_tier_detail(&code))
        }
        Screen::CharacterForm => submit(state),
        Screen::CharacterDetail => (false, vec![]),
    }
}

fn type_char(state: &mut AppState, c: char) -> (bool, Vec<Action>) {
    match state.screen() {
        Screen::Browser if state.input_mode == InputMode::Search => {
            let mut text = state.browser.raw_input.clone();
            text.push(c);
            let effect = state.browser.on_input_change(&text);
            (true, AppState::root_browser_action(effect))
        }
        Screen::CharacterForm => {
            let Some(form) = state.form.as_mut().filter(|f| !f.saving) else {
                return (false, vec![]);
            };
            form.form.push_char(c);
            (true, vec![])
        }
        _ => (false, vec![]),
    }
}

fn backspace(state: &mut AppState) -> (bool, Vec<Action>) {
    match state.screen() {
        Screen::Browser if state.input_mode == InputMode::Search => {
            let mut text = state.browser.raw_input.clone();
            if text.pop().is_none() {
                return (false, vec![]);
            }
            let effect = state.browser.on_input_change(&text);
            (true, AppState::root_browser_action(effect))
        }
        Screen::CharacterForm => {
            let Some(form) = state.form.as_mut().filter(|f| !f.saving) else {
                return (false, vec![]);
            };
            form.form.pop_char();
            (true, vec![])
        }
        _ => (false, vec![]),
    }
}

fn refresh(state: &mut AppState) -> (bool, Vec<Action>) {
    match state.screen() {
        Screen::Browser => {
            let effect = state.browser.refresh();
            (effect.is_some(), AppState::root_browser_action(effect))
        }
        Screen::TierDetail => {
            let effect = state.tier_browser.as_mut().and_then(|b| b.refresh());
            (effect.is_some(), AppState::tier_browser_action(effect))
        }
        Screen::TierList => (true, state.load_tiers()),
        Screen::CharacterDetail | Screen::CharacterForm => (false, vec![]),
    }
}

fn submit(state: &mut AppState) -> (bool, Vec<Action>) {
    let Some(form) = state.form.as_mut() else {
        return (false, vec![]);
    };
    if form.saving {
        return (false, vec![]);
    }

    let draft = match form.form.validate() {
        Ok(draft) => draft,
        Err(e) => {
            tracing::debug!(field = ?e.field, error = %e.message, "form rejected");
            form.error = Some(e.message.clone());
            state.alert = Some(Alert::error("Validation Error", e.message));
            return (true, vec![]);
        }
    };

    let request = match form.form.mode {
        FormMode::Add => RepoRequest::CreateCharacter { draft },
        FormMode::Edit(id) => RepoRequest::UpdateCharacter { id, draft },
    };
    form.error = None;
    form.saving = true;
    let seq = next_form_seq(form);
    tracing::debug!(kind = request.kind(), seq, "saving character");

    (
        true,
        vec![Action::Dispatch {
            request_id: RequestId::new(RequestTarget::Save, seq),
            request,
        }],
    )
}

/// Forms live for one save at a time, so their sequence only needs to be
/// unique per form.
fn next_form_seq(form: &mut FormState) -> u64 {
    form.seq += 1;
    form.seq
}

fn confirm_delete(state: &mut AppState) -> (bool, Vec<Action>) {
    let detail = &mut state.detail;
    if !detail.confirm_delete || detail.deleting {
        return (false, vec![]);
    }
    let Some(id) = detail.character.as_ref().map(|c| c.id) else {
        return (false, vec![]);
    };

    detail.confirm_delete = false;
    detail.deleting = true;
    detail.delete_seq += 1;
    tracing::debug!(id, "deleting character");

    (
        true,
        vec![Action::Dispatch {
            request_id: RequestId::new(RequestTarget::Delete, detail.delete_seq),
            request: RepoRequest::DeleteCharacter { id },
        }],
    )
}

fn apply_response(state: &mut AppState, request_id: RequestId, outcome: RepoOutcome) -> (bool, Vec<Action>) {
    let seq = request_id.seq;
    tracing::debug!(target = ?request_id.target, seq, "repository response");

    match (request_id.target, outcome) {
        (RequestTarget::Browser, RepoOutcome::CharacterPage(page)) => {
            let applied = state.browser.apply_page(seq, page);
            if applied {
                state.browser_selected = 0;
            }
            (applied, vec![])
        }
        (RequestTarget::Browser, RepoOutcome::Failed { message }) => {
            (state.browser.apply_failure(seq, &message), vec![])
        }
        (RequestTarget::TierBrowser, RepoOutcome::CharacterPage(page)) => {
            let applied = state
                .tier_browser
                .as_mut()
                .is_some_and(|b| b.apply_page(seq, page));
            if applied {
                state.tier_browser_selected = 0;
            }
            (applied, vec![])
        }
        (RequestTarget::TierBrowser, RepoOutcome::Failed { message }) => {
            let applied = state
                .tier_browser
                .as_mut()
                .is_some_and(|b| b.apply_failure(seq, &message));
            (applied, vec![])
        }
        (RequestTarget::TierHeader, RepoOutcome::Tier(tier)) => {
            let applied = state
                .tier_browser
                .as_mut()
                .is_some_and(|b| b.apply_tier(seq, tier));
            (applied, vec![])
        }
        (RequestTarget::TierList, outcome) if seq == state.tier_list.seq => {
            state.tier_list.loading = false;
            match outcome {
                RepoOutcome::Tiers(tiers) => {
                    state.tier_list.tiers = tiers;
                    state.tier_list.error = None;
                    state.clamp_selections();
                }
                RepoOutcome::Failed { message } => {
                    tracing::warn!(error = %message, "failed to load tiers");
                    state.tier_list.error = Some(message);
                }
                other => tracing::warn!(?other, "unexpected tier list outcome"),
            }
            (true, vec![])
        }
        (RequestTarget::Detail, outcome)
            if seq == state.detail.seq && state.is_open(Screen::CharacterDetail) =>
        {
            state.detail.loading = false;
            match outcome {
                RepoOutcome::Character(character) => state.detail.character = character,
                RepoOutcome::Failed { message } => {
                    tracing::warn!(error = %message, "failed to load character");
                    state.alert = Some(Alert::error("Error", "Failed to load character"));
                }
                other => tracing::warn!(?other, "unexpected detail outcome"),
            }
            (true, vec![])
        }
        (RequestTarget::Save, outcome) => apply_save(state, seq, outcome),
        (RequestTarget::Delete, outcome) => apply_delete(state, seq, outcome),
        (target, outcome) => {
            tracing::debug!(?target, seq, kind = ?outcome_kind(&outcome), "discarding response");
            (false, vec![])
        }
    }
}

fn outcome_kind(outcome: &RepoOutcome) -> &'static str {
    match outcome {
        RepoOutcome::CharacterPage(_) => "character_page",
        RepoOutcome::Character(_) => "character",
        RepoOutcome::Tiers(_) => "tiers",
        RepoOutcome::Tier(_) => "tier",
        RepoOutcome::Saved(_) => "saved",
        RepoOutcome::Deleted { .. } => "deleted",
        RepoOutcome::Failed { .. } => "failed",
    }
}

fn apply_save(state: &mut AppState, seq: u64, outcome: RepoOutcome) -> (bool, Vec<Action>) {
    let Some(form) = state.form.as_mut().filter(|f| f.saving && f.seq == seq) else {
        return (false, vec![]);
    };
    let editing = matches!(form.form.mode, FormMode::Edit(_));
    let verb = if editing { "update" } else { "add" };

    match outcome {
        RepoOutcome::Saved(character) => {
            tracing::info!(id = character.id, name = %character.name, "character saved");
            let mut actions = if state.screen() == Screen::CharacterForm {
                state.pop_screen().1
            } else {
                state.form = None;
                vec![]
            };
            refresh_detail(state, character);
            state.alert = Some(Alert::success(if editing {
                "Character updated successfully"
            } else {
                "Character added successfully"
            }));
            actions.extend(state.refresh_listings());
            (true, actions)
        }
        RepoOutcome::Failed { message } => {
            tracing::warn!(error = %message, "failed to save character");
            form.saving = false;
            form.error = Some(message.clone());
            state.alert = Some(Alert::error(
                "Error",
                format!("Failed to {verb} character: {message}"),
            ));
            (true, vec![])
        }
        other => {
            tracing::warn!(kind = outcome_kind(&other), "unexpected save outcome");
            form.saving = false;
            (true, vec![])
        }
    }
}

/// Shows the saved row on a detail screen that displays it.
fn refresh_detail(state: &mut AppState, character: Character) {
    if state.detail.id == Some(character.id) {
        state.detail.character = Some(character);
        state.detail.loading = false;
    }
}

fn apply_delete(state: &mut AppState, seq: u64, outcome: RepoOutcome) -> (bool, Vec<Action>) {
    if !state.detail.deleting || state.detail.delete_seq != seq {
        return (false, vec![]);
    }
    state.detail.deleting = false;

    match outcome {
        RepoOutcome::Deleted { id } => {
            tracing::info!(id, "character deleted");
            let mut actions = if state.screen() == Screen::CharacterDetail {
                state.pop_screen().1
            } else {
                vec![]
            };
            state.alert = Some(Alert::success("Character deleted successfully"));
            actions.extend(state.refresh_listings());
            (true, actions)
        }
        RepoOutcome::Failed { message } => {
            tracing::warn!(error = %message, "failed to delete character");
            state.alert = Some(Alert::error("Error", "Failed to delete character"));
            (true, vec![])
        }
        other => {
            tracing::warn!(kind = outcome_kind(&other), "unexpected delete outcome");
            (true, vec![])
        }
    }
}

fn apply_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::CatalogOpened => (false, vec![]),
        WorkerResponse::Repository {
            request_id,
            outcome,
        } => apply_response(state, *request_id, outcome.clone()),
        WorkerResponse::PreferencesLoaded { mode } => {
            let changed = state.theme_mode != *mode;
            state.theme_mode = *mode;
            (changed, vec![])
        }
        WorkerResponse::ThemeSaved { mode } => {
            tracing::debug!(?mode, "theme preference saved");
            (false, vec![])
        }
        WorkerResponse::Error { message } => {
            tracing::error!(error = %message, "worker error");
            state.alert = Some(Alert::error("Storage Error", message.clone()));
            (true, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{Page, ThemeMode};
    use crate::ui::theme::Palettes;

    fn state() -> AppState {
        AppState::new(Palettes::default(), ThemeMode::Light)
    }

    #[test]
    fn back_on_root_hides_plugin() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::Back).unwrap();
        assert_eq!(actions, vec![Action::CloseFocus]);
    }

    #[test]
    fn back_in_search_only_leaves_search() {
        let mut state = state();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Back).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn letters_outside_search_do_nothing() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.browser.raw_input.is_empty());
    }

    #[test]
    fn alert_swallows_next_key() {
        let mut state = state();
        state.alert = Some(Alert::success("ok"));
        let (render, actions) = handle_event(&mut state, &Event::KeyDown).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert!(state.alert.is_none());
    }

    #[test]
    fn stale_tier_list_response_is_ignored() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenTierList).unwrap();
        let stale = RequestId::new(RequestTarget::TierList, state.tier_list.seq + 10);
        let (render, _) = handle_event(
            &mut state,
            &Event::RepositoryResponse {
                request_id: stale,
                outcome: RepoOutcome::Tiers(vec![]),
            },
        )
        .unwrap();
        assert!(!render);
        assert!(state.tier_list.loading);
    }

    #[test]
    fn browser_page_resets_cursor() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::Mount).unwrap();
        let Some(Action::Dispatch { request_id, .. }) = actions.first() else {
            panic!("mount must dispatch");
        };
        state.browser_selected = 3;
        handle_event(
            &mut state,
            &Event::RepositoryResponse {
                request_id: *request_id,
                outcome: RepoOutcome::CharacterPage(Page::empty()),
            },
        )
        .unwrap();
        assert_eq!(state.browser_selected, 0);
    }
}
