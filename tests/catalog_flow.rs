//! End-to-end flows: key events through `handle_event`, repository requests
//! answered by a worker over a temporary catalog.

use std::collections::VecDeque;

use tempfile::TempDir;
use tierdex::app::PAGE_SIZE;
use tierdex::domain::FormField;
use tierdex::repository::{RepoOutcome, RequestId};
use tierdex::ui::Palettes;
use tierdex::worker::{TierdexWorker, WorkerMessage};
use tierdex::{handle_event, Action, AppState, Event, Screen, ThemeMode};

struct Harness {
    _dir: TempDir,
    state: AppState,
    worker: TierdexWorker,
    /// Timers armed and not fired yet.
    timers: usize,
    /// Dispatches held back while `hold` is set.
    held: Vec<(RequestId, tierdex::repository::RepoRequest)>,
    hold: bool,
}

impl Harness {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let worker = TierdexWorker::with_paths(dir.path().join("catalog.json"), dir.path().join("prefs.json"));
        let mut harness = Self {
            _dir: dir,
            state: AppState::new(Palettes::default(), ThemeMode::Light),
            worker,
            timers: 0,
            held: Vec::new(),
            hold: false,
        };
        harness.send(Event::Mount);
        harness
    }

    /// Handles `event` and runs every resulting action to completion.
    fn send(&mut self, event: Event) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            let (_, actions) = handle_event(&mut self.state, &event).unwrap();
            for action in actions {
                match action {
                    Action::Dispatch { request_id, request } if self.hold => {
                        self.held.push((request_id, request));
                    }
                    Action::Dispatch { request_id, request } => {
                        let response = self
                            .worker
                            .handle_message(WorkerMessage::repository(request_id, request));
                        queue.push_back(Event::WorkerResponse(response));
                    }
                    Action::PostToWorker(message) => {
                        let response = self.worker.handle_message(message);
                        queue.push_back(Event::WorkerResponse(response));
                    }
                    Action::ArmTimer { .. } => self.timers += 1,
                    Action::CloseFocus => {}
                }
            }
        }
    }

    fn fire_timers(&mut self) {
        for _ in 0..std::mem::take(&mut self.timers) {
            self.send(Event::DebounceElapsed);
        }
    }

    fn type_search(&mut self, text: &str) {
        self.send(Event::SearchMode);
        for c in text.chars() {
            self.send(Event::Char(c));
        }
        self.fire_timers();
        self.send(Event::ExitSearch);
    }

    fn add(&mut self, name: &str, anime: &str, power: &str) {
        self.send(Event::AddCharacter);
        let form = &mut self.state.form.as_mut().unwrap().form;
        form.set(FormField::Name, name);
        form.set(FormField::Anime, anime);
        form.set(FormField::PowerLevel, power);
        self.send(Event::Submit);
        self.send(Event::DismissAlert);
    }

    fn names(&self) -> Vec<&str> {
        self.state.browser.items.iter().map(|c| c.name.as_str()).collect()
    }
}

#[test]
fn create_92_then_edit_to_10_moves_tiers() {
    let mut h = Harness::new();
    h.add("Saitama", "One Punch Man", "92");

    assert_eq!(h.state.screen(), Screen::Browser);
    assert_eq!(h.names(), vec!["Saitama"]);
    assert_eq!(h.state.browser.items[0].tier_code, "1-A");

    h.send(Event::Select);
    assert_eq!(h.state.screen(), Screen::CharacterDetail);
    h.send(Event::EditCharacter);
    assert_eq!(h.state.screen(), Screen::CharacterForm);
    h.state
        .form
        .as_mut()
        .unwrap()
        .form
        .set(FormField::PowerLevel, "10");
    assert_eq!(h.state.form.as_ref().unwrap().form.tier_code(), "8-C");
    h.send(Event::Submit);

    assert_eq!(h.state.screen(), Screen::CharacterDetail);
    assert_eq!(h.state.alert.as_ref().unwrap().message, "Character updated successfully");
    let shown = h.state.detail.character.as_ref().unwrap();
    assert_eq!(shown.tier_code, "8-C");
    assert_eq!(shown.name, "Saitama");
    assert_eq!(h.state.browser.items[0].tier_code, "8-C");
}

#[test]
fn invalid_form_is_not_submitted() {
    let mut h = Harness::new();
    h.send(Event::AddCharacter);
    h.state.form.as_mut().unwrap().form.set(FormField::Name, "Goku");
    h.send(Event::Submit);

    let form = h.state.form.as_ref().unwrap();
    assert!(!form.saving);
    assert!(form.error.is_some());
    assert_eq!(h.state.alert.as_ref().unwrap().title, "Validation Error");
    assert_eq!(h.state.browser.total_count, 0);
}

#[test]
fn search_is_case_insensitive_and_resets_page() {
    let mut h = Harness::new();
    for i in 0..7 {
        h.add(&format!("Naruto Clone {i}"), "Naruto", "30");
    }
    h.add("Sasuke", "Naruto", "31");
    h.add("Goku", "Dragon Ball", "60");
    assert_eq!(h.state.browser.total_count, 9);

    h.send(Event::NextPage);
    assert_eq!(h.state.browser.page, 1);

    h.type_search("NARUTO");
    assert_eq!(h.state.browser.page, 0);
    assert_eq!(h.state.browser.committed_term, "NARUTO");
    assert_eq!(h.state.browser.total_count, 7);
    assert_eq!(h.state.browser.items.len(), PAGE_SIZE as usize);
    assert!(h.names().iter().all(|n| n.starts_with("Naruto Clone")));
}

#[test]
fn debounce_keeps_only_the_last_input() {
    let mut h = Harness::new();
    h.add("Goku", "Dragon Ball", "60");
    h.add("Gohan", "Dragon Ball", "55");

    h.send(Event::SearchMode);
    h.send(Event::Char('g'));
    h.send(Event::Char('o'));
    h.send(Event::Char('k'));
    assert_eq!(h.timers, 3);
    h.fire_timers();

    assert_eq!(h.state.browser.committed_term, "gok");
    assert_eq!(h.names(), vec!["Goku"]);
}

#[test]
fn paging_stays_within_bounds() {
    let mut h = Harness::new();
    for i in 0..6 {
        h.add(&format!("Hero {i}"), "Boku no Hero", "20");
    }
    assert_eq!(h.state.browser.total_pages(), 2);

    h.send(Event::PrevPage);
    assert_eq!(h.state.browser.page, 0);
    h.send(Event::NextPage);
    assert_eq!(h.state.browser.page, 1);
    assert_eq!(h.state.browser.items.len(), 1);
    h.send(Event::NextPage);
    assert_eq!(h.state.browser.page, 1);
}

#[test]
fn stale_page_is_discarded() {
    let mut h = Harness::new();
    h.add("Goku", "Dragon Ball", "60");
    h.add("Luffy", "One Piece", "33");

    h.hold = true;
    h.send(Event::Refresh);
    h.type_search("luffy");
    h.hold = false;

    let (first, second) = (h.held.remove(0), h.held.remove(0));
    assert!(first.0.seq < second.0.seq);

    let newer = h.worker.handle_message(WorkerMessage::repository(second.0, second.1));
    h.send(Event::WorkerResponse(newer));
    assert_eq!(h.names(), vec!["Luffy"]);

    let older = h.worker.handle_message(WorkerMessage::repository(first.0, first.1));
    h.send(Event::WorkerResponse(older));
    assert_eq!(h.names(), vec!["Luffy"]);
    assert_eq!(h.state.browser.total_count, 1);
}

#[test]
fn delete_requires_confirmation() {
    let mut h = Harness::new();
    h.add("Frieza", "Dragon Ball", "70");

    h.send(Event::Select);
    h.send(Event::DeleteCharacter);
    assert!(h.state.detail.confirm_delete);
    h.send(Event::CancelDelete);
    assert_eq!(h.state.browser.total_count, 1);

    h.send(Event::DeleteCharacter);
    h.send(Event::ConfirmDelete);
    assert_eq!(h.state.screen(), Screen::Browser);
    assert_eq!(h.state.alert.as_ref().unwrap().message, "Character deleted successfully");
    assert_eq!(h.state.browser.total_count, 0);
}

#[test]
fn tier_detail_lists_only_that_tier() {
    let mut h = Harness::new();
    h.add("Luffy", "One Piece", "33");
    h.add("Zoro", "One Piece", "33");
    h.add("Goku", "Dragon Ball", "60");

    h.send(Event::OpenTierList);
    assert_eq!(h.state.screen(), Screen::TierList);
    assert_eq!(h.state.tier_list.tiers.len(), 54);

    let index = h
        .state
        .tier_list
        .tiers
        .iter()
        .position(|t| t.tier_code == "5-A")
        .unwrap();
    for _ in 0..index {
        h.send(Event::KeyDown);
    }
    h.send(Event::Select);

    assert_eq!(h.state.screen(), Screen::TierDetail);
    let browser = h.state.tier_browser.as_ref().unwrap();
    assert_eq!(browser.total_count, 2);
    assert!(browser.items.iter().all(|c| c.tier_code == "5-A"));
    assert_eq!(browser.tier.as_ref().map(|t| t.tier_code.as_str()), Some("5-A"));

    h.send(Event::Back);
    assert_eq!(h.state.screen(), Screen::TierList);
    assert!(!h.state.tier_list.loading);
}

#[test]
fn switching_tiers_drops_late_answers_for_the_previous_tier() {
    let mut h = Harness::new();
    h.add("Luffy", "One Piece", "33");
    h.add("Frieza", "Dragon Ball", "32");
    h.send(Event::OpenTierList);

    let position = |h: &Harness, code: &str| {
        h.state
            .tier_list
            .tiers
            .iter()
            .position(|t| t.tier_code == code)
            .unwrap()
    };

    h.state.tier_list.selected = position(&h, "5-A");
    h.hold = true;
    h.send(Event::Select);
    h.hold = false;
    let late: Vec<_> = std::mem::take(&mut h.held);
    assert_eq!(late.len(), 2);

    h.send(Event::Back);
    h.state.tier_list.selected = position(&h, "5-B");
    h.send(Event::Select);

    let browser = h.state.tier_browser.as_ref().unwrap();
    assert_eq!(browser.total_count, 1);
    assert_eq!(browser.items[0].name, "Frieza");

    for (request_id, request) in late {
        let response = h.worker.handle_message(WorkerMessage::repository(request_id, request));
        h.send(Event::WorkerResponse(response));
    }

    let browser = h.state.tier_browser.as_ref().unwrap();
    assert_eq!(browser.tier_code(), Some("5-B"));
    assert!(browser.items.iter().all(|c| c.tier_code == "5-B"));
    assert_eq!(browser.total_count, 1);
    assert_eq!(browser.tier.as_ref().map(|t| t.tier_code.as_str()), Some("5-B"));
}

#[test]
fn missing_character_shows_not_found() {
    let mut h = Harness::new();
    let actions = h.state.open_detail(4242);
    assert_eq!(actions.len(), 1);
    let Action::Dispatch { request_id, request } = actions.into_iter().next().unwrap() else {
        panic!("detail must dispatch");
    };
    let response = h.worker.handle_message(WorkerMessage::repository(request_id, request));
    h.send(Event::WorkerResponse(response));

    assert!(!h.state.detail.loading);
    assert!(h.state.detail.character.is_none());
    let vm = h.state.compute_viewmodel(40, 100);
    assert!(format!("{vm:?}").contains("Character not found"));
}

#[test]
fn theme_toggle_is_persisted() {
    let mut h = Harness::new();
    h.send(Event::ToggleTheme);
    assert_eq!(h.state.theme_mode, ThemeMode::Dark);

    let mut fresh = AppState::new(Palettes::default(), ThemeMode::Light);
    let response = h.worker.handle_message(WorkerMessage::load_preferences());
    handle_event(&mut fresh, &Event::WorkerResponse(response)).unwrap();
    assert_eq!(fresh.theme_mode, ThemeMode::Dark);
}

#[test]
fn failed_outcome_keeps_previous_results() {
    let mut h = Harness::new();
    h.add("Goku", "Dragon Ball", "60");

    h.hold = true;
    h.send(Event::Refresh);
    h.hold = false;
    let (request_id, _) = h.held.remove(0);
    h.send(Event::RepositoryResponse {
        request_id,
        outcome: RepoOutcome::Failed {
            message: "offline".into(),
        },
    });

    assert_eq!(h.names(), vec!["Goku"]);
    assert_eq!(h.state.browser.last_error.as_deref(), Some("offline"));
}
