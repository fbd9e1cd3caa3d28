//! Application state and view model computation.
//!
//! [`AppState`] owns every screen's transient state: the root character
//! browser, the tier-scoped browser, the detail and form screens, the tier
//! list and the alert overlay. Navigation helpers here return the
//! [`Action`]s their screen needs on entry; the event handler strings them
//! together.
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] resolves tier names and colors through the
//! classifier (or the cached tier reference rows), windows long lists to the
//! terminal height and computes fuzzy highlight ranges for the committed
//! search term.

use super::browser::{BrowserEffect, BrowserScope, CharacterBrowser};
use super::modes::{InputMode, Screen};
use crate::app::Action;
use crate::domain::classifier::{color_for_tier, is_unknown_tier, name_for_tier, UNKNOWN_TIER};
use crate::domain::form::PENDING_TIER;
use crate::domain::{Character, CharacterForm, FormField, FormMode, Tier};
use crate::repository::{RepoRequest, RequestId, RequestTarget, ThemeMode};
use crate::ui::theme::{Palettes, Theme};
use crate::ui::viewmodel::{
    AlertInfo, Body, CharacterListView, DetailView, DisplayItem, EmptyState, FooterInfo, FormRow,
    FormView, HeaderInfo, PaginationInfo, SearchBarInfo, TierBadge, TierBanner, TierItem,
    TierListView, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Rows taken by header, borders and footer.
const CHROME_ROWS: usize = 7;

/// Modal message shown over the current screen until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub is_error: bool,
}

impl Alert {
    #[must_use]
    pub fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
            is_error: true,
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            title: "Success".to_string(),
            message: message.into(),
            is_error: false,
        }
    }
}

/// Character detail screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailState {
    pub id: Option<i64>,
    pub character: Option<Character>,
    pub loading: bool,
    pub confirm_delete: bool,
    pub deleting: bool,
    pub seq: u64,
    pub delete_seq: u64,
}

/// Add/edit form screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub form: CharacterForm,
    pub saving: bool,
    pub error: Option<String>,
    pub seq: u64,
}

impl FormState {
    #[must_use]
    pub const fn new(form: CharacterForm) -> Self {
        Self {
            form,
            saving: false,
            error: None,
            seq: 0,
        }
    }
}

/// Tier reference table. Also serves as the cache for tier names and
/// descriptions on other screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierListState {
    pub tiers: Vec<Tier>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: usize,
    pub seq: u64,
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Navigation stack; never empty, `Browser` at the bottom.
    pub screens: Vec<Screen>,
    pub input_mode: InputMode,
    pub theme_mode: ThemeMode,
    pub palettes: Palettes,
    pub browser: CharacterBrowser,
    pub browser_selected: usize,
    pub tier_browser: Option<CharacterBrowser>,
    pub tier_browser_selected: usize,
    pub detail: DetailState,
    pub form: Option<FormState>,
    pub tier_list: TierListState,
    pub alert: Option<Alert>,
    next_seq: u64,
}

impl AppState {
    #[must_use]
    pub fn new(palettes: Palettes, theme_mode: ThemeMode) -> Self {
        Self {
            screens: vec![Screen::Browser],
            input_mode: InputMode::Normal,
            theme_mode,
            palettes,
            browser: CharacterBrowser::new(BrowserScope::All),
            browser_selected: 0,
            tier_browser: None,
            tier_browser_selected: 0,
            detail: DetailState::default(),
            form: None,
            tier_list: TierListState::default(),
            alert: None,
            next_seq: 0,
        }
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        self.palettes.get(self.theme_mode)
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screens.last().copied().unwrap_or(Screen::Browser)
    }

    #[must_use]
    pub fn is_open(&self, screen: Screen) -> bool {
        self.screens.contains(&screen)
    }

    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Turns browser effects into runtime actions tagged for `target`.
    fn browser_actions(effects: Vec<BrowserEffect>, target: RequestTarget) -> Vec<Action> {
        effects
            .into_iter()
            .map(|effect| match effect {
                BrowserEffect::ArmTimer { seconds } => Action::ArmTimer { seconds },
                BrowserEffect::Query(query) => Action::Dispatch {
                    request_id: RequestId::new(target, query.seq),
                    request: query.into_request(),
                },
                BrowserEffect::LoadTier { seq, tier_code } => Action::Dispatch {
                    request_id: RequestId::new(RequestTarget::TierHeader, seq),
                    request: RepoRequest::GetTierDetails { tier_code },
                },
            })
            .collect()
    }

    /// First load: root listing plus the tier table used for names.
    pub fn mount(&mut self) -> Vec<Action> {
        let mut actions = Self::browser_actions(self.browser.mount(), RequestTarget::Browser);
        actions.extend(self.load_tiers());
        actions
    }

    pub fn load_tiers(&mut self) -> Vec<Action> {
        let seq = self.next_seq();
        self.tier_list.seq = seq;
        self.tier_list.loading = true;
        vec![Action::Dispatch {
            request_id: RequestId::new(RequestTarget::TierList, seq),
            request: RepoRequest::ListTiers,
        }]
    }

    /// Routes a browser effect produced outside of mount.
    pub fn root_browser_action(effect: Option<BrowserEffect>) -> Vec<Action> {
        Self::browser_actions(effect.into_iter().collect(), RequestTarget::Browser)
    }

    pub fn tier_browser_action(effect: Option<BrowserEffect>) -> Vec<Action> {
        Self::browser_actions(effect.into_iter().collect(), RequestTarget::TierBrowser)
    }

    /// Re-queries every mounted listing, after a write.
    pub fn refresh_listings(&mut self) -> Vec<Action> {
        let mut actions = Self::root_browser_action(self.browser.refresh());
        if let Some(tier_browser) = self.tier_browser.as_mut() {
            actions.extend(Self::tier_browser_action(tier_browser.refresh()));
        }
        actions
    }

    pub fn open_detail(&mut self, id: i64) -> Vec<Action> {
        let seq = self.next_seq();
        tracing::debug!(id, seq, "opening character detail");
        self.detail = DetailState {
            id: Some(id),
            loading: true,
            seq,
            ..DetailState::default()
        };
        self.screens.push(Screen::CharacterDetail);
        vec![Action::Dispatch {
            request_id: RequestId::new(RequestTarget::Detail, seq),
            request: RepoRequest::GetCharacter { id },
        }]
    }

    pub fn open_tier_list(&mut self) -> Vec<Action> {
        self.tier_list.selected = 0;
        self.screens.push(Screen::TierList);
        self.load_tiers()
    }

    /// Opens a tier listing. Reopening the same tier keeps its header record.
    pub fn open_tier_detail(&mut self, tier_code: &str) -> Vec<Action> {
        let reuse = self
            .tier_browser
            .as_ref()
            .is_some_and(|b| b.tier_code() == Some(tier_code));
        if !reuse {
            let scope = BrowserScope::Tier(tier_code.to_string());
            self.tier_browser = Some(match self.tier_browser.take() {
                Some(previous) => previous.rescoped(scope),
                None => CharacterBrowser::new(scope),
            });
        }
        self.tier_browser_selected = 0;
        self.screens.push(Screen::TierDetail);

        let effects = self
            .tier_browser
            .as_mut()
            .map(CharacterBrowser::mount)
            .unwrap_or_default();
        Self::browser_actions(effects, RequestTarget::TierBrowser)
    }

    pub fn open_add_form(&mut self) {
        self.form = Some(FormState::new(CharacterForm::add()));
        self.screens.push(Screen::CharacterForm);
    }

    /// Opens the edit form for the character on the detail screen.
    pub fn open_edit_form(&mut self) -> bool {
        let Some(character) = self.detail.character.as_ref() else {
            return false;
        };
        self.form = Some(FormState::new(CharacterForm::edit(character)));
        self.screens.push(Screen::CharacterForm);
        true
    }

    /// Pops the top screen, tearing down its state. Returns `false` on the
    /// root screen.
    pub fn pop_screen(&mut self) -> (bool, Vec<Action>) {
        if self.screens.len() <= 1 {
            return (false, vec![]);
        }
        let Some(closed) = self.screens.pop() else {
            return (false, vec![]);
        };
        tracing::debug!(screen = ?closed, "closing screen");

        match closed {
            Screen::CharacterDetail => self.detail = DetailState::default(),
            Screen::CharacterForm => self.form = None,
            Screen::TierDetail => {
                if let Some(browser) = self.tier_browser.as_mut() {
                    browser.unmount();
                }
            }
            Screen::TierList | Screen::Browser => {}
        }

        let actions = if self.screen() == Screen::TierList {
            self.load_tiers()
        } else {
            vec![]
        };
        (true, actions)
    }

    /// Listing shown on the current screen, if any.
    fn active_listing(&self) -> Option<(&CharacterBrowser, usize)> {
        match self.screen() {
            Screen::Browser => Some((&self.browser, self.browser_selected)),
            Screen::TierDetail => self
                .tier_browser
                .as_ref()
                .map(|b| (b, self.tier_browser_selected)),
            _ => None,
        }
    }

    #[must_use]
    pub fn selected_character(&self) -> Option<&Character> {
        let (browser, selected) = self.active_listing()?;
        browser.items.get(selected)
    }

    #[must_use]
    pub fn selected_tier(&self) -> Option<&Tier> {
        self.tier_list.tiers.get(self.tier_list.selected)
    }

    /// Moves the cursor of the current list down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        if let Some(selected) = self.selection_mut() {
            *selected = (*selected + 1) % len;
        }
    }

    /// Moves the cursor of the current list up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        if let Some(selected) = self.selection_mut() {
            *selected = selected.checked_sub(1).unwrap_or(len - 1);
        }
    }

    fn list_len(&self) -> usize {
        match self.screen() {
            Screen::TierList => self.tier_list.tiers.len(),
            _ => self.active_listing().map_or(0, |(b, _)| b.items.len()),
        }
    }

    fn selection_mut(&mut self) -> Option<&mut usize> {
        match self.screen() {
            Screen::Browser => Some(&mut self.browser_selected),
            Screen::TierDetail => Some(&mut self.tier_browser_selected),
            Screen::TierList => Some(&mut self.tier_list.selected),
            Screen::CharacterDetail | Screen::CharacterForm => None,
        }
    }

    /// Keeps list cursors inside the current items.
    pub fn clamp_selections(&mut self) {
        let clamp = |selected: &mut usize, len: usize| {
            *selected = (*selected).min(len.saturating_sub(1));
        };
        clamp(&mut self.browser_selected, self.browser.items.len());
        let tier_items = self.tier_browser.as_ref().map_or(0, |b| b.items.len());
        clamp(&mut self.tier_browser_selected, tier_items);
        clamp(&mut self.tier_list.selected, self.tier_list.tiers.len());
    }

    /// Cached reference row for a tier code.
    #[must_use]
    pub fn cached_tier(&self, code: &str) -> Option<&Tier> {
        self.tier_list.tiers.iter().find(|t| t.tier_code == code)
    }

    fn tier_name(&self, code: &str) -> String {
        if is_unknown_tier(code) {
            return UNKNOWN_TIER.to_string();
        }
        self.cached_tier(code)
            .map_or_else(|| name_for_tier(code), Tier::display_name)
            .to_string()
    }

    fn badge(code: &str) -> TierBadge {
        let code = if code.trim().is_empty() {
            "Unknown"
        } else if is_unknown_tier(code) {
            UNKNOWN_TIER
        } else {
            code
        };
        TierBadge {
            code: code.to_string(),
            color: color_for_tier(code).to_string(),
        }
    }

    /// Computes a renderable view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", screen = ?self.screen(), rows, cols).entered();

        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);
        let body = match self.screen() {
            Screen::Browser => Body::Characters(self.compute_listing(&self.browser, self.browser_selected)),
            Screen::TierDetail => self.tier_browser.as_ref().map_or_else(
                || Body::Message(Self::message("No tier selected", "")),
                |b| Body::Characters(self.compute_listing(b, self.tier_browser_selected)),
            ),
            Screen::CharacterDetail => self.compute_detail(),
            Screen::CharacterForm => self.compute_form(available_rows),
            Screen::TierList => self.compute_tier_list(available_rows, cols),
        };

        UIViewModel {
            header: self.compute_header(),
            body,
            footer: self.compute_footer(),
            alert: self.alert.as_ref().map(|alert| AlertInfo {
                title: alert.title.clone(),
                message: alert.message.clone(),
                is_error: alert.is_error,
            }),
        }
    }

    fn message(message: &str, subtitle: &str) -> EmptyState {
        EmptyState {
            message: message.to_string(),
            subtitle: subtitle.to_string(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let (title, subtitle) = match self.screen() {
            Screen::Browser => (Screen::Browser.title().to_string(), None),
            Screen::CharacterDetail => {
                let title = self
                    .detail
                    .character
                    .as_ref()
                    .map_or_else(|| Screen::CharacterDetail.title().to_string(), |c| c.name.clone());
                (title, None)
            }
            Screen::CharacterForm => {
                let editing = self
                    .form
                    .as_ref()
                    .is_some_and(|f| matches!(f.form.mode, FormMode::Edit(_)));
                let title = if editing { "Edit Character" } else { "Add Character" };
                (title.to_string(), None)
            }
            Screen::TierList => (
                "Tier Rankings".to_string(),
                Some("Character classification by power level".to_string()),
            ),
            Screen::TierDetail => {
                let code = self
                    .tier_browser
                    .as_ref()
                    .and_then(CharacterBrowser::tier_code)
                    .unwrap_or_default();
                (format!("Tier {code}"), None)
            }
        };
        HeaderInfo {
            title: format!(" {title} "),
            subtitle,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.alert.is_some() {
            "Enter/Esc: dismiss"
        } else {
            match (self.screen(), self.input_mode) {
                (Screen::Browser, InputMode::Search) => {
                    "Type to search  Enter/Esc: done  Ctrl+u: clear"
                }
                (Screen::Browser, InputMode::Normal) => {
                    "j/k: move  h/l: page  Enter: open  /: search  a: add  t: tiers  r: refresh  T: theme  q: quit"
                }
                (Screen::CharacterDetail, _) if self.detail.confirm_delete => "y: delete  n: cancel",
                (Screen::CharacterDetail, _) => "e: edit  d: delete  T: theme  Esc: back",
                (Screen::CharacterForm, _) => "Tab/Shift+Tab: field  Enter: save  Esc: cancel",
                (Screen::TierList, _) => "j/k: move  Enter: open  r: refresh  T: theme  Esc: back",
                (Screen::TierDetail, _) => {
                    "j/k: move  h/l: page  Enter: open  r: refresh  T: theme  Esc: back"
                }
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_listing(&self, browser: &CharacterBrowser, selected: usize) -> CharacterListView {
        let now = chrono::Utc::now();

        let banner = browser.tier_code().map(|code| TierBanner {
            badge: Self::badge(code),
            name: browser.tier.as_ref().map_or_else(
                || self.tier_name(code),
                |tier| tier.display_name().to_string(),
            ),
            description: browser
                .tier
                .as_ref()
                .map(|t| t.tier_description.clone())
                .unwrap_or_default(),
        });

        let search_bar = (browser.scope == BrowserScope::All).then(|| SearchBarInfo {
            query: browser.raw_input.clone(),
            is_focused: self.input_mode == InputMode::Search,
            is_pending: browser.is_search_pending(),
        });

        let summary = if browser.scope == BrowserScope::All {
            format!("Found: {} characters", browser.total_count)
        } else {
            format!("{} characters in this tier", browser.total_count)
        };

        let matcher = (!browser.committed_term.is_empty())
            .then(|| SkimMatcherV2::default().ignore_case());

        let items = browser
            .items
            .iter()
            .enumerate()
            .map(|(idx, character)| DisplayItem {
                name: character.name.clone(),
                anime: character.anime.clone(),
                badge: Self::badge(&character.tier_code),
                added: character.added_ago(now).unwrap_or_default(),
                is_selected: idx == selected,
                highlight_ranges: matcher.as_ref().map_or_else(Vec::new, |m| {
                    compute_highlight_ranges(&character.name, &browser.committed_term, m)
                }),
            })
            .collect::<Vec<_>>();

        let empty_state = if browser.is_loading() {
            let message = if browser.page > 0 {
                format!("Loading page {}...", browser.page + 1)
            } else {
                "Loading Data...".to_string()
            };
            Some(Self::message(&message, ""))
        } else if items.is_empty() {
            Some(match browser.scope {
                BrowserScope::All if !browser.committed_term.is_empty() => Self::message(
                    "No characters found",
                    &format!("Nothing matches \"{}\"", browser.committed_term),
                ),
                BrowserScope::All => Self::message("No characters found", "Press a to add one"),
                BrowserScope::Tier(_) => Self::message("No characters in this tier yet", ""),
            })
        } else {
            None
        };

        let total_pages = browser.total_pages();
        let pagination = (total_pages > 1 && !items.is_empty()).then_some(PaginationInfo {
            page: browser.page,
            total_pages,
        });

        CharacterListView {
            banner,
            search_bar,
            summary,
            items,
            pagination,
            empty_state,
            error: browser.last_error.clone(),
        }
    }

    fn compute_detail(&self) -> Body {
        if self.detail.loading {
            return Body::Message(Self::message("Loading character...", ""));
        }
        let Some(character) = self.detail.character.as_ref() else {
            return Body::Message(Self::message("Character not found", "Press Esc to go back"));
        };

        let badge = Self::badge(&character.tier_code);
        let tier_description = self
            .cached_tier(&character.tier_code)
            .map(|t| t.tier_description.clone())
            .unwrap_or_default();

        let stats = character
            .stats
            .entries()
            .into_iter()
            .map(|(label, value)| (label.to_string(), value.to_string()))
            .collect();

        let sections = [
            ("Description", &character.description),
            ("Powers and Abilities", &character.abilities),
            ("Notable Techniques", &character.notable_techniques),
        ]
        .into_iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(title, text)| (title.to_string(), text.trim().to_string()))
        .collect();

        Body::Detail(DetailView {
            name: character.name.clone(),
            anime: character.anime.clone(),
            tier_name: self.tier_name(&badge.code),
            badge,
            tier_description,
            image_url: character.image_url.clone(),
            added: character.added_ago(chrono::Utc::now()),
            stats,
            sections,
            confirm: self
                .detail
                .confirm_delete
                .then(|| format!("Are you sure you want to delete {}?", character.name)),
        })
    }

    fn compute_form(&self, available_rows: usize) -> Body {
        let Some(state) = self.form.as_ref() else {
            return Body::Message(Self::message("No form open", ""));
        };
        let form = &state.form;
        let focus = FormField::ALL
            .iter()
            .position(|f| *f == form.focused())
            .unwrap_or(0);

        // Two rows go to the tier preview line.
        let (start, end) = visible_window(focus, FormField::ALL.len(), available_rows.saturating_sub(2));
        let rows = FormField::ALL[start..end]
            .iter()
            .map(|field| FormRow {
                label: field.label().to_string(),
                value: form.value(*field).to_string(),
                is_focused: *field == form.focused(),
                is_required: matches!(
                    field,
                    FormField::Name | FormField::Anime | FormField::PowerLevel
                ),
            })
            .collect();

        let code = form.tier_code();
        let tier_name = if code == PENDING_TIER {
            "Enter a power level".to_string()
        } else {
            self.tier_name(code)
        };

        Body::Form(FormView {
            rows,
            badge: Self::badge(code),
            tier_name,
            error: state.error.clone(),
            is_saving: state.saving,
        })
    }

    fn compute_tier_list(&self, available_rows: usize, cols: usize) -> Body {
        const BADGE_AND_NAME_WIDTH: usize = 44;

        let tiers = &self.tier_list.tiers;
        if tiers.is_empty() {
            return Body::Message(if self.tier_list.loading {
                Self::message("Loading tiers...", "")
            } else {
                Self::message(
                    "No tiers available",
                    self.tier_list.error.as_deref().unwrap_or("Press r to retry"),
                )
            });
        }

        let max_description = cols.saturating_sub(BADGE_AND_NAME_WIDTH);
        let (start, end) = visible_window(self.tier_list.selected, tiers.len(), available_rows);
        let items = tiers[start..end]
            .iter()
            .enumerate()
            .map(|(relative, tier)| TierItem {
                badge: Self::badge(&tier.tier_code),
                name: tier.display_name().to_string(),
                description: truncate(&tier.tier_description, max_description),
                is_selected: start + relative == self.tier_list.selected,
            })
            .collect();

        Body::Tiers(TierListView {
            items,
            error: self.tier_list.error.clone(),
            is_refreshing: self.tier_list.loading,
        })
    }
}

/// Window of `available` items around `selected`, kept full near the ends.
fn visible_window(selected: usize, len: usize, available: usize) -> (usize, usize) {
    let available = available.max(1);
    let mut start = selected.saturating_sub(available / 2);
    let end = (start + available).min(len);

    if end - start < available && len >= available {
        start = end.saturating_sub(available);
    }
    (start, end)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Character ranges of `text` matched by `query`, consecutive indices
/// coalesced into `(start, end)` runs.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges = Vec::new();
    let mut start = None;
    let mut prev = None;

    for &idx in &indices {
        match (start, prev) {
            (None, _) => {
                start = Some(idx);
                prev = Some(idx);
            }
            (Some(_), Some(p)) if idx == p + 1 => {
                prev = Some(idx);
            }
            (Some(s), Some(p)) => {
                ranges.push((s, p + 1));
                start = Some(idx);
                prev = Some(idx);
            }
            _ => {}
        }
    }

    if let (Some(s), Some(p)) = (start, prev) {
        ranges.push((s, p + 1));
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_stays_full_near_the_end() {
        assert_eq!(visible_window(0, 55, 10), (0, 10));
        assert_eq!(visible_window(30, 55, 10), (25, 35));
        assert_eq!(visible_window(54, 55, 10), (45, 55));
        assert_eq!(visible_window(2, 3, 10), (0, 3));
    }

    #[test]
    fn highlight_ranges_coalesce() {
        let matcher = SkimMatcherV2::default().ignore_case();
        assert_eq!(compute_highlight_ranges("Naruto", "aru", &matcher), vec![(1, 4)]);
        assert!(compute_highlight_ranges("Goku", "xyz", &matcher).is_empty());
    }

    #[test]
    fn truncation_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ベジータ王子様です", 6), "ベジー...");
    }

    #[test]
    fn root_screen_cannot_be_popped() {
        let mut state = AppState::new(Palettes::default(), ThemeMode::Light);
        assert_eq!(state.pop_screen(), (false, vec![]));
        assert_eq!(state.screen(), Screen::Browser);
    }

    #[test]
    fn legacy_unknown_code_renders_as_unknown() {
        let badge = AppState::badge("Uknown Tier");
        assert_eq!(badge.code, UNKNOWN_TIER);
        assert_eq!(badge.color, "#95a5a6");
        assert_eq!(AppState::badge("").code, "Unknown");
    }
}
