//! Display-ready snapshots of application state.
//!
//! View models are built by
//! [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. They hold only strings, colors and flags:
//! tier names and colors are already resolved, lists are already windowed to
//! the terminal height.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub body: Body,
    pub footer: FooterInfo,
    /// Modal message drawn over the body.
    pub alert: Option<AlertInfo>,
}

/// Main area of the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Characters(CharacterListView),
    Detail(DetailView),
    Form(FormView),
    Tiers(TierListView),
    /// Loading, not found and other full-page messages.
    Message(EmptyState),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    pub is_focused: bool,
    /// A debounced search or page-0 query is in flight.
    pub is_pending: bool,
}

/// A tier code drawn on its tier color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierBadge {
    pub code: String,
    pub color: String,
}

/// Header block of a tier-scoped listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierBanner {
    pub badge: TierBadge,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    /// Zero-based.
    pub page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterListView {
    pub banner: Option<TierBanner>,
    pub search_bar: Option<SearchBarInfo>,
    /// `"Found: N characters"`.
    pub summary: String,
    pub items: Vec<DisplayItem>,
    pub pagination: Option<PaginationInfo>,
    pub empty_state: Option<EmptyState>,
    pub error: Option<String>,
}

/// One character row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub name: String,
    pub anime: String,
    pub badge: TierBadge,
    pub added: String,
    pub is_selected: bool,
    /// Character ranges of `name` matching the committed search.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub name: String,
    pub anime: String,
    pub badge: TierBadge,
    pub tier_name: String,
    pub tier_description: String,
    pub image_url: String,
    pub added: Option<String>,
    /// Labelled statistics, non-empty ones only.
    pub stats: Vec<(String, String)>,
    /// `(title, text)` sections, non-empty ones only.
    pub sections: Vec<(String, String)>,
    /// Delete confirmation prompt, when one is open.
    pub confirm: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    pub label: String,
    pub value: String,
    pub is_focused: bool,
    pub is_required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub rows: Vec<FormRow>,
    pub badge: TierBadge,
    pub tier_name: String,
    pub error: Option<String>,
    pub is_saving: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierItem {
    pub badge: TierBadge,
    pub name: String,
    pub description: String,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierListView {
    pub items: Vec<TierItem>,
    pub error: Option<String>,
    pub is_refreshing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertInfo {
    pub title: String,
    pub message: String,
    pub is_error: bool,
}
