//! Debounced search and paginated listing state machine.
//!
//! A [`CharacterBrowser`] never talks to the repository itself. Each operation
//! returns the [`BrowserEffect`]s the caller must carry out (arm a timer, issue
//! a query) and responses are fed back through [`CharacterBrowser::apply_page`]
//! and friends. Every query carries a sequence number; only the answer to the
//! most recently issued query is applied.
//!
//! ```text
//!            mount                input                timer
//!   Idle ───────────▶ LoadingInitial   Ready ───────▶ SearchPending ─────▶ (query)
//!                          │             ▲                                   │
//!                          └─────────────┴──────────── response ◀────────────┘
//! ```

use crate::app::debounce::{Debouncer, SEARCH_DEBOUNCE_SECS};
use crate::domain::{Character, Tier};
use crate::repository::{Page, RepoRequest};

/// Characters per page in every listing.
pub const PAGE_SIZE: u64 = 5;

/// What a browser lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserScope {
    /// Every character, optionally narrowed by a name search.
    All,
    /// Characters of one tier. No search input.
    Tier(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserPhase {
    Idle,
    LoadingInitial,
    LoadingPage,
    SearchPending,
    Ready,
    Refreshing,
}

/// How a page query is narrowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFilter {
    Search(String),
    Tier(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub seq: u64,
    pub page: u64,
    pub page_size: u64,
    pub filter: QueryFilter,
}

impl PageQuery {
    /// The repository call that answers this query.
    #[must_use]
    pub fn into_request(self) -> RepoRequest {
        match self.filter {
            QueryFilter::Search(search) => RepoRequest::ListCharacters {
                page: self.page,
                page_size: self.page_size,
                search,
            },
            QueryFilter::Tier(tier_code) => RepoRequest::ListCharactersByTier {
                tier_code,
                page: self.page,
                page_size: self.page_size,
            },
        }
    }
}

/// Side effects requested by the browser.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowserEffect {
    /// Schedule one host timer of the given length.
    ArmTimer { seconds: f64 },
    Query(PageQuery),
    /// Fetch the tier reference record for the header.
    LoadTier { seq: u64, tier_code: String },
}

#[derive(Debug, Clone)]
pub struct CharacterBrowser {
    pub scope: BrowserScope,
    pub raw_input: String,
    pub committed_term: String,
    pub page: u64,
    pub total_count: u64,
    pub items: Vec<Character>,
    pub phase: BrowserPhase,
    pub last_error: Option<String>,
    /// Header record for tier-scoped browsers.
    pub tier: Option<Tier>,
    debouncer: Debouncer,
    latest_seq: u64,
    tier_requests: u64,
    tier_seq: Option<u64>,
}

impl CharacterBrowser {
    #[must_use]
    pub fn new(scope: BrowserScope) -> Self {
        Self {
            scope,
            raw_input: String::new(),
            committed_term: String::new(),
            page: 0,
            total_count: 0,
            items: Vec::new(),
            phase: BrowserPhase::Idle,
            last_error: None,
            tier: None,
            debouncer: Debouncer::new(),
            latest_seq: 0,
            tier_requests: 0,
            tier_seq: None,
        }
    }

    /// The same browser pointed at another scope, unmounted and empty.
    ///
    /// Sequence counters carry over, so answers to queries issued under the
    /// previous scope never match a new one.
    #[must_use]
    pub fn rescoped(self, scope: BrowserScope) -> Self {
        Self {
            latest_seq: self.latest_seq,
            tier_requests: self.tier_requests,
            ..Self::new(scope)
        }
    }

    /// Issues the first page-0 query. The initial empty input does not go
    /// through the debouncer.
    ///
    /// Tier-scoped browsers also request their header record, once.
    pub fn mount(&mut self) -> Vec<BrowserEffect> {
        let _span = tracing::debug_span!("browser_mount", scope = ?self.scope).entered();

        self.page = 0;
        self.phase = BrowserPhase::LoadingInitial;
        let mut effects = vec![BrowserEffect::Query(self.next_query())];

        if let BrowserScope::Tier(code) = &self.scope {
            if self.tier.is_none() && self.tier_seq.is_none() {
                self.tier_requests += 1;
                self.tier_seq = Some(self.tier_requests);
                effects.push(BrowserEffect::LoadTier {
                    seq: self.tier_requests,
                    tier_code: code.clone(),
                });
            }
        }
        effects
    }

    /// Records a keystroke and restarts the debounce timer.
    ///
    /// Returns `None` before mount and for tier-scoped browsers, which have
    /// no search input.
    pub fn on_input_change(&mut self, text: &str) -> Option<BrowserEffect> {
        if self.scope != BrowserScope::All || self.phase == BrowserPhase::Idle {
            return None;
        }
        self.raw_input = text.to_string();
        self.debouncer.arm();
        self.phase = BrowserPhase::SearchPending;
        tracing::trace!(input = %self.raw_input, "search input changed");
        Some(BrowserEffect::ArmTimer {
            seconds: SEARCH_DEBOUNCE_SECS,
        })
    }

    /// Handles a host timer. Commits the input only if the timer is the
    /// pending one.
    pub fn debounce_elapsed(&mut self) -> Option<BrowserEffect> {
        if !self.debouncer.elapsed() {
            tracing::trace!("stale debounce timer ignored");
            return None;
        }
        if self.phase == BrowserPhase::Idle {
            return None;
        }

        self.committed_term = self.raw_input.clone();
        self.page = 0;
        self.phase = BrowserPhase::SearchPending;
        tracing::debug!(term = %self.committed_term, "search committed");
        Some(BrowserEffect::Query(self.next_query()))
    }

    /// Moves to page `n`, a no-op outside `[0, total_pages - 1]`.
    pub fn change_page(&mut self, n: i64) -> Option<BrowserEffect> {
        let page = u64::try_from(n).ok().filter(|p| *p < self.total_pages())?;
        self.page = page;
        self.phase = if page > 0 {
            BrowserPhase::LoadingPage
        } else {
            BrowserPhase::SearchPending
        };
        Some(BrowserEffect::Query(self.next_query()))
    }

    /// Re-queries page 0 with the committed term.
    pub fn refresh(&mut self) -> Option<BrowserEffect> {
        if self.phase == BrowserPhase::Idle {
            return None;
        }
        self.page = 0;
        self.phase = BrowserPhase::Refreshing;
        Some(BrowserEffect::Query(self.next_query()))
    }

    /// Empties the search input through the normal debounce path.
    pub fn clear(&mut self) -> Option<BrowserEffect> {
        self.on_input_change("")
    }

    /// Applies a page of results. Returns `false` when the response is stale.
    pub fn apply_page(&mut self, seq: u64, page: Page<Character>) -> bool {
        if !self.accepts(seq) {
            tracing::debug!(seq, latest = self.latest_seq, "discarding stale page");
            return false;
        }
        tracing::debug!(
            seq,
            items = page.items.len(),
            total = page.total_count,
            "page applied"
        );
        self.items = page.items;
        self.total_count = page.total_count;
        self.last_error = None;
        self.settle();
        true
    }

    /// Records a failed query, keeping the previous results.
    pub fn apply_failure(&mut self, seq: u64, message: &str) -> bool {
        if !self.accepts(seq) {
            return false;
        }
        tracing::debug!(seq, error = %message, "query failed");
        self.last_error = Some(message.to_string());
        self.settle();
        true
    }

    /// Stores the tier header record. A missing tier leaves the fallback
    /// name in place.
    pub fn apply_tier(&mut self, seq: u64, tier: Option<Tier>) -> bool {
        if self.tier_seq != Some(seq) || self.phase == BrowserPhase::Idle {
            return false;
        }
        self.tier = tier;
        true
    }

    /// Cancels the pending debounce. Later responses are dropped.
    pub fn unmount(&mut self) {
        self.debouncer.cancel();
        self.phase = BrowserPhase::Idle;
        if self.tier.is_none() {
            self.tier_seq = None;
        }
    }

    /// `ceil(total_count / PAGE_SIZE)`.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(PAGE_SIZE)
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        !matches!(self.phase, BrowserPhase::Idle)
    }

    /// Full-page loading indicator.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(
            self.phase,
            BrowserPhase::LoadingInitial | BrowserPhase::LoadingPage
        )
    }

    /// Light search indicator.
    #[must_use]
    pub const fn is_search_pending(&self) -> bool {
        matches!(self.phase, BrowserPhase::SearchPending)
    }

    #[must_use]
    pub fn tier_code(&self) -> Option<&str> {
        match &self.scope {
            BrowserScope::All => None,
            BrowserScope::Tier(code) => Some(code),
        }
    }

    fn next_query(&mut self) -> PageQuery {
        self.latest_seq += 1;
        let filter = match &self.scope {
            BrowserScope::All => QueryFilter::Search(self.committed_term.clone()),
            BrowserScope::Tier(code) => QueryFilter::Tier(code.clone()),
        };
        PageQuery {
            seq: self.latest_seq,
            page: self.page,
            page_size: PAGE_SIZE,
            filter,
        }
    }

    fn accepts(&self, seq: u64) -> bool {
        self.is_mounted() && seq == self.latest_seq
    }

    fn settle(&mut self) {
        self.phase = if self.debouncer.is_pending() {
            BrowserPhase::SearchPending
        } else {
            BrowserPhase::Ready
        };
    }
}
