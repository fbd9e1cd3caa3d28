//! Repository contract.
//!
//! [`CharacterRepository`] is the narrow set of operations the browser,
//! detail, form and tier screens need. Filtering, ordering and pagination are
//! the repository's job; callers only pick the page.
//!
//! # Implementations
//!
//! - [`JsonCatalog`](crate::repository::JsonCatalog): local catalog file on the
//!   worker thread
//! - the remote backend is reached through host HTTP requests instead, built
//!   and decoded by [`rest`](crate::repository::rest)

use crate::domain::error::Result;
use crate::domain::{Character, CharacterDraft, Tier};
use crate::repository::requests::{RepoOutcome, RepoRequest};
use serde::{Deserialize, Serialize};

/// One zero-based page of a listing plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

/// Character and tier storage.
///
/// # Examples
///
/// ```no_run
/// use tierdex::repository::{CharacterRepository, JsonCatalog};
/// use std::path::PathBuf;
///
/// let catalog = JsonCatalog::new(PathBuf::from("/tmp/catalog.json"))?;
/// let first = catalog.list_characters(0, 5, "goku")?;
/// println!("{} matches", first.total_count);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait CharacterRepository: Send {
    /// Lists characters whose name contains `search` (case-insensitive),
    /// ordered by tier code ascending. An empty search lists everything.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn list_characters(&self, page: u64, page_size: u64, search: &str) -> Result<Page<Character>>;

    /// # Errors
    ///
    /// Returns an error if the read fails. A missing id is `Ok(None)`.
    fn get_character(&self, id: i64) -> Result<Option<Character>>;

    /// All tiers ordered by `tier_order` ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn list_tiers(&self) -> Result<Vec<Tier>>;

    /// Characters stored with exactly `tier_code`.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn list_characters_by_tier(
        &self,
        tier_code: &str,
        page: u64,
        page_size: u64,
    ) -> Result<Page<Character>>;

    /// # Errors
    ///
    /// Returns an error if the read fails. An unknown code is `Ok(None)`.
    fn get_tier_details(&self, tier_code: &str) -> Result<Option<Tier>>;

    /// Inserts a character and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn create_character(&mut self, draft: &CharacterDraft) -> Result<Character>;

    /// Replaces the editable fields of an existing character.
    ///
    /// # Errors
    ///
    /// Returns [`TierdexError::NotFound`](crate::TierdexError::NotFound) when
    /// the id does not exist, or an error if the write fails.
    fn update_character(&mut self, id: i64, draft: &CharacterDraft) -> Result<Character>;

    /// # Errors
    ///
    /// Returns an error if the write fails. Deleting a missing id succeeds.
    fn delete_character(&mut self, id: i64) -> Result<()>;
}

/// Runs one request against a repository, folding errors into
/// [`RepoOutcome::Failed`].
pub fn execute(repo: &mut dyn CharacterRepository, request: RepoRequest) -> RepoOutcome {
    let _span = tracing::debug_span!("repository_execute", request = request.kind()).entered();

    let result = match request {
        RepoRequest::ListCharacters {
            page,
            page_size,
            search,
        } => repo
            .list_characters(page, page_size, &search)
            .map(RepoOutcome::CharacterPage),
        RepoRequest::GetCharacter { id } => repo.get_character(id).map(RepoOutcome::Character),
        RepoRequest::ListTiers => repo.list_tiers().map(RepoOutcome::Tiers),
        RepoRequest::ListCharactersByTier {
            tier_code,
            page,
            page_size,
        } => repo
            .list_characters_by_tier(&tier_code, page, page_size)
            .map(RepoOutcome::CharacterPage),
        RepoRequest::GetTierDetails { tier_code } => {
            repo.get_tier_details(&tier_code).map(RepoOutcome::Tier)
        }
        RepoRequest::CreateCharacter { draft } => {
            repo.create_character(&draft).map(RepoOutcome::Saved)
        }
        RepoRequest::UpdateCharacter { id, draft } => {
            repo.update_character(id, &draft).map(RepoOutcome::Saved)
        }
        RepoRequest::DeleteCharacter { id } => {
            repo.delete_character(id).map(|()| RepoOutcome::Deleted { id })
        }
    };

    result.unwrap_or_else(|e| {
        tracing::debug!(error = %e, "repository request failed");
        RepoOutcome::Failed {
            message: e.to_string(),
        }
    })
}
