//! Serializable repository requests and outcomes.
//!
//! Requests travel to the worker (local catalog) or are turned into HTTP calls
//! (remote backend); either way the answer comes back as a [`RepoOutcome`]
//! tagged with the [`RequestId`] it was issued under.

use crate::domain::{Character, CharacterDraft, Tier};
use crate::repository::backend::Page;
use serde::{Deserialize, Serialize};

/// One repository operation with its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepoRequest {
    ListCharacters {
        page: u64,
        page_size: u64,
        search: String,
    },
    GetCharacter {
        id: i64,
    },
    ListTiers,
    ListCharactersByTier {
        tier_code: String,
        page: u64,
        page_size: u64,
    },
    GetTierDetails {
        tier_code: String,
    },
    CreateCharacter {
        draft: CharacterDraft,
    },
    UpdateCharacter {
        id: i64,
        draft: CharacterDraft,
    },
    DeleteCharacter {
        id: i64,
    },
}

impl RepoRequest {
    /// Short operation name for spans and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ListCharacters { .. } => "list_characters",
            Self::GetCharacter { .. } => "get_character",
            Self::ListTiers => "list_tiers",
            Self::ListCharactersByTier { .. } => "list_characters_by_tier",
            Self::GetTierDetails { .. } => "get_tier_details",
            Self::CreateCharacter { .. } => "create_character",
            Self::UpdateCharacter { .. } => "update_character",
            Self::DeleteCharacter { .. } => "delete_character",
        }
    }
}

/// Result of a [`RepoRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepoOutcome {
    CharacterPage(Page<Character>),
    Character(Option<Character>),
    Tiers(Vec<Tier>),
    Tier(Option<Tier>),
    Saved(Character),
    Deleted { id: i64 },
    Failed { message: String },
}

/// Which part of the UI a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestTarget {
    Browser,
    TierBrowser,
    TierHeader,
    TierList,
    Detail,
    Save,
    Delete,
}

/// Routing tag carried by every request and echoed by its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId {
    pub target: RequestTarget,
    pub seq: u64,
}

impl RequestId {
    #[must_use]
    pub const fn new(target: RequestTarget, seq: u64) -> Self {
        Self { target, seq }
    }
}
