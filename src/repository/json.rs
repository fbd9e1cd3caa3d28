//! Local catalog backend.
//!
//! The whole catalog lives in one JSON file, loaded into memory on open and
//! written back atomically (temp file + rename) after every change. Tiers are
//! seeded from the canonical tier table the first time the file is created.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "next_id": 3,
//!   "characters": [
//!     { "id": 1, "name": "Goku", "anime": "Dragon Ball", "tier_code": "2-C", "speed": "MFTL+", ... }
//!   ],
//!   "tiers": [
//!     { "id": 1, "tier_code": "Tier 0", "tier_name": "Boundless", "tier_order": 1, ... }
//!   ]
//! }
//! ```

use crate::domain::classifier::canonical_tiers;
use crate::domain::error::{Result, TierdexError};
use crate::domain::{Character, CharacterDraft, Tier};
use crate::repository::backend::{CharacterRepository, Page};
use crate::repository::models::CharacterRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogData {
    version: u32,
    #[serde(default = "first_id")]
    next_id: i64,
    #[serde(default)]
    characters: Vec<CharacterRecord>,
    #[serde(default)]
    tiers: Vec<Tier>,
}

const fn first_id() -> i64 {
    1
}

impl Default for CatalogData {
    fn default() -> Self {
        Self {
            version: 1,
            next_id: first_id(),
            characters: Vec::new(),
            tiers: canonical_tiers(),
        }
    }
}

/// JSON file catalog.
///
/// `Send` but not `Sync`; owned by the worker thread.
pub struct JsonCatalog {
    file_path: PathBuf,
    data: CatalogData,
    dirty: bool,
}

impl JsonCatalog {
    /// Opens the catalog at `file_path`, creating it (with seeded tiers) if
    /// it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, the file
    /// cannot be read, or it is not a valid catalog.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON catalog");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let (data, dirty) = if file_path.exists() {
            (Self::load_from_file(&file_path)?, false)
        } else {
            tracing::debug!("creating new catalog with seeded tiers");
            (CatalogData::default(), true)
        };

        let mut catalog = Self {
            file_path,
            data,
            dirty,
        };
        catalog.save_to_file()?;

        tracing::debug!(
            characters = catalog.data.characters.len(),
            tiers = catalog.data.tiers.len(),
            "catalog opened"
        );
        Ok(catalog)
    }

    fn load_from_file(path: &Path) -> Result<CatalogData> {
        let contents = std::fs::read_to_string(path)?;
        let mut data: CatalogData = serde_json::from_str(&contents)
            .map_err(|e| TierdexError::Storage(format!("failed to parse catalog: {e}")))?;

        let max_id = data.characters.iter().map(|c| c.id).max().unwrap_or(0);
        data.next_id = data.next_id.max(max_id + 1);
        Ok(data)
    }

    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| TierdexError::Storage(format!("failed to serialize catalog: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "catalog saved");
        Ok(())
    }

    fn page_of<'a>(
        matches: impl Iterator<Item = &'a CharacterRecord>,
        page: u64,
        page_size: u64,
    ) -> Page<Character> {
        let matches: Vec<&CharacterRecord> = matches.collect();
        let total_count = matches.len() as u64;
        let skip = usize::try_from(page.saturating_mul(page_size)).unwrap_or(usize::MAX);
        let take = usize::try_from(page_size).unwrap_or(usize::MAX);

        let items = matches
            .into_iter()
            .skip(skip)
            .take(take)
            .cloned()
            .map(CharacterRecord::into_character)
            .collect();

        Page { items, total_count }
    }
}

impl CharacterRepository for JsonCatalog {
    fn list_characters(&self, page: u64, page_size: u64, search: &str) -> Result<Page<Character>> {
        let _span = tracing::debug_span!("json_list_characters", page, page_size, search = %search)
            .entered();

        let needle = search.to_lowercase();
        let mut matches: Vec<&CharacterRecord> = self
            .data
            .characters
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.name
                        .as_deref()
                        .is_some_and(|name| name.to_lowercase().contains(&needle))
            })
            .collect();
        matches.sort_by(|a, b| a.tier_code.cmp(&b.tier_code).then(a.id.cmp(&b.id)));

        let result = Self::page_of(matches.into_iter(), page, page_size);
        tracing::debug!(
            returned = result.items.len(),
            total = result.total_count,
            "characters listed"
        );
        Ok(result)
    }

    fn get_character(&self, id: i64) -> Result<Option<Character>> {
        let _span = tracing::debug_span!("json_get_character", id).entered();

        let found = self
            .data
            .characters
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .map(CharacterRecord::into_character);

        tracing::debug!(found = found.is_some(), "character lookup complete");
        Ok(found)
    }

    fn list_tiers(&self) -> Result<Vec<Tier>> {
        let _span = tracing::debug_span!("json_list_tiers").entered();

        let mut tiers = self.data.tiers.clone();
        tiers.sort_by_key(|t| t.tier_order);
        Ok(tiers)
    }

    fn list_characters_by_tier(
        &self,
        tier_code: &str,
        page: u64,
        page_size: u64,
    ) -> Result<Page<Character>> {
        let _span =
            tracing::debug_span!("json_list_characters_by_tier", tier_code = %tier_code, page)
                .entered();

        let mut matches: Vec<&CharacterRecord> = self
            .data
            .characters
            .iter()
            .filter(|c| c.tier_code.as_deref() == Some(tier_code))
            .collect();
        matches.sort_by_key(|c| c.id);

        Ok(Self::page_of(matches.into_iter(), page, page_size))
    }

    fn get_tier_details(&self, tier_code: &str) -> Result<Option<Tier>> {
        let _span = tracing::debug_span!("json_get_tier_details", tier_code = %tier_code).entered();

        Ok(self
            .data
            .tiers
            .iter()
            .find(|t| t.tier_code == tier_code)
            .cloned())
    }

    fn create_character(&mut self, draft: &CharacterDraft) -> Result<Character> {
        let _span = tracing::debug_span!("json_create_character",
            name = %draft.name,
            tier_code = %draft.tier_code
        )
        .entered();

        let id = self.data.next_id;
        let record = CharacterRecord::from_draft(id, draft, Some(chrono::Utc::now()));
        self.data.next_id += 1;
        self.data.characters.push(record.clone());

        self.dirty = true;
        self.save_to_file()?;

        tracing::debug!(id, "character created");
        Ok(record.into_character())
    }

    fn update_character(&mut self, id: i64, draft: &CharacterDraft) -> Result<Character> {
        let _span = tracing::debug_span!("json_update_character",
            id,
            tier_code = %draft.tier_code
        )
        .entered();

        let existing = self
            .data
            .characters
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| TierdexError::NotFound(format!("character {id}")))?;

        *existing = CharacterRecord::from_draft(id, draft, existing.created_at);
        let updated = existing.clone();

        self.dirty = true;
        self.save_to_file()?;

        tracing::debug!(id, "character updated");
        Ok(updated.into_character())
    }

    fn delete_character(&mut self, id: i64) -> Result<()> {
        let _span = tracing::debug_span!("json_delete_character", id).entered();

        let before = self.data.characters.len();
        self.data.characters.retain(|c| c.id != id);

        if self.data.characters.len() == before {
            tracing::debug!("nothing to delete");
            return Ok(());
        }

        self.dirty = true;
        self.save_to_file()?;
        tracing::debug!("character deleted");
        Ok(())
    }
}

impl Drop for JsonCatalog {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save catalog on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Statistics;
    use tempfile::TempDir;

    fn draft(name: &str, tier_code: &str) -> CharacterDraft {
        CharacterDraft {
            name: name.into(),
            anime: "Test Anime".into(),
            power_level: 50,
            tier_code: tier_code.into(),
            image_url: String::new(),
            abilities: String::new(),
            description: String::new(),
            notable_techniques: String::new(),
            stats: Statistics::default(),
        }
    }

    fn open(dir: &TempDir) -> JsonCatalog {
        JsonCatalog::new(dir.path().join("catalog.json")).unwrap()
    }

    #[test]
    fn new_catalog_is_seeded_with_tiers() {
        let dir = TempDir::new().unwrap();
        let catalog = open(&dir);

        let tiers = catalog.list_tiers().unwrap();
        assert_eq!(tiers.len(), 54);
        assert_eq!(tiers[0].tier_code, "Tier 0");
        assert_eq!(tiers[53].tier_code, "11-C");
        assert!(dir.path().join("catalog.json").exists());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let dir = TempDir::new().unwrap();
        let mut catalog = open(&dir);
        catalog.create_character(&draft("Naruto Uzumaki", "6-C")).unwrap();
        catalog.create_character(&draft("Sasuke Uchiha", "6-C")).unwrap();
        catalog.create_character(&draft("Boruto Uzumaki", "7-A")).unwrap();

        let page = catalog.list_characters(0, 5, "uzu").unwrap();
        assert_eq!(page.total_count, 2);
        assert!(page.items.iter().all(|c| c.name.contains("Uzumaki")));

        let page = catalog.list_characters(0, 5, "").unwrap();
        assert_eq!(page.total_count, 3);
    }

    #[test]
    fn search_term_is_matched_as_typed() {
        let dir = TempDir::new().unwrap();
        let mut catalog = open(&dir);
        catalog.create_character(&draft("Gon", "7-C")).unwrap();
        catalog.create_character(&draft("Goku Black", "2-C")).unwrap();

        assert_eq!(catalog.list_characters(0, 5, "Go ").unwrap().total_count, 0);
        assert_eq!(catalog.list_characters(0, 5, "  ").unwrap().total_count, 0);
        assert_eq!(catalog.list_characters(0, 5, "ku b").unwrap().total_count, 1);
    }

    #[test]
    fn listing_orders_by_tier_code_then_id() {
        let dir = TempDir::new().unwrap();
        let mut catalog = open(&dir);
        catalog.create_character(&draft("C", "7-A")).unwrap();
        catalog.create_character(&draft("A", "2-C")).unwrap();
        catalog.create_character(&draft("B", "2-C")).unwrap();

        let names: Vec<_> = catalog
            .list_characters(0, 5, "")
            .unwrap()
            .items
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn pages_are_zero_based() {
        let dir = TempDir::new().unwrap();
        let mut catalog = open(&dir);
        for i in 0..12 {
            catalog.create_character(&draft(&format!("Hero {i}"), "5-A")).unwrap();
        }

        let last = catalog.list_characters(2, 5, "").unwrap();
        assert_eq!(last.total_count, 12);
        assert_eq!(last.items.len(), 2);

        let past_end = catalog.list_characters(9, 5, "").unwrap();
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total_count, 12);
    }

    #[test]
    fn update_keeps_created_at_and_rejects_missing_ids() {
        let dir = TempDir::new().unwrap();
        let mut catalog = open(&dir);
        let created = catalog.create_character(&draft("Gon", "7-C")).unwrap();

        let updated = catalog.update_character(created.id, &draft("Gon Freecss", "7-B")).unwrap();
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.tier_code, "7-B");

        let err = catalog.update_character(999, &draft("Nobody", "9-C")).unwrap_err();
        assert!(matches!(err, TierdexError::NotFound(_)));
    }

    #[test]
    fn ids_are_not_reused_after_reopen() {
        let dir = TempDir::new().unwrap();
        let first = {
            let mut catalog = open(&dir);
            let a = catalog.create_character(&draft("A", "9-A")).unwrap();
            catalog.create_character(&draft("B", "9-A")).unwrap();
            catalog.delete_character(a.id).unwrap();
            a.id
        };

        let mut catalog = open(&dir);
        let c = catalog.create_character(&draft("C", "9-A")).unwrap();
        assert!(c.id > first + 1);
        assert_eq!(catalog.get_character(first).unwrap(), None);
    }

    #[test]
    fn by_tier_listing_matches_exact_code() {
        let dir = TempDir::new().unwrap();
        let mut catalog = open(&dir);
        catalog.create_character(&draft("A", "High 5-A")).unwrap();
        catalog.create_character(&draft("B", "5-A")).unwrap();

        let page = catalog.list_characters_by_tier("5-A", 0, 5).unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].name, "B");
        assert_eq!(
            catalog.get_tier_details("5-A").unwrap().map(|t| t.tier_name),
            Some("Large Planet level".to_string())
        );
        assert_eq!(catalog.get_tier_details("nope").unwrap(), None);
    }
}
