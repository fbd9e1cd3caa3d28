//! Record shapes at the repository boundary.
//!
//! Rows coming back from either backend are decoded into lenient records
//! (every column optional, nulls tolerated) and only then converted into
//! domain types. Writes go out as [`CharacterPayload`], which never carries
//! the power level.

use crate::domain::{Character, CharacterDraft, Statistics, Tier};
use crate::domain::classifier::MAX_POWER_LEVEL;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A `characters` row as stored.
///
/// Statistic columns sit at the top level of the row, next to the identity
/// columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterRecord {
    pub id: i64,
    pub name: Option<String>,
    pub anime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_level: Option<Value>,
    pub tier_code: Option<String>,
    pub image_url: Option<String>,
    pub abilities: Option<String>,
    pub description: Option<String>,
    pub notable_techniques: Option<String>,
    #[serde(flatten)]
    pub stats: Statistics,
    pub created_at: Option<DateTime<Utc>>,
}

impl CharacterRecord {
    /// Builds the stored row for a draft. The power level is dropped.
    #[must_use]
    pub fn from_draft(id: i64, draft: &CharacterDraft, created_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id,
            name: Some(draft.name.clone()),
            anime: Some(draft.anime.clone()),
            power: None,
            power_level: None,
            tier_code: Some(draft.tier_code.clone()),
            image_url: Some(draft.image_url.clone()),
            abilities: Some(draft.abilities.clone()),
            description: Some(draft.description.clone()),
            notable_techniques: Some(draft.notable_techniques.clone()),
            stats: draft.stats.clone(),
            created_at,
        }
    }

    /// Power level from `power`, else `power_level`, else absent.
    #[must_use]
    pub fn resolved_power_level(&self) -> Option<u8> {
        self.power
            .as_ref()
            .and_then(power_from_value)
            .or_else(|| self.power_level.as_ref().and_then(power_from_value))
    }

    #[must_use]
    pub fn into_character(self) -> Character {
        let power_level = self.resolved_power_level();
        Character {
            id: self.id,
            name: self.name.unwrap_or_default(),
            anime: self.anime.unwrap_or_default(),
            power_level,
            tier_code: self.tier_code.unwrap_or_default(),
            image_url: self.image_url.unwrap_or_default(),
            abilities: self.abilities.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            notable_techniques: self.notable_techniques.unwrap_or_default(),
            stats: self.stats,
            created_at: self.created_at,
        }
    }
}

fn power_from_value(value: &Value) -> Option<u8> {
    let level = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    u8::try_from(level).ok().filter(|l| *l <= MAX_POWER_LEVEL)
}

/// Body of an insert or upsert.
///
/// `id` is only set for updates, where it selects the row to merge into.
#[derive(Debug, Serialize)]
pub struct CharacterPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: &'a str,
    pub anime: &'a str,
    pub tier_code: &'a str,
    pub image_url: &'a str,
    pub abilities: &'a str,
    pub description: &'a str,
    pub notable_techniques: &'a str,
    #[serde(flatten)]
    pub stats: StatisticsPayload<'a>,
}

/// Statistic columns as written. Missing values go out as empty strings.
#[derive(Debug, Serialize)]
pub struct StatisticsPayload<'a> {
    pub attack_potency: &'a str,
    pub speed: &'a str,
    pub lifting_strength: &'a str,
    pub striking_strength: &'a str,
    pub durability: &'a str,
    pub stamina: &'a str,
    pub range: &'a str,
    pub intelligence: &'a str,
}

impl<'a> From<&'a Statistics> for StatisticsPayload<'a> {
    fn from(stats: &'a Statistics) -> Self {
        let text = |value: &'a Option<String>| value.as_deref().unwrap_or_default();
        Self {
            attack_potency: text(&stats.attack_potency),
            speed: text(&stats.speed),
            lifting_strength: text(&stats.lifting_strength),
            striking_strength: text(&stats.striking_strength),
            durability: text(&stats.durability),
            stamina: text(&stats.stamina),
            range: text(&stats.range),
            intelligence: text(&stats.intelligence),
        }
    }
}

impl<'a> CharacterPayload<'a> {
    #[must_use]
    pub fn new(id: Option<i64>, draft: &'a CharacterDraft) -> Self {
        Self {
            id,
            name: &draft.name,
            anime: &draft.anime,
            tier_code: &draft.tier_code,
            image_url: &draft.image_url,
            abilities: &draft.abilities,
            description: &draft.description,
            notable_techniques: &draft.notable_techniques,
            stats: StatisticsPayload::from(&draft.stats),
        }
    }
}

/// A `tiers` row, tolerant of null text columns.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TierRecord {
    pub id: i64,
    pub tier_code: Option<String>,
    pub tier_name: Option<String>,
    pub tier_description: Option<String>,
    pub tier_order: i64,
}

impl From<TierRecord> for Tier {
    fn from(record: TierRecord) -> Self {
        Self {
            id: record.id,
            tier_code: record.tier_code.unwrap_or_default(),
            tier_name: record.tier_name.unwrap_or_default(),
            tier_description: record.tier_description.unwrap_or_default(),
            tier_order: record.tier_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft() -> CharacterDraft {
        CharacterDraft {
            name: "Saitama".into(),
            anime: "One Punch Man".into(),
            power_level: 92,
            tier_code: "1-A".into(),
            image_url: "https://via.placeholder.com/300".into(),
            abilities: "Serious Punch".into(),
            description: String::new(),
            notable_techniques: String::new(),
            stats: Statistics {
                speed: Some("Massively FTL+".into()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn row_with_nulls_and_flat_stats() {
        let row = json!({
            "id": 7,
            "name": "Rimuru",
            "anime": null,
            "tier_code": "2-A",
            "speed": "Immeasurable",
            "durability": null,
            "created_at": "2024-03-01T10:00:00.123456+00:00",
            "tier": { "tier_code": "2-A" }
        });
        let character = serde_json::from_value::<CharacterRecord>(row)
            .unwrap()
            .into_character();

        assert_eq!(character.id, 7);
        assert_eq!(character.anime, "");
        assert_eq!(character.stats.speed.as_deref(), Some("Immeasurable"));
        assert_eq!(character.stats.durability, None);
        assert!(character.created_at.is_some());
        assert_eq!(character.power_level, None);
    }

    #[test]
    fn power_column_wins_over_power_level() {
        let record: CharacterRecord =
            serde_json::from_value(json!({ "id": 1, "power": 40, "power_level": 10 })).unwrap();
        assert_eq!(record.resolved_power_level(), Some(40));

        let record: CharacterRecord =
            serde_json::from_value(json!({ "id": 1, "power_level": "12" })).unwrap();
        assert_eq!(record.resolved_power_level(), Some(12));

        let record: CharacterRecord =
            serde_json::from_value(json!({ "id": 1, "power": 250 })).unwrap();
        assert_eq!(record.resolved_power_level(), None);
    }

    #[test]
    fn payload_never_carries_power_level() {
        let draft = draft();
        let body = serde_json::to_value(CharacterPayload::new(None, &draft)).unwrap();

        assert!(body.get("power_level").is_none());
        assert!(body.get("id").is_none());
        assert_eq!(body["tier_code"], "1-A");
        assert_eq!(body["speed"], "Massively FTL+");
        assert_eq!(body["intelligence"], "");
        assert_eq!(body["attack_potency"], "");

        let body = serde_json::to_value(CharacterPayload::new(Some(3), &draft)).unwrap();
        assert_eq!(body["id"], 3);
    }

    #[test]
    fn blank_form_statistics_are_written_as_empty_strings() {
        use crate::domain::{CharacterForm, FormField};

        let mut form = CharacterForm::add();
        form.set(FormField::Name, "Gon");
        form.set(FormField::Anime, "Hunter x Hunter");
        form.set(FormField::PowerLevel, "50");
        let draft = form.validate().unwrap();

        let body = serde_json::to_value(CharacterPayload::new(None, &draft)).unwrap();
        for column in [
            "attack_potency",
            "speed",
            "lifting_strength",
            "striking_strength",
            "durability",
            "stamina",
            "range",
            "intelligence",
        ] {
            assert_eq!(body[column], "", "{column}");
        }

        let stored = serde_json::to_value(CharacterRecord::from_draft(1, &draft, None)).unwrap();
        assert_eq!(stored["durability"], "");
    }

    #[test]
    fn stored_record_omits_power() {
        let record = CharacterRecord::from_draft(4, &draft(), None);
        let body = serde_json::to_value(&record).unwrap();
        assert!(body.get("power").is_none());
        assert!(body.get("power_level").is_none());
        assert_eq!(record.into_character().power_level, None);
    }

    #[test]
    fn tier_record_tolerates_nulls() {
        let tier: Tier = serde_json::from_value::<TierRecord>(json!({
            "id": 12,
            "tier_code": "High 2-A",
            "tier_name": "Multiversal+",
            "tier_description": null,
            "tier_order": 12
        }))
        .unwrap()
        .into();
        assert_eq!(tier.tier_description, "");
        assert_eq!(tier.display_name(), "Multiversal+");
    }
}
