//! Character domain model.
//!
//! A [`Character`] is what the repository hands back; a [`CharacterDraft`] is
//! what the form submits. The draft carries the power level the tier code was
//! derived from, but neither backend persists it: only `tier_code` survives a
//! round trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Image reference stored when the form's image field is left blank.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300";

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// Free-text combat descriptors. Each one is optional and never numeric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub attack_potency: Option<String>,
    pub speed: Option<String>,
    pub lifting_strength: Option<String>,
    pub striking_strength: Option<String>,
    pub durability: Option<String>,
    pub stamina: Option<String>,
    pub range: Option<String>,
    pub intelligence: Option<String>,
}

impl Statistics {
    /// Labelled statistics in display order, skipping empty values.
    ///
    /// # Examples
    ///
    /// ```
    /// use tierdex::domain::Statistics;
    ///
    /// let stats = Statistics {
    ///     speed: Some("Massively FTL+".into()),
    ///     durability: Some(String::new()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(stats.entries(), vec![("Speed", "Massively FTL+")]);
    /// ```
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Attack Potency", &self.attack_potency),
            ("Speed", &self.speed),
            ("Lifting Strength", &self.lifting_strength),
            ("Striking Strength", &self.striking_strength),
            ("Durability", &self.durability),
            ("Stamina", &self.stamina),
            ("Range", &self.range),
            ("Intelligence", &self.intelligence),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (label, v))
        })
        .collect()
    }
}

/// A catalogued character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub anime: String,
    /// Only present when the backend row happens to carry one.
    pub power_level: Option<u8>,
    /// Derived from the power level at the last save and stored as-is.
    pub tier_code: String,
    pub image_url: String,
    pub abilities: String,
    pub description: String,
    pub notable_techniques: String,
    pub stats: Statistics,
    pub created_at: Option<DateTime<Utc>>,
}

impl Character {
    /// How long ago the character was added, e.g. `"3d ago"`.
    ///
    /// Returns `None` when the backend did not report a creation time.
    #[must_use]
    pub fn added_ago(&self, now: DateTime<Utc>) -> Option<String> {
        let diff = (now - self.created_at?).num_seconds();

        Some(if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        })
    }
}

/// Validated form output, ready for `create_character` / `update_character`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDraft {
    pub name: String,
    pub anime: String,
    pub power_level: u8,
    pub tier_code: String,
    pub image_url: String,
    pub abilities: String,
    pub description: String,
    pub notable_techniques: String,
    pub stats: Statistics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn character(created_at: Option<DateTime<Utc>>) -> Character {
        Character {
            id: 1,
            name: "Goku".into(),
            anime: "Dragon Ball".into(),
            power_level: None,
            tier_code: "2-C".into(),
            image_url: PLACEHOLDER_IMAGE.into(),
            abilities: String::new(),
            description: String::new(),
            notable_techniques: String::new(),
            stats: Statistics::default(),
            created_at,
        }
    }

    #[test]
    fn added_ago_buckets() {
        let now = Utc::now();
        assert_eq!(character(Some(now)).added_ago(now).as_deref(), Some("just now"));
        assert_eq!(
            character(Some(now - Duration::minutes(5))).added_ago(now).as_deref(),
            Some("5m ago")
        );
        assert_eq!(
            character(Some(now - Duration::hours(3))).added_ago(now).as_deref(),
            Some("3h ago")
        );
        assert_eq!(
            character(Some(now - Duration::days(7))).added_ago(now).as_deref(),
            Some("7d ago")
        );
        assert_eq!(character(None).added_ago(now), None);
    }

    #[test]
    fn statistics_keep_display_order() {
        let stats = Statistics {
            intelligence: Some("Genius".into()),
            attack_potency: Some("Universe level".into()),
            ..Default::default()
        };
        let labels: Vec<_> = stats.entries().into_iter().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["Attack Potency", "Intelligence"]);
    }
}
