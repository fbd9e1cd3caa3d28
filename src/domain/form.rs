//! Add/edit form state for a single character.
//!
//! The tier code is never typed by the user. Every edit of the power level
//! re-derives it on the spot so the badge next to the field always matches
//! what would be saved.

use crate::domain::character::{Character, CharacterDraft, Statistics, PLACEHOLDER_IMAGE};
use crate::domain::classifier::{derive_tier_code, MAX_POWER_LEVEL};
use thiserror::Error;

/// Tier shown in a fresh add form before any power level is typed.
pub const DEFAULT_FORM_TIER: &str = "5-A";

/// Tier shown while the power level field is empty or unparsable.
pub const PENDING_TIER: &str = "-";

/// Editable fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Anime,
    PowerLevel,
    ImageUrl,
    Abilities,
    Description,
    AttackPotency,
    Speed,
    LiftingStrength,
    StrikingStrength,
    Durability,
    Stamina,
    Range,
    Intelligence,
    NotableTechniques,
}

impl FormField {
    pub const ALL: [Self; 15] = [
        Self::Name,
        Self::Anime,
        Self::PowerLevel,
        Self::ImageUrl,
        Self::Abilities,
        Self::Description,
        Self::AttackPotency,
        Self::Speed,
        Self::LiftingStrength,
        Self::StrikingStrength,
        Self::Durability,
        Self::Stamina,
        Self::Range,
        Self::Intelligence,
        Self::NotableTechniques,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name *",
            Self::Anime => "Anime *",
            Self::PowerLevel => "Power Level (0-100) *",
            Self::ImageUrl => "Image URL",
            Self::Abilities => "Abilities",
            Self::Description => "Description",
            Self::AttackPotency => "Attack Potency",
            Self::Speed => "Speed",
            Self::LiftingStrength => "Lifting Strength",
            Self::StrikingStrength => "Striking Strength",
            Self::Durability => "Durability",
            Self::Stamina => "Stamina",
            Self::Range => "Range",
            Self::Intelligence => "Intelligence",
            Self::NotableTechniques => "Notable Techniques",
        }
    }
}

/// A field-level reason the form cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: FormField,
    pub message: String,
}

impl ValidationError {
    fn new(field: FormField, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Whether the form creates a new character or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(i64),
}

/// Raw text of every field plus the derived tier code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterForm {
    pub mode: FormMode,
    values: [String; FormField::ALL.len()],
    tier_code: String,
    focus: usize,
}

impl CharacterForm {
    /// Empty form for a new character.
    #[must_use]
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            values: Default::default(),
            tier_code: DEFAULT_FORM_TIER.to_string(),
            focus: 0,
        }
    }

    /// Form pre-filled from a stored character.
    ///
    /// The tier code comes from the stored row, not from the power level,
    /// which shows as `0` when the backend never persisted one.
    #[must_use]
    pub fn edit(character: &Character) -> Self {
        let mut form = Self {
            mode: FormMode::Edit(character.id),
            values: Default::default(),
            tier_code: character.tier_code.clone(),
            focus: 0,
        };

        let stats = &character.stats;
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        for field in FormField::ALL {
            let value = match field {
                FormField::Name => character.name.clone(),
                FormField::Anime => character.anime.clone(),
                FormField::PowerLevel => character.power_level.unwrap_or(0).to_string(),
                FormField::ImageUrl => character.image_url.clone(),
                FormField::Abilities => character.abilities.clone(),
                FormField::Description => character.description.clone(),
                FormField::AttackPotency => text(&stats.attack_potency),
                FormField::Speed => text(&stats.speed),
                FormField::LiftingStrength => text(&stats.lifting_strength),
                FormField::StrikingStrength => text(&stats.striking_strength),
                FormField::Durability => text(&stats.durability),
                FormField::Stamina => text(&stats.stamina),
                FormField::Range => text(&stats.range),
                FormField::Intelligence => text(&stats.intelligence),
                FormField::NotableTechniques => character.notable_techniques.clone(),
            };
            form.values[Self::index(field)] = value;
        }
        form
    }

    fn index(field: FormField) -> usize {
        FormField::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        &self.values[Self::index(field)]
    }

    #[must_use]
    pub fn tier_code(&self) -> &str {
        &self.tier_code
    }

    #[must_use]
    pub fn focused(&self) -> FormField {
        FormField::ALL[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FormField::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.checked_sub(1).unwrap_or(FormField::ALL.len() - 1);
    }

    /// Replaces a field's text. Power level edits re-derive the tier code.
    pub fn set(&mut self, field: FormField, text: &str) {
        if field == FormField::PowerLevel {
            self.set_power_level(text);
        } else {
            self.values[Self::index(field)] = text.to_string();
        }
    }

    /// Appends a character to the focused field.
    pub fn push_char(&mut self, c: char) {
        let field = self.focused();
        let mut text = self.value(field).to_string();
        text.push(c);
        self.set(field, &text);
    }

    /// Removes the last character of the focused field.
    pub fn pop_char(&mut self) {
        let field = self.focused();
        let mut text = self.value(field).to_string();
        text.pop();
        self.set(field, &text);
    }

    /// Stores the raw power level text and re-derives the tier code.
    ///
    /// # Examples
    ///
    /// ```
    /// use tierdex::domain::form::{CharacterForm, FormField};
    ///
    /// let mut form = CharacterForm::add();
    /// assert_eq!(form.tier_code(), "5-A");
    /// form.set_power_level("92");
    /// assert_eq!(form.tier_code(), "1-A");
    /// form.set_power_level("");
    /// assert_eq!(form.tier_code(), "-");
    /// ```
    pub fn set_power_level(&mut self, text: &str) {
        self.values[Self::index(FormField::PowerLevel)] = text.to_string();
        self.tier_code = parse_power_level(text)
            .map_or(PENDING_TIER, derive_tier_code)
            .to_string();
    }

    /// Checks required fields and builds the draft to submit.
    ///
    /// # Errors
    ///
    /// Returns the first failing field: blank name, blank anime, or a power
    /// level that is missing, non-numeric or outside 0-100.
    pub fn validate(&self) -> Result<CharacterDraft, ValidationError> {
        let trimmed = |field| self.value(field).trim().to_string();
        let optional = |field| Some(trimmed(field)).filter(|v: &String| !v.is_empty());
        let stat = |field| Some(trimmed(field));

        let name = trimmed(FormField::Name);
        if name.is_empty() {
            return Err(ValidationError::new(FormField::Name, "Character name is required"));
        }
        let anime = trimmed(FormField::Anime);
        if anime.is_empty() {
            return Err(ValidationError::new(FormField::Anime, "Anime name is required"));
        }
        let power_level = parse_power_level(self.value(FormField::PowerLevel)).ok_or_else(|| {
            ValidationError::new(FormField::PowerLevel, "Power level must be between 0 and 100")
        })?;

        let image_url = optional(FormField::ImageUrl).unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

        Ok(CharacterDraft {
            name,
            anime,
            power_level,
            tier_code: self.tier_code.clone(),
            image_url,
            abilities: trimmed(FormField::Abilities),
            description: trimmed(FormField::Description),
            notable_techniques: trimmed(FormField::NotableTechniques),
            stats: Statistics {
                attack_potency: stat(FormField::AttackPotency),
                speed: stat(FormField::Speed),
                lifting_strength: stat(FormField::LiftingStrength),
                striking_strength: stat(FormField::StrikingStrength),
                durability: stat(FormField::Durability),
                stamina: stat(FormField::Stamina),
                range: stat(FormField::Range),
                intelligence: stat(FormField::Intelligence),
            },
        })
    }
}

/// Parses a power level, accepting only whole numbers in 0-100.
fn parse_power_level(text: &str) -> Option<u8> {
    text.trim()
        .parse::<u8>()
        .ok()
        .filter(|level| *level <= MAX_POWER_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(power: &str) -> CharacterForm {
        let mut form = CharacterForm::add();
        form.set(FormField::Name, "  Gojo Satoru ");
        form.set(FormField::Anime, "Jujutsu Kaisen");
        form.set(FormField::PowerLevel, power);
        form
    }

    #[test]
    fn add_mode_starts_at_default_tier() {
        let form = CharacterForm::add();
        assert_eq!(form.tier_code(), DEFAULT_FORM_TIER);
        assert_eq!(form.focused(), FormField::Name);
    }

    #[test]
    fn typing_digits_rederives_each_keystroke() {
        let mut form = CharacterForm::add();
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focused(), FormField::PowerLevel);

        form.push_char('9');
        assert_eq!(form.tier_code(), "9-A");
        form.push_char('2');
        assert_eq!(form.tier_code(), "1-A");
        form.pop_char();
        assert_eq!(form.tier_code(), "9-A");
        form.pop_char();
        assert_eq!(form.tier_code(), PENDING_TIER);
    }

    #[test]
    fn out_of_range_and_garbage_show_pending_tier() {
        let mut form = CharacterForm::add();
        form.set_power_level("101");
        assert_eq!(form.tier_code(), PENDING_TIER);
        form.set_power_level("abc");
        assert_eq!(form.tier_code(), PENDING_TIER);
        form.set_power_level("-3");
        assert_eq!(form.tier_code(), PENDING_TIER);
        form.set_power_level("0");
        assert_eq!(form.tier_code(), "Unknown Tier");
    }

    #[test]
    fn validation_reports_first_missing_field() {
        let err = CharacterForm::add().validate().unwrap_err();
        assert_eq!(err.field, FormField::Name);

        let mut form = CharacterForm::add();
        form.set(FormField::Name, "Luffy");
        assert_eq!(form.validate().unwrap_err().field, FormField::Anime);

        form.set(FormField::Anime, "One Piece");
        let err = form.validate().unwrap_err();
        assert_eq!(err.field, FormField::PowerLevel);
        assert_eq!(err.to_string(), "Power level must be between 0 and 100");

        form.set(FormField::PowerLevel, "150");
        assert_eq!(form.validate().unwrap_err().field, FormField::PowerLevel);
    }

    #[test]
    fn draft_trims_and_defaults_optional_fields() {
        let draft = filled("92").validate().unwrap();
        assert_eq!(draft.name, "Gojo Satoru");
        assert_eq!(draft.power_level, 92);
        assert_eq!(draft.tier_code, "1-A");
        assert_eq!(draft.image_url, PLACEHOLDER_IMAGE);
        assert_eq!(draft.abilities, "");
        assert_eq!(draft.stats.speed.as_deref(), Some(""));
        assert_eq!(draft.stats.intelligence.as_deref(), Some(""));
        assert!(draft.stats.entries().is_empty());
    }

    #[test]
    fn power_level_bounds_are_inclusive() {
        assert_eq!(filled("0").validate().unwrap().power_level, 0);
        assert_eq!(filled("100").validate().unwrap().tier_code, "Tier 0");
    }

    #[test]
    fn edit_mode_keeps_stored_tier_until_power_changes() {
        let character = Character {
            id: 7,
            name: "Saitama".into(),
            anime: "One Punch Man".into(),
            power_level: None,
            tier_code: "Uknown Tier".into(),
            image_url: "https://example.org/saitama.png".into(),
            abilities: String::new(),
            description: String::new(),
            notable_techniques: "Serious Punch".into(),
            stats: Statistics {
                speed: Some("MFTL+".into()),
                ..Default::default()
            },
            created_at: None,
        };

        let mut form = CharacterForm::edit(&character);
        assert_eq!(form.mode, FormMode::Edit(7));
        assert_eq!(form.value(FormField::PowerLevel), "0");
        assert_eq!(form.value(FormField::Speed), "MFTL+");
        assert_eq!(form.tier_code(), "Uknown Tier");

        form.set_power_level("10");
        let draft = form.validate().unwrap();
        assert_eq!(draft.tier_code, "8-C");
        assert_eq!(draft.name, "Saitama");
        assert_eq!(draft.notable_techniques, "Serious Punch");
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = CharacterForm::add();
        form.focus_prev();
        assert_eq!(form.focused(), FormField::NotableTechniques);
        form.focus_next();
        assert_eq!(form.focused(), FormField::Name);
    }
}
