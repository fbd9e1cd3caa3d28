//! Screen and input mode types.
//!
//! The UI is a stack of [`Screen`]s with the character browser at the bottom.
//! [`InputMode`] only matters on the browser, where `/` switches the keyboard
//! into the search field.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Letters are commands (`a` add, `t` tiers, `/` search, ...).
    Normal,
    /// Letters go into the search field.
    Search,
}

/// One entry of the navigation stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// All characters, searchable and paginated. Always the root.
    Browser,
    /// One character with its statistics.
    CharacterDetail,
    /// Add or edit form.
    CharacterForm,
    /// The tier reference table.
    TierList,
    /// Characters of one tier.
    TierDetail,
}

impl Screen {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Browser => "Power Scaling",
            Self::CharacterDetail => "Character",
            Self::CharacterForm => "Character Form",
            Self::TierList => "Power Tiers",
            Self::TierDetail => "Tier",
        }
    }
}
