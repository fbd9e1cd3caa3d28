//! Tier reference records.

use serde::{Deserialize, Serialize};

/// A power tier as stored in the reference table.
///
/// Tiers are read-only from the plugin's point of view. `tier_order` sorts
/// from most to least powerful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub id: i64,
    pub tier_code: String,
    pub tier_name: String,
    #[serde(default)]
    pub tier_description: String,
    pub tier_order: i64,
}

impl Tier {
    /// Display name, falling back to the built-in table when the stored name
    /// is blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.tier_name.trim().is_empty() {
            crate::domain::classifier::name_for_tier(&self.tier_code)
        } else {
            &self.tier_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(code: &str, name: &str) -> Tier {
        Tier {
            id: 1,
            tier_code: code.to_string(),
            tier_name: name.to_string(),
            tier_description: String::new(),
            tier_order: 1,
        }
    }

    #[test]
    fn stored_name_wins() {
        assert_eq!(tier("5-B", "Planetary").display_name(), "Planetary");
    }

    #[test]
    fn blank_name_uses_fallback_table() {
        assert_eq!(tier("5-B", " ").display_name(), "Planet level");
        assert_eq!(tier("9-B", "").display_name(), "9-B");
    }
}
