//! Power level to tier classification and tier presentation lookups.
//!
//! Three pure functions drive every tier badge in the plugin:
//!
//! - [`derive_tier_code`]: power level (0-100) to one of 54 tier codes or the unknown sentinel
//! - [`color_for_tier`]: tier code to the badge color of its major tier
//! - [`name_for_tier`]: tier code to a human-readable name (partial table)
//!
//! The derivation bands are intentionally uneven: single-point bands at the top
//! of the scale, wider bands towards the bottom.

use crate::domain::tier::Tier;

/// Tier code returned for power levels below the lowest band.
pub const UNKNOWN_TIER: &str = "Unknown Tier";

/// Misspelled sentinel written by earlier releases; still treated as unknown.
pub const LEGACY_UNKNOWN_TIER: &str = "Uknown Tier";

/// Highest accepted power level.
pub const MAX_POWER_LEVEL: u8 = 100;

/// Color for `Tier 0`.
const TIER_ZERO_COLOR: &str = "#1a0033";

/// Colors for major tiers 1 through 10, indexed by `major - 1`.
const MAJOR_TIER_COLORS: [&str; 10] = [
    "#9b59b6", "#e74c3c", "#e67e22", "#f39c12", "#f1c40f", "#2ecc71", "#1abc9c", "#3498db",
    "#2980b9", "#34495e",
];

/// Shared color for tier 11 and any other multi-digit major tier.
const LOW_TIER_COLOR: &str = "#7f8c8d";

/// Color for empty or unrecognised tier codes.
pub const DEFAULT_TIER_COLOR: &str = "#95a5a6";

/// `(minimum power level, tier code)`, strongest first. Bands are disjoint and
/// cover 1..=100.
const TIER_BANDS: [(u8, &str); 54] = [
    (100, "Tier 0"),
    (95, "High 1-A"),
    (90, "1-A"),
    (85, "Low 1-A"),
    (80, "High 1-B"),
    (75, "1-B"),
    (70, "Low 1-B"),
    (65, "High 1-C"),
    (60, "1-C"),
    (55, "Low 1-C"),
    (50, "High 2-A"),
    (48, "2-A"),
    (46, "2-B"),
    (44, "2-C"),
    (42, "Low 2-C"),
    (40, "High 3-A"),
    (38, "3-A"),
    (37, "High 4-C"),
    (36, "4-C"),
    (35, "Low 4-C"),
    (34, "High 5-A"),
    (33, "5-A"),
    (32, "5-B"),
    (31, "Low 5-B"),
    (30, "High 5-C"),
    (29, "5-C"),
    (28, "Low 5-C"),
    (27, "High 6-A"),
    (26, "6-A"),
    (25, "High 6-B"),
    (24, "6-B"),
    (23, "Low 6-B"),
    (22, "High 6-C"),
    (21, "6-C"),
    (20, "Low 6-C"),
    (19, "High 7-A"),
    (18, "7-A"),
    (17, "7-B"),
    (16, "Low 7-B"),
    (15, "High 7-C"),
    (14, "7-C"),
    (13, "Low 7-C"),
    (12, "8-A"),
    (11, "8-B"),
    (10, "8-C"),
    (9, "9-A"),
    (8, "9-B"),
    (7, "9-C"),
    (6, "10-A"),
    (5, "10-B"),
    (4, "10-C"),
    (3, "11-A"),
    (2, "11-B"),
    (1, "11-C"),
];

/// Fallback display names. Deliberately partial: nothing below `5-C` has an
/// entry, and callers prefer the tier reference record when it is available.
const TIER_NAMES: [(&str, &str); 28] = [
    ("Tier 0", "Boundless"),
    ("High 1-A", "High Outerverse level"),
    ("1-A", "Outerverse level"),
    ("Low 1-A", "Low Outerverse level"),
    ("High 1-B", "High Hyperverse level"),
    ("1-B", "Hyperverse level"),
    ("Low 1-B", "Low Hyperverse level"),
    ("High 1-C", "High Complex Multiverse level"),
    ("1-C", "Complex Multiverse level"),
    ("Low 1-C", "Low Complex Multiverse level"),
    ("High 2-A", "High Multiverse level+"),
    ("2-A", "Multiverse level+"),
    ("2-B", "Multiverse level"),
    ("2-C", "Low Multiverse level"),
    ("Low 2-C", "Universe level+"),
    ("High 3-A", "High Universe level"),
    ("3-A", "Universe level"),
    ("3-B", "Multi-Galaxy level"),
    ("3-C", "Galaxy level"),
    ("High 4-C", "Large Star level+"),
    ("4-C", "Star level"),
    ("Low 4-C", "Small Star level"),
    ("High 5-A", "Dwarf Star level+"),
    ("5-A", "Large Planet level"),
    ("5-B", "Planet level"),
    ("Low 5-B", "Small Planet level"),
    ("High 5-C", "Moon level+"),
    ("5-C", "Moon level"),
];

/// Maps a power level to its tier code.
///
/// The caller validates the range; anything above [`MAX_POWER_LEVEL`] lands in
/// the top band and `0` yields [`UNKNOWN_TIER`].
///
/// # Examples
///
/// ```
/// use tierdex::domain::classifier::{derive_tier_code, UNKNOWN_TIER};
///
/// assert_eq!(derive_tier_code(92), "1-A");
/// assert_eq!(derive_tier_code(10), "8-C");
/// assert_eq!(derive_tier_code(0), UNKNOWN_TIER);
/// ```
#[must_use]
pub fn derive_tier_code(power_level: u8) -> &'static str {
    TIER_BANDS
        .iter()
        .find(|(threshold, _)| power_level >= *threshold)
        .map_or(UNKNOWN_TIER, |(_, code)| *code)
}

/// Returns `true` for the unknown sentinel, including the legacy spelling.
#[must_use]
pub fn is_unknown_tier(code: &str) -> bool {
    code == UNKNOWN_TIER || code == LEGACY_UNKNOWN_TIER
}

/// Returns the badge color for a tier code as a `#rrggbb` string.
///
/// Matching is case-insensitive and works on whole `N-G` tokens, so
/// `"High 5-A"`, `"5-b"` and `"Low 5-C"` share a color while `"10-A"` and
/// `"11-A"` are never mistaken for tier 1. Only the first letter of the grade
/// counts (`"5-A+"` colors as `"5-A"`).
///
/// # Examples
///
/// ```
/// use tierdex::domain::classifier::color_for_tier;
///
/// assert_eq!(color_for_tier("High 5-A"), color_for_tier("Low 5-C"));
/// assert_ne!(color_for_tier("10-A"), color_for_tier("1-A"));
/// ```
#[must_use]
pub fn color_for_tier(code: &str) -> &'static str {
    let upper = code.trim().to_uppercase();
    if upper.is_empty() {
        return DEFAULT_TIER_COLOR;
    }
    if upper == "TIER 0" {
        return TIER_ZERO_COLOR;
    }

    let Some((major, grade)) = upper.split_whitespace().find_map(parse_tier_token) else {
        return DEFAULT_TIER_COLOR;
    };

    let is_standard_grade = grade.starts_with(&['A', 'B', 'C'][..]);
    match major.parse::<u32>() {
        Ok(n @ 1..=10) if is_standard_grade => MAJOR_TIER_COLORS[(n - 1) as usize],
        Ok(n) if n >= 11 => LOW_TIER_COLOR,
        _ if major.len() >= 2 => LOW_TIER_COLOR,
        _ => DEFAULT_TIER_COLOR,
    }
}

/// Splits a `"<digits>-<grade>"` token. Grades are returned as written.
fn parse_tier_token(token: &str) -> Option<(&str, &str)> {
    let (major, grade) = token.split_once('-')?;
    if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((major, grade))
}

/// Returns the fallback display name for a tier code.
///
/// Codes missing from the table come back unchanged.
///
/// # Examples
///
/// ```
/// use tierdex::domain::classifier::name_for_tier;
///
/// assert_eq!(name_for_tier("5-B"), "Planet level");
/// assert_eq!(name_for_tier("8-A"), "8-A");
/// ```
#[must_use]
pub fn name_for_tier(code: &str) -> &str {
    if code.is_empty() {
        return "Unknown";
    }
    TIER_NAMES
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(code, |(_, name)| *name)
}

/// Builds the canonical tier reference table, strongest tier first.
///
/// Used to seed local catalogs. `tier_order` starts at 1 for `Tier 0`.
#[must_use]
pub fn canonical_tiers() -> Vec<Tier> {
    TIER_BANDS
        .iter()
        .zip(1_i64..)
        .map(|((threshold, code), order)| Tier {
            id: order,
            tier_code: (*code).to_string(),
            tier_name: name_for_tier(code).to_string(),
            tier_description: format!("Power level {threshold} and above"),
            tier_order: order,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_strictly_descending() {
        for pair in TIER_BANDS.windows(2) {
            assert!(pair[0].0 > pair[1].0, "{:?} before {:?}", pair[0], pair[1]);
        }
        assert_eq!(TIER_BANDS.last().map(|b| b.0), Some(1));
    }

    #[test]
    fn band_edges() {
        assert_eq!(derive_tier_code(100), "Tier 0");
        assert_eq!(derive_tier_code(99), "High 1-A");
        assert_eq!(derive_tier_code(95), "High 1-A");
        assert_eq!(derive_tier_code(94), "1-A");
        assert_eq!(derive_tier_code(49), "2-A");
        assert_eq!(derive_tier_code(37), "High 4-C");
        assert_eq!(derive_tier_code(1), "11-C");
        assert_eq!(derive_tier_code(0), UNKNOWN_TIER);
    }

    #[test]
    fn legacy_sentinel_counts_as_unknown() {
        assert!(is_unknown_tier("Uknown Tier"));
        assert!(is_unknown_tier(UNKNOWN_TIER));
        assert!(!is_unknown_tier("11-C"));
    }

    #[test]
    fn tier_zero_color_is_case_insensitive() {
        assert_eq!(color_for_tier("Tier 0"), "#1a0033");
        assert_eq!(color_for_tier("tier 0"), "#1a0033");
    }

    #[test]
    fn multi_digit_tiers_do_not_collide_with_tier_one() {
        assert_eq!(color_for_tier("1-A"), "#9b59b6");
        assert_eq!(color_for_tier("10-A"), "#34495e");
        assert_eq!(color_for_tier("11-A"), "#7f8c8d");
        assert_eq!(color_for_tier("High 11-C"), "#7f8c8d");
        assert_eq!(color_for_tier("12-Z"), "#7f8c8d");
    }

    #[test]
    fn grade_suffixes_keep_the_major_color() {
        assert_eq!(color_for_tier("5-A+"), color_for_tier("5-A"));
        assert_eq!(color_for_tier("High 5-AB"), color_for_tier("5-A"));
        assert_eq!(color_for_tier("2-c?"), color_for_tier("2-C"));
        assert_eq!(color_for_tier("10-B+"), "#34495e");
    }

    #[test]
    fn unrecognised_codes_fall_back_to_gray() {
        assert_eq!(color_for_tier(""), DEFAULT_TIER_COLOR);
        assert_eq!(color_for_tier("Unknown Tier"), DEFAULT_TIER_COLOR);
        assert_eq!(color_for_tier("5-D"), DEFAULT_TIER_COLOR);
        assert_eq!(color_for_tier("-"), DEFAULT_TIER_COLOR);
    }

    #[test]
    fn canonical_table_matches_bands() {
        let tiers = canonical_tiers();
        assert_eq!(tiers.len(), 54);
        assert_eq!(tiers[0].tier_code, "Tier 0");
        assert_eq!(tiers[0].tier_name, "Boundless");
        assert_eq!(tiers[53].tier_code, "11-C");
        assert_eq!(tiers[53].tier_name, "11-C");
        assert!(tiers.windows(2).all(|w| w[0].tier_order < w[1].tier_order));
    }
}
