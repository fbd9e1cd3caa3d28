//! Tier reference table.

use crate::ui::helpers::{self, fit, fit_padded, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TierItem;

const BADGE_WIDTH: usize = 15;
const NAME_WIDTH: usize = 28;

/// Renders one row per tier from `row`, stopping before `bottom`.
pub fn render_tier_rows(row: usize, bottom: usize, items: &[TierItem], theme: &Theme, cols: usize) -> usize {
    let description_width = cols.saturating_sub(2 + BADGE_WIDTH + NAME_WIDTH);
    let mut current_row = row;

    for item in items {
        if current_row >= bottom {
            break;
        }
        position_cursor(current_row, 1);
        let (fg, marker) = if item.is_selected {
            (&theme.colors.selection_fg, "▸ ")
        } else {
            (&theme.colors.text_normal, "  ")
        };
        if item.is_selected {
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        }
        print!("{}{marker}{}", Theme::fg(fg), Theme::reset());

        let badge_len = helpers::render_badge(&item.badge, theme);
        if item.is_selected {
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        }
        print!("{}", Theme::fg(fg));
        print!("{}", " ".repeat(BADGE_WIDTH.saturating_sub(badge_len)));
        print!("{}", fit_padded(&item.name, NAME_WIDTH));
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{}", fit_padded(&item.description, description_width));
        print!("{}", Theme::reset());
        current_row += 1;
    }
    current_row
}

/// Inline error above the table when a reload failed but tiers are cached.
pub fn render_tier_error(row: usize, error: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 3);
    print!("{}{}{}", Theme::fg(&theme.colors.error_fg), fit(error, cols.saturating_sub(4)), Theme::reset());
    row + 1
}
