//! Character list: one row per character with its tier badge.

use crate::ui::helpers::{self, char_len, fit, fit_padded, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Badge column, wide enough for `High 1-A` and `Unknown Tier`.
const BADGE_WIDTH: usize = 15;
const ADDED_WIDTH: usize = 14;

/// Renders the column headers. Returns the next free row.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let (name_width, anime_width) = column_widths(cols);
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!(
        "  {}{}{}{}",
        fit_padded("TIER", BADGE_WIDTH),
        fit_padded("NAME", name_width),
        fit_padded("ANIME", anime_width),
        fit("ADDED", ADDED_WIDTH)
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every item from `row`, stopping before `bottom`.
///
/// Returns the next free row.
pub fn render_table_rows(row: usize, bottom: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        if current_row >= bottom {
            break;
        }
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Name and anime columns share what the fixed columns leave.
fn column_widths(cols: usize) -> (usize, usize) {
    let flexible = cols.saturating_sub(2 + BADGE_WIDTH + ADDED_WIDTH);
    let name_width = (flexible * 3 / 5).max(8);
    (name_width, flexible.saturating_sub(name_width))
}

fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let (name_width, anime_width) = column_widths(cols);
    let (row_fg, row_bg) = if item.is_selected {
        (&theme.colors.selection_fg, Some(&theme.colors.selection_bg))
    } else {
        (&theme.colors.text_normal, None)
    };
    let set_row_colors = || {
        print!("{}", Theme::fg(row_fg));
        if let Some(bg) = row_bg {
            print!("{}", Theme::bg(bg));
        }
    };

    position_cursor(row, 1);
    set_row_colors();
    print!("{}", if item.is_selected { "▸ " } else { "  " });
    print!("{}", Theme::reset());

    let badge_len = helpers::render_badge(&item.badge, theme);
    set_row_colors();
    print!("{}", " ".repeat(BADGE_WIDTH.saturating_sub(badge_len)));

    let name = fit(&item.name, name_width.saturating_sub(1));
    if item.highlight_ranges.is_empty() {
        print!("{name}");
    } else {
        helpers::render_highlighted_text(&name, &item.highlight_ranges, theme, item.is_selected);
        set_row_colors();
    }
    print!("{}", " ".repeat(name_width.saturating_sub(char_len(&name))));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", fit_padded(&item.anime, anime_width));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_faint));
    }
    let added = fit(&item.added, ADDED_WIDTH);
    print!("{added}");

    let line_len = 2 + BADGE_WIDTH.max(badge_len) + name_width + anime_width + char_len(&added);
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));
    print!("{}", Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_fill_the_pane() {
        let (name, anime) = column_widths(80);
        assert_eq!(2 + BADGE_WIDTH + name + anime + ADDED_WIDTH, 80);
        assert!(name > anime);
    }

    #[test]
    fn narrow_pane_keeps_a_name_column() {
        let (name, anime) = column_widths(20);
        assert_eq!(name, 8);
        assert_eq!(anime, 0);
    }
}
