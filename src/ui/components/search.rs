//! Search input box.

use crate::ui::helpers::{char_len, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

const PLACEHOLDER: &str = "Type name...";

/// Renders a 3-line bordered box with the typed text (or a placeholder) and
/// a `searching…` marker while a debounced query is outstanding.
///
/// ```text
///   ┌──────────────────────────────┐
///   │ Search: gok▏      searching… │
///   └──────────────────────────────┘
/// ```
///
/// Returns the next free row.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.is_focused {
        &theme.colors.accent
    } else {
        &theme.colors.search_bar_border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let status = if search.is_pending { "searching… " } else { "" };
    let label = " Search: ";
    let text_width = inner_width.saturating_sub(char_len(label) + char_len(status) + 1);
    let (text, text_color) = if search.query.is_empty() && !search.is_focused {
        (fit(PLACEHOLDER, text_width), &theme.colors.text_faint)
    } else {
        (fit(&search.query, text_width), &theme.colors.text_normal)
    };
    let cursor = if search.is_focused { "▏" } else { " " };
    let used = char_len(label) + char_len(&text) + 1 + char_len(status);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}│", Theme::fg(border));
    print!("{}{label}", Theme::fg(&theme.colors.text_dim));
    print!("{}{text}", Theme::fg(text_color));
    print!("{}{cursor}", Theme::fg(&theme.colors.accent));
    print!("{}", " ".repeat(inner_width.saturating_sub(used)));
    print!("{}{status}", Theme::fg(&theme.colors.warning_fg));
    print!("{}│", Theme::fg(border));
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
