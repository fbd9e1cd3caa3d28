//! Add/edit form.

use crate::ui::helpers::{self, char_len, fit, fit_padded, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FormView;

const LABEL_WIDTH: usize = 22;
const MARGIN: usize = 2;

/// Renders the visible form rows, then the derived tier preview and any
/// save error. Returns the next free row.
pub fn render_form(row: usize, bottom: usize, view: &FormView, theme: &Theme, cols: usize) -> usize {
    let value_width = cols.saturating_sub(MARGIN * 2 + LABEL_WIDTH + 1);
    let mut current_row = row;

    for field in &view.rows {
        if current_row >= bottom.saturating_sub(2) {
            break;
        }
        let label = if field.is_required {
            format!("{} *", field.label)
        } else {
            field.label.clone()
        };

        position_cursor(current_row, MARGIN + 1);
        if field.is_focused {
            print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{}", fit_padded(&label, LABEL_WIDTH));
        print!("{}", Theme::reset());

        let value = fit(&field.value, value_width);
        if field.is_focused {
            print!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg));
            print!("{value}▏");
            print!("{}", " ".repeat(value_width.saturating_sub(char_len(&value))));
        } else {
            print!("{}{value}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{}", Theme::reset());
        current_row += 1;
    }

    current_row += 1;
    position_cursor(current_row, MARGIN + 1);
    print!("{}{}", Theme::fg(&theme.colors.text_dim), fit_padded("Tier", LABEL_WIDTH));
    print!("{}", Theme::reset());
    let badge_len = helpers::render_badge(&view.badge, theme);
    print!(" {}", Theme::fg(&theme.colors.text_normal));
    print!("{}", fit(&view.tier_name, value_width.saturating_sub(badge_len + 1)));
    if view.is_saving {
        print!("{}  saving…", Theme::fg(&theme.colors.warning_fg));
    }
    print!("{}", Theme::reset());
    current_row += 1;

    if let Some(error) = &view.error {
        position_cursor(current_row, MARGIN + 1);
        print!(
            "{}{}{}",
            Theme::fg(&theme.colors.error_fg),
            fit(error, cols.saturating_sub(MARGIN * 2)),
            Theme::reset()
        );
        current_row += 1;
    }
    current_row
}
