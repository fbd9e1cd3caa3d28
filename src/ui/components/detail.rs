//! Character detail screen.
//!
//! ```text
//!  5-A  Large Planet level
//!  Dragon Ball Z  ·  added 3 days ago
//!  image: https://…
//!
//!  STATISTICS
//!  Attack Potency      Planet level
//!  Speed               Massively FTL+
//!
//!  DESCRIPTION
//!  wrapped text…
//! ```

use crate::ui::helpers::{self, char_len, fit, fit_padded, position_cursor, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailView;

const MARGIN: usize = 2;
const STAT_LABEL_WIDTH: usize = 20;

/// Renders the detail body between `row` and `bottom` (exclusive). Content
/// that does not fit is cut off; the delete prompt, when open, always takes
/// the last body rows.
pub fn render_detail(row: usize, bottom: usize, view: &DetailView, theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(MARGIN * 2);
    let content_bottom = if view.confirm.is_some() {
        bottom.saturating_sub(3)
    } else {
        bottom
    };
    let mut current_row = row;

    position_cursor(current_row, MARGIN + 1);
    let badge_len = helpers::render_badge(&view.badge, theme);
    print!(" {}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal));
    print!("{}", fit(&view.tier_name, width.saturating_sub(badge_len + 1)));
    print!("{}", Theme::reset());
    current_row += 1;

    let mut meta = view.anime.clone();
    if let Some(added) = &view.added {
        meta.push_str(&format!("  ·  added {added}"));
    }
    position_cursor(current_row, MARGIN + 1);
    print!("{}{}{}", Theme::fg(&theme.colors.text_dim), fit(&meta, width), Theme::reset());
    current_row += 1;

    if !view.tier_description.is_empty() && current_row < content_bottom {
        position_cursor(current_row, MARGIN + 1);
        print!(
            "{}{}{}",
            Theme::fg(&theme.colors.text_faint),
            fit(&view.tier_description, width),
            Theme::reset()
        );
        current_row += 1;
    }

    if current_row < content_bottom {
        position_cursor(current_row, MARGIN + 1);
        print!(
            "{}image: {}{}",
            Theme::fg(&theme.colors.text_faint),
            fit(&view.image_url, width.saturating_sub(7)),
            Theme::reset()
        );
        current_row += 1;
    }

    if !view.stats.is_empty() {
        current_row = render_section_title(current_row + 1, content_bottom, "STATISTICS", theme);
        for (label, value) in &view.stats {
            if current_row >= content_bottom {
                break;
            }
            position_cursor(current_row, MARGIN + 1);
            print!("{}{}", Theme::fg(&theme.colors.text_dim), fit_padded(label, STAT_LABEL_WIDTH));
            print!(
                "{}{}",
                Theme::fg(&theme.colors.text_normal),
                fit(value, width.saturating_sub(STAT_LABEL_WIDTH))
            );
            print!("{}", Theme::reset());
            current_row += 1;
        }
    }

    for (title, text) in &view.sections {
        current_row = render_section_title(current_row + 1, content_bottom, &title.to_uppercase(), theme);
        for line in wrap(text, width) {
            if current_row >= content_bottom {
                break;
            }
            position_cursor(current_row, MARGIN + 1);
            print!("{}{line}{}", Theme::fg(&theme.colors.text_normal), Theme::reset());
            current_row += 1;
        }
    }

    if let Some(prompt) = &view.confirm {
        render_confirm(bottom.saturating_sub(2), prompt, theme, cols);
        return bottom;
    }
    current_row
}

fn render_section_title(row: usize, bottom: usize, title: &str, theme: &Theme) -> usize {
    if row >= bottom {
        return row;
    }
    position_cursor(row, MARGIN + 1);
    print!("{}{}{title}{}", Theme::bold(), Theme::fg(&theme.colors.accent), Theme::reset());
    row + 1
}

/// Delete confirmation line with its `y/n` hint.
fn render_confirm(row: usize, prompt: &str, theme: &Theme, cols: usize) {
    let hint = "  [y] Delete  [n] Cancel";
    let text = fit(prompt, cols.saturating_sub(MARGIN * 2 + char_len(hint)));
    let padding = cols.saturating_sub(char_len(&text) + char_len(hint)) / 2;

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));
    print!("{}{}{text}", Theme::bold(), Theme::fg(&theme.colors.error_fg));
    print!("{}{}{hint}", Theme::reset(), Theme::fg(&theme.colors.text_dim));
    print!("{}", Theme::reset());
}
