//! Modal alert box drawn over the current screen.

use crate::ui::helpers::{char_len, position_cursor, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::AlertInfo;

const MAX_WIDTH: usize = 60;

/// Draws a bordered box centered in the pane:
///
/// ```text
/// ┌─ Error ──────────────────────────┐
/// │ Failed to add character: offline │
/// │                        [Enter] OK │
/// └──────────────────────────────────┘
/// ```
pub fn render_alert(alert: &AlertInfo, theme: &Theme, rows: usize, cols: usize) {
    let box_width = cols.saturating_sub(4).min(MAX_WIDTH).max(12);
    let inner = box_width - 2;
    let lines = wrap(&alert.message, inner - 2);
    let height = lines.len() + 3;
    let top = rows.saturating_sub(height) / 2 + 1;
    let left = cols.saturating_sub(box_width) / 2 + 1;

    let border = if alert.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.success_fg
    };
    let fill = theme.colors.header_bg.as_deref();
    let open = |row: usize| {
        position_cursor(row, left);
        if let Some(bg) = fill {
            print!("{}", Theme::bg(bg));
        }
        print!("{}", Theme::fg(border));
    };

    let title = format!("─ {} ", alert.title);
    open(top);
    print!("┌{}{}{}", Theme::bold(), title, Theme::reset());
    if let Some(bg) = fill {
        print!("{}", Theme::bg(bg));
    }
    print!("{}{}┐{}", Theme::fg(border), "─".repeat(inner.saturating_sub(char_len(&title))), Theme::reset());

    for (offset, line) in lines.iter().enumerate() {
        open(top + 1 + offset);
        print!("│ {}{line}", Theme::fg(&theme.colors.text_normal));
        print!("{}", " ".repeat(inner.saturating_sub(char_len(line) + 1)));
        print!("{}│{}", Theme::fg(border), Theme::reset());
    }

    let hint = "[Enter] OK ";
    open(top + 1 + lines.len());
    print!("│{}", " ".repeat(inner.saturating_sub(char_len(hint))));
    print!("{}{hint}{}│{}", Theme::fg(&theme.colors.text_dim), Theme::fg(border), Theme::reset());

    open(top + 2 + lines.len());
    print!("└{}┘{}", "─".repeat(inner), Theme::reset());
}
