//! Page indicator under character lists.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Page numbers shown around the current page.
const WINDOW: u64 = 5;

/// Zero-based page numbers to print, centered on the current page.
fn visible_pages(info: &PaginationInfo) -> std::ops::Range<u64> {
    let start = info
        .page
        .saturating_sub(WINDOW / 2)
        .min(info.total_pages.saturating_sub(WINDOW));
    start..(start + WINDOW).min(info.total_pages)
}

/// Renders `‹ h  1 2 [3] 4 5  l ›` centered at `row`.
pub fn render_pagination(row: usize, info: &PaginationInfo, theme: &Theme, cols: usize) -> usize {
    let pages = visible_pages(info);
    let numbers: Vec<String> = pages
        .clone()
        .map(|p| {
            if p == info.page {
                format!("[{}]", p + 1)
            } else {
                format!("{}", p + 1)
            }
        })
        .collect();
    let prev = if info.page > 0 { "‹ h" } else { "   " };
    let next = if info.page + 1 < info.total_pages { "l ›" } else { "   " };
    let summary = format!("  Page {} of {}", info.page + 1, info.total_pages);
    let plain_len = char_len(prev) + 2 + char_len(&numbers.join(" ")) + 2 + char_len(next) + char_len(&summary);

    position_cursor(row, 1);
    print!("{}", " ".repeat(cols.saturating_sub(plain_len) / 2));
    print!("{}{prev}  ", Theme::fg(&theme.colors.text_dim));
    for (idx, (page, label)) in pages.zip(&numbers).enumerate() {
        if idx > 0 {
            print!(" ");
        }
        if page == info.page {
            print!("{}{}{label}{}", Theme::bold(), Theme::fg(&theme.colors.accent), Theme::reset());
        } else {
            print!("{}{label}", Theme::fg(&theme.colors.text_dim));
        }
    }
    print!("{}  {next}", Theme::fg(&theme.colors.text_dim));
    print!("{}{summary}", Theme::fg(&theme.colors.text_faint));
    print!("{}", Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(page: u64, total_pages: u64) -> Vec<u64> {
        visible_pages(&PaginationInfo { page, total_pages }).collect()
    }

    #[test]
    fn window_follows_current_page() {
        assert_eq!(pages(0, 3), vec![0, 1, 2]);
        assert_eq!(pages(0, 12), vec![0, 1, 2, 3, 4]);
        assert_eq!(pages(6, 12), vec![4, 5, 6, 7, 8]);
        assert_eq!(pages(11, 12), vec![7, 8, 9, 10, 11]);
    }
}
