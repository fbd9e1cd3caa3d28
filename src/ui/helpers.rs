//! Shared rendering utilities.
//!
//! Cursor positioning, tier badges, match highlighting and the char-based
//! text fitting every component relies on. Widths are counted in chars, not
//! bytes, so names like "ベジータ" never split inside a code point.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::TierBadge;

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to `width` chars, ending with `…` when something was dropped.
///
/// ```rust
/// use tierdex::ui::helpers::fit;
///
/// assert_eq!(fit("Monkey D. Luffy", 8), "Monkey …");
/// assert_eq!(fit("Goku", 8), "Goku");
/// ```
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    if char_len(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut kept: String = text.chars().take(width - 1).collect();
    kept.push('…');
    kept
}

/// [`fit`] then right-pads with spaces to exactly `width` chars.
#[must_use]
pub fn fit_padded(text: &str, width: usize) -> String {
    let fitted = fit(text, width);
    let pad = width.saturating_sub(char_len(&fitted));
    format!("{fitted}{}", " ".repeat(pad))
}

/// Greedy word wrap to `width` chars. Words longer than a line are split.
/// Explicit newlines start a new line.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                lines.push(word.drain(..width).collect());
            }
            let word: String = word.into_iter().collect();
            let needed = if line.is_empty() { 0 } else { 1 } + char_len(&word);
            if char_len(&line) + needed > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&word);
        }
        if !line.is_empty() || lines.is_empty() {
            lines.push(line);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Prints a tier badge (` 5-A `) on its tier color and returns its width.
pub fn render_badge(badge: &TierBadge, theme: &Theme) -> usize {
    let label = format!(" {} ", badge.code);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.badge_fg));
    print!("{}", Theme::bg(&badge.color));
    print!("{label}");
    print!("{}", Theme::reset());
    char_len(&label)
}

/// Prints `text` with the character `ranges` in match colors.
///
/// Ranges are `(start, end)` char indices, end exclusive. Selected rows skip
/// highlighting so the selection colors stay readable; the caller's colors
/// are restored after every highlighted run.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }
        let plain: String = chars[current_pos..start].iter().collect();
        print!("{plain}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted: String = chars[start..end].iter().collect();
        print!("{highlighted}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    let rest: String = chars[current_pos..].iter().collect();
    print!("{rest}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_counts_chars() {
        assert_eq!(fit("ベジータ", 3), "ベジ…");
        assert_eq!(fit("abc", 0), "");
        assert_eq!(fit_padded("ab", 4), "ab  ");
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap("Can destroy planets with a single blast", 16),
            vec!["Can destroy", "planets with a", "single blast"]
        );
    }

    #[test]
    fn wrap_splits_long_words_and_keeps_paragraphs() {
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap("one\ntwo", 20), vec!["one", "two"]);
        assert_eq!(wrap("", 10), vec![""]);
    }
}
