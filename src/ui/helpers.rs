//! Shared rendering utilities and helpers.
//!
//! Low-level text helpers used across components: cursor placement, fuzzy
//! match highlighting with ANSI escape management, and width-aware
//! truncation. All width math counts characters, never bytes.

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column (1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`, used as its display width.
#[must_use]
pub fn visual_len(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `max` characters, marking the cut with `...`.
///
/// Operates on characters so multi-byte titles never split mid-codepoint.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    if visual_len(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut out: String = text.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

/// Collapses runs of whitespace (including newlines) into single spaces.
#[must_use]
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Renders text with highlighted character ranges for fuzzy matches.
///
/// Ranges are `(start, end)` character indices with exclusive end, sorted and
/// non-overlapping. Ranges reaching past the text are clipped. When
/// `is_selected` is set the text is printed plain so the selection colors stay
/// intact.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_chars("Amélie", 10), "Amélie");
        assert_eq!(truncate_chars("O Fabuloso Destino de Amélie Poulain", 12), "O Fabulos...");
        assert_eq!(truncate_chars("Cidade de Deus", 3), "Cid");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn truncated_text_fits_width() {
        let title = "Star Wars: Episódio IV - Uma Nova Esperança";
        for max in 0..title.len() {
            assert!(visual_len(&truncate_chars(title, max)) <= max);
        }
    }

    #[test]
    fn newlines_collapse_to_spaces() {
        assert_eq!(single_line("A thief\n who steals  secrets"), "A thief who steals secrets");
    }
}
