//! Empty state component renderer.

use crate::ui::helpers::{position_cursor, truncate_chars, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmptyKind, EmptyState};

/// Renders a centered two-line notice in place of the list.
///
/// ```text
/// [1 blank line]
/// [left padding] MESSAGE [right padding]
/// [left padding] subtitle [right padding]
/// ```
///
/// Errors use `error_fg`; loading and empty notices use `empty_state_fg`.
/// The subtitle is dimmed.
///
/// # Returns
///
/// The row after the subtitle.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let color = match empty.kind {
        EmptyKind::Error => &theme.colors.error_fg,
        EmptyKind::Loading | EmptyKind::Empty => &theme.colors.empty_state_fg,
    };

    let message = truncate_chars(&empty.message, cols);
    let msg_len = visual_len(&message);
    let msg_padding = (cols.saturating_sub(msg_len)) / 2;

    position_cursor(row + 1, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(color));
    print!("{}", " ".repeat(msg_padding));
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    let subtitle = truncate_chars(&empty.subtitle, cols);
    let sub_len = visual_len(&subtitle);
    let sub_padding = (cols.saturating_sub(sub_len)) / 2;

    position_cursor(row + 2, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{subtitle}");
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    print!("{}", Theme::reset());

    row + 3
}
