//! Footer component renderer.

use crate::ui::helpers::{position_cursor, truncate_chars, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer help bar at the specified row.
///
/// Keybinding hints are centered and dimmed. Hints wider than the terminal
/// are truncated so the layout never wraps.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate_chars(&footer.keybindings, cols);

    let text_len = visual_len(&help_text);
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the inline status notice (for example a refresh in progress).
pub fn render_status_line(row: usize, text: &str, theme: &Theme, cols: usize) -> usize {
    let text = truncate_chars(text, cols.saturating_sub(2));

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("  {text}");
    print!("{}", " ".repeat(cols.saturating_sub(visual_len(&text) + 2)));
    print!("{}", Theme::reset());
    row + 1
}
