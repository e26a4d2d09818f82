//! Query box component renderer.

use crate::ui::helpers::{position_cursor, truncate_chars, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the query box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the query box at the specified row.
///
/// ```text
/// [margin] ┌─────────────────┐ [margin]
/// [margin] │ Search: matrix_ │ [margin]
/// [margin] └─────────────────┘ [margin]
/// ```
///
/// A trailing `_` marks typing focus. The border is dimmed while focus is on
/// the list.
///
/// # Returns
///
/// The next available row position (row + 3)
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.is_focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if search.is_focused { "_" } else { "" };
    let search_text = truncate_chars(
        &format!(" {}: {}{cursor}", search.label, search.query),
        inner_width,
    );
    let padding = inner_width.saturating_sub(visual_len(&search_text));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
