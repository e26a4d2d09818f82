//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar and screen tabs
//! - [`search`]: Query box (border, label, query text)
//! - [`cards`]: Section titles and three-row movie cards
//! - [`empty`]: Loading, error and empty notices
//! - [`footer`]: Inline status line and keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Tabs]
//! [Border]
//! [Query box - 3 lines, when visible]
//! [Cards or notice]
//! [Status line, when set]
//! [Border]
//! [Footer]
//! ```

mod cards;
mod empty;
mod footer;
mod header;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use cards::render_entries;
use empty::render_empty_state;
use footer::{render_footer, render_status_line};
use header::{render_header, render_tabs};
use search::render_search_bar;

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full plugin layout for a view model.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_tabs(current_row, &vm.tabs, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);
    let mut last_list_row = border_row.saturating_sub(1);
    if vm.status_line.is_some() {
        last_list_row = last_list_row.saturating_sub(1);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else {
        current_row = render_entries(current_row, &vm.entries, theme, cols, last_list_row);
        if let Some(status) = &vm.status_line {
            render_status_line(current_row.max(last_list_row + 1), status, theme, cols);
        }
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
