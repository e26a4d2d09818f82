//! Header and tab bar component renderers.

use crate::ui::helpers::{position_cursor, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HeaderInfo, TabInfo};

/// Renders the header title bar at the specified row.
///
/// The title is centered and bold; the line is padded to the full width so an
/// optional header background covers it.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = visual_len(&header.title);
    let padding = (cols.saturating_sub(title_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));

    print!("{}", Theme::reset());
    row + 1
}

/// Renders the screen tabs on one centered line.
///
/// ```text
///        [1 Search]   2 Saved (3)   3 Profile
/// ```
///
/// The active tab is bracketed, bold and drawn in `tab_active_fg`.
pub fn render_tabs(row: usize, tabs: &[TabInfo], theme: &Theme, cols: usize) -> usize {
    let labels: Vec<String> = tabs
        .iter()
        .map(|tab| {
            if tab.is_active {
                format!("[{}]", tab.label)
            } else {
                format!(" {} ", tab.label)
            }
        })
        .collect();
    let line_len = labels.iter().map(|l| visual_len(l)).sum::<usize>() + 2 * tabs.len().saturating_sub(1);
    let padding = cols.saturating_sub(line_len) / 2;

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));
    for (i, (tab, label)) in tabs.iter().zip(&labels).enumerate() {
        if i > 0 {
            print!("  ");
        }
        if tab.is_active {
            print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.tab_active_fg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{label}");
        print!("{}", Theme::reset());
    }
    print!("{}", " ".repeat(cols.saturating_sub(padding + line_len)));
    row + 1
}
