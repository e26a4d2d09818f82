//! Movie card list renderer.
//!
//! Each card takes three rows:
//!
//! ```text
//! > Title (highlighted)                    ✗ dislike  ★ save  ♥ like
//!   Synopsis excerpt on one line...
//!   https://image.tmdb.org/t/p/w500/poster.jpg
//! ```
//!
//! Indicators are drawn in the order dislike, save, like. Active ones take
//! their theme color and bold; inactive ones are dimmed.

use crate::ui::helpers::{self, position_cursor, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ListEntry, MovieCardView, BADGES_WIDTH, CARD_INDENT};

/// Renders list entries from `row`, never drawing below `last_row`.
///
/// # Returns
///
/// The next available row position.
pub fn render_entries(
    row: usize,
    entries: &[ListEntry],
    theme: &Theme,
    cols: usize,
    last_row: usize,
) -> usize {
    let mut current_row = row;
    for entry in entries {
        if current_row + entry.height() - 1 > last_row {
            break;
        }
        current_row = match entry {
            ListEntry::Section(title) => render_section(current_row, title, theme, cols),
            ListEntry::Card(card) => render_card(current_row, card, theme, cols),
        };
    }
    current_row
}

fn render_section(row: usize, title: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(" {title}");
    print!("{}", " ".repeat(cols.saturating_sub(visual_len(title) + 1)));
    print!("{}", Theme::reset());
    row + 1
}

fn apply_base_style(card: &MovieCardView, theme: &Theme) {
    if card.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
}

fn render_card(row: usize, card: &MovieCardView, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    apply_base_style(card, theme);

    print!("{}", if card.is_selected { "> " } else { "  " });
    if card.highlight_ranges.is_empty() {
        print!("{}", card.title);
    } else {
        helpers::render_highlighted_text(&card.title, &card.highlight_ranges, theme, card.is_selected);
    }

    let title_end = CARD_INDENT + visual_len(&card.title);
    print!("{}", " ".repeat(cols.saturating_sub(title_end + BADGES_WIDTH)));

    let badges = [
        (card.status.disliked, "✗ dislike", &theme.colors.disliked_fg),
        (card.status.saved, "★ save", &theme.colors.saved_fg),
        (card.status.liked, "♥ like", &theme.colors.liked_fg),
    ];
    for (i, (active, label, color)) in badges.into_iter().enumerate() {
        if i > 0 {
            print!("  ");
        }
        if active {
            print!("{}{}", Theme::bold(), Theme::fg(color));
        } else {
            print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
        }
        print!("{label}");
        print!("{}", Theme::reset());
        apply_base_style(card, theme);
    }
    print!(" ");
    print!("{}", Theme::reset());

    for (offset, text) in [(1, &card.synopsis), (2, &card.poster_url)] {
        position_cursor(row + offset, 1);
        if offset == 2 {
            print!("{}", Theme::dim());
        }
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}{text}", " ".repeat(CARD_INDENT));
        print!("{}", " ".repeat(cols.saturating_sub(CARD_INDENT + visual_len(text))));
        print!("{}", Theme::reset());
    }

    row + 3
}
