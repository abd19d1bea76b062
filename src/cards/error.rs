//! Error card shown when a card could not be produced.

use crate::cards::svg::{escape, frame};
use crate::cards::theme::theme;

const WIDTH: u32 = 340;
const MIN_HEIGHT: u32 = 200;
const LINE_CHARS: usize = 40;
const FIRST_LINE_Y: usize = 75;
const LINE_HEIGHT: usize = 22;
const BOTTOM_PADDING: usize = 30;

/// Render `message` as a themed card. Never fails.
///
/// The card grows with the message so no part of it is dropped.
pub fn render_error_card(message: &str, theme_name: &str) -> String {
    let theme = theme(theme_name);
    let wrapped = wrap(message, LINE_CHARS);

    let lines: String = wrapped
        .iter()
        .enumerate()
        .map(|(i, line)| {
            format!(
                r#"<text x="20" y="{}" class="text">{}</text>"#,
                FIRST_LINE_Y + i * LINE_HEIGHT,
                escape(line)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    frame(WIDTH, card_height(wrapped.len()), theme, "Something went wrong!", &lines)
}

fn card_height(line_count: usize) -> u32 {
    let needed = FIRST_LINE_Y + line_count.saturating_sub(1) * LINE_HEIGHT + BOTTOM_PADDING;
    u32::try_from(needed).unwrap_or(u32::MAX).max(MIN_HEIGHT)
}

/// Greedy word wrap; words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
