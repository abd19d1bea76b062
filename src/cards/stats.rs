//! Profile stats card.

use crate::cards::svg::frame;
use crate::cards::theme::Theme;
use crate::github::ProfileStats;

const WIDTH: u32 = 340;
const HEIGHT: u32 = 200;

pub fn render_stats_card(stats: &ProfileStats, theme: &Theme) -> String {
    let rows = [
        ("Total Stars", stats.total_stars),
        ("Total Commits", stats.total_commits),
        ("Total PRs", stats.total_pull_requests),
        ("Total Issues", stats.total_issues),
        ("Contributed to", stats.contributed_to),
    ];

    let body = rows
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let y = 65 + i * 25;
            format!(
                r#"<circle cx="26" cy="{cy}" r="5" fill="{icon}"/><text x="40" y="{y}" class="text">{label}:</text><text x="220" y="{y}" class="text">{value}</text>"#,
                cy = y - 5,
                icon = theme.icon,
                y = y,
                label = label,
                value = abbreviate(*value),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let owner = stats.name.as_deref().filter(|n| !n.trim().is_empty()).unwrap_or(&stats.login);
    frame(WIDTH, HEIGHT, theme, &format!("{}'s Stats", owner), &body)
}

/// `1234` → `1.2k`, `5_600_000` → `5.6m`. Rounds toward zero.
pub fn abbreviate(value: u64) -> String {
    let (unit, suffix) = match value {
        0..=999 => return value.to_string(),
        1_000..=999_999 => (1_000, "k"),
        _ => (1_000_000, "m"),
    };
    let whole = value / unit;
    let tenth = value % unit / (unit / 10);
    if tenth == 0 {
        format!("{}{}", whole, suffix)
    } else {
        format!("{}.{}{}", whole, tenth, suffix)
    }
}
