//! Productive-time card: commits per hour of day.

use chrono::{DateTime, FixedOffset, Timelike, Utc};

use crate::cards::svg::frame;
use crate::cards::theme::Theme;

const WIDTH: u32 = 495;
const HEIGHT: u32 = 200;
const CHART_HEIGHT: u32 = 100;
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Count commits per hour after shifting by `utc_offset` hours.
///
/// Fractional offsets (e.g. `5.5`) are honored to the minute.
pub fn hourly_histogram(times: &[DateTime<FixedOffset>], utc_offset: f64) -> [u32; 24] {
    let offset_minutes = (utc_offset * 60.0).round() as i64;
    let mut hours = [0u32; 24];
    for time in times {
        let utc = time.with_timezone(&Utc);
        let minute_of_day = i64::from(utc.hour()) * 60 + i64::from(utc.minute());
        let local = (minute_of_day + offset_minutes).rem_euclid(MINUTES_PER_DAY);
        hours[(local / 60) as usize] += 1;
    }
    hours
}

pub fn render_productive_time_card(hours: &[u32; 24], utc_offset: f64, theme: &Theme) -> String {
    let max = hours.iter().copied().max().unwrap_or(0);

    let bars = hours
        .iter()
        .enumerate()
        .map(|(hour, &count)| {
            let height = (count * CHART_HEIGHT).checked_div(max).unwrap_or(0);
            let x = 40 + hour * 18;
            let mut bar = format!(
                r#"<rect x="{x}" y="{y}" width="12" height="{h}" fill="{fill}"/>"#,
                x = x,
                y = 55 + CHART_HEIGHT - height,
                h = height,
                fill = theme.chart,
            );
            if hour % 6 == 0 {
                bar.push_str(&format!(
                    r#"<text x="{}" y="175" class="small">{:02}</text>"#,
                    x, hour
                ));
            }
            bar
        })
        .collect::<Vec<_>>()
        .join("\n");

    let title = format!("Commits ({})", format_offset(utc_offset));
    frame(WIDTH, HEIGHT, theme, &title, &bars)
}

/// `8.0` → `UTC+8`, `-5.5` → `UTC-5.5`.
fn format_offset(utc_offset: f64) -> String {
    let sign = if utc_offset < 0.0 { '-' } else { '+' };
    let magnitude = format!("{}", utc_offset.abs());
    format!("UTC{}{}", sign, magnitude)
}
