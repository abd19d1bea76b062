//! Shared SVG building blocks.

use crate::cards::theme::Theme;

/// Escape text for use inside SVG markup or attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap card content in the common frame: background, border and title.
pub fn frame(width: u32, height: u32, theme: &Theme, title: &str, body: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
<style>
.title {{ font: 600 18px 'Segoe UI', Ubuntu, Sans-Serif; fill: {title_color}; }}
.text {{ font: 400 14px 'Segoe UI', Ubuntu, Sans-Serif; fill: {text_color}; }}
.small {{ font: 400 11px 'Segoe UI', Ubuntu, Sans-Serif; fill: {text_color}; }}
</style>
<rect x="0.5" y="0.5" rx="4.5" width="{rw}" height="{rh}" fill="{bg}" stroke="{stroke}"/>
<text x="20" y="35" class="title">{title}</text>
{body}
</svg>"#,
        w = width,
        h = height,
        rw = width.saturating_sub(1),
        rh = height.saturating_sub(1),
        title_color = theme.title,
        text_color = theme.text,
        bg = theme.background,
        stroke = theme.stroke,
        title = escape(title),
        body = body,
    )
}
