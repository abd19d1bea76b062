//! Most-commit-language card.

use crate::cards::svg::{escape, frame};
use crate::cards::theme::Theme;
use crate::github::LanguageCount;

const WIDTH: u32 = 340;
const HEIGHT: u32 = 200;
const TOP_LANGUAGES: usize = 5;
const BAR_WIDTH: u64 = 120;

/// Drop excluded languages (case-insensitive) and keep the top entries.
pub fn select_languages(languages: &[LanguageCount], exclude: &[String]) -> Vec<LanguageCount> {
    languages
        .iter()
        .filter(|l| !exclude.iter().any(|e| e.eq_ignore_ascii_case(&l.name)))
        .filter(|l| l.commits > 0)
        .take(TOP_LANGUAGES)
        .cloned()
        .collect()
}

pub fn render_commit_language_card(languages: &[LanguageCount], theme: &Theme) -> String {
    let total: u64 = languages.iter().map(|l| l.commits).sum();

    let body = if languages.is_empty() {
        r#"<text x="20" y="100" class="text">No commit languages found</text>"#.to_string()
    } else {
        languages
            .iter()
            .enumerate()
            .map(|(i, language)| {
                let y = 65 + i * 25;
                let bar = (language.commits * BAR_WIDTH).checked_div(total).unwrap_or(0).max(2);
                format!(
                    r#"<rect x="20" y="{ry}" width="10" height="10" fill="{color}"/><text x="38" y="{y}" class="text">{name}</text><rect x="150" y="{ry}" rx="3" width="{bar}" height="10" fill="{color}"/><text x="280" y="{y}" class="small">{commits}</text>"#,
                    ry = y - 10,
                    y = y,
                    color = escape(&language.color),
                    name = escape(&language.name),
                    bar = bar,
                    commits = language.commits,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    frame(WIDTH, HEIGHT, theme, "Top Languages by Commit", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::theme::{theme, DEFAULT_THEME};

    fn lang(name: &str, commits: u64) -> LanguageCount {
        LanguageCount {
            name: name.into(),
            color: "#123456".into(),
            commits,
        }
    }

    #[test]
    fn test_select_excludes_case_insensitively() {
        let langs = vec![lang("C++", 50), lang("Rust", 40), lang("HTML", 10)];
        let selected = select_languages(&langs, &["c++".into(), "html".into()]);
        assert_eq!(selected, vec![lang("Rust", 40)]);
    }

    #[test]
    fn test_select_keeps_top_five() {
        let langs: Vec<_> = (0..8).map(|i| lang(&format!("L{}", i), 100 - i)).collect();
        let selected = select_languages(&langs, &[]);
        assert_eq!(selected.len(), 5);
        assert_eq!(selected[0].name, "L0");
    }

    #[test]
    fn test_render() {
        let svg = render_commit_language_card(&[lang("Rust", 30), lang("Go", 10)], theme(DEFAULT_THEME));
        assert!(svg.contains("<svg"));
        assert!(svg.contains(">Rust<"));
        assert!(svg.contains(r#"width="90""#));
    }

    #[test]
    fn test_render_empty() {
        let svg = render_commit_language_card(&[], theme(DEFAULT_THEME));
        assert!(svg.contains("No commit languages found"));
    }
}
