//! URL-friendly language aliases.
//!
//! Names such as `C++` or `C#` are awkward in a query string, so the
//! `exclude` parameter also accepts the aliases below.

const ALIASES: &[(&str, &str)] = &[
    ("cpp", "c++"),
    ("csharp", "c#"),
    ("fsharp", "f#"),
    ("objective-cpp", "objective-c++"),
    ("objectivecpp", "objective-c++"),
    ("qsharp", "q#"),
    ("jupyter", "jupyter notebook"),
    ("vim", "vim script"),
];

/// Map an alias to its GitHub language name, lowercased.
pub fn translate_language(name: &str) -> String {
    let normalized = name.trim().to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, language)| language.to_string())
        .unwrap_or(normalized)
}

/// Parse a comma separated `exclude` list into lowercased language names.
pub fn parse_exclude_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(translate_language)
        .filter(|name| !name.is_empty())
        .collect()
}
