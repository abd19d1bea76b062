//! Card color themes.

/// Colors used by every card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub title: &'static str,
    pub text: &'static str,
    pub background: &'static str,
    pub stroke: &'static str,
    pub icon: &'static str,
    pub chart: &'static str,
}

pub const DEFAULT_THEME: &str = "default";

static THEMES: &[(&str, Theme)] = &[
    (
        "default",
        Theme {
            title: "#586e75",
            text: "#586e75",
            background: "#fffefe",
            stroke: "#e4e2e2",
            icon: "#b58900",
            chart: "#cb4b16",
        },
    ),
    (
        "dark",
        Theme {
            title: "#ffffff",
            text: "#9f9f9f",
            background: "#151515",
            stroke: "#2f2f2f",
            icon: "#79ff97",
            chart: "#ffffff",
        },
    ),
    (
        "radical",
        Theme {
            title: "#fe428e",
            text: "#a9fef7",
            background: "#141321",
            stroke: "#f8d847",
            icon: "#f8d847",
            chart: "#fe428e",
        },
    ),
    (
        "gruvbox",
        Theme {
            title: "#fabd2f",
            text: "#8ec07c",
            background: "#282828",
            stroke: "#3c3836",
            icon: "#fe8019",
            chart: "#b8bb26",
        },
    ),
    (
        "tokyonight",
        Theme {
            title: "#70a5fd",
            text: "#38bdae",
            background: "#1a1b27",
            stroke: "#24283b",
            icon: "#bf91f3",
            chart: "#7aa2f7",
        },
    ),
    (
        "onedark",
        Theme {
            title: "#e4bf7a",
            text: "#df6d74",
            background: "#282c34",
            stroke: "#3e4451",
            icon: "#8eb573",
            chart: "#61afef",
        },
    ),
    (
        "dracula",
        Theme {
            title: "#ff6e96",
            text: "#f8f8f2",
            background: "#282a36",
            stroke: "#44475a",
            icon: "#79dafa",
            chart: "#bd93f9",
        },
    ),
    (
        "nord",
        Theme {
            title: "#81a1c1",
            text: "#d8dee9",
            background: "#2e3440",
            stroke: "#3b4252",
            icon: "#88c0d0",
            chart: "#5e81ac",
        },
    ),
    (
        "solarized",
        Theme {
            title: "#268bd2",
            text: "#657b83",
            background: "#fdf6e3",
            stroke: "#eee8d5",
            icon: "#b58900",
            chart: "#2aa198",
        },
    ),
];

/// Look up a theme by name, falling back to the default theme.
pub fn theme(name: &str) -> &'static Theme {
    let name = name.trim();
    THEMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .or_else(|| THEMES.iter().find(|(n, _)| *n == DEFAULT_THEME))
        .map(|(_, t)| t)
        .unwrap_or(&THEMES[0].1)
}

/// Names of all known themes.
pub fn theme_names() -> impl Iterator<Item = &'static str> {
    THEMES.iter().map(|(n, _)| *n)
}
