//! Color themes
//!
//! Maps the core's logical text colors and fill kinds to terminal colors.
//! Themes are registered once in a global registry and selected by name via
//! `--theme`; unknown names fall back to the default.

use std::collections::HashMap;

use lore_core::TextColor;
use once_cell::sync::Lazy;
use ratatui::style::Color;

pub const DEFAULT_THEME: &str = "parchment";

/// Terminal colors for everything the viewer draws.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub display_name: String,
    pub background: Color,
    pub text: Color,
    /// Quotes, separators, secondary chrome.
    pub dim: Color,
    pub link: Color,
    pub code: Color,
    pub code_background: Color,
    pub rule: Color,
    pub selection: Color,
    pub scrollbar_thumb: Color,
    pub scrollbar_track: Color,
}

impl Theme {
    /// Map a logical text color through this theme.
    pub fn text_color(&self, color: TextColor) -> Color {
        match color {
            TextColor::Default => self.text,
            TextColor::Quote => self.dim,
            TextColor::Link => self.link,
            TextColor::Code => self.code,
        }
    }
}

fn parchment() -> Theme {
    Theme {
        name: "parchment".to_string(),
        display_name: "Parchment".to_string(),
        background: Color::Rgb(38, 33, 27),
        text: Color::Rgb(222, 210, 186),
        dim: Color::Rgb(150, 138, 115),
        link: Color::Rgb(122, 168, 116),
        code: Color::Rgb(210, 166, 121),
        code_background: Color::Rgb(52, 46, 38),
        rule: Color::Rgb(110, 99, 80),
        selection: Color::Rgb(70, 62, 50),
        scrollbar_thumb: Color::Rgb(150, 138, 115),
        scrollbar_track: Color::Rgb(52, 46, 38),
    }
}

fn midnight() -> Theme {
    Theme {
        name: "midnight".to_string(),
        display_name: "Midnight".to_string(),
        background: Color::Rgb(18, 20, 28),
        text: Color::Rgb(200, 206, 220),
        dim: Color::Rgb(110, 118, 140),
        link: Color::Rgb(120, 170, 240),
        code: Color::Rgb(230, 190, 120),
        code_background: Color::Rgb(30, 34, 46),
        rule: Color::Rgb(70, 76, 96),
        selection: Color::Rgb(44, 50, 68),
        scrollbar_thumb: Color::Rgb(110, 118, 140),
        scrollbar_track: Color::Rgb(30, 34, 46),
    }
}

fn gruvbox_dark() -> Theme {
    Theme {
        name: "gruvbox_dark".to_string(),
        display_name: "Gruvbox Dark".to_string(),
        background: Color::Rgb(40, 40, 40),
        text: Color::Rgb(235, 219, 178),
        dim: Color::Rgb(146, 131, 116),
        link: Color::Rgb(131, 165, 152),
        code: Color::Rgb(250, 189, 47),
        code_background: Color::Rgb(60, 56, 54),
        rule: Color::Rgb(102, 92, 84),
        selection: Color::Rgb(80, 73, 69),
        scrollbar_thumb: Color::Rgb(146, 131, 116),
        scrollbar_track: Color::Rgb(60, 56, 54),
    }
}

/// Uses the terminal's own palette; for people who configure their emulator.
fn terminal() -> Theme {
    Theme {
        name: "terminal".to_string(),
        display_name: "Terminal Default".to_string(),
        background: Color::Reset,
        text: Color::Reset,
        dim: Color::DarkGray,
        link: Color::Cyan,
        code: Color::Yellow,
        code_background: Color::Black,
        rule: Color::DarkGray,
        selection: Color::Blue,
        scrollbar_thumb: Color::Gray,
        scrollbar_track: Color::Black,
    }
}

pub struct ThemeRegistry {
    themes: HashMap<String, Theme>,
    ordered_names: Vec<String>,
}

impl ThemeRegistry {
    fn new() -> Self {
        let mut registry = Self {
            themes: HashMap::new(),
            ordered_names: Vec::new(),
        };
        registry.register(parchment());
        registry.register(midnight());
        registry.register(gruvbox_dark());
        registry.register(terminal());
        registry
    }

    fn register(&mut self, theme: Theme) {
        self.ordered_names.push(theme.name.clone());
        self.themes.insert(theme.name.clone(), theme);
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Named theme, or the default when the name is unknown.
    pub fn get_or_default(&self, name: &str) -> &Theme {
        self.themes
            .get(name)
            .or_else(|| self.themes.get(DEFAULT_THEME))
            .expect("default theme is always registered")
    }

    pub fn list(&self) -> impl Iterator<Item = (&str, &Theme)> {
        self.ordered_names
            .iter()
            .filter_map(|name| self.themes.get(name).map(|t| (name.as_str(), t)))
    }

    pub fn count(&self) -> usize {
        self.themes.len()
    }
}

pub static THEME_REGISTRY: Lazy<ThemeRegistry> = Lazy::new(ThemeRegistry::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_falls_back_to_default() {
        let theme = THEME_REGISTRY.get_or_default("no-such-theme");
        assert_eq!(theme.name, DEFAULT_THEME);
    }

    #[test]
    fn known_names_resolve() {
        for name in ["parchment", "midnight", "gruvbox_dark", "terminal"] {
            assert_eq!(THEME_REGISTRY.get_or_default(name).name, name);
        }
    }

    #[test]
    fn list_is_registration_ordered() {
        let names: Vec<&str> = THEME_REGISTRY.list().map(|(name, _)| name).collect();
        assert_eq!(names[0], DEFAULT_THEME);
        assert_eq!(names.len(), THEME_REGISTRY.count());
    }
}
