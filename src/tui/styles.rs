//! TUI theme and styling

use ratatui::style::Color;

use crate::planner::{Category, DEFAULT_CLASS_COLOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Unknown names fall back to light.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "dark" => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    // Background and borders
    pub background: Color,
    pub border: Color,
    pub selection: Color,

    // Text colors
    pub title: Color,
    pub text: Color,
    pub dimmed: Color,
    pub hint: Color,

    // Status colors
    pub current: Color,
    pub success: Color,
    pub error: Color,
    pub reminder: Color,

    // Categories
    pub personal: Color,
    pub study: Color,
    pub urgent: Color,

    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(245, 243, 238),
            border: Color::Rgb(190, 184, 172),
            selection: Color::Rgb(225, 220, 208),

            title: Color::Rgb(34, 30, 26),
            text: Color::Rgb(52, 48, 44),
            dimmed: Color::Rgb(150, 144, 134),
            hint: Color::Rgb(110, 104, 96),

            current: Color::Rgb(30, 102, 245),
            success: Color::Rgb(64, 160, 43),
            error: Color::Rgb(210, 15, 57),
            reminder: Color::Rgb(223, 142, 29),

            personal: Color::Rgb(64, 160, 43),
            study: Color::Rgb(30, 102, 245),
            urgent: Color::Rgb(210, 15, 57),

            accent: Color::Rgb(34, 30, 26),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(26, 27, 38),
            border: Color::Rgb(65, 72, 104),
            selection: Color::Rgb(41, 46, 66),

            title: Color::Rgb(192, 202, 245),
            text: Color::Rgb(169, 177, 214),
            dimmed: Color::Rgb(86, 95, 137),
            hint: Color::Rgb(122, 162, 247),

            current: Color::Rgb(125, 207, 255),
            success: Color::Rgb(158, 206, 106),
            error: Color::Rgb(247, 118, 142),
            reminder: Color::Rgb(224, 175, 104),

            personal: Color::Rgb(158, 206, 106),
            study: Color::Rgb(122, 162, 247),
            urgent: Color::Rgb(247, 118, 142),

            accent: Color::Rgb(192, 202, 245),
        }
    }

    pub fn category(&self, category: Category) -> Color {
        match category {
            Category::Personal => self.personal,
            Category::Study => self.study,
            Category::Urgent => self.urgent,
        }
    }

    /// Color for a class block. Named and `#rrggbb` colors are used as-is;
    /// the default marker and anything unrecognized fall back to the current-time color.
    pub fn class_color(&self, color: Option<&str>) -> Color {
        match color.map(str::trim) {
            None | Some("") => self.current,
            Some(name) if name.eq_ignore_ascii_case(DEFAULT_CLASS_COLOR) => self.current,
            Some(name) => name.parse().unwrap_or(self.current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_and_toggle() {
        assert_eq!(ThemeMode::parse("Dark"), ThemeMode::Dark);
        assert_eq!(ThemeMode::parse("solarized"), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggle(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggle().toggle(), ThemeMode::Dark);
    }

    #[test]
    fn test_for_mode_backgrounds_differ() {
        let light = Theme::for_mode(ThemeMode::Light);
        let dark = Theme::for_mode(ThemeMode::Dark);
        assert_ne!(light.background, dark.background);
    }

    #[test]
    fn test_category_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.category(Category::Urgent), theme.urgent);
        assert_eq!(theme.category(Category::Study), theme.study);
    }

    #[test]
    fn test_class_color() {
        let theme = Theme::light();
        assert_eq!(theme.class_color(None), theme.current);
        assert_eq!(theme.class_color(Some("accent")), theme.current);
        assert_eq!(theme.class_color(Some("red")), Color::Red);
        assert_eq!(theme.class_color(Some("#ff8800")), Color::Rgb(255, 136, 0));
        assert_eq!(theme.class_color(Some("not a color")), theme.current);
    }
}
