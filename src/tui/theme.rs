//! Dashboard color schemes.

use ratatui::prelude::*;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Parse a theme name, falling back to dark for anything unknown
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::Light,
            _ => Self::Dark,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    #[must_use]
    pub const fn colors(self) -> ColorScheme {
        match self {
            Self::Dark => ColorScheme::dark(),
            Self::Light => ColorScheme::light(),
        }
    }
}

/// Semantic colors for dashboard elements.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    pub primary: Color,
    pub accent: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub background: Color,
    pub text: Color,
    pub text_muted: Color,
    pub selection: Color,

    // Score bands
    pub strong: Color,
    pub moderate: Color,
    pub weak: Color,
}

impl ColorScheme {
    /// Dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            background: Color::Reset,
            text: Color::White,
            text_muted: Color::Gray,
            selection: Color::Rgb(60, 60, 80),
            strong: Color::Green,
            moderate: Color::Yellow,
            weak: Color::Red,
        }
    }

    /// Light theme
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Rgb(0, 100, 150),
            accent: Color::Rgb(180, 140, 0),
            muted: Color::Rgb(150, 150, 150),
            border: Color::Rgb(180, 180, 180),
            border_focused: Color::Rgb(0, 100, 150),
            background: Color::Rgb(255, 255, 255),
            text: Color::Rgb(30, 30, 30),
            text_muted: Color::Rgb(100, 100, 100),
            selection: Color::Rgb(200, 220, 240),
            strong: Color::Rgb(0, 128, 0),
            moderate: Color::Rgb(180, 140, 0),
            weak: Color::Rgb(200, 0, 0),
        }
    }

    /// Color band for a 0-100 score, matching the static reports
    #[must_use]
    pub fn score_color(&self, score: f64) -> Color {
        if score >= 80.0 {
            self.strong
        } else if score >= 60.0 {
            self.moderate
        } else {
            self.weak
        }
    }

    /// Border style depending on focus
    #[must_use]
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }
}
