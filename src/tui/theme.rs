//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;
use tracing::debug;

use crate::config::ThemePreference;

/// Terminal background luma above which the light palette is used
const LIGHT_LUMA_THRESHOLD: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Light => ThemeColors::light(),
            Theme::Dark => ThemeColors::dark(),
        }
    }
}

/// Pick the starting theme. `auto` asks the terminal for its background
/// brightness and falls back to dark when it does not answer.
///
/// Must run before the TUI takes over the terminal.
pub fn resolve_theme(preference: ThemePreference) -> Theme {
    match preference {
        ThemePreference::Light => Theme::Light,
        ThemePreference::Dark => Theme::Dark,
        ThemePreference::Auto => match terminal_light::luma() {
            Ok(luma) if luma > LIGHT_LUMA_THRESHOLD => Theme::Light,
            Ok(_) => Theme::Dark,
            Err(e) => {
                debug!(error = %e, "could not detect terminal background, using dark theme");
                Theme::Dark
            }
        },
    }
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub background: Color,
    pub foreground: Color,

    // Score-based colors (gold/silver/bronze ladder)
    pub score_high: Color,
    pub score_mid: Color,
    pub score_low: Color,
    pub bar_empty: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub index_color: Color,
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub badge_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(30, 30, 30),
            foreground: Color::White,
            score_high: Color::Yellow,
            score_mid: Color::Cyan,
            score_low: Color::Gray,
            bar_empty: Color::DarkGray,
            row_alt_bg: Color::Rgb(42, 42, 42),
            index_color: Color::DarkGray,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::White,
            badge_style: Style::new().fg(Color::White).bg(Color::Rgb(68, 68, 68)).bold(),
            status_bar_bg: Color::Rgb(51, 51, 51),
            status_key_color: Color::Yellow,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Yellow,
            popup_title: Style::new().fg(Color::Yellow).bold(),
            popup_bg: Color::Rgb(42, 42, 42),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(245, 245, 245),
            foreground: Color::Black,
            score_high: Color::Rgb(191, 144, 0),
            score_mid: Color::Rgb(0, 122, 255),
            score_low: Color::DarkGray,
            bar_empty: Color::Rgb(210, 210, 210),
            row_alt_bg: Color::White,
            index_color: Color::DarkGray,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::DarkGray,
            title_color: Color::Black,
            badge_style: Style::new().fg(Color::White).bg(Color::Rgb(0, 122, 255)).bold(),
            status_bar_bg: Color::Rgb(255, 212, 59),
            status_key_color: Color::Rgb(0, 122, 255),
            flash_success: Color::Rgb(0, 128, 0),
            flash_error: Color::Red,
            popup_border: Color::Rgb(0, 122, 255),
            popup_title: Style::new().fg(Color::Rgb(0, 122, 255)).bold(),
            popup_bg: Color::White,
        }
    }

    /// Returns the appropriate color for a score based on its percentage of max score
    pub fn score_color(&self, score: i64, max_score: i64) -> Color {
        let percentage = if max_score > 0 {
            (score as f64 / max_score as f64) * 100.0
        } else {
            0.0
        };

        if percentage >= 70.0 {
            self.score_high
        } else if percentage >= 40.0 {
            self.score_mid
        } else {
            self.score_low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn test_explicit_preference_skips_detection() {
        assert_eq!(resolve_theme(ThemePreference::Light), Theme::Light);
        assert_eq!(resolve_theme(ThemePreference::Dark), Theme::Dark);
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(ThemeColors::light().background, ThemeColors::dark().background);
        assert_eq!(Theme::Light.colors().foreground, Color::Black);
    }

    #[test]
    fn test_score_color_bands() {
        let colors = ThemeColors::dark();
        assert_eq!(colors.score_color(100, 100), colors.score_high);
        assert_eq!(colors.score_color(50, 100), colors.score_mid);
        assert_eq!(colors.score_color(10, 100), colors.score_low);
        assert_eq!(colors.score_color(0, 0), colors.score_low);
    }
}
