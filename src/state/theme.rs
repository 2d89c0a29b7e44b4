//! Color theme selection

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// What the user asked for in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Auto,
    Dark,
    Light,
}

/// Source of the theme for a preference; re-run when the terminal regains focus
#[cfg_attr(test, mockall::automock)]
pub trait ThemeDetector: Send + Sync {
    fn detect(&self, preference: ThemePreference) -> Theme;
}

/// Theme in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Resolve a preference. `auto` reads the terminal's `COLORFGBG` hint
    /// (`"fg;bg"`); a background of 7 or 15 means a light terminal.
    pub fn detect(preference: ThemePreference, colorfgbg: Option<&str>) -> Self {
        match preference {
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::Light => Theme::Light,
            ThemePreference::Auto => {
                let background = colorfgbg
                    .and_then(|hint| hint.rsplit(';').next())
                    .and_then(|bg| bg.trim().parse::<u8>().ok());
                match background {
                    Some(7) | Some(15) => Theme::Light,
                    _ => Theme::Dark,
                }
            }
        }
    }

    /// Detect from the `COLORFGBG` the process was started with
    pub fn detect_from_env(preference: ThemePreference) -> Self {
        let hint = std::env::var("COLORFGBG").ok();
        Self::detect(preference, hint.as_deref())
    }

    pub fn toggle(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_preference(&self) -> ThemePreference {
        match self {
            Theme::Dark => ThemePreference::Dark,
            Theme::Light => ThemePreference::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Dark => Palette {
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                error: Color::Red,
                success: Color::Green,
                status_bg: Color::DarkGray,
            },
            Theme::Light => Palette {
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                error: Color::Red,
                success: Color::Green,
                status_bg: Color::Gray,
            },
        }
    }
}

/// Colors every widget draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub error: Color,
    pub success: Color,
    pub status_bg: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_preferences_win() {
        assert_eq!(Theme::detect(ThemePreference::Dark, Some("0;15")), Theme::Dark);
        assert_eq!(Theme::detect(ThemePreference::Light, Some("15;0")), Theme::Light);
    }

    #[test]
    fn test_auto_reads_background() {
        assert_eq!(Theme::detect(ThemePreference::Auto, Some("0;15")), Theme::Light);
        assert_eq!(Theme::detect(ThemePreference::Auto, Some("0;7")), Theme::Light);
        assert_eq!(Theme::detect(ThemePreference::Auto, Some("15;0")), Theme::Dark);
        assert_eq!(Theme::detect(ThemePreference::Auto, Some("0;default;15")), Theme::Light);
    }

    #[test]
    fn test_auto_defaults_to_dark() {
        assert_eq!(Theme::detect(ThemePreference::Auto, None), Theme::Dark);
        assert_eq!(Theme::detect(ThemePreference::Auto, Some("garbage")), Theme::Dark);
    }

    #[test]
    fn test_toggle_and_preference() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle().as_preference(), ThemePreference::Dark);
    }

    #[test]
    fn test_preference_serialization() {
        let json = serde_json::to_string(&ThemePreference::Light).unwrap();
        assert_eq!(json, "\"light\"");
        let parsed: ThemePreference = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(parsed, ThemePreference::Auto);
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Theme::Dark.palette(), Theme::Light.palette());
    }
}
