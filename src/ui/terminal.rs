//! Terminal lifetime guards

use anyhow::Result;
use crossterm::{
    event::{DisableBracketedPaste, DisableFocusChange, EnableBracketedPaste, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use std::time::Duration;
use terminal_colorsaurus::{color_scheme, ColorScheme, QueryOptions};

use crate::state::{Theme, ThemeDetector, ThemePreference};

/// Upper bound on waiting for the terminal to answer a background query
const BACKGROUND_QUERY_TIMEOUT: Duration = Duration::from_millis(200);

/// Raw mode, alternate screen and bracketed paste, restored on drop
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)?;
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Nothing sensible to do with a failure while tearing down
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Focus-change reporting used to re-detect the theme.
///
/// Acquired when the UI mounts and released when dropped; nothing outside
/// the holder sees focus events.
pub struct ThemeSubscription {
    _private: (),
}

impl ThemeSubscription {
    pub fn acquire() -> Result<Self> {
        execute!(io::stdout(), EnableFocusChange)?;
        tracing::debug!("theme subscription acquired");
        Ok(Self { _private: () })
    }
}

impl Drop for ThemeSubscription {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableFocusChange);
        tracing::debug!("theme subscription released");
    }
}

/// Asks the terminal for its background color (OSC 11).
///
/// Terminals that do not answer fall back to the `COLORFGBG` hint.
pub struct TerminalThemeDetector;

impl ThemeDetector for TerminalThemeDetector {
    fn detect(&self, preference: ThemePreference) -> Theme {
        if preference != ThemePreference::Auto {
            return Theme::detect(preference, None);
        }

        let mut options = QueryOptions::default();
        options.timeout = BACKGROUND_QUERY_TIMEOUT;
        match color_scheme(options) {
            Ok(ColorScheme::Dark) => Theme::Dark,
            Ok(ColorScheme::Light) => Theme::Light,
            Err(err) => {
                tracing::debug!("background query unanswered: {err}");
                Theme::detect_from_env(preference)
            }
        }
    }
}
