//! Application state definitions

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use super::editor::EditorBuffer;
use super::forms::FormSession;
use super::theme::Theme;

/// Which pane receives keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Editor,
    Preview,
}

impl Focus {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Editor => Self::Preview,
            Self::Preview => Self::Editor,
        };
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Editor => "Editor",
            Self::Preview => "Preview",
        }
    }
}

/// Everything the UI draws from
#[derive(Debug, Default)]
pub struct AppState {
    pub focus: Focus,
    pub editor: EditorBuffer,
    pub session: FormSession,
    pub theme: Theme,
    /// A schema re-parse is waiting for the editor to go quiet
    pub schema_pending: bool,
    /// When the last submission was accepted
    pub submitted_at: Option<DateTime<Local>>,
    errors: VecDeque<String>,
}

impl AppState {
    pub fn new(editor: EditorBuffer, theme: Theme) -> Self {
        Self {
            editor,
            theme,
            ..Default::default()
        }
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error currently shown in the dialog
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_toggle() {
        let mut focus = Focus::default();
        assert_eq!(focus, Focus::Editor);
        focus.toggle();
        assert_eq!(focus, Focus::Preview);
        assert_eq!(focus.label(), "Preview");
        focus.toggle();
        assert_eq!(focus, Focus::Editor);
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::default();
        assert!(!state.has_errors());
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
        state.dismiss_error();
        assert!(state.current_error().is_none());
    }

    #[test]
    fn test_new_keeps_editor_text() {
        let state = AppState::new(EditorBuffer::with_text("{}"), Theme::Light);
        assert_eq!(state.editor.text(), "{}");
        assert_eq!(state.theme, Theme::Light);
        assert!(state.session.form().is_none());
    }
}
