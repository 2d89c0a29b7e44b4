//! Application state and core logic

use crate::config::TuiConfig;
use crate::debounce::{Debounced, Debouncer};
use crate::platform::ACTION_MODIFIER;
use crate::sink::SubmissionSink;
use crate::state::forms::Form;
use crate::state::{AppState, EditorBuffer, Focus, ThemeDetector};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::UnboundedReceiver;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Loaded user configuration
    config: TuiConfig,
    /// Destination for downloaded submissions
    sink: Box<dyn SubmissionSink>,
    /// Resolves the theme at startup and whenever the terminal regains focus
    detector: Box<dyn ThemeDetector>,
    /// Delays schema re-parsing until the editor goes quiet
    debouncer: Debouncer<String>,
    /// Whether the app should quit
    quit: bool,
    /// Feedback message shown in the status bar
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App instance.
    ///
    /// Initial editor text is parsed right away. The returned receiver yields
    /// debounced editor text and must be fed back through `on_debounced`.
    pub fn new(
        config: TuiConfig,
        sink: Box<dyn SubmissionSink>,
        detector: Box<dyn ThemeDetector>,
        initial_text: Option<String>,
    ) -> (Self, UnboundedReceiver<Debounced<String>>) {
        let (debouncer, rx) = Debouncer::new(config.debounce_delay());
        let theme = detector.detect(config.theme_preference());
        let editor = initial_text.map(EditorBuffer::with_text).unwrap_or_default();

        let mut state = AppState::new(editor, theme);
        if !state.editor.is_empty() {
            let text = state.editor.text().to_string();
            state.session.on_schema_text_change(&text);
        }

        let app = Self {
            state,
            config,
            sink,
            detector,
            debouncer,
            quit: false,
            status_message: None,
        };
        (app, rx)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Feed a debounced editor snapshot back in; stale ones are dropped
    pub fn on_debounced(&mut self, delivered: Debounced<String>) {
        if let Some(text) = self.debouncer.accept(delivered) {
            self.state.schema_pending = false;
            self.state.session.on_schema_text_change(&text);
        }
    }

    /// Terminal regained focus: the user may have switched color scheme
    pub fn on_focus_gained(&mut self) {
        let detected = self.detector.detect(self.config.theme_preference());
        if detected != self.state.theme {
            tracing::info!(theme = detected.label(), "theme re-detected");
            self.state.theme = detected;
        }
    }

    /// Bracketed paste lands in the editor regardless of focus
    pub fn on_paste(&mut self, text: &str) {
        self.state.focus = Focus::Editor;
        self.state.editor.insert_str(text);
        self.schedule_reparse();
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        if key.code == KeyCode::F(2) {
            self.state.focus.toggle();
            return Ok(());
        }

        if key.modifiers.contains(ACTION_MODIFIER) {
            match key.code {
                KeyCode::Char('y') => {
                    self.copy_schema();
                    return Ok(());
                }
                KeyCode::Char('s') => {
                    self.submit();
                    return Ok(());
                }
                KeyCode::Char('d') => {
                    self.download_submission().await;
                    return Ok(());
                }
                KeyCode::Char('t') => {
                    self.toggle_theme();
                    return Ok(());
                }
                _ => {}
            }
        }

        match self.state.focus {
            Focus::Editor => self.handle_editor_key(key),
            Focus::Preview => self.handle_preview_key(key),
        }
        Ok(())
    }

    /// Handle keys in the schema editor
    fn handle_editor_key(&mut self, key: KeyEvent) {
        let editor = &mut self.state.editor;
        let changed = match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                editor.insert_char(c);
                true
            }
            KeyCode::Enter => {
                editor.newline();
                true
            }
            KeyCode::Tab => {
                editor.insert_str("  ");
                true
            }
            KeyCode::Backspace => editor.backspace(),
            KeyCode::Delete => editor.delete(),
            KeyCode::Left => {
                editor.move_left();
                false
            }
            KeyCode::Right => {
                editor.move_right();
                false
            }
            KeyCode::Up => {
                editor.move_up();
                false
            }
            KeyCode::Down => {
                editor.move_down();
                false
            }
            KeyCode::Home => {
                editor.move_home();
                false
            }
            KeyCode::End => {
                editor.move_end();
                false
            }
            _ => false,
        };

        if changed {
            self.schedule_reparse();
        }
    }

    /// Handle keys in the form preview
    fn handle_preview_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.state.focus = Focus::Editor;
            return;
        }

        let Some(form) = self.state.session.form_mut() else {
            return;
        };

        if form.is_submit_active() {
            match key.code {
                KeyCode::Tab | KeyCode::Down => form.next_field(),
                KeyCode::BackTab | KeyCode::Up => form.prev_field(),
                KeyCode::Enter | KeyCode::Char(' ') => self.submit(),
                _ => {}
            }
            return;
        }

        let (free_text, multiline) = form
            .active()
            .map(|f| (f.spec.is_free_text(), f.spec.is_multiline()))
            .unwrap_or((false, false));

        match key.code {
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Enter if multiline => form.newline(),
            KeyCode::Enter => form.next_field(),
            KeyCode::Backspace if free_text => form.backspace(),
            KeyCode::Char(c) if free_text && !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.input_char(c)
            }
            KeyCode::Right | KeyCode::Char(' ') if !free_text => form.next_option(),
            KeyCode::Left if !free_text => form.prev_option(),
            _ => {}
        }
    }

    fn schedule_reparse(&mut self) {
        self.state.schema_pending = true;
        self.debouncer.schedule(self.state.editor.text().to_string());
    }

    /// Submit the form if it is currently submittable
    pub fn submit(&mut self) {
        if !self.state.session.is_submittable() {
            let errors = self
                .state
                .session
                .form()
                .map(|form| form.field_errors())
                .unwrap_or_default();
            tracing::debug!(?errors, "submit ignored while the form is blocked");
            return;
        }
        match self.state.session.on_submit_attempt() {
            Ok(record) => {
                self.state.submitted_at = Some(Local::now());
                match record.to_pretty_json() {
                    Ok(json) => tracing::info!("submission:\n{json}"),
                    Err(err) => tracing::warn!("could not render submission: {err}"),
                }
                self.status_message = Some("Form submitted successfully!".to_string());
            }
            Err(err) => {
                tracing::warn!("{err}");
            }
        }
    }

    /// Copy the loaded schema to the clipboard as pretty JSON
    fn copy_schema(&mut self) {
        let Some(json) = self.state.session.schema_json() else {
            self.status_message = Some("No valid schema to copy".to_string());
            return;
        };
        let result = json
            .map_err(anyhow::Error::from)
            .and_then(|text| self.copy_to_clipboard(&text));
        match result {
            Ok(()) => self.status_message = Some("JSON copied to clipboard!".to_string()),
            Err(err) => self.push_error(format!("Failed to copy JSON: {err}")),
        }
    }

    /// Write the last submission through the sink
    async fn download_submission(&mut self) {
        let Some(record) = self.state.session.last_submission().cloned() else {
            self.status_message = Some("Nothing submitted yet".to_string());
            return;
        };
        match self.sink.store(&record).await {
            Ok(path) => self.status_message = Some(format!("Saved {}", path.display())),
            Err(err) => self.push_error(format!("Failed to download submission: {err:#}")),
        }
    }

    /// Switch between dark and light and remember the choice
    fn toggle_theme(&mut self) {
        self.state.theme = self.state.theme.toggle();
        self.config.theme = Some(self.state.theme.as_preference());
        if let Err(err) = self.config.save() {
            self.push_error(format!("Failed to save config: {err}"));
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }

    pub fn is_schema_pending(&self) -> bool {
        self.state.schema_pending && self.debouncer.is_pending()
    }
}
