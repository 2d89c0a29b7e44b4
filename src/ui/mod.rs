//! UI module for rendering the TUI

mod components;
mod editor;
mod forms;
mod layout;
mod terminal;

pub use terminal::{TerminalSession, TerminalThemeDetector, ThemeSubscription};

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let banner = app.state.session.banner();

    let banner_rows = banner
        .as_deref()
        .map(|msg| layout::banner_rows(msg, area.width / 2))
        .unwrap_or(0);
    let areas = layout::create_layout(area, banner_rows);

    editor::draw(frame, areas.editor, app);
    if let (Some(banner_area), Some(message)) = (areas.banner, banner.as_deref()) {
        layout::draw_banner(frame, banner_area, message, app);
    }
    forms::draw_preview(frame, areas.preview, app);
    layout::draw_status_bar(frame, areas.status, app);

    // Error dialog overlays everything else
    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error, &app.state.theme.palette());
    }
}
