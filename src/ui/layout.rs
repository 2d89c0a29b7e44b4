//! Layout components (panes, banner, status bar)

use crate::app::App;
use crate::platform::{
    COPY_SHORTCUT, DOWNLOAD_SHORTCUT, QUIT_SHORTCUT, SUBMIT_SHORTCUT, SWITCH_PANE_SHORTCUT,
    THEME_SHORTCUT,
};
use crate::state::Focus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Screen regions
pub struct Areas {
    pub editor: Rect,
    pub banner: Option<Rect>,
    pub preview: Rect,
    pub status: Rect,
}

/// Split the screen into editor (left), preview (right) and status bar
pub fn create_layout(area: Rect, banner_rows: u16) -> Areas {
    // Reserve bottom line for status bar
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let (editor, banner) = if banner_rows > 0 {
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(banner_rows)])
            .split(panes[0]);
        (left[0], Some(left[1]))
    } else {
        (panes[0], None)
    };

    Areas {
        editor,
        banner,
        preview: panes[1],
        status: rows[1],
    }
}

/// Draw the schema error banner under the editor
pub fn draw_banner(frame: &mut Frame, area: Rect, message: &str, app: &App) {
    let palette = app.state.theme.palette();
    let banner = Paragraph::new(Span::styled(message, Style::default().fg(palette.error)))
        .wrap(Wrap { trim: true });
    frame.render_widget(banner, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.state.theme.palette();
    let mut spans = vec![Span::styled(
        format!(" {} ", app.state.focus.label()),
        Style::default().fg(palette.accent),
    )];

    spans.push(Span::styled(
        get_focus_hints(app.state.focus),
        Style::default().fg(palette.muted),
    ));

    if let Some(status) = app.state.session.status() {
        let color = if status.submittable {
            palette.success
        } else {
            palette.muted
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("form {}", status.summary()),
            Style::default().fg(color),
        ));
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(palette.success)));
    }

    if let Some(at) = app.state.submitted_at {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("submitted {}", at.format("%H:%M:%S")),
            Style::default().fg(palette.muted),
        ));
    }

    let right = format!(
        " {}:theme({}) {}:quit ",
        THEME_SHORTCUT,
        app.state.theme.label(),
        QUIT_SHORTCUT
    );
    let right_width = (right.chars().count() as u16).min(area.width);

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(palette.status_bg));
    frame.render_widget(status, area);

    let right_area = Rect {
        x: area.x + area.width - right_width,
        width: right_width,
        ..area
    };
    let right_widget = Paragraph::new(right)
        .style(Style::default().bg(palette.status_bg).fg(palette.muted));
    frame.render_widget(right_widget, right_area);
}

/// Rows the banner needs when wrapped to the editor width
pub fn banner_rows(message: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    let chars = message.chars().count().max(1);
    chars.div_ceil(width).min(3) as u16
}

/// Get keyboard hints for the focused pane
fn get_focus_hints(focus: Focus) -> String {
    match focus {
        Focus::Editor => format!(
            "{}:preview  {}:copy  {}:download",
            SWITCH_PANE_SHORTCUT, COPY_SHORTCUT, DOWNLOAD_SHORTCUT
        ),
        Focus::Preview => format!(
            "Tab:next  ←/→:option  {}:submit  {}:editor  {}:download",
            SUBMIT_SHORTCUT, SWITCH_PANE_SHORTCUT, DOWNLOAD_SHORTCUT
        ),
    }
}
