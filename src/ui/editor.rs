//! Schema editor pane

use crate::app::App;
use crate::state::Focus;
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const PLACEHOLDER: &str = "Enter your JSON schema here...";

/// Draw the editor and place the terminal cursor when it has focus
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.state.theme.palette();
    let editor = &app.state.editor;
    let focused = app.state.focus == Focus::Editor;

    let block = Block::default()
        .title(format!(" Schema (JSON) · {} lines ", editor.line_count()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            palette.accent
        } else {
            palette.muted
        }));
    let inner = block.inner(area);

    let (row, column) = editor.cursor_position();
    let scroll = scroll_offset(row, inner.height);

    let paragraph = if editor.is_empty() {
        Paragraph::new(Span::styled(
            PLACEHOLDER,
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        let lines: Vec<Line> = editor
            .text()
            .split('\n')
            .map(|l| Line::from(Span::styled(l, Style::default().fg(palette.text))))
            .collect();
        Paragraph::new(lines).scroll((scroll, 0))
    };
    frame.render_widget(paragraph.block(block), area);

    if focused && inner.width > 0 && inner.height > 0 {
        let x = inner.x + (column as u16).min(inner.width - 1);
        let y = inner.y + (row as u16).saturating_sub(scroll);
        frame.set_cursor_position(Position::new(x, y));
    }
}

/// Vertical scroll that keeps the cursor row inside the visible height
fn scroll_offset(row: usize, height: u16) -> u16 {
    let row = row as u16;
    if height == 0 {
        return row;
    }
    row.saturating_sub(height - 1)
}
