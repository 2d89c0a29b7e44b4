//! Button component for TUI

use crate::state::Palette;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a bordered button; disabled buttons are muted even when focused
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
    palette: &Palette,
) {
    let color = match (is_enabled, is_selected) {
        (false, _) => palette.muted,
        (true, true) => palette.accent,
        (true, false) => palette.success,
    };

    let border_style = Style::default().fg(color);
    let text_style = if is_selected && is_enabled {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };

    let label = if is_selected {
        format!("▶ {content} ◀")
    } else {
        content.to_string()
    };

    let paragraph = Paragraph::new(label)
        .style(text_style)
        .alignment(Alignment::Center);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}
