//! Live form preview rendering

use super::field_renderer::{draw_field, field_height};
use crate::app::App;
use crate::state::forms::{Form, FormStateMachine};
use crate::state::{Focus, Palette};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the preview pane
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.state.theme.palette();
    let focused = app.state.focus == Focus::Preview;

    let mut title = String::from(" Preview ");
    if app.is_schema_pending() {
        title.push_str("(updating…) ");
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            palette.accent
        } else {
            palette.muted
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match app.state.session.form() {
        Some(form) => draw_form(frame, inner, form, focused, &palette),
        None => {
            let empty = Paragraph::new(Span::styled(
                "No valid schema provided",
                Style::default().fg(palette.muted),
            ))
            .alignment(Alignment::Center);
            frame.render_widget(empty, inner);
        }
    }
}

fn draw_form(
    frame: &mut Frame,
    area: Rect,
    form: &FormStateMachine,
    focused: bool,
    palette: &Palette,
) {
    let header = vec![
        Line::from(Span::styled(
            form.title(),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            form.description(),
            Style::default().fg(palette.muted),
        )),
    ];
    let header_height = 3u16.min(area.height);
    frame.render_widget(
        Paragraph::new(header).wrap(Wrap { trim: true }),
        Rect {
            height: header_height,
            ..area
        },
    );

    let body = Rect {
        y: area.y + header_height,
        height: area.height - header_height,
        ..area
    };

    // Heights of every field plus the submit button as the final row
    let mut heights: Vec<u16> = form.fields().iter().map(field_height).collect();
    heights.push(BUTTON_HEIGHT);

    let active = form.active_field();
    let start = first_visible(&heights, active, body.height);

    let mut y = body.y;
    let bottom = body.y + body.height;
    for (index, height) in heights.iter().enumerate().skip(start) {
        if y + height > bottom {
            break;
        }
        let row = Rect {
            x: body.x,
            y,
            width: body.width,
            height: *height,
        };
        match form.fields().get(index) {
            Some(field) => draw_field(frame, row, field, focused && index == active, palette),
            None => {
                let width = body.width.min(24);
                let button = Rect {
                    x: body.x + (body.width - width) / 2,
                    width,
                    ..row
                };
                render_button(
                    frame,
                    button,
                    "Submit",
                    focused && form.is_submit_active(),
                    form.status().submittable,
                    palette,
                );
            }
        }
        y += height;
    }
}

/// First row to draw so that the active row fits in the available height
pub fn first_visible(heights: &[u16], active: usize, available: u16) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let active = active.min(heights.len() - 1);
    let mut start = 0;
    let mut used: u16 = heights[..=active].iter().sum();
    while used > available && start < active {
        used -= heights[start];
        start += 1;
    }
    start
}
