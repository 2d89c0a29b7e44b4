//! Field rendering utilities for the form preview

use crate::state::forms::{ChoiceStyle, FieldPhase, LineInput, RenderSpec, RenderedField};
use crate::state::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Text-area box height bounds, borders included
const MULTILINE_MIN: u16 = 5;
const MULTILINE_MAX: u16 = 8;

const CURSOR: &str = "▌";

/// Rows a field occupies: its bordered control plus one message row
pub fn field_height(field: &RenderedField) -> u16 {
    let control = match &field.spec {
        RenderSpec::SingleLine { .. } => 3,
        RenderSpec::MultiLine { .. } => {
            let lines = field.state.value.split('\n').count() as u16;
            (lines + 2).clamp(MULTILINE_MIN, MULTILINE_MAX)
        }
        RenderSpec::Choice {
            style: ChoiceStyle::Dropdown,
            ..
        } => 3,
        RenderSpec::Choice {
            style: ChoiceStyle::RadioGroup,
            options,
        } => options.len().max(1) as u16 + 2,
        RenderSpec::Hidden => 0,
    };
    control + 1
}

/// Draw a field control with its validation message underneath
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &RenderedField,
    is_active: bool,
    palette: &Palette,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let border_color = match (field.state.phase(), field.is_valid()) {
        (FieldPhase::Dirty, false) => palette.error,
        _ if is_active => palette.accent,
        (FieldPhase::Dirty, true) => palette.success,
        (FieldPhase::Pristine, _) => palette.muted,
    };

    let block = Block::default()
        .title(field_title(field))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let content = match &field.spec {
        RenderSpec::SingleLine { placeholder, .. } | RenderSpec::MultiLine { placeholder } => {
            text_lines(&field.state.value, placeholder.as_deref(), is_active, palette)
        }
        RenderSpec::Choice {
            style: ChoiceStyle::Dropdown,
            options,
        } => {
            let shown = options
                .iter()
                .find(|opt| opt.value == field.state.value)
                .map(|opt| opt.label.as_str())
                .unwrap_or(field.state.value.as_str());
            let arrows = Style::default().fg(if is_active {
                palette.accent
            } else {
                palette.muted
            });
            vec![Line::from(vec![
                Span::styled("◀ ", arrows),
                Span::styled(shown.to_string(), Style::default().fg(palette.text)),
                Span::styled(" ▶", arrows),
            ])]
        }
        RenderSpec::Choice {
            style: ChoiceStyle::RadioGroup,
            options,
        } => {
            let selected = field.selected_option();
            options
                .iter()
                .enumerate()
                .map(|(i, opt)| {
                    let mark = if selected == Some(i) { "(•) " } else { "( ) " };
                    Line::from(vec![
                        Span::styled(mark, Style::default().fg(palette.accent)),
                        Span::styled(opt.label.clone(), Style::default().fg(palette.text)),
                    ])
                })
                .collect()
        }
        RenderSpec::Hidden => Vec::new(),
    };

    frame.render_widget(
        Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .block(block),
        chunks[0],
    );

    if let Some(message) = validation_message(field, palette) {
        frame.render_widget(Paragraph::new(message), chunks[1]);
    }
}

/// Border title: the label, marked when the input expects an email address
fn field_title(field: &RenderedField) -> String {
    match &field.spec {
        RenderSpec::SingleLine {
            input: LineInput::Email,
            ..
        } => format!(" {} @ ", field.field.label),
        RenderSpec::SingleLine {
            input: LineInput::Text,
            ..
        }
        | RenderSpec::MultiLine { .. }
        | RenderSpec::Choice { .. }
        | RenderSpec::Hidden => format!(" {} ", field.field.label),
    }
}

/// Message row: the error or a confirmation, only once the field is touched
pub fn validation_message<'a>(field: &'a RenderedField, palette: &Palette) -> Option<Line<'a>> {
    if !field.state.touched {
        return None;
    }
    let line = match field.state.visible_error() {
        Some(error) => Line::from(Span::styled(error, Style::default().fg(palette.error))),
        None => Line::from(Span::styled(
            "Field is valid",
            Style::default().fg(palette.success),
        )),
    };
    Some(line)
}

fn text_lines<'a>(
    value: &'a str,
    placeholder: Option<&'a str>,
    is_active: bool,
    palette: &Palette,
) -> Vec<Line<'a>> {
    let cursor = Span::styled(if is_active { CURSOR } else { "" }, Style::default().fg(palette.accent));

    if value.is_empty() {
        let hint = Span::styled(
            placeholder.unwrap_or(""),
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::ITALIC),
        );
        return vec![Line::from(vec![cursor, hint])];
    }

    let mut lines: Vec<Line> = value
        .split('\n')
        .map(|l| Line::from(Span::styled(l, Style::default().fg(palette.text))))
        .collect();
    if let Some(last) = lines.last_mut() {
        last.spans.push(cursor);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{FormSchema, FormStateMachine};
    use crate::state::Theme;
    use serde_json::json;

    fn form() -> FormStateMachine {
        let raw = json!({
            "formTitle": "T",
            "formDescription": "D",
            "fields": [
                {"id": "name", "type": "text", "label": "Name", "required": true},
                {"id": "bio", "type": "textarea", "label": "Bio", "required": false},
                {"id": "plan", "type": "radio", "label": "Plan", "required": false,
                 "options": [{"value": "a", "label": "A"}, {"value": "b", "label": "B"},
                             {"value": "c", "label": "C"}]},
                {"id": "size", "type": "select", "label": "Size", "required": false,
                 "options": [{"value": "s", "label": "S"}]}
            ]
        });
        FormStateMachine::new(&FormSchema::validate(&raw).unwrap())
    }

    #[test]
    fn test_field_heights() {
        let form = form();
        let heights: Vec<u16> = form.fields().iter().map(field_height).collect();
        assert_eq!(heights, vec![4, 6, 6, 4]);
    }

    #[test]
    fn test_textarea_grows_with_content() {
        let mut form = form();
        form.on_field_change("bio", "1\n2\n3\n4\n5");
        assert_eq!(field_height(&form.fields()[1]), 8);
        form.on_field_change("bio", "1\n2\n3\n4\n5\n6\n7\n8\n9");
        assert_eq!(field_height(&form.fields()[1]), MULTILINE_MAX + 1);
    }

    #[test]
    fn test_validation_message_silent_until_touched() {
        let mut form = form();
        let palette = Theme::Dark.palette();
        assert!(validation_message(&form.fields()[0], &palette).is_none());

        form.on_field_change("name", "");
        let line = validation_message(&form.fields()[0], &palette).unwrap();
        assert_eq!(line.spans[0].style.fg, Some(palette.error));

        form.on_field_change("name", "Ann");
        let line = validation_message(&form.fields()[0], &palette).unwrap();
        assert_eq!(line.spans[0].content, "Field is valid");
    }

    #[test]
    fn test_email_fields_are_marked_in_title() {
        let raw = json!({
            "formTitle": "T",
            "formDescription": "D",
            "fields": [
                {"id": "name", "type": "text", "label": "Name", "required": true},
                {"id": "email", "type": "email", "label": "Email", "required": true}
            ]
        });
        let form = FormStateMachine::new(&FormSchema::validate(&raw).unwrap());
        assert_eq!(field_title(&form.fields()[0]), " Name ");
        assert_eq!(field_title(&form.fields()[1]), " Email @ ");
    }

    #[test]
    fn test_placeholder_shown_for_empty_value() {
        let palette = Theme::Dark.palette();
        let lines = text_lines("", Some("Enter your name"), false, &palette);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans[1].content, "Enter your name");
    }

    #[test]
    fn test_cursor_on_last_line_when_active() {
        let palette = Theme::Dark.palette();
        let lines = text_lines("a\nb", None, true, &palette);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans.last().unwrap().content, CURSOR);
    }
}
