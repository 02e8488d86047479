//! Field rendering utilities for forms

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn active_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Draw a bordered text field with its label in the title
pub fn draw_field_with_value(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    is_multiline: bool,
) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };

    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };
    let value_style = if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        style
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = if is_multiline {
        let mut lines: Vec<Line> = display_value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), value_style)))
            .collect();
        // Only the visible tail of long notes is shown
        let inner_height = area.height.saturating_sub(2) as usize;
        if lines.len() > inner_height && inner_height > 0 {
            lines.drain(..lines.len() - inner_height);
        }
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value, value_style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(active_style(is_active));

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw a single-line checkbox or radio option
pub fn draw_choice_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    checked: bool,
    radio: bool,
    focused: bool,
) {
    let marker = match (radio, checked) {
        (true, true) => "(•)",
        (true, false) => "( )",
        (false, true) => "[x]",
        (false, false) => "[ ]",
    };
    let pointer = if focused { "▸ " } else { "  " };

    let style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(pointer, Style::default().fg(Color::Yellow)),
        Span::styled(format!("{marker} {label}"), style),
    ]));
    frame.render_widget(paragraph, area);
}

/// Draw a select box whose value is changed with Left/Right
pub fn draw_select_field(frame: &mut Frame, area: Rect, label: &str, value: Option<&str>, is_active: bool) {
    let value_span = match value {
        Some(value) => Span::styled(value.to_string(), Style::default().fg(Color::White)),
        None => Span::styled("Select frequency", Style::default().fg(Color::DarkGray)),
    };
    let arrow_style = active_style(is_active);

    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled("◀ ", arrow_style),
        value_span,
        Span::styled(" ▶", arrow_style),
    ]));
    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(active_style(is_active));

    frame.render_widget(paragraph.block(block), area);
}
