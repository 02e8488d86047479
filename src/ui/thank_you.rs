//! Confirmation shown once a signup is stored

use super::components::Dialog;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

pub const THANK_YOU_TITLE: &str = "Thank you for signing up!";
pub const THANK_YOU_MESSAGE: &str = "We will review your signup form and reach out to you shortly.";

pub fn draw(frame: &mut Frame) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::raw("Press "),
        Span::styled("q", key_style),
        Span::raw(" or "),
        Span::styled("Esc", key_style),
        Span::raw(" to exit"),
    ];

    Dialog {
        title: THANK_YOU_TITLE,
        message: THANK_YOU_MESSAGE,
        hint,
        color: Color::Green,
        max_width: 72,
    }
    .render(frame);
}
