//! Layout components (header, error banner, status bar)

use crate::app::App;
use crate::platform::{ADD_LIFT_SHORTCUT, PASTE_SHORTCUT, REMOVE_LIFT_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::FormFocus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const APP_TITLE: &str = "RepMate Signup";
pub const ERROR_BANNER: &str = "Something went wrong. Please try again.";

/// Areas of the form screen
pub struct FormLayout {
    pub header: Rect,
    pub banner: Option<Rect>,
    pub body: Rect,
    pub status: Rect,
}

/// Split the screen; the banner row exists only after a failed submission
pub fn create_layout(area: Rect, with_banner: bool) -> FormLayout {
    let banner_height = if with_banner { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Header
            Constraint::Length(banner_height), // Error banner
            Constraint::Min(0),                // Form
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    FormLayout {
        header: chunks[0],
        banner: with_banner.then_some(chunks[1]),
        body: chunks[2],
        status: chunks[3],
    }
}

/// Draw the title line with a completeness indicator
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let indicator = if app.state.is_complete() {
        Span::styled(" ● ready to submit", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ required fields missing", Style::default().fg(Color::Yellow))
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {APP_TITLE} "),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        indicator,
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

pub fn draw_error_banner(frame: &mut Frame, area: Rect) {
    let banner = Paragraph::new(Span::styled(
        ERROR_BANNER,
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(banner, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    if app.state.is_submitting() {
        spans.push(Span::styled(" ● ", Style::default().fg(Color::Yellow)));
    } else {
        spans.push(Span::raw(" "));
    }

    match &app.status_message {
        Some(msg) => spans.push(Span::styled(msg.as_str(), Style::default().fg(Color::Yellow))),
        None => spans.push(Span::styled(
            focus_hints(app.state.focus),
            Style::default().fg(Color::Gray),
        )),
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}

/// Keyboard hints for the focused element
fn focus_hints(focus: FormFocus) -> String {
    let action = match focus {
        FormFocus::ProgramStyle(_) => "←/→:move  Space:select  ".to_string(),
        FormFocus::ProgramFrequency => "←/→:change  ".to_string(),
        FormFocus::Audience(_) | FormFocus::PreferDiscussion => "Space:toggle  ".to_string(),
        FormFocus::RemoveLift(_) | FormFocus::AddLift | FormFocus::Submit => {
            "Enter:press  ".to_string()
        }
        FormFocus::FilePath => format!("Enter:select file  {PASTE_SHORTCUT}:paste  "),
        FormFocus::Lift(..) => format!("{REMOVE_LIFT_SHORTCUT}:remove lift  {PASTE_SHORTCUT}:paste  "),
        FormFocus::Coach(_) => format!("{PASTE_SHORTCUT}:paste  "),
    };
    format!("Tab:next  Shift+Tab:prev  {action}{ADD_LIFT_SHORTCUT}:add lift  {SUBMIT_SHORTCUT}:submit  Esc:quit")
}
