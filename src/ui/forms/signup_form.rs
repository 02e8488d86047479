//! Signup form rendering
//!
//! The form is taller than most terminals, so it is laid out as a flat list of
//! rows with fixed heights and scrolled so the focused row stays visible.

use super::field_renderer::{draw_choice_field, draw_field_with_value, draw_select_field};
use crate::app::App;
use crate::state::{CoachField, FormFocus, LiftField, ProgramStyle, SignupState, TargetAudience};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const FIELD_HEIGHT: u16 = 3;
const NOTES_HEIGHT: u16 = 4;
/// Notes fields grow while focused
const FOCUSED_NOTES_HEIGHT: u16 = 8;

const LIFTS_HINT: &str = "Add as much or as little to this section as you'd like. \
Feel free to leave it blank if you'd prefer to go over your lifts via phone or video chat.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Heading(String),
    Hint(String),
    Text {
        label: String,
        value: String,
        multiline: bool,
    },
    Choice {
        label: &'static str,
        checked: bool,
        radio: bool,
    },
    Select {
        label: &'static str,
        value: Option<&'static str>,
    },
    Button {
        label: String,
        enabled: bool,
    },
}

/// One rendered row of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    /// Focus target owning this row, if it is interactive
    pub focus: Option<FormFocus>,
    pub height: u16,
    pub kind: RowKind,
}

impl FormRow {
    fn heading(title: impl Into<String>) -> Self {
        Self {
            focus: None,
            height: 2,
            kind: RowKind::Heading(title.into()),
        }
    }

    fn hint(text: impl Into<String>, height: u16) -> Self {
        Self {
            focus: None,
            height,
            kind: RowKind::Hint(text.into()),
        }
    }

    fn text(focus: FormFocus, label: impl Into<String>, value: &str, multiline: bool, height: u16) -> Self {
        Self {
            focus: Some(focus),
            height,
            kind: RowKind::Text {
                label: label.into(),
                value: value.to_string(),
                multiline,
            },
        }
    }

    fn choice(focus: FormFocus, label: &'static str, checked: bool, radio: bool) -> Self {
        Self {
            focus: Some(focus),
            height: 1,
            kind: RowKind::Choice {
                label,
                checked,
                radio,
            },
        }
    }

    fn button(focus: FormFocus, label: impl Into<String>, enabled: bool) -> Self {
        Self {
            focus: Some(focus),
            height: BUTTON_HEIGHT,
            kind: RowKind::Button {
                label: label.into(),
                enabled,
            },
        }
    }
}

fn coach_row(state: &SignupState, field: CoachField) -> Option<FormRow> {
    let value = state.coach.text(field)?;
    let height = if field.is_multiline() {
        if state.focus == FormFocus::Coach(field) {
            FOCUSED_NOTES_HEIGHT
        } else {
            NOTES_HEIGHT + 1
        }
    } else {
        FIELD_HEIGHT
    };
    Some(FormRow::text(
        FormFocus::Coach(field),
        field.label(),
        value,
        field.is_multiline(),
        height,
    ))
}

/// Lay out the whole form for the current state
pub fn build_rows(state: &SignupState, submit_enabled: bool) -> Vec<FormRow> {
    let coach = &state.coach;
    let mut rows = vec![FormRow::heading("Coach Information")];

    for field in [
        CoachField::FirstName,
        CoachField::LastName,
        CoachField::Email,
        CoachField::Phone,
        CoachField::Company,
    ] {
        rows.extend(coach_row(state, field));
    }

    rows.push(FormRow::heading("Program Details"));
    rows.push(FormRow::hint("Program Style", 1));
    for (index, option) in ProgramStyle::options().iter().enumerate() {
        let checked = coach
            .program_style
            .as_ref()
            .is_some_and(|style| style.same_option(option));
        rows.push(FormRow::choice(
            FormFocus::ProgramStyle(index),
            option.label(),
            checked,
            true,
        ));
    }
    rows.extend(coach_row(state, CoachField::OtherStyle));

    rows.push(FormRow {
        focus: Some(FormFocus::ProgramFrequency),
        height: FIELD_HEIGHT,
        kind: RowKind::Select {
            label: "Program Frequency",
            value: coach.program_frequency.as_ref().map(|f| f.label()),
        },
    });
    rows.extend(coach_row(state, CoachField::OtherFrequency));

    rows.push(FormRow::hint("Target Audience", 1));
    for audience in TargetAudience::ALL {
        rows.push(FormRow::choice(
            FormFocus::Audience(audience),
            audience.label(),
            coach.target_audience.contains(&audience),
            false,
        ));
    }

    rows.push(FormRow::heading("Approved Lifts"));
    rows.push(FormRow::hint(LIFTS_HINT, 2));
    for (index, lift) in state.lifts.iter().enumerate() {
        rows.push(FormRow::heading(format!("Lift {}", index + 1)));
        for field in LiftField::ALL {
            let (multiline, height) = match field {
                LiftField::Notes if state.focused_note_index() == Some(index) => {
                    (true, FOCUSED_NOTES_HEIGHT)
                }
                LiftField::Notes => (true, NOTES_HEIGHT),
                _ => (false, FIELD_HEIGHT),
            };
            rows.push(FormRow::text(
                FormFocus::Lift(index, field),
                field.label(),
                lift.get(field),
                multiline,
                height,
            ));
        }
        if state.lifts.can_remove() {
            rows.push(FormRow::button(FormFocus::RemoveLift(index), "Remove", true));
        }
    }
    rows.push(FormRow::button(FormFocus::AddLift, "Add Another Lift", true));

    rows.push(FormRow::text(
        FormFocus::FilePath,
        "Upload Approved Lifts File (path, Enter to select)",
        &state.file_path_input,
        false,
        FIELD_HEIGHT,
    ));
    let selected = match &state.uploaded_file {
        Some(file) => format!("Selected: {}", file.name),
        None => "No file selected".to_string(),
    };
    rows.push(FormRow::hint(selected, 1));
    rows.push(FormRow::choice(
        FormFocus::PreferDiscussion,
        "I'd rather discuss this over a call",
        coach.prefer_discussion,
        false,
    ));

    rows.push(FormRow::heading("Anything else you'd like us to know?"));
    rows.extend(coach_row(state, CoachField::AdditionalNotes));

    let submit_label = if state.is_submitting() {
        "Submitting…"
    } else {
        "Submit"
    };
    rows.push(FormRow::button(FormFocus::Submit, submit_label, submit_enabled));
    rows
}

/// Shrink the focused row so it fits a short viewport
pub fn fit_focused_row(rows: &mut [FormRow], focus: FormFocus, viewport: u16) {
    for row in rows.iter_mut().filter(|row| row.focus == Some(focus)) {
        row.height = row.height.min(viewport.max(1));
    }
}

/// First row offset that keeps the focused row fully visible.
/// Offsets are `u32`: a long lift list outgrows `u16` rows.
pub fn scroll_offset(rows: &[FormRow], focus: FormFocus, viewport: u16) -> u32 {
    let mut tops = Vec::with_capacity(rows.len());
    let mut top = 0u32;
    let mut focused_bottom = None;
    for row in rows {
        tops.push(top);
        top += u32::from(row.height);
        if row.focus == Some(focus) {
            focused_bottom = Some(top);
        }
    }

    let Some(bottom) = focused_bottom else {
        return 0;
    };
    let needed = bottom.saturating_sub(u32::from(viewport));
    // Snap to a row boundary so no row is cut at the top
    tops.into_iter().find(|t| *t >= needed).unwrap_or(0)
}

fn draw_row(frame: &mut Frame, area: Rect, row: &FormRow, is_active: bool) {
    match &row.kind {
        RowKind::Heading(title) => {
            let paragraph = Paragraph::new(vec![
                Line::from(""),
                Line::styled(
                    title.as_str(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            ]);
            frame.render_widget(paragraph, area);
        }
        RowKind::Hint(text) => {
            let paragraph = Paragraph::new(text.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }
        RowKind::Text {
            label,
            value,
            multiline,
        } => draw_field_with_value(frame, area, label, value, is_active, *multiline),
        RowKind::Choice {
            label,
            checked,
            radio,
        } => draw_choice_field(frame, area, label, *checked, *radio, is_active),
        RowKind::Select { label, value } => draw_select_field(frame, area, label, *value, is_active),
        RowKind::Button { label, enabled } => {
            let width = (label.chars().count() as u16 + 4).min(area.width);
            let button_area = Rect { width, ..area };
            render_button(frame, button_area, label, is_active, *enabled);
        }
    }
}

/// Draw the signup form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Coach Signup ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area).inner(ratatui::layout::Margin {
        horizontal: 1,
        vertical: 0,
    });
    frame.render_widget(block, area);

    let mut rows = build_rows(&app.state, app.can_submit());
    fit_focused_row(&mut rows, app.state.focus, inner.height);
    let offset = scroll_offset(&rows, app.state.focus, inner.height);

    let mut top = 0u32;
    for row in &rows {
        let row_top = top;
        top += u32::from(row.height);
        if row_top < offset {
            continue;
        }
        let y = row_top - offset;
        if y + u32::from(row.height) > u32::from(inner.height) {
            break;
        }
        // Bounded by inner.height above
        let y = y as u16;
        let row_area = Rect {
            x: inner.x,
            y: inner.y + y,
            width: inner.width,
            height: row.height,
        };
        draw_row(frame, row_area, row, row.focus == Some(app.state.focus));
    }
}
