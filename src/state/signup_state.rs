//! Signup form state and its operations

use super::coach::{CoachInfo, CoachUpdate, ProgramFrequency, ProgramStyle, TargetAudience};
use super::error::FormError;
use super::focus::{focus_order, nearest_valid, next_in, prev_in, FormFocus, TextTarget};
use super::lifts::{LiftEntry, LiftField, LiftList};
use super::upload::UploadedFile;
use thiserror::Error;

/// Outcome of the most recent submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Success,
    Error,
}

/// What the UI should render for the current status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupView {
    ThankYou,
    Form { error_banner: bool },
}

/// Reasons a submit request is refused before any I/O happens
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    #[error("this signup has already been submitted")]
    AlreadySubmitted,

    #[error("a submission is already in progress")]
    InProgress,

    #[error("fill in your contact details and a name and rep range for every lift")]
    Incomplete,
}

/// Snapshot of the form taken when a submission starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub coach: CoachInfo,
    pub lifts: Vec<LiftEntry>,
    pub file: Option<UploadedFile>,
}

/// All state owned by the signup form
#[derive(Debug, Clone, Default)]
pub struct SignupState {
    pub coach: CoachInfo,
    pub lifts: LiftList,
    pub uploaded_file: Option<UploadedFile>,
    pub status: FormStatus,
    pub focus: FormFocus,
    /// Path typed into the upload field, not yet selected
    pub file_path_input: String,
    submitting: bool,
}

impl SignupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_coach_field(&mut self, update: CoachUpdate) {
        self.coach.apply(update);
        self.normalize_focus();
    }

    pub fn toggle_target_audience(&mut self, audience: TargetAudience) {
        self.coach.toggle_audience(audience);
    }

    pub fn update_lift_field(
        &mut self,
        index: usize,
        field: LiftField,
        value: String,
    ) -> Result<(), FormError> {
        self.lifts.update(index, field, value)
    }

    pub fn add_lift(&mut self) {
        self.lifts.push_empty();
    }

    pub fn remove_lift(&mut self, index: usize) -> Result<LiftEntry, FormError> {
        let removed = self.lifts.remove(index)?;
        self.normalize_focus();
        Ok(removed)
    }

    /// Contact details present and every lift named with a rep range
    pub fn is_complete(&self) -> bool {
        self.coach.has_contact_details() && self.lifts.all_filled()
    }

    pub fn select_file(&mut self, file: Option<UploadedFile>) {
        self.uploaded_file = file;
    }

    /// Select the file named by `file_path_input`; an empty input clears the selection
    pub fn select_file_from_input(&mut self) -> Result<(), FormError> {
        let input = self.file_path_input.trim();
        if input.is_empty() {
            self.select_file(None);
            return Ok(());
        }
        let file = UploadedFile::from_path(input)?;
        self.select_file(Some(file));
        Ok(())
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Start a submission, returning the snapshot to persist
    pub fn begin_submit(&mut self, require_complete: bool) -> Result<PendingSubmission, SubmitBlocked> {
        if self.status == FormStatus::Success {
            return Err(SubmitBlocked::AlreadySubmitted);
        }
        if self.submitting {
            return Err(SubmitBlocked::InProgress);
        }
        if require_complete && !self.is_complete() {
            return Err(SubmitBlocked::Incomplete);
        }

        self.submitting = true;
        Ok(PendingSubmission {
            coach: self.coach.clone(),
            lifts: self.lifts.as_slice().to_vec(),
            file: self.uploaded_file.clone(),
        })
    }

    /// Apply the outcome of the submission started by `begin_submit`
    pub fn finish_submit<T, E>(&mut self, outcome: &Result<T, E>) {
        self.submitting = false;
        self.status = match outcome {
            Ok(_) => FormStatus::Success,
            Err(_) => FormStatus::Error,
        };
    }

    pub fn view(&self) -> SignupView {
        match self.status {
            FormStatus::Success => SignupView::ThankYou,
            FormStatus::Error => SignupView::Form { error_banner: true },
            FormStatus::Idle => SignupView::Form { error_banner: false },
        }
    }

    /// Lift whose notes field currently has focus
    pub fn focused_note_index(&self) -> Option<usize> {
        match self.focus {
            FormFocus::Lift(index, LiftField::Notes) => Some(index),
            _ => None,
        }
    }

    pub fn focus_order(&self) -> Vec<FormFocus> {
        focus_order(&self.coach, &self.lifts)
    }

    pub fn focus_next(&mut self) {
        self.focus = next_in(&self.focus_order(), self.focus);
    }

    pub fn focus_prev(&mut self) {
        self.focus = prev_in(&self.focus_order(), self.focus);
    }

    fn normalize_focus(&mut self) {
        self.focus = nearest_valid(self.focus, &self.focus_order(), self.lifts.len());
    }

    /// Current text behind an editable slot
    pub fn text(&self, target: TextTarget) -> Option<&str> {
        match target {
            TextTarget::Coach(field) => self.coach.text(field),
            TextTarget::Lift(index, field) => self.lifts.get(index).map(|l| l.get(field)),
            TextTarget::FilePath => Some(&self.file_path_input),
        }
    }

    fn set_text(&mut self, target: TextTarget, value: String) -> Result<(), FormError> {
        match target {
            TextTarget::Coach(field) => {
                self.update_coach_field(CoachUpdate::Text(field, value));
                Ok(())
            }
            TextTarget::Lift(index, field) => self.update_lift_field(index, field, value),
            TextTarget::FilePath => {
                self.file_path_input = value;
                Ok(())
            }
        }
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) -> Result<(), FormError> {
        let Some(target) = self.focus.text_target() else {
            return Ok(());
        };
        let Some(current) = self.text(target) else {
            return Ok(());
        };
        let mut value = current.to_string();
        edit(&mut value);
        self.set_text(target, value)
    }

    /// Append text to the focused field; newlines are kept only in multiline fields
    pub fn insert_text(&mut self, text: &str) -> Result<(), FormError> {
        let multiline = self.is_focus_multiline();
        self.edit_focused(|value| {
            if multiline {
                value.push_str(text);
            } else {
                value.extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
            }
        })
    }

    pub fn input_char(&mut self, c: char) -> Result<(), FormError> {
        self.edit_focused(|value| value.push(c))
    }

    pub fn backspace(&mut self) -> Result<(), FormError> {
        self.edit_focused(|value| {
            value.pop();
        })
    }

    pub fn is_focus_multiline(&self) -> bool {
        match self.focus {
            FormFocus::Coach(field) => field.is_multiline(),
            FormFocus::Lift(_, LiftField::Notes) => true,
            _ => false,
        }
    }

    /// Pick a program style radio option
    pub fn choose_style(&mut self, index: usize) {
        let Some(option) = ProgramStyle::options().into_iter().nth(index) else {
            return;
        };
        // Re-picking Other keeps the text already typed
        if let Some(current) = &self.coach.program_style {
            if current.same_option(&option) {
                return;
            }
        }
        self.update_coach_field(CoachUpdate::ProgramStyle(Some(option)));
    }

    pub fn cycle_frequency(&mut self, forward: bool) {
        let current = self.coach.program_frequency.as_ref();
        let next = if forward {
            ProgramFrequency::cycle_next(current)
        } else {
            ProgramFrequency::cycle_prev(current)
        };
        self.update_coach_field(CoachUpdate::ProgramFrequency(next));
    }

    pub fn toggle_prefer_discussion(&mut self) {
        let value = !self.coach.prefer_discussion;
        self.update_coach_field(CoachUpdate::PreferDiscussion(value));
    }

    /// Text fields the clipboard may paste into
    pub fn focus_accepts_text(&self) -> bool {
        self.focus
            .text_target()
            .and_then(|target| self.text(target))
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CoachField;
    use pretty_assertions::assert_eq;

    fn complete_state() -> SignupState {
        let mut state = SignupState::new();
        state.update_coach_field(CoachUpdate::Text(CoachField::FirstName, "A".into()));
        state.update_coach_field(CoachUpdate::Text(CoachField::LastName, "B".into()));
        state.update_coach_field(CoachUpdate::Text(CoachField::Email, "a@b.com".into()));
        state.update_coach_field(CoachUpdate::Text(CoachField::Phone, "123".into()));
        state
            .update_lift_field(0, LiftField::Name, "Squat".into())
            .unwrap();
        state
            .update_lift_field(0, LiftField::RepRange, "5-8".into())
            .unwrap();
        state
    }

    mod completeness {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_complete_example() {
            assert!(complete_state().is_complete());
        }

        #[test]
        fn test_fresh_form_is_incomplete() {
            assert!(!SignupState::new().is_complete());
        }

        #[test]
        fn test_each_required_coach_field() {
            for field in [
                CoachField::FirstName,
                CoachField::LastName,
                CoachField::Email,
                CoachField::Phone,
            ] {
                let mut state = complete_state();
                state.update_coach_field(CoachUpdate::Text(field, String::new()));
                assert!(!state.is_complete(), "{field:?}");
            }
        }

        #[test]
        fn test_optional_fields_do_not_matter() {
            let mut state = complete_state();
            state.update_coach_field(CoachUpdate::Text(CoachField::Company, String::new()));
            state.update_coach_field(CoachUpdate::Text(CoachField::AdditionalNotes, String::new()));
            assert!(state.is_complete());
        }

        #[test]
        fn test_lift_name_and_rep_range_required() {
            let mut state = complete_state();
            state.update_lift_field(0, LiftField::RepRange, String::new()).unwrap();
            assert!(!state.is_complete());

            let mut state = complete_state();
            state.add_lift();
            assert!(!state.is_complete());
            state.update_lift_field(1, LiftField::Name, "Bench".into()).unwrap();
            state.update_lift_field(1, LiftField::RepRange, "8-12".into()).unwrap();
            assert!(state.is_complete());
        }
    }

    mod submitting {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_begin_snapshots_form() {
            let mut state = complete_state();
            let pending = state.begin_submit(true).unwrap();
            assert!(state.is_submitting());
            assert_eq!(pending.coach, state.coach);
            assert_eq!(pending.lifts, state.lifts.as_slice().to_vec());
            assert!(pending.file.is_none());
        }

        #[test]
        fn test_second_begin_is_refused() {
            let mut state = complete_state();
            state.begin_submit(true).unwrap();
            assert_eq!(state.begin_submit(true), Err(SubmitBlocked::InProgress));
        }

        #[test]
        fn test_incomplete_form_is_refused_when_required() {
            let mut state = SignupState::new();
            assert_eq!(state.begin_submit(true), Err(SubmitBlocked::Incomplete));
            assert!(!state.is_submitting());
            assert!(state.begin_submit(false).is_ok());
        }

        #[test]
        fn test_success_shows_thank_you() {
            let mut state = complete_state();
            state.begin_submit(true).unwrap();
            state.finish_submit::<(), ()>(&Ok(()));
            assert_eq!(state.status, FormStatus::Success);
            assert_eq!(state.view(), SignupView::ThankYou);
            assert!(!state.is_submitting());
            assert_eq!(state.begin_submit(true), Err(SubmitBlocked::AlreadySubmitted));
        }

        #[test]
        fn test_error_keeps_fields_and_allows_retry() {
            let mut state = complete_state();
            state.add_lift();
            let before_coach = state.coach.clone();
            let before_lifts = state.lifts.clone();

            state.begin_submit(false).unwrap();
            state.finish_submit::<(), &str>(&Err("write failed"));

            assert_eq!(state.status, FormStatus::Error);
            assert_eq!(state.view(), SignupView::Form { error_banner: true });
            assert_eq!(state.coach, before_coach);
            assert_eq!(state.lifts, before_lifts);

            state.update_coach_field(CoachUpdate::Text(CoachField::Email, "new@b.com".into()));
            assert_eq!(state.coach.email, "new@b.com");
            assert!(state.begin_submit(false).is_ok());
        }

        #[test]
        fn test_idle_view_has_no_banner() {
            assert_eq!(
                SignupState::new().view(),
                SignupView::Form { error_banner: false }
            );
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_into_focused_field() {
            let mut state = SignupState::new();
            for c in "Ann".chars() {
                state.input_char(c).unwrap();
            }
            state.backspace().unwrap();
            assert_eq!(state.coach.first_name, "An");
        }

        #[test]
        fn test_typing_into_lift_notes() {
            let mut state = SignupState::new();
            state.focus = FormFocus::Lift(0, LiftField::Notes);
            state.insert_text("Pause at bottom\nBelt ok").unwrap();
            assert_eq!(state.lifts.get(0).unwrap().notes, "Pause at bottom\nBelt ok");
            assert_eq!(state.focused_note_index(), Some(0));
        }

        #[test]
        fn test_paste_into_single_line_drops_newlines() {
            let mut state = SignupState::new();
            state.focus = FormFocus::Coach(CoachField::Email);
            state.insert_text("coach@example.com\n").unwrap();
            assert_eq!(state.coach.email, "coach@example.com");
        }

        #[test]
        fn test_non_text_focus_ignores_input() {
            let mut state = SignupState::new();
            state.focus = FormFocus::AddLift;
            state.input_char('x').unwrap();
            assert_eq!(state.coach, CoachInfo::default());
            assert!(!state.focus_accepts_text());
        }

        #[test]
        fn test_choose_other_style_then_type() {
            let mut state = SignupState::new();
            state.focus = FormFocus::ProgramStyle(2);
            state.choose_style(2);
            state.focus_next();
            assert_eq!(state.focus, FormFocus::Coach(CoachField::OtherStyle));
            state.insert_text("Full body").unwrap();
            state.choose_style(2);
            assert_eq!(
                state.coach.program_style,
                Some(ProgramStyle::Other("Full body".into()))
            );
        }

        #[test]
        fn test_leaving_other_style_moves_focus() {
            let mut state = SignupState::new();
            state.choose_style(2);
            state.focus = FormFocus::Coach(CoachField::OtherStyle);
            state.choose_style(0);
            assert_eq!(state.coach.program_style, Some(ProgramStyle::PushPullLegs));
            assert_eq!(state.focus, FormFocus::ProgramStyle(2));
        }

        #[test]
        fn test_remove_focused_lift_moves_focus() {
            let mut state = SignupState::new();
            state.add_lift();
            state.focus = FormFocus::RemoveLift(1);
            state.remove_lift(1).unwrap();
            assert_eq!(state.focus, FormFocus::Lift(0, LiftField::Name));
            assert_eq!(state.remove_lift(0), Err(FormError::LastLift));
        }

        #[test]
        fn test_cycle_frequency() {
            let mut state = SignupState::new();
            state.cycle_frequency(true);
            assert_eq!(state.coach.program_frequency, Some(ProgramFrequency::OneDay));
            state.cycle_frequency(false);
            assert!(state.coach.program_frequency.is_none());
        }

        #[test]
        fn test_toggle_prefer_discussion() {
            let mut state = SignupState::new();
            state.toggle_prefer_discussion();
            assert!(state.coach.prefer_discussion);
        }

        #[test]
        fn test_select_file_from_input() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("lifts.pdf");
            std::fs::write(&path, b"%PDF").unwrap();

            let mut state = SignupState::new();
            state.file_path_input = path.display().to_string();
            state.select_file_from_input().unwrap();
            assert_eq!(state.uploaded_file.as_ref().unwrap().name, "lifts.pdf");

            state.file_path_input = dir.path().join("nope.pdf").display().to_string();
            assert!(state.select_file_from_input().is_err());
            assert_eq!(state.uploaded_file.as_ref().unwrap().name, "lifts.pdf");

            state.file_path_input.clear();
            state.select_file_from_input().unwrap();
            assert!(state.uploaded_file.is_none());
        }
    }
}
