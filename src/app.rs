//! Application state and key handling

use crate::config::SignupConfig;
use crate::state::{FormError, FormFocus, FormStatus, LiftField, SignupState, SignupView};
use crate::storage::{Services, SubmitError};
use crate::submission::{self, SubmissionReceipt, SubmissionSettings};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

type SubmitOutcome = Result<SubmissionReceipt, SubmitError>;

/// Main application struct
pub struct App {
    /// Form state
    pub state: SignupState,
    /// Transient hint shown in the status bar
    pub status_message: Option<String>,
    services: Services,
    settings: SubmissionSettings,
    require_complete: bool,
    quit: bool,
    outcome_tx: mpsc::UnboundedSender<SubmitOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<SubmitOutcome>,
}

impl App {
    pub fn new(config: &SignupConfig, services: Services) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            state: SignupState::new(),
            status_message: None,
            services,
            settings: SubmissionSettings::from_config(config),
            require_complete: config.require_complete,
            quit: false,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether the Submit action is currently available
    pub fn can_submit(&self) -> bool {
        !self.state.is_submitting()
            && self.state.status != FormStatus::Success
            && (!self.require_complete || self.state.is_complete())
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.state.view() == SignupView::ThankYou {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.quit = true;
            }
            return;
        }

        // Clear any status messages on key press
        self.status_message = None;

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.request_quit(),
            KeyCode::Char('s') if ctrl => self.start_submit(),
            KeyCode::Char('n') if ctrl => self.add_lift(),
            KeyCode::Char('d') if ctrl => self.remove_focused_lift(),
            KeyCode::Char('v') if key.modifiers.contains(crate::platform::PASTE_MODIFIER) => {
                self.paste_clipboard()
            }
            KeyCode::Tab | KeyCode::Down => self.state.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.state.focus_prev(),
            KeyCode::Left => self.step_choice(false),
            KeyCode::Right => self.step_choice(true),
            KeyCode::Enter => self.activate_focus(true),
            KeyCode::Char(' ') if !self.state.focus_accepts_text() => self.activate_focus(false),
            KeyCode::Char(c) if !ctrl => {
                let result = self.state.input_char(c);
                self.report(result);
            }
            KeyCode::Backspace => {
                let result = self.state.backspace();
                self.report(result);
            }
            _ => {}
        }
    }

    /// Handle text pasted through the terminal
    pub fn handle_paste(&mut self, text: &str) {
        if self.state.view() == SignupView::ThankYou {
            return;
        }
        let result = self.state.insert_text(text);
        self.report(result);
    }

    fn request_quit(&mut self) {
        if self.state.is_submitting() {
            self.status_message = Some("Submission in progress, please wait".to_string());
        } else {
            self.quit = true;
        }
    }

    fn report(&mut self, result: Result<(), FormError>) {
        if let Err(err) = result {
            tracing::debug!(error = %err, "form operation rejected");
            self.status_message = Some(err.to_string());
        }
    }

    fn add_lift(&mut self) {
        self.state.add_lift();
        self.state.focus = FormFocus::Lift(self.state.lifts.len() - 1, LiftField::Name);
    }

    fn remove_lift(&mut self, index: usize) {
        let result = self.state.remove_lift(index).map(|_| ());
        self.report(result);
    }

    fn remove_focused_lift(&mut self) {
        match self.state.focus.lift_index() {
            Some(index) => self.remove_lift(index),
            None => self.status_message = Some("Move to a lift to remove it".to_string()),
        }
    }

    /// Left/Right: move between style options or cycle the frequency select
    fn step_choice(&mut self, forward: bool) {
        match self.state.focus {
            FormFocus::ProgramFrequency => self.state.cycle_frequency(forward),
            FormFocus::ProgramStyle(index) => {
                let last = crate::state::ProgramStyle::options().len() - 1;
                let next = if forward {
                    (index + 1).min(last)
                } else {
                    index.saturating_sub(1)
                };
                self.state.focus = FormFocus::ProgramStyle(next);
            }
            _ => {}
        }
    }

    /// Enter/Space on the focused element
    fn activate_focus(&mut self, enter: bool) {
        match self.state.focus {
            FormFocus::ProgramStyle(index) => self.state.choose_style(index),
            FormFocus::ProgramFrequency => self.state.cycle_frequency(true),
            FormFocus::Audience(audience) => self.state.toggle_target_audience(audience),
            FormFocus::RemoveLift(index) => self.remove_lift(index),
            FormFocus::AddLift => self.add_lift(),
            FormFocus::FilePath => self.select_file(),
            FormFocus::PreferDiscussion => self.state.toggle_prefer_discussion(),
            FormFocus::Submit => self.start_submit(),
            FormFocus::Coach(_) | FormFocus::Lift(..) => {
                if enter && self.state.is_focus_multiline() {
                    let result = self.state.input_char('\n');
                    self.report(result);
                } else if enter {
                    self.state.focus_next();
                }
            }
        }
    }

    fn select_file(&mut self) {
        match self.state.select_file_from_input() {
            Ok(()) => {
                self.status_message = Some(match &self.state.uploaded_file {
                    Some(file) => format!("Selected {}", file.name),
                    None => "File selection cleared".to_string(),
                });
            }
            Err(err) => self.status_message = Some(err.to_string()),
        }
    }

    fn paste_clipboard(&mut self) {
        let text = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text());
        match text {
            Ok(text) => {
                let result = self.state.insert_text(&text);
                self.report(result);
            }
            Err(err) => {
                tracing::warn!(error = %err, "clipboard unavailable");
                self.status_message = Some(format!("Clipboard unavailable: {err}"));
            }
        }
    }

    /// Start the submit workflow in the background
    fn start_submit(&mut self) {
        let pending = match self.state.begin_submit(self.require_complete) {
            Ok(pending) => pending,
            Err(blocked) => {
                self.status_message = Some(blocked.to_string());
                return;
            }
        };

        tracing::info!(
            lifts = pending.lifts.len(),
            with_file = pending.file.is_some(),
            "submitting signup"
        );
        let services = self.services.clone();
        let settings = self.settings.clone();
        let outcome_tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = submission::submit(&services, &settings, pending).await;
            // The receiver only goes away when the app is shutting down
            let _ = outcome_tx.send(outcome);
        });
    }

    /// Apply finished submissions; called once per event loop tick
    pub fn poll_submission(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: SubmitOutcome) {
        match &outcome {
            Ok(receipt) => {
                tracing::info!(
                    document = %receipt.document_id,
                    submitted_at = %receipt.record.submitted_at,
                    "signup submitted"
                );
            }
            Err(err) => {
                let cause = std::error::Error::source(err)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                tracing::error!(error = ?err, "error submitting form: {err}: {cause}");
            }
        }
        self.state.finish_submit(&outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CoachField, ProgramStyle, TargetAudience};
    use crate::storage::{DocumentId, MockBlobStore, MockClock, MockDocumentStore, WriteError};
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    impl App {
        /// Wait for the running submission and apply its outcome
        async fn settle(&mut self) {
            let outcome = self.outcome_rx.recv().await.unwrap();
            self.apply_outcome(outcome);
        }
    }

    fn services(blobs: MockBlobStore, documents: MockDocumentStore) -> Services {
        let mut clock = MockClock::new();
        clock.expect_now().returning(Utc::now);
        Services {
            blobs: Arc::new(blobs),
            documents: Arc::new(documents),
            clock: Arc::new(clock),
        }
    }

    fn idle_app() -> App {
        App::new(
            &SignupConfig::default(),
            services(MockBlobStore::new(), MockDocumentStore::new()),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// Fill the required fields through the keyboard
    fn fill_required(app: &mut App) {
        for value in ["A", "B", "a@b.com", "123"] {
            type_text(app, value);
            press(app, KeyCode::Tab);
        }
        app.state.focus = FormFocus::Lift(0, LiftField::Name);
        type_text(app, "Squat");
        press(app, KeyCode::Tab);
        type_text(app, "5-8");
    }

    mod keys {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_fills_focused_field() {
            let mut app = idle_app();
            type_text(&mut app, "Ann");
            press(&mut app, KeyCode::Backspace);
            press(&mut app, KeyCode::Tab);
            type_text(&mut app, "Lee");
            assert_eq!(app.state.coach.first_name, "An");
            assert_eq!(app.state.coach.last_name, "Lee");
        }

        #[test]
        fn test_space_types_into_text_but_toggles_checkbox() {
            let mut app = idle_app();
            type_text(&mut app, "Mary Ann");
            assert_eq!(app.state.coach.first_name, "Mary Ann");

            app.state.focus = FormFocus::Audience(TargetAudience::Competitive);
            press(&mut app, KeyCode::Char(' '));
            assert!(app
                .state
                .coach
                .target_audience
                .contains(&TargetAudience::Competitive));
            press(&mut app, KeyCode::Char(' '));
            assert!(app.state.coach.target_audience.is_empty());
        }

        #[test]
        fn test_radio_arrows_and_select() {
            let mut app = idle_app();
            app.state.focus = FormFocus::ProgramStyle(0);
            press(&mut app, KeyCode::Right);
            press(&mut app, KeyCode::Right);
            press(&mut app, KeyCode::Right);
            assert_eq!(app.state.focus, FormFocus::ProgramStyle(2));
            press(&mut app, KeyCode::Enter);
            assert_eq!(
                app.state.coach.program_style,
                Some(ProgramStyle::Other(String::new()))
            );
            press(&mut app, KeyCode::Tab);
            assert_eq!(app.state.focus, FormFocus::Coach(CoachField::OtherStyle));
        }

        #[test]
        fn test_enter_in_notes_adds_newline() {
            let mut app = idle_app();
            app.state.focus = FormFocus::Lift(0, LiftField::Notes);
            type_text(&mut app, "a");
            press(&mut app, KeyCode::Enter);
            type_text(&mut app, "b");
            assert_eq!(app.state.lifts.get(0).unwrap().notes, "a\nb");
        }

        #[test]
        fn test_enter_in_single_line_field_advances() {
            let mut app = idle_app();
            press(&mut app, KeyCode::Enter);
            assert_eq!(app.state.focus, FormFocus::Coach(CoachField::LastName));
        }

        #[test]
        fn test_add_and_remove_lift_shortcuts() {
            let mut app = idle_app();
            ctrl(&mut app, 'd');
            assert!(app.status_message.is_some());

            app.state.focus = FormFocus::Lift(0, LiftField::Name);
            ctrl(&mut app, 'd');
            assert_eq!(app.state.lifts.len(), 1);
            assert!(app.status_message.as_deref().unwrap().contains("last"));

            ctrl(&mut app, 'n');
            assert_eq!(app.state.lifts.len(), 2);
            assert_eq!(app.state.focus, FormFocus::Lift(1, LiftField::Name));
            type_text(&mut app, "Bench");
            assert_eq!(app.state.lifts.get(1).unwrap().name, "Bench");

            ctrl(&mut app, 'd');
            assert_eq!(app.state.lifts.len(), 1);
            assert_eq!(app.state.focus, FormFocus::Lift(0, LiftField::Name));
        }

        #[test]
        fn test_paste_event_inserts_text() {
            let mut app = idle_app();
            app.handle_paste("Jo");
            assert_eq!(app.state.coach.first_name, "Jo");
        }

        #[test]
        fn test_esc_quits() {
            let mut app = idle_app();
            assert!(!app.should_quit());
            press(&mut app, KeyCode::Esc);
            assert!(app.should_quit());
        }

        #[test]
        fn test_file_selection_reports_missing_file() {
            let mut app = idle_app();
            app.state.focus = FormFocus::FilePath;
            type_text(&mut app, "/definitely/not/here.pdf");
            press(&mut app, KeyCode::Enter);
            assert!(app.state.uploaded_file.is_none());
            assert!(app.status_message.as_deref().unwrap().contains("not a file"));
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_incomplete_form_is_not_submitted() {
            let mut blobs = MockBlobStore::new();
            blobs.expect_upload().never();
            let mut documents = MockDocumentStore::new();
            documents.expect_insert().never();
            let mut app = App::new(&SignupConfig::default(), services(blobs, documents));

            ctrl(&mut app, 's');

            assert!(!app.state.is_submitting());
            assert!(!app.can_submit());
            assert_eq!(app.state.status, FormStatus::Idle);
            assert!(app.status_message.is_some());
        }

        #[tokio::test]
        async fn test_successful_submit_shows_thank_you() {
            let mut documents = MockDocumentStore::new();
            documents
                .expect_insert()
                .times(1)
                .returning(|_, _| Ok(DocumentId::new("doc-1")));
            let mut app = App::new(
                &SignupConfig::default(),
                services(MockBlobStore::new(), documents),
            );
            fill_required(&mut app);
            assert!(app.can_submit());

            ctrl(&mut app, 's');
            assert!(app.state.is_submitting());
            app.settle().await;

            assert_eq!(app.state.status, FormStatus::Success);
            assert_eq!(app.state.view(), SignupView::ThankYou);

            // Form fields are no longer reachable
            press(&mut app, KeyCode::Char('x'));
            assert_eq!(app.state.coach.first_name, "A");
            press(&mut app, KeyCode::Char('q'));
            assert!(app.should_quit());
        }

        #[tokio::test]
        async fn test_submit_with_file_uploads_then_shows_thank_you() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("lifts.csv");
            std::fs::write(&path, "squat,5-8\n").unwrap();

            let mut blobs = MockBlobStore::new();
            blobs
                .expect_upload()
                .withf(|key, bytes| {
                    key == "uploadedFiles/lifts.csv" && bytes.as_slice() == b"squat,5-8\n"
                })
                .times(1)
                .returning(|_, _| Ok("file:///blobs/uploadedFiles/lifts.csv".to_string()));
            blobs.expect_delete().never();
            let mut documents = MockDocumentStore::new();
            documents
                .expect_insert()
                .withf(|_, record| {
                    record.uploaded_file_name.as_deref() == Some("lifts.csv")
                        && record.uploaded_file_url.as_deref()
                            == Some("file:///blobs/uploadedFiles/lifts.csv")
                })
                .times(1)
                .returning(|_, _| Ok(DocumentId::new("doc-1")));
            let mut app = App::new(&SignupConfig::default(), services(blobs, documents));
            fill_required(&mut app);

            app.state.focus = FormFocus::FilePath;
            type_text(&mut app, &path.display().to_string());
            press(&mut app, KeyCode::Enter);
            assert_eq!(
                app.state.uploaded_file.as_ref().map(|f| f.name.as_str()),
                Some("lifts.csv")
            );

            ctrl(&mut app, 's');
            app.settle().await;

            assert_eq!(app.state.status, FormStatus::Success);
            assert_eq!(app.state.view(), SignupView::ThankYou);
        }

        #[tokio::test]
        async fn test_failed_submit_keeps_form_editable() {
            let mut documents = MockDocumentStore::new();
            documents.expect_insert().times(2).returning(|_, _| {
                Err(WriteError::Rejected {
                    status: 500,
                    body: "internal".into(),
                })
            });
            let mut app = App::new(
                &SignupConfig::default(),
                services(MockBlobStore::new(), documents),
            );
            fill_required(&mut app);
            let coach_before = app.state.coach.clone();
            let lifts_before = app.state.lifts.clone();

            ctrl(&mut app, 's');
            app.settle().await;

            assert_eq!(app.state.status, FormStatus::Error);
            assert_eq!(app.state.view(), SignupView::Form { error_banner: true });
            assert_eq!(app.state.coach, coach_before);
            assert_eq!(app.state.lifts, lifts_before);

            app.state.focus = FormFocus::Coach(CoachField::Phone);
            type_text(&mut app, "4");
            assert_eq!(app.state.coach.phone, "1234");

            // Retry is the recovery path
            ctrl(&mut app, 's');
            app.settle().await;
            assert_eq!(app.state.status, FormStatus::Error);
        }

        #[tokio::test]
        async fn test_double_submit_is_refused() {
            let mut documents = MockDocumentStore::new();
            documents
                .expect_insert()
                .times(1)
                .returning(|_, _| Ok(DocumentId::new("doc-1")));
            let mut app = App::new(
                &SignupConfig::default(),
                services(MockBlobStore::new(), documents),
            );
            fill_required(&mut app);

            ctrl(&mut app, 's');
            ctrl(&mut app, 's');
            assert_eq!(
                app.status_message.as_deref(),
                Some("a submission is already in progress")
            );

            press(&mut app, KeyCode::Esc);
            assert!(!app.should_quit());

            app.settle().await;
            assert_eq!(app.state.status, FormStatus::Success);
        }

        #[tokio::test]
        async fn test_ungated_submit_when_completeness_not_required() {
            let mut documents = MockDocumentStore::new();
            documents
                .expect_insert()
                .times(1)
                .returning(|_, _| Ok(DocumentId::new("doc-1")));
            let config = SignupConfig {
                require_complete: false,
                ..Default::default()
            };
            let mut app = App::new(&config, services(MockBlobStore::new(), documents));

            app.state.focus = FormFocus::Submit;
            press(&mut app, KeyCode::Enter);
            app.settle().await;
            assert_eq!(app.state.status, FormStatus::Success);
        }

        #[tokio::test]
        async fn test_poll_submission_applies_outcome() {
            let mut documents = MockDocumentStore::new();
            documents
                .expect_insert()
                .returning(|_, _| Ok(DocumentId::new("doc-1")));
            let mut app = App::new(
                &SignupConfig::default(),
                services(MockBlobStore::new(), documents),
            );
            fill_required(&mut app);
            ctrl(&mut app, 's');

            for _ in 0..100 {
                app.poll_submission();
                if !app.state.is_submitting() {
                    break;
                }
                tokio::task::yield_now().await;
            }
            assert_eq!(app.state.status, FormStatus::Success);
        }
    }
}
