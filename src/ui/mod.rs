//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod thank_you;

use crate::app::App;
use crate::state::SignupView;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    match app.state.view() {
        SignupView::ThankYou => thank_you::draw(frame),
        SignupView::Form { error_banner } => {
            let layout = layout::create_layout(area, error_banner);
            layout::draw_header(frame, layout.header, app);
            if let Some(banner) = layout.banner {
                layout::draw_error_banner(frame, banner);
            }
            forms::draw_signup_form(frame, layout.body, app);
            layout::draw_status_bar(frame, layout.status, app);
        }
    }
}
