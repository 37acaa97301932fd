use crate::core::message::Sender;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::input_box::INPUT_HEIGHT;
use crate::tui::components::{LandingPage, MessageList, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(INPUT_HEIGHT)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    if app.session.is_empty() {
        LandingPage::new(&app.bot_name).render(frame, main_area);
    } else {
        MessageList::new(
            &mut tui.message_list,
            app.session.messages(),
            app.label_for(Sender::User),
            app.label_for(Sender::Bot),
        )
        .render(frame, main_area);
    }

    // After the list so the unseen-content flag reflects this frame
    TitleBar::new(
        &app.bot_name,
        &app.server_url,
        &app.status_message,
        tui.message_list.has_unseen_content,
    )
    .render(frame, title_area);

    tui.input_box.render(frame, input_area);
}
