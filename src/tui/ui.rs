use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{FollowUpBar, MessageList, TitleBar};

/// Draw one frame.
///
/// ```text
/// ┌ title bar + tagline (2) ─────┐
/// │ message list (rest)          │
/// │ follow-up bar (n + 2, or 0)  │
/// └ input box (grows to 5 rows) ─┘
/// ```
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let area = frame.area();
    let follow_up_height = FollowUpBar::required_height(app.follow_ups.len());
    let input_height = tui.input_box.calculate_height(area.width);

    let [title_area, main_area, follow_up_area, input_area] = Layout::vertical([
        Length(TitleBar::HEIGHT),
        Min(0),
        Length(follow_up_height),
        Length(input_height),
    ])
    .areas(area);

    MessageList::new(
        &mut tui.message_list,
        &app.messages,
        app.is_thinking,
        tui.pulse_value,
    )
    .render(frame, main_area);

    // Title bar goes after the list so it sees this frame's unseen-content flag
    TitleBar::new(
        app.status_line(),
        app.active_topics.clone(),
        tui.message_list.has_unseen_content,
    )
    .render(frame, title_area);

    FollowUpBar::new(&app.follow_ups, tui.highlighted_suggestion).render(frame, follow_up_area);
    tui.follow_up_area = follow_up_area;

    tui.input_box.render(frame, input_area);
}
