//! # TitleBar Component
//!
//! Two-line header. The first line has the app name, status line, active
//! topic chips, and a "↓ New" marker when the message list has content below
//! the viewport. The second line is the tagline.
//!
//! Stateless. All three props come from different places:
//! - `status_line`: `App::status_line()`
//! - `topics`: `App::active_topics`
//! - `has_unseen_content`: `MessageListState`
//!
//! Format: `Atlas | Atlas is thinking... | [Sports] [Health] | ↓ New`

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::ASSISTANT_NAME;
use crate::core::topic::TopicId;
use crate::tui::component::Component;

const SEPARATOR: &str = " | ";

pub const TAGLINE: &str =
    "Your all-in friend who knows the scoreboard, the headlines, and how you feel.";

pub struct TitleBar {
    pub status_line: String,
    pub topics: Vec<TopicId>,
    pub has_unseen_content: bool,
}

impl TitleBar {
    /// Rows the header occupies.
    pub const HEIGHT: u16 = 2;

    pub fn new(status_line: String, topics: Vec<TopicId>, has_unseen_content: bool) -> Self {
        Self {
            status_line,
            topics,
            has_unseen_content,
        }
    }

    fn line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            ASSISTANT_NAME,
            Style::default().add_modifier(Modifier::BOLD),
        )];

        if !self.status_line.is_empty() {
            spans.push(Span::raw(SEPARATOR));
            spans.push(Span::raw(self.status_line.clone()));
        }

        if !self.topics.is_empty() {
            spans.push(Span::raw(SEPARATOR));
            for (i, topic) in self.topics.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(
                    format!("[{}]", topic.label()),
                    Style::default().fg(chip_color(*topic)),
                ));
            }
        }

        if self.has_unseen_content {
            spans.push(Span::raw(SEPARATOR));
            spans.push(Span::styled(
                "↓ New",
                Style::default().fg(Color::Yellow),
            ));
        }

        Line::from(spans)
    }
}

fn chip_color(topic: TopicId) -> Color {
    match topic {
        TopicId::Sports => Color::LightBlue,
        TopicId::Politics => Color::LightMagenta,
        TopicId::Health => Color::LightGreen,
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [status_area, tagline_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);
        frame.render_widget(self.line(), status_area);
        frame.render_widget(
            Line::styled(
                TAGLINE,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
            tagline_area,
        );
    }
}
