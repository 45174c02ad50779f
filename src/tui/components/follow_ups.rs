//! # FollowUpBar Component
//!
//! Lists the suggested follow-up questions above the input box, one per row.
//! Tab/Shift+Tab move the highlight and a click picks a row. The parent copies
//! the picked row into the input box; this component only renders and
//! hit-tests.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::Component;

const TITLE: &str = "Try asking (Tab)";
const HIGHLIGHT_MARKER: &str = "› ";
const MARKER_PAD: &str = "  ";

pub struct FollowUpBar<'a> {
    pub suggestions: &'a [String],
    pub highlighted: Option<usize>,
}

impl<'a> FollowUpBar<'a> {
    pub fn new(suggestions: &'a [String], highlighted: Option<usize>) -> Self {
        Self {
            suggestions,
            highlighted,
        }
    }

    /// One row per suggestion plus borders. Zero hides the bar entirely.
    pub fn required_height(count: usize) -> u16 {
        if count == 0 { 0 } else { count as u16 + 2 }
    }

    /// Index of the suggestion under `(col, row)`, if any.
    /// `area` must be the rect the bar was last rendered into.
    pub fn hit_test(area: Rect, count: usize, col: u16, row: u16) -> Option<usize> {
        if area.width < 2 || area.height < 2 {
            return None;
        }
        let inside_x = col > area.x && col < area.x + area.width - 1;
        let inside_y = row > area.y && row < area.y + area.height - 1;
        if !inside_x || !inside_y {
            return None;
        }
        let index = (row - area.y - 1) as usize;
        (index < count).then_some(index)
    }
}

impl<'a> Component for FollowUpBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.suggestions.is_empty() || area.height == 0 {
            return;
        }

        let lines: Vec<Line> = self
            .suggestions
            .iter()
            .enumerate()
            .map(|(i, suggestion)| {
                if self.highlighted == Some(i) {
                    let style = Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD);
                    Line::from(vec![
                        Span::styled(HIGHLIGHT_MARKER, style),
                        Span::styled(suggestion.as_str(), style),
                    ])
                } else {
                    Line::from(vec![
                        Span::raw(MARKER_PAD),
                        Span::styled(suggestion.as_str(), Style::default().fg(Color::Gray)),
                    ])
                }
            })
            .collect();

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(TITLE)
            .padding(Padding::horizontal(1));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
