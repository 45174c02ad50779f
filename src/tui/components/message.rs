use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::state::Role;
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Pulse intensity threshold above which the border transitions from normal to BOLD.
const PULSE_BOLD_THRESHOLD: f32 = 0.6;
/// Pulse intensity threshold above which the border transitions from DIM to normal.
const PULSE_NORMAL_THRESHOLD: f32 = 0.2;

/// Text of the placeholder bubble shown while a reply is pending.
pub const TYPING_TEXT: &str = "typing…";

/// A stateless component that renders a single chat bubble.
///
/// `Message` is created fresh each frame by `MessageList`. User bubbles are
/// cyan with the title on the right; Atlas bubbles are green with the title
/// on the left. The typing placeholder is an italic gray Atlas bubble whose
/// border pulses.
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap` so the list can lay out its scroll canvas before rendering.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub role: Role,
    pub content: &'a str,
    /// True for the typing placeholder.
    pub is_placeholder: bool,
    /// Current pulse intensity (0.0 to 1.0)
    pub pulse_intensity: f32,
}

impl<'a> Message<'a> {
    pub fn new(role: Role, content: &'a str) -> Self {
        Self {
            role,
            content,
            is_placeholder: false,
            pulse_intensity: 0.0,
        }
    }

    pub fn typing(pulse_intensity: f32) -> Message<'static> {
        Message {
            role: Role::Assistant,
            content: TYPING_TEXT,
            is_placeholder: true,
            pulse_intensity,
        }
    }

    /// Height required for `content` at the given width.
    ///
    /// The wrapping options must match ratatui's `Paragraph` wrapping so the
    /// computed height equals the rendered one.
    pub fn calculate_height(content: &str, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding
            return 1;
        }

        let content = content.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options).len().max(1);
        u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

fn role_title(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Assistant => "atlas",
    }
}

fn role_style(role: Role, is_placeholder: bool) -> Style {
    if is_placeholder {
        return Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC);
    }
    match role {
        Role::User => Style::default().fg(Color::Cyan),
        Role::Assistant => Style::default().fg(Color::Green),
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = role_style(self.role, self.is_placeholder);

        // Three-phase breathing: DIM → normal → BOLD
        let mut border_style = style.add_modifier(Modifier::DIM);
        if self.pulse_intensity > PULSE_BOLD_THRESHOLD {
            border_style = border_style
                .remove_modifier(Modifier::DIM)
                .add_modifier(Modifier::BOLD);
        } else if self.pulse_intensity > PULSE_NORMAL_THRESHOLD {
            border_style = border_style.remove_modifier(Modifier::DIM);
        }

        let title = Line::from(role_title(self.role));
        let title = match self.role {
            Role::User => title.right_aligned(),
            Role::Assistant => title.left_aligned(),
        };

        let block = Block::bordered()
            .title(title)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.content.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
