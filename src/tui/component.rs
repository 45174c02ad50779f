use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the Atlas screen.
///
/// Components receive data via props (struct fields) and render into the
/// `Rect` the layout hands them. `render` takes `&mut self` so stateful
/// components (the message list, the input box) can refresh caches and
/// scroll positions during the render pass, like ratatui's `StatefulWidget`.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that reacts to terminal events.
pub trait EventHandler {
    /// The high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent`, optionally returning a high-level event.
    /// `None` means the event was not consumed.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
