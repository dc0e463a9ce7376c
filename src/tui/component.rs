use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive data through props (public struct fields that the
/// event loop syncs from `App` before each frame), may keep presentation
/// state of their own, and draw into a `Rect` of the frame.
///
/// `render` takes `&mut self` so a component can remember layout it computed
/// while drawing (hit areas for clicks, measured heights, scroll offsets).
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that handles terminal events.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
