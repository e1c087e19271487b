use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive what they draw as props (struct fields) and render
/// into the area they are given. They never mutate navigation state; input
/// goes through [`Navigator::handle`](crate::core::Navigator::handle).
///
/// # Mutability
///
/// `render` takes `&mut self` so a component may cache layout between frames,
/// matching Ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
