//! Widget traits: Anything that can paint itself into a buffer area.
//!
//! Renderers are consumed by value; a widget describes one frame's output
//! and is rebuilt every frame. Persistent data (scroll offsets, selection)
//! lives in the `State` of a [`StatefulWidget`].

use crate::buffer::{Buffer, Style};
use crate::layout::Rect;

/// A renderer that paints within `area`.
///
/// Any `FnOnce(Rect, &mut Buffer)` closure is a widget, as is a `&str`,
/// which renders as a single unstyled line clipped to `area`.
///
/// # Example
///
/// ```
/// use tessera::{Buffer, Constraint, Layout, Rect, Widget};
///
/// let mut buffer = Buffer::empty(Rect::new(0, 0, 10, 2));
/// let [title, body] = Layout::vertical()
///     .constraints([Constraint::Length(1), Constraint::Fill(1)])
///     .areas(buffer.area());
///
/// "title".render(title, &mut buffer);
/// (|area: Rect, buf: &mut Buffer| {
///     buf.set_string(area.x, area.y, "body", tessera::Style::new());
/// })
/// .render(body, &mut buffer);
///
/// assert_eq!(buffer.get(0, 1).symbol(), "b");
/// ```
pub trait Widget {
    /// Paint into `buf`, staying within `area`.
    fn render(self, area: Rect, buf: &mut Buffer);
}

/// A renderer that reads and updates external state while painting.
pub trait StatefulWidget {
    /// The state kept between frames.
    type State;

    /// Paint into `buf`, staying within `area`.
    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State);
}

impl<F> Widget for F
where
    F: FnOnce(Rect, &mut Buffer),
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        self(area, buf);
    }
}

impl Widget for &str {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_stringn(area.x, area.y, self, usize::from(area.width), Style::new());
    }
}
