//! Frame buffers: The previous/current pair a frame driver diffs.
//!
//! Each frame widgets paint into `current`; the driver writes out
//! [`FrameBuffers::diff`] and then calls [`FrameBuffers::swap`], which keeps
//! what is now on screen as `previous` and hands back a blank `current`.

use super::diff::{CellUpdate, DiffIter};
use super::Buffer;
use crate::layout::Rect;
use crate::widget::{StatefulWidget, Widget};

/// Double buffer for frame-to-frame diffing.
///
/// # Example
///
/// ```
/// use tessera::{FrameBuffers, Rect, Style};
///
/// let mut frames = FrameBuffers::new(Rect::new(0, 0, 8, 1));
/// frames.current_mut().set_string(0, 0, "a", Style::new());
/// assert_eq!(frames.diff().len(), 8); // first frame paints everything
/// frames.swap();
///
/// frames.current_mut().set_string(0, 0, "b", Style::new());
/// assert_eq!(frames.diff().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FrameBuffers {
    previous: Buffer,
    current: Buffer,
    full_redraw: bool,
}

impl FrameBuffers {
    /// Create blank buffers over `area`. The first diff reports every cell.
    pub fn new(area: Rect) -> Self {
        Self {
            previous: Buffer::empty(area),
            current: Buffer::empty(area),
            full_redraw: true,
        }
    }

    /// The area both buffers cover.
    pub const fn area(&self) -> Rect {
        self.current.area()
    }

    /// The frame last written to the terminal.
    pub const fn previous(&self) -> &Buffer {
        &self.previous
    }

    /// The frame being built.
    pub const fn current(&self) -> &Buffer {
        &self.current
    }

    /// Mutable access to the frame being built.
    pub fn current_mut(&mut self) -> &mut Buffer {
        &mut self.current
    }

    /// Render `widget` into `area` of the current frame.
    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        widget.render(area, &mut self.current);
    }

    /// Render a stateful widget into `area` of the current frame.
    pub fn render_stateful_widget<W: StatefulWidget>(
        &mut self,
        widget: W,
        area: Rect,
        state: &mut W::State,
    ) {
        widget.render(area, &mut self.current, state);
    }

    /// Updates that bring the screen from `previous` to `current`.
    pub fn diff(&self) -> Vec<CellUpdate<'_>> {
        self.diff_iter().collect()
    }

    /// Iterator form of [`diff`](Self::diff).
    pub fn diff_iter(&self) -> DiffIter<'_, '_> {
        if self.full_redraw {
            self.current.updates()
        } else {
            self.previous.diff_iter(&self.current)
        }
    }

    /// Finish the frame: `current` becomes `previous` and a blank buffer
    /// takes its place.
    pub fn swap(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            area = ?self.current.area(),
            full_redraw = self.full_redraw,
            "frame swap"
        );

        std::mem::swap(&mut self.previous, &mut self.current);
        self.current.reset();
        // the listener observes whichever buffer is being drawn into
        self.current.listener = self.previous.listener.take();
        self.full_redraw = false;
    }

    /// Reallocate both buffers for a new terminal size. The next diff
    /// reports every cell.
    pub fn resize(&mut self, area: Rect) {
        self.previous = Buffer::empty(area);
        self.current.resize(area);
        self.current.reset();
        self.full_redraw = true;
    }

    /// Make the next diff report every cell, e.g. after the terminal was
    /// cleared behind our back.
    pub fn force_full_redraw(&mut self) {
        self.full_redraw = true;
    }
}
