//! # Tessera
//!
//! The cell buffer, frame diff and constraint layout core of a terminal UI.
//!
//! Applications describe a frame by painting widgets into an off-screen
//! [`Buffer`]; the frame driver diffs it against the previous frame and only
//! writes the cells that changed. Space is divided between widgets by
//! [`Layout`], a constraint solver that never fails: unsatisfiable layouts
//! degrade to smaller regions instead of erroring mid-frame.
//!
//! ## Core Concepts
//!
//! - **Cells**: one grapheme cluster plus a [`Style`], with a cached
//!   fingerprint so diffing unchanged frames is cheap
//! - **Grapheme-aware writes**: wide glyphs, combining marks, emoji joiner
//!   sequences and flags land in the right columns
//! - **Exact layout math**: percentages and ratios are resolved with
//!   [`Fraction`] so complementary shares tile an area without losing columns
//! - **Flex modes**: leftover space is placed at the start, end, center or
//!   between regions
//!
//! ## Example
//!
//! ```rust
//! use tessera::{Buffer, Color, Constraint, Flex, Layout, Rect, Style};
//!
//! let area = Rect::new(0, 0, 40, 3);
//! let mut previous = Buffer::empty(area);
//! let mut next = Buffer::empty(area);
//!
//! let [left, right] = Layout::horizontal()
//!     .constraints([Constraint::Length(10), Constraint::Length(10)])
//!     .flex(Flex::SpaceBetween)
//!     .areas(area);
//!
//! next.set_string(left.x, left.y, "left", Style::new().fg(Color::Green));
//! next.set_string(right.x, right.y, "right", Style::new());
//!
//! let updates = previous.diff(&next);
//! assert_eq!(updates.len(), 9);
//! previous.apply(updates);
//! assert_eq!(previous, next);
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events from layout splits, buffer diffs and
//!   frame swaps

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod fraction;
pub mod layout;
pub mod widget;

// Re-exports for convenience
pub use buffer::{
    Buffer, Cell, CellUpdate, Color, DiffIter, FrameBuffers, Modifiers, Rgb, Style,
    StyledContentListener,
};
pub use fraction::{Fraction, FractionError};
pub use layout::{
    Constraint, Direction, Flex, Layout, LayoutCache, LayoutCacheKey, LayoutCacheStats, Margin,
    Position, Rect,
};
pub use widget::{StatefulWidget, Widget};
