//! Buffer module: Cells, the buffer grid, and frame diffing.
//!
//! This module contains:
//! - [`Cell`]: One terminal position, a grapheme cluster plus its [`Style`]
//! - [`Buffer`]: A grid of cells that widgets paint into
//! - [`diff`]: The minimal set of [`CellUpdate`]s between two frames
//! - [`FrameBuffers`]: The previous/current pair a frame driver owns
//!
//! ANSI serialization lives on [`Buffer`] (`to_ansi_string` and friends).

mod ansi;
#[allow(clippy::module_inception)]
mod buffer;
mod cell;
pub mod diff;
mod frame;
mod grapheme;
mod style;

pub use buffer::{Buffer, StyledContentListener};
pub use cell::Cell;
pub use diff::{CellUpdate, DiffIter};
pub use frame::FrameBuffers;
pub use style::{Color, Modifiers, Rgb, Style};
