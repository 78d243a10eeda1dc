//! Layout module: Constraint-based subdivision of screen space.
//!
//! A [`Layout`] turns a [`Rect`] and an ordered list of [`Constraint`]s into
//! one rect per constraint. Splitting is a pure function; results can be
//! memoized with a [`LayoutCache`].

pub mod cache;
mod constraint;
mod flex;
#[allow(clippy::module_inception)]
mod layout;
mod rect;
mod solver;

pub use cache::{LayoutCache, LayoutCacheKey, LayoutCacheStats};
pub use constraint::Constraint;
pub use flex::{Direction, Flex};
pub use layout::Layout;
pub use rect::{Margin, Position, Rect};
