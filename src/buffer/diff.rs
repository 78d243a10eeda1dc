//! Diffing Engine: The minimal set of cell updates between two frames.
//!
//! This module implements the core anti-flicker logic:
//! 1. Compare previous and next buffers cell by cell
//! 2. Report only the cells that changed, in row-major order
//! 3. Fall back to a full report when the buffers differ in shape
//!
//! Comparison is allocation-free. [`Cell`] equality checks the cached
//! fingerprint first, so unchanged frames cost one `u64` compare per cell.

use super::{Buffer, Cell};

/// One changed cell: write `cell` at absolute position (`x`, `y`).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CellUpdate<'a> {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// The new content, borrowed from the target buffer.
    pub cell: &'a Cell,
}

/// Iterator over the updates turning one buffer into another.
///
/// Created by [`Buffer::diff_iter`].
///
/// Updates borrow from the target buffer only (`'n`), so they outlive the
/// borrow of the previous frame (`'p`).
#[derive(Debug)]
pub struct DiffIter<'p, 'n> {
    previous: &'p [Cell],
    next: &'n Buffer,
    index: usize,
    full: bool,
}

impl<'n> DiffIter<'_, 'n> {
    /// Report every cell of `next`.
    pub(crate) fn full(next: &'n Buffer) -> Self {
        Self {
            previous: &[],
            next,
            index: 0,
            full: true,
        }
    }
}

impl<'n> Iterator for DiffIter<'_, 'n> {
    type Item = CellUpdate<'n>;

    fn next(&mut self) -> Option<Self::Item> {
        let cells = self.next.cells();
        while self.index < cells.len() {
            let i = self.index;
            self.index += 1;

            let cell = &cells[i];
            if !self.full && same(&self.previous[i], cell) {
                continue;
            }
            let pos = self.next.pos_of(i)?;
            return Some(CellUpdate {
                x: pos.x,
                y: pos.y,
                cell,
            });
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.next.len().saturating_sub(self.index);
        if self.full {
            (remaining, Some(remaining))
        } else {
            (0, Some(remaining))
        }
    }
}

/// Reference equality first, then structural.
#[inline]
fn same(a: &Cell, b: &Cell) -> bool {
    std::ptr::eq(a, b) || a == b
}

impl Buffer {
    /// Cells of `other` that differ from this buffer, in row-major order.
    ///
    /// When the two buffers differ in width or height every cell of `other`
    /// is reported. Positions are in `other`'s coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use tessera::{Buffer, Rect, Style};
    ///
    /// let previous = Buffer::empty(Rect::new(0, 0, 4, 1));
    /// let mut next = previous.clone();
    /// next.set_string(1, 0, "ok", Style::new());
    ///
    /// let updates = previous.diff(&next);
    /// assert_eq!(updates.len(), 2);
    /// assert_eq!((updates[0].x, updates[0].cell.symbol()), (1, "o"));
    /// ```
    pub fn diff<'a>(&self, other: &'a Self) -> Vec<CellUpdate<'a>> {
        let updates: Vec<CellUpdate<'a>> = self.diff_iter(other).collect();

        #[cfg(feature = "tracing")]
        tracing::trace!(
            area = ?other.area(),
            changed = updates.len(),
            full = !self.same_shape(other),
            "buffer diff"
        );

        updates
    }

    /// Allocation-free form of [`diff`](Self::diff).
    pub fn diff_iter<'p, 'n>(&'p self, other: &'n Self) -> DiffIter<'p, 'n> {
        if !self.same_shape(other) {
            return DiffIter::full(other);
        }
        DiffIter {
            previous: self.cells(),
            next: other,
            index: 0,
            full: false,
        }
    }

    /// Every cell of this buffer as an update, for full redraws.
    pub fn updates(&self) -> DiffIter<'_, '_> {
        DiffIter::full(self)
    }

    /// Write a sequence of updates into this buffer.
    ///
    /// Updates outside the area are dropped like any other write.
    pub fn apply<'a, I>(&mut self, updates: I)
    where
        I: IntoIterator<Item = CellUpdate<'a>>,
    {
        for update in updates {
            self.set(update.x, update.y, update.cell.clone());
        }
    }

    fn same_shape(&self, other: &Self) -> bool {
        let (a, b) = (self.area(), other.area());
        a.width == b.width && a.height == b.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::style::{Color, Style};
    use crate::layout::Rect;

    fn symbols<'a>(updates: &[CellUpdate<'a>]) -> Vec<(u16, u16, &'a str)> {
        updates
            .iter()
            .map(|u| (u.x, u.y, u.cell.symbol()))
            .collect()
    }

    #[test]
    fn test_identical_buffers() {
        let buffer = Buffer::with_lines(["hello", "world"]);
        assert!(buffer.diff(&buffer).is_empty());
        assert!(buffer.diff(&buffer.clone()).is_empty());
    }

    #[test]
    fn test_single_change() {
        let previous = Buffer::with_lines(["hello", "world"]);
        let mut next = previous.clone();
        next.set_string(1, 1, "a", Style::new());

        assert_eq!(symbols(&previous.diff(&next)), vec![(1, 1, "a")]);
    }

    #[test]
    fn test_style_only_change() {
        let previous = Buffer::with_lines(["ab"]);
        let mut next = previous.clone();
        next.set_style(Rect::new(1, 0, 1, 1), Style::new().fg(Color::Red));

        let updates = previous.diff(&next);
        assert_eq!(symbols(&updates), vec![(1, 0, "b")]);
        assert_eq!(updates[0].cell.style().fg, Some(Color::Red));
    }

    #[test]
    fn test_row_major_order() {
        let previous = Buffer::empty(Rect::new(0, 0, 3, 3));
        let mut next = previous.clone();
        next.set(2, 2, Cell::new("c"));
        next.set(0, 1, Cell::new("b"));
        next.set(1, 0, Cell::new("a"));

        assert_eq!(
            symbols(&previous.diff(&next)),
            vec![(1, 0, "a"), (0, 1, "b"), (2, 2, "c")]
        );
    }

    #[test]
    fn test_wide_char_reports_continuation() {
        let previous = Buffer::empty(Rect::new(0, 0, 4, 1));
        let mut next = previous.clone();
        next.set_string(0, 0, "日", Style::new());

        assert_eq!(symbols(&previous.diff(&next)), vec![(0, 0, "日"), (1, 0, "")]);
    }

    #[test]
    fn test_shape_mismatch_reports_everything() {
        let previous = Buffer::empty(Rect::new(0, 0, 2, 1));
        let next = Buffer::empty(Rect::new(0, 0, 3, 1));
        let updates = previous.diff(&next);
        assert_eq!(updates.len(), 3);
        assert!(updates.iter().all(|u| *u.cell == Cell::EMPTY));
    }

    #[test]
    fn test_moved_area_uses_target_coordinates() {
        let previous = Buffer::with_lines(["ab"]);
        let mut next = Buffer::empty(Rect::new(5, 5, 2, 1));
        next.set_string(5, 5, "ax", Style::new());

        assert_eq!(symbols(&previous.diff(&next)), vec![(6, 5, "x")]);
    }

    #[test]
    fn test_apply_reproduces_target() {
        let previous = Buffer::with_lines(["hello", "world"]);
        let mut next = previous.clone();
        next.set_string(0, 0, "日本", Style::new().bg(Color::Blue));
        next.set_string(3, 1, "!", Style::new());

        let mut patched = previous.clone();
        patched.apply(previous.diff(&next));
        assert_eq!(patched, next);
    }

    #[test]
    fn test_apply_diff_in_place() {
        let mut previous = Buffer::with_lines(["abc", "def"]);
        let mut next = previous.clone();
        next.set_string(1, 1, "日", Style::new().fg(Color::Red));

        previous.apply(previous.diff(&next));
        assert_eq!(previous, next);

        let updates: Vec<_> = previous.diff_iter(&next).collect();
        assert!(updates.is_empty());
        previous.apply(updates);
    }

    #[test]
    fn test_diff_iter_matches_diff() {
        let previous = Buffer::with_lines(["abc", "def"]);
        let next = Buffer::with_lines(["abx", "yef"]);
        let collected: Vec<_> = previous.diff_iter(&next).collect();
        assert_eq!(collected, previous.diff(&next));
        assert_eq!(next.updates().count(), 6);
    }
}
