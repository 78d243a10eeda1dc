//! Buffer: A grid of cells covering one rectangular area.
//!
//! The buffer uses contiguous memory allocation for cache efficiency.
//! Cells are stored in row-major order relative to the buffer's origin, so
//! a buffer for a popup can live at `(40, 10)` without allocating the
//! columns to its left.

use super::cell::Cell;
use super::grapheme::{self, Placement};
use super::style::Style;
use crate::layout::{Position, Rect};
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

/// Returned by reference for reads outside the area.
static EMPTY_CELL: Cell = Cell::EMPTY;

/// Observer for styled writes.
///
/// Effects layers use this to learn which styles were painted where during a
/// render pass without the buffer knowing anything about them.
pub trait StyledContentListener: Send + Sync {
    /// Called after `style` was written to `area`.
    fn on_styled_content(&self, area: Rect, style: Style);
}

impl<F> StyledContentListener for F
where
    F: Fn(Rect, Style) + Send + Sync,
{
    fn on_styled_content(&self, area: Rect, style: Style) {
        self(area, style);
    }
}

/// A grid of cells over a [`Rect`].
///
/// Access uses absolute coordinates: `(x, y)` maps to
/// `cells[(y - area.y) * area.width + (x - area.x)]`. Reads outside the area
/// return [`Cell::EMPTY`] and writes outside it are dropped, so widgets can
/// draw up to their edges without bounds checks.
///
/// # Example
///
/// ```
/// use tessera::{Buffer, Rect, Style};
///
/// let mut buffer = Buffer::empty(Rect::new(0, 0, 10, 1));
/// let end = buffer.set_string(0, 0, "Hi", Style::new());
///
/// assert_eq!(end, 2);
/// assert_eq!(buffer.get(0, 0).symbol(), "H");
/// assert_eq!(buffer.get(2, 0).symbol(), " ");
/// ```
#[derive(Clone)]
pub struct Buffer {
    /// The covered area, in absolute coordinates.
    area: Rect,
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Observer notified of styled writes.
    pub(super) listener: Option<Arc<dyn StyledContentListener>>,
}

impl Buffer {
    /// Create a buffer of blank cells.
    pub fn empty(area: Rect) -> Self {
        Self::filled(area, Cell::EMPTY)
    }

    /// Create a buffer with every cell set to `cell`.
    pub fn filled(area: Rect, cell: Cell) -> Self {
        Self {
            area,
            cells: vec![cell; area.area() as usize],
            listener: None,
        }
    }

    /// Create a buffer at the origin sized to fit `lines`, one per row.
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<S> = lines.into_iter().collect();
        let width = lines.iter().map(|l| l.as_ref().width()).max().unwrap_or(0);
        let width = u16::try_from(width).unwrap_or(u16::MAX);
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);

        let mut buffer = Self::empty(Rect::new(0, 0, width, height));
        for (y, line) in (0..height).zip(&lines) {
            buffer.set_string(0, y, line, Style::new());
        }
        buffer
    }

    /// The area this buffer covers.
    #[inline]
    pub const fn area(&self) -> Rect {
        self.area
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the buffer covers no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.area.width).max(1))
    }

    /// Convert absolute (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if the position is outside the area.
    #[inline]
    pub const fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if !self.area.contains(x, y) {
            return None;
        }
        let row = (y - self.area.y) as usize;
        let col = (x - self.area.x) as usize;
        Some(row * self.area.width as usize + col)
    }

    /// Convert a linear index back to an absolute position.
    #[inline]
    pub fn pos_of(&self, index: usize) -> Option<Position> {
        if index >= self.cells.len() {
            return None;
        }
        let width = usize::from(self.area.width);
        let x = self.area.x + (index % width) as u16;
        let y = self.area.y + (index / width) as u16;
        Some(Position::new(x, y))
    }

    /// Get the cell at (x, y), or [`Cell::EMPTY`] outside the area.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> &Cell {
        match self.index_of(x, y) {
            Some(i) => &self.cells[i],
            None => &EMPTY_CELL,
        }
    }

    /// Replace the cell at (x, y). Dropped outside the area.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index_of(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Write `text` starting at (x, y), clipped to the end of the row.
    ///
    /// Returns the column after the last one written. See
    /// [`set_stringn`](Self::set_stringn) for the placement rules.
    pub fn set_string<S, T>(&mut self, x: u16, y: u16, text: S, style: T) -> u16
    where
        S: AsRef<str>,
        T: Into<Style>,
    {
        self.set_stringn(x, y, text, usize::MAX, style)
    }

    /// Write at most `max_width` columns of `text` starting at (x, y).
    ///
    /// Text is placed grapheme-aware:
    /// - combining marks and zero-width joiner sequences extend the
    ///   preceding cell instead of taking a column
    /// - wide glyphs take two cells, the second a continuation; a wide glyph
    ///   with only one column of room is written as a blank
    /// - a pair of regional indicators becomes one two-column flag
    /// - overwriting half of an existing wide glyph blanks the other half
    ///
    /// `style` is patched onto each cell's existing style. Control characters
    /// are skipped. Starting outside the area writes nothing and returns `x`.
    pub fn set_stringn<S, T>(&mut self, x: u16, y: u16, text: S, max_width: usize, style: T) -> u16
    where
        S: AsRef<str>,
        T: Into<Style>,
    {
        if !self.area.contains(x, y) {
            return x;
        }
        let style = style.into();
        let max_width = u16::try_from(max_width).unwrap_or(u16::MAX);
        let limit = self.area.right().min(x.saturating_add(max_width));

        let placed = grapheme::place(text.as_ref(), x, limit);
        for placement in placed.placements {
            match placement {
                Placement::Cluster { x, symbol, width } => self.put(x, y, &symbol, width, style),
                Placement::Blank { x } => self.put(x, y, " ", 1, style),
                Placement::Join { x, text } => {
                    if let Some(i) = self.cluster_before(x, y) {
                        self.cells[i] = self.cells[i].with_appended(&text);
                    }
                }
            }
        }

        self.notify(Rect::new(x, y, placed.end - x, 1), style);
        placed.end
    }

    /// Write one cluster of `width` columns at (x, y), fixing up any wide
    /// glyph it partially overwrites.
    fn put(&mut self, x: u16, y: u16, symbol: &str, width: u16, style: Style) {
        let Some(i) = self.index_of(x, y) else {
            return;
        };
        if self.cells[i].is_continuation() {
            self.blank_base_left_of(x, y);
        }
        self.cells[i] = Cell::styled(symbol, self.cells[i].style().patch(style));

        for offset in 1..width {
            if let Some(j) = self.index_of(x + offset, y) {
                self.cells[j] = Cell::styled("", self.cells[j].style().patch(style));
            }
        }

        // continuations right of the write belonged to a glyph we replaced
        let mut col = x + width;
        while let Some(j) = self.index_of(col, y) {
            if !self.cells[j].is_continuation() {
                break;
            }
            self.cells[j] = self.cells[j].with_symbol(" ");
            col += 1;
        }
    }

    /// Blank the wide glyph owning the continuation at (x, y).
    fn blank_base_left_of(&mut self, x: u16, y: u16) {
        let mut col = x;
        while col > self.area.left() {
            col -= 1;
            let Some(j) = self.index_of(col, y) else {
                break;
            };
            let continuation = self.cells[j].is_continuation();
            self.cells[j] = self.cells[j].with_symbol(" ");
            if !continuation {
                break;
            }
        }
    }

    /// Index of the nearest non-continuation cell left of (x, y) in the row.
    fn cluster_before(&self, x: u16, y: u16) -> Option<usize> {
        let mut col = x;
        while col > self.area.left() {
            col -= 1;
            let i = self.index_of(col, y)?;
            if !self.cells[i].is_continuation() {
                return Some(i);
            }
        }
        None
    }

    /// Patch `style` onto every cell in `area`.
    pub fn set_style<T: Into<Style>>(&mut self, area: Rect, style: T) {
        let style = style.into();
        let area = self.area.intersection(&area);
        self.for_each_in(area, |cell| *cell = cell.patch_style(style));
        self.notify(area, style);
    }

    /// Set every cell in `area` to `cell`.
    pub fn fill(&mut self, area: Rect, cell: &Cell) {
        let area = self.area.intersection(&area);
        self.for_each_in(area, |slot| slot.clone_from(cell));
        self.notify(area, cell.style());
    }

    /// Reset every cell in `area` to [`Cell::EMPTY`].
    pub fn clear(&mut self, area: Rect) {
        let area = self.area.intersection(&area);
        self.for_each_in(area, |slot| *slot = Cell::EMPTY);
    }

    /// Reset the whole buffer to [`Cell::EMPTY`].
    pub fn reset(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Grow to cover both areas and copy `other` on top.
    ///
    /// Cells of `other` win where the two overlap; cells covered by neither
    /// buffer are blank.
    pub fn merge(&mut self, other: &Self) {
        let area = self.area.union(&other.area);
        let mut merged = Self::empty(area);
        merged.copy_overlap(self);
        merged.copy_overlap(other);
        self.area = area;
        self.cells = merged.cells;
    }

    /// Move to `area`, keeping cells whose position is in both areas.
    pub fn resize(&mut self, area: Rect) {
        if area == self.area {
            return;
        }
        let mut resized = Self::empty(area);
        resized.copy_overlap(self);
        self.area = area;
        self.cells = resized.cells;
    }

    /// Register the observer for styled writes, replacing any previous one.
    pub fn set_styled_content_listener<L>(&mut self, listener: L)
    where
        L: StyledContentListener + 'static,
    {
        self.listener = Some(Arc::new(listener));
    }

    /// Remove the styled-write observer.
    pub fn clear_styled_content_listener(&mut self) {
        self.listener = None;
    }

    fn notify(&self, area: Rect, style: Style) {
        if area.is_empty() {
            return;
        }
        if let Some(listener) = &self.listener {
            listener.on_styled_content(area, style);
        }
    }

    /// Run `f` on every cell of `area`, which must lie within the buffer.
    fn for_each_in(&mut self, area: Rect, mut f: impl FnMut(&mut Cell)) {
        let width = usize::from(area.width);
        for y in area.top()..area.bottom() {
            if let Some(start) = self.index_of(area.x, y) {
                self.cells[start..start + width].iter_mut().for_each(&mut f);
            }
        }
    }

    /// Copy the cells of `from` that fall inside this buffer's area.
    fn copy_overlap(&mut self, from: &Self) {
        let overlap = self.area.intersection(&from.area);
        let width = usize::from(overlap.width);
        for y in overlap.top()..overlap.bottom() {
            if let (Some(dst), Some(src)) = (self.index_of(overlap.x, y), from.index_of(overlap.x, y)) {
                self.cells[dst..dst + width].clone_from_slice(&from.cells[src..src + width]);
            }
        }
    }

    /// Row text with continuations skipped, for debugging output.
    fn row_symbols(&self) -> Vec<String> {
        if self.area.width == 0 {
            return Vec::new();
        }
        self.rows()
            .map(|row| row.iter().map(Cell::symbol).collect())
            .collect()
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.area == other.area && self.cells == other.cells
    }
}

impl Eq for Buffer {}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("area", &self.area)
            .field("content", &self.row_symbols())
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::style::Color;
    use std::sync::Mutex;

    fn row(buffer: &Buffer, y: u16) -> Vec<&str> {
        let area = buffer.area();
        (area.left()..area.right())
            .map(|x| buffer.get(x, y).symbol())
            .collect()
    }

    #[test]
    fn test_set_string_hi() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 10, 1));
        assert_eq!(buffer.set_string(0, 0, "Hi", Style::new()), 2);
        assert_eq!(buffer.get(0, 0).symbol(), "H");
        assert_eq!(buffer.get(1, 0).symbol(), "i");
        assert_eq!(buffer.get(2, 0).symbol(), " ");
    }

    #[test]
    fn test_offset_area_indexing() {
        let mut buffer = Buffer::empty(Rect::new(5, 3, 4, 2));
        assert_eq!(buffer.len(), 8);
        assert_eq!(buffer.index_of(5, 3), Some(0));
        assert_eq!(buffer.index_of(8, 4), Some(7));
        assert_eq!(buffer.index_of(4, 3), None);
        assert_eq!(buffer.pos_of(6), Some(Position::new(7, 4)));
        assert_eq!(buffer.pos_of(8), None);

        buffer.set(6, 4, Cell::new("x"));
        assert_eq!(buffer.cells()[5].symbol(), "x");
    }

    #[test]
    fn test_out_of_area_access() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 3, 1));
        buffer.set(10, 10, Cell::new("x"));
        assert_eq!(buffer.get(10, 10), &Cell::EMPTY);
        assert_eq!(buffer, Buffer::empty(Rect::new(0, 0, 3, 1)));
        assert_eq!(buffer.set_string(7, 0, "abc", Style::new()), 7);
        assert_eq!(buffer.set_string(0, 1, "abc", Style::new()), 0);
    }

    #[test]
    fn test_out_of_area_read_over_heap_cells() {
        let long = "👨\u{200d}👩\u{200d}👧\u{200d}👦";
        let buffer = Buffer::filled(Rect::new(2, 2, 2, 1), Cell::new(long));
        assert!(buffer.get(2, 2).is_heap());
        assert_eq!(buffer.get(0, 0), &Cell::EMPTY);
        assert_eq!(buffer.get(4, 2).symbol(), " ");
    }

    #[test]
    fn test_set_string_clips_to_row() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 4, 2));
        assert_eq!(buffer.set_string(2, 0, "hello", Style::new()), 4);
        assert_eq!(row(&buffer, 0), vec![" ", " ", "h", "e"]);
        assert_eq!(row(&buffer, 1), vec![" "; 4]);
    }

    #[test]
    fn test_set_stringn_limits_width() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 10, 1));
        assert_eq!(buffer.set_stringn(1, 0, "abcdef", 3, Style::new()), 4);
        assert_eq!(row(&buffer, 0)[..5], [" ", "a", "b", "c", " "]);
    }

    #[test]
    fn test_wide_char_writes_continuation() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 5, 1));
        assert_eq!(buffer.set_string(0, 0, "日本", Style::new()), 4);
        assert_eq!(row(&buffer, 0), vec!["日", "", "本", "", " "]);
        assert!(buffer.get(1, 0).is_continuation());
    }

    #[test]
    fn test_wide_char_at_last_column_is_blank() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 3, 1));
        buffer.set_string(0, 0, "xyz", Style::new());
        assert_eq!(buffer.set_string(2, 0, "日", Style::new()), 3);
        assert_eq!(row(&buffer, 0), vec!["x", "y", " "]);
    }

    #[test]
    fn test_overwrite_left_half_clears_continuation() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 4, 1));
        buffer.set_string(0, 0, "日", Style::new());
        buffer.set_string(0, 0, "a", Style::new());
        assert_eq!(row(&buffer, 0), vec!["a", " ", " ", " "]);
    }

    #[test]
    fn test_overwrite_right_half_clears_base() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 4, 1));
        buffer.set_string(0, 0, "日", Style::new());
        buffer.set_string(1, 0, "a", Style::new());
        assert_eq!(row(&buffer, 0), vec![" ", "a", " ", " "]);
    }

    #[test]
    fn test_overlapping_wide_chars() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 6, 1));
        buffer.set_string(0, 0, "日本語", Style::new());
        buffer.set_string(1, 0, "中", Style::new());
        assert_eq!(row(&buffer, 0), vec![" ", "中", "", " ", "語", ""]);
    }

    #[test]
    fn test_combining_mark_joins_previous_write() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 4, 1));
        let x = buffer.set_string(0, 0, "e", Style::new());
        assert_eq!(buffer.set_string(x, 0, "\u{301}", Style::new()), 1);
        assert_eq!(buffer.get(0, 0).symbol(), "e\u{301}");
        assert_eq!(buffer.get(1, 0).symbol(), " ");
    }

    #[test]
    fn test_combining_mark_skips_continuation() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 4, 1));
        buffer.set_string(0, 0, "日", Style::new());
        buffer.set_string(2, 0, "\u{301}", Style::new());
        assert_eq!(buffer.get(0, 0).symbol(), "日\u{301}");
        assert!(buffer.get(1, 0).is_continuation());
    }

    #[test]
    fn test_leading_combining_mark_at_row_start_is_dropped() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 3, 2));
        buffer.set_string(2, 0, "z", Style::new());
        buffer.set_string(0, 1, "\u{301}a", Style::new());
        assert_eq!(row(&buffer, 0), vec![" ", " ", "z"]);
        assert_eq!(row(&buffer, 1), vec!["a", " ", " "]);
    }

    #[test]
    fn test_flag() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 4, 1));
        assert_eq!(buffer.set_string(0, 0, "🇺🇸", Style::new()), 2);
        assert_eq!(row(&buffer, 0), vec!["🇺🇸", "", " ", " "]);
    }

    #[test]
    fn test_style_is_patched() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 3, 1));
        buffer.set_style(buffer.area(), Style::new().bg(Color::Blue));
        buffer.set_string(0, 0, "ab", Style::new().fg(Color::White));

        let style = buffer.get(0, 0).style();
        assert_eq!(style.fg, Some(Color::White));
        assert_eq!(style.bg, Some(Color::Blue));
        assert_eq!(buffer.get(2, 0).style(), Style::new().bg(Color::Blue));
    }

    #[test]
    fn test_fill_and_clear() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 4, 3));
        buffer.fill(Rect::new(1, 1, 10, 10), &Cell::new("#"));
        assert_eq!(row(&buffer, 0), vec![" "; 4]);
        assert_eq!(row(&buffer, 1), vec![" ", "#", "#", "#"]);
        assert_eq!(row(&buffer, 2), vec![" ", "#", "#", "#"]);

        buffer.clear(Rect::new(2, 0, 1, 3));
        assert_eq!(row(&buffer, 1), vec![" ", "#", " ", "#"]);

        buffer.reset();
        assert_eq!(buffer, Buffer::empty(Rect::new(0, 0, 4, 3)));
    }

    #[test]
    fn test_with_lines() {
        let buffer = Buffer::with_lines(["ab", "日x", ""]);
        assert_eq!(buffer.area(), Rect::new(0, 0, 3, 3));
        assert_eq!(row(&buffer, 0), vec!["a", "b", " "]);
        assert_eq!(row(&buffer, 1), vec!["日", "", "x"]);
        assert_eq!(row(&buffer, 2), vec![" "; 3]);
    }

    #[test]
    fn test_merge() {
        let mut base = Buffer::with_lines(["aaa", "aaa"]);
        let mut popup = Buffer::empty(Rect::new(2, 1, 2, 2));
        popup.set_string(2, 1, "pp", Style::new());
        popup.set_string(2, 2, "qq", Style::new());

        base.merge(&popup);
        assert_eq!(base.area(), Rect::new(0, 0, 4, 3));
        assert_eq!(row(&base, 0), vec!["a", "a", "a", " "]);
        assert_eq!(row(&base, 1), vec!["a", "a", "p", "p"]);
        assert_eq!(row(&base, 2), vec![" ", " ", "q", "q"]);
    }

    #[test]
    fn test_resize_preserves_overlap() {
        let mut buffer = Buffer::with_lines(["abc", "def"]);
        buffer.resize(Rect::new(1, 1, 4, 2));
        assert_eq!(buffer.len(), 8);
        assert_eq!(buffer.get(1, 1).symbol(), "e");
        assert_eq!(buffer.get(2, 1).symbol(), "f");
        assert_eq!(buffer.get(3, 1).symbol(), " ");
        assert_eq!(buffer.get(1, 2).symbol(), " ");
    }

    #[test]
    fn test_empty_area_is_noop() {
        let mut buffer = Buffer::empty(Rect::new(3, 3, 0, 5));
        assert!(buffer.is_empty());
        assert_eq!(buffer.set_string(3, 3, "abc", Style::new()), 3);
        buffer.fill(Rect::new(0, 0, 10, 10), &Cell::new("x"));
        assert_eq!(buffer.rows().count(), 0);
        assert!(format!("{buffer:?}").contains("content: []"));
    }

    #[test]
    fn test_styled_content_listener() {
        let seen: Arc<Mutex<Vec<(Rect, Style)>>> = Arc::default();
        let sink = Arc::clone(&seen);

        let mut buffer = Buffer::empty(Rect::new(0, 0, 10, 2));
        buffer.set_styled_content_listener(move |area: Rect, style: Style| {
            if let Ok(mut log) = sink.lock() {
                log.push((area, style));
            }
        });

        let red = Style::new().fg(Color::Red);
        buffer.set_string(1, 0, "abc", red);
        buffer.set_style(Rect::new(0, 1, 20, 1), Style::new().bold());
        buffer.fill(Rect::new(0, 0, 2, 2), &Cell::styled("x", red));
        buffer.clear(buffer.area());
        buffer.set_string(20, 0, "off-screen", red);

        let log = seen.lock().map(|l| l.clone()).unwrap_or_default();
        assert_eq!(
            log,
            vec![
                (Rect::new(1, 0, 3, 1), red),
                (Rect::new(0, 1, 10, 1), Style::new().bold()),
                (Rect::new(0, 0, 2, 2), red),
            ]
        );

        buffer.clear_styled_content_listener();
        buffer.set_string(0, 0, "z", red);
        assert_eq!(seen.lock().map(|l| l.len()).unwrap_or_default(), 3);
    }
}
