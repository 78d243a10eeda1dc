//! Rect: A rectangle primitive for layout calculations.

/// A column/row position on the terminal grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Position {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Space reserved around the inside edge of a layout area.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Margin {
    /// Columns removed from both the left and the right edge.
    pub horizontal: u16,
    /// Rows removed from both the top and the bottom edge.
    pub vertical: u16,
}

impl Margin {
    /// Create a margin with separate horizontal and vertical amounts.
    #[inline]
    pub const fn new(horizontal: u16, vertical: u16) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// The same margin on every side.
    #[inline]
    pub const fn uniform(value: u16) -> Self {
        Self::new(value, value)
    }
}

/// A rectangle defined by position and size.
///
/// Rects are plain values: every layout split produces fresh ones, and a rect
/// with a zero dimension is empty.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate (column) of the top-left corner.
    pub x: u16,
    /// Y coordinate (row) of the top-left corner.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a new rectangle.
    ///
    /// The size is clamped so the rectangle never extends past `u16::MAX`.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        let max_width = u16::MAX - x;
        let max_height = u16::MAX - y;
        Self {
            x,
            y,
            width: if width > max_width { max_width } else { width },
            height: if height > max_height { max_height } else { height },
        }
    }

    /// Create a rectangle from a terminal size (full screen).
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Get the area (number of cells).
    #[inline]
    pub const fn area(&self) -> u32 {
        (self.width as u32) * (self.height as u32)
    }

    /// Check if the rectangle is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Left edge (inclusive).
    #[inline]
    pub const fn left(&self) -> u16 {
        self.x
    }

    /// Top edge (inclusive).
    #[inline]
    pub const fn top(&self) -> u16 {
        self.y
    }

    /// Get the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Get the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this rectangle intersects with another.
    #[inline]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// The overlapping region, or an empty rect when the two do not overlap.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x1 >= x2 || y1 >= y2 {
            return Self::new(x1, y1, 0, 0);
        }
        Self::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// The smallest rect containing both. Empty rects are ignored.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = self.right().max(other.right());
        let y2 = self.bottom().max(other.bottom());
        Self::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Shrink the rectangle by a margin on each side.
    ///
    /// Returns an empty rect at the original origin when the margin does not fit.
    #[must_use]
    pub const fn inner(&self, margin: Margin) -> Self {
        let dw = margin.horizontal.saturating_mul(2);
        let dh = margin.vertical.saturating_mul(2);
        if self.width < dw || self.height < dh {
            return Self::new(self.x, self.y, 0, 0);
        }
        Self::new(
            self.x + margin.horizontal,
            self.y + margin.vertical,
            self.width - dw,
            self.height - dh,
        )
    }

    /// Shrink the rectangle by the same margin on all sides.
    #[inline]
    #[must_use]
    pub const fn shrink(&self, margin: u16) -> Self {
        self.inner(Margin::uniform(margin))
    }

    /// Move and clip this rect so it lies within `other`.
    #[must_use]
    pub fn clamp(&self, other: Self) -> Self {
        let width = self.width.min(other.width);
        let height = self.height.min(other.height);
        let x = self.x.clamp(other.x, other.right().saturating_sub(width));
        let y = self.y.clamp(other.y, other.bottom().saturating_sub(height));
        Self::new(x, y, width, height)
    }

    /// Split horizontally at a given column offset.
    pub fn split_horizontal(&self, at: u16) -> (Self, Self) {
        let at = at.min(self.width);
        (
            Self::new(self.x, self.y, at, self.height),
            Self::new(self.x + at, self.y, self.width - at, self.height),
        )
    }

    /// Split vertically at a given row offset.
    pub fn split_vertical(&self, at: u16) -> (Self, Self) {
        let at = at.min(self.height);
        (
            Self::new(self.x, self.y, self.width, at),
            Self::new(self.x, self.y + at, self.width, self.height - at),
        )
    }

    /// Iterate over every position in row-major order.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        (self.top()..self.bottom())
            .flat_map(move |y| (self.left()..self.right()).map(move |x| Position::new(x, y)))
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}
