//! Layout: Split a rectangle into regions along one axis.

use super::constraint::Constraint;
use super::flex::{Direction, Flex};
use super::rect::{Margin, Rect};
use super::solver::{self, Segment};

/// A one-dimensional constraint layout.
///
/// This is the only way space gets subdivided: a container builds a layout,
/// splits its own area, and hands the resulting rects to its children.
///
/// # Example
///
/// ```
/// use tessera::{Constraint, Flex, Layout, Rect};
///
/// let areas = Layout::horizontal()
///     .constraints([Constraint::Length(20), Constraint::Length(20)])
///     .flex(Flex::Center)
///     .split(Rect::new(0, 0, 100, 50));
///
/// assert_eq!(areas[0], Rect::new(30, 0, 20, 50));
/// assert_eq!(areas[1], Rect::new(50, 0, 20, 50));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Layout {
    direction: Direction,
    constraints: Vec<Constraint>,
    margin: Margin,
    spacing: u16,
    flex: Flex,
}

impl Layout {
    /// Create a layout with the given direction and constraints.
    pub fn new<I>(direction: Direction, constraints: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Constraint>,
    {
        Self::default().direction(direction).constraints(constraints)
    }

    /// Create a left-to-right layout.
    pub fn horizontal() -> Self {
        Self::default().direction(Direction::Horizontal)
    }

    /// Create a top-to-bottom layout.
    pub fn vertical() -> Self {
        Self::default().direction(Direction::Vertical)
    }

    /// Set the split direction.
    #[must_use]
    pub const fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the constraints, one per output region.
    #[must_use]
    pub fn constraints<I>(mut self, constraints: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Constraint>,
    {
        self.constraints = constraints.into_iter().map(Into::into).collect();
        self
    }

    /// Set the gap inserted between adjacent regions.
    #[must_use]
    pub const fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the same margin on every side.
    #[must_use]
    pub const fn margin(mut self, margin: u16) -> Self {
        self.margin = Margin::uniform(margin);
        self
    }

    /// Set the left/right margin.
    #[must_use]
    pub const fn horizontal_margin(mut self, margin: u16) -> Self {
        self.margin.horizontal = margin;
        self
    }

    /// Set the top/bottom margin.
    #[must_use]
    pub const fn vertical_margin(mut self, margin: u16) -> Self {
        self.margin.vertical = margin;
        self
    }

    /// Set how free space is distributed.
    #[must_use]
    pub const fn flex(mut self, flex: Flex) -> Self {
        self.flex = flex;
        self
    }

    /// The split direction.
    pub const fn get_direction(&self) -> Direction {
        self.direction
    }

    /// The configured constraints.
    pub fn get_constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// The configured margin.
    pub const fn get_margin(&self) -> Margin {
        self.margin
    }

    /// The configured spacing.
    pub const fn get_spacing(&self) -> u16 {
        self.spacing
    }

    /// The configured flex mode.
    pub const fn get_flex(&self) -> Flex {
        self.flex
    }

    /// Split `area` into one rect per constraint, in constraint order.
    ///
    /// Never fails: unsatisfiable constraints degrade to smaller (possibly
    /// zero-size) regions. Rects are adjacent along the split axis and keep
    /// the margin-reduced extent on the cross axis.
    pub fn split(&self, area: Rect) -> Vec<Rect> {
        let inner = area.inner(self.margin);
        let length = match self.direction {
            Direction::Horizontal => inner.width,
            Direction::Vertical => inner.height,
        };

        let segments = solver::solve(&self.constraints, self.flex, self.spacing, length);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            ?area,
            direction = ?self.direction,
            flex = ?self.flex,
            regions = segments.len(),
            "layout split"
        );

        segments
            .into_iter()
            .map(|segment| self.place(inner, segment))
            .collect()
    }

    /// Split into a fixed number of areas.
    ///
    /// Missing regions are padded with empty rects and extra ones are dropped,
    /// so the result always has length `N`.
    pub fn areas<const N: usize>(&self, area: Rect) -> [Rect; N] {
        let split = self.split(area);
        let mut out = [Rect::ZERO; N];
        for (slot, rect) in out.iter_mut().zip(split) {
            *slot = rect;
        }
        out
    }

    const fn place(&self, inner: Rect, segment: Segment) -> Rect {
        match self.direction {
            Direction::Horizontal => Rect::new(
                inner.x + segment.offset,
                inner.y,
                segment.size,
                inner.height,
            ),
            Direction::Vertical => Rect::new(
                inner.x,
                inner.y + segment.offset,
                inner.width,
                segment.size,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Constraint::{Fill, Length, Min, Percentage, Ratio};

    #[test]
    fn test_center_pair() {
        let areas = Layout::horizontal()
            .constraints([Length(20), Length(20)])
            .flex(Flex::Center)
            .split(Rect::new(0, 0, 100, 50));
        assert_eq!(areas, vec![Rect::new(30, 0, 20, 50), Rect::new(50, 0, 20, 50)]);
    }

    #[test]
    fn test_space_between_three() {
        let areas = Layout::horizontal()
            .constraints([Length(20), Length(20), Length(20)])
            .flex(Flex::SpaceBetween)
            .split(Rect::new(0, 0, 100, 50));
        let xs: Vec<u16> = areas.iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![0, 40, 80]);
    }

    #[test]
    fn test_single_constraint_is_offset() {
        let area = Rect::new(0, 0, 100, 10);
        let center = Layout::horizontal()
            .constraints([Length(20)])
            .flex(Flex::Center)
            .split(area);
        assert_eq!(center, vec![Rect::new(40, 0, 20, 10)]);

        let end = Layout::horizontal()
            .constraints([Length(20)])
            .flex(Flex::End)
            .split(area);
        assert_eq!(end, vec![Rect::new(80, 0, 20, 10)]);
    }

    #[test]
    fn test_vertical_with_origin() {
        let areas = Layout::vertical()
            .constraints([Length(2), Fill(1)])
            .split(Rect::new(3, 4, 10, 10));
        assert_eq!(areas, vec![Rect::new(3, 4, 10, 2), Rect::new(3, 6, 10, 8)]);
    }

    #[test]
    fn test_margin_applies_before_flex_gaps() {
        let areas = Layout::horizontal()
            .constraints([Length(10)])
            .margin(5)
            .flex(Flex::End)
            .split(Rect::new(0, 0, 40, 20));
        // inner is 30 wide starting at x = 5
        assert_eq!(areas, vec![Rect::new(25, 5, 10, 10)]);
    }

    #[test]
    fn test_spacing_between_regions() {
        let areas = Layout::horizontal()
            .constraints([Fill(1), Fill(1)])
            .spacing(2)
            .split(Rect::new(0, 0, 22, 1));
        assert_eq!(areas, vec![Rect::new(0, 0, 10, 1), Rect::new(12, 0, 10, 1)]);
    }

    #[test]
    fn test_ratio_thirds_tile() {
        let areas = Layout::horizontal()
            .constraints([Ratio(1, 3), Ratio(1, 3), Ratio(1, 3)])
            .split(Rect::new(0, 0, 100, 1));
        assert_eq!(areas[0].x, 0);
        assert_eq!(areas[1].x, areas[0].right());
        assert_eq!(areas[2].x, areas[1].right());
        assert_eq!(areas[2].right(), 100);
    }

    #[test]
    fn test_unsatisfiable_degrades_to_zero() {
        let areas = Layout::vertical()
            .constraints([Length(8), Length(8), Min(4)])
            .split(Rect::new(0, 0, 10, 10));
        assert_eq!(areas[0].height, 8);
        assert_eq!(areas[1].height, 2);
        assert_eq!(areas[2].height, 0);
        assert_eq!(areas[2].y, 10);
    }

    #[test]
    fn test_empty_area() {
        let areas = Layout::horizontal()
            .constraints([Percentage(50), Percentage(50)])
            .split(Rect::new(5, 5, 0, 3));
        assert_eq!(areas.len(), 2);
        assert!(areas.iter().all(Rect::is_empty));
    }

    #[test]
    fn test_no_constraints() {
        assert!(Layout::horizontal().split(Rect::new(0, 0, 10, 10)).is_empty());
    }

    #[test]
    fn test_areas_fixed_count() {
        let [top, bottom] = Layout::vertical()
            .constraints([Length(1), Fill(1)])
            .areas(Rect::new(0, 0, 5, 5));
        assert_eq!(top, Rect::new(0, 0, 5, 1));
        assert_eq!(bottom, Rect::new(0, 1, 5, 4));

        let [_, _, missing] = Layout::vertical()
            .constraints([Length(1), Fill(1)])
            .areas(Rect::new(0, 0, 5, 5));
        assert_eq!(missing, Rect::ZERO);
    }

    #[test]
    fn test_new_accepts_lengths() {
        let layout = Layout::new(Direction::Horizontal, [3u16, 4]);
        assert_eq!(layout.get_constraints(), &[Length(3), Length(4)]);
        assert_eq!(layout.get_direction(), Direction::Horizontal);
    }
}
