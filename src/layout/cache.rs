//! Layout cache: Memoize splits that are recomputed every frame.
//!
//! Most frames split the same areas with the same layouts. The cache keys
//! on everything that influences the result, with ratios canonicalized so
//! that `Ratio(1, 2)` and `Ratio(2, 4)` share an entry.

use super::constraint::Constraint;
use super::flex::{Direction, Flex};
use super::layout::Layout;
use super::rect::{Margin, Rect};
use crate::fraction::Fraction;
use std::collections::HashMap;
use std::rc::Rc;

/// Default number of cached splits before the cache is flushed.
pub const DEFAULT_CAPACITY: usize = 512;

/// Everything that determines the output of [`Layout::split`].
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct LayoutCacheKey {
    area: Rect,
    direction: Direction,
    flex: Flex,
    spacing: u16,
    margin: Margin,
    constraints: Vec<Constraint>,
}

impl LayoutCacheKey {
    /// Build the key for splitting `area` with `layout`.
    pub fn new(area: Rect, layout: &Layout) -> Self {
        Self {
            area,
            direction: layout.get_direction(),
            flex: layout.get_flex(),
            spacing: layout.get_spacing(),
            margin: layout.get_margin(),
            constraints: layout
                .get_constraints()
                .iter()
                .map(|&c| canonical(c))
                .collect(),
        }
    }
}

/// Reduce ratios to lowest terms; undefined ratios all map to `Ratio(0, 0)`.
fn canonical(constraint: Constraint) -> Constraint {
    match constraint {
        Constraint::Ratio(n, d) => Fraction::new(i64::from(n), i64::from(d))
            .ok()
            .and_then(|f| {
                let n = u32::try_from(f.numerator()).ok()?;
                let d = u32::try_from(f.denominator()).ok()?;
                Some(Constraint::Ratio(n, d))
            })
            .unwrap_or(Constraint::Ratio(0, 0)),
        other => other,
    }
}

/// Hit/miss counters.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct LayoutCacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to run the solver.
    pub misses: u64,
    /// Entries currently stored.
    pub entries: usize,
}

/// A bounded memo table for layout splits.
///
/// When the capacity is reached the whole table is flushed; layouts change
/// in bursts (resizes) so finer eviction buys little.
#[derive(Debug)]
pub struct LayoutCache {
    entries: HashMap<LayoutCacheKey, Rc<[Rect]>>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl LayoutCache {
    /// Create a cache with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a cache holding at most `capacity` splits (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Split `area` with `layout`, reusing a previous result when possible.
    pub fn split(&mut self, layout: &Layout, area: Rect) -> Rc<[Rect]> {
        let key = LayoutCacheKey::new(area, layout);
        if let Some(rects) = self.entries.get(&key) {
            self.hits += 1;
            return Rc::clone(rects);
        }

        self.misses += 1;
        if self.entries.len() >= self.capacity {
            #[cfg(feature = "tracing")]
            tracing::debug!(capacity = self.capacity, "layout cache flushed");
            self.entries.clear();
        }
        let rects: Rc<[Rect]> = layout.split(area).into();
        self.entries.insert(key, Rc::clone(&rects));
        rects
    }

    /// Drop every cached split (e.g. after a theme change).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Current counters.
    pub fn stats(&self) -> LayoutCacheStats {
        LayoutCacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}
