//! Constraint: Sizing policies for one region of a layout split.

use std::fmt;

/// A sizing policy for one region along the split axis.
///
/// Constraints are resolved in priority order. `Length`, `Min` and `Max`
/// are honored first, then `Percentage` and `Ratio`, and `Fill` regions
/// share whatever is left. When space runs out, the lowest-priority regions
/// shrink first.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// Exactly this many cells.
    Length(u16),
    /// A percentage of the available length (after margin and spacing).
    Percentage(u16),
    /// A ratio (numerator, denominator) of the available length.
    Ratio(u32, u32),
    /// At least this many cells; grows into leftover space when no `Fill` is present.
    Min(u16),
    /// At most this many cells.
    Max(u16),
    /// A share of leftover space proportional to the weight.
    Fill(u16),
}

/// Priority class used for shrink order and legacy space absorption.
///
/// Lower values give way first.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub(crate) enum Priority {
    Fill,
    Proportional,
    Max,
    Min,
    Length,
}

impl Constraint {
    /// Build a list of `Length` constraints.
    pub fn from_lengths<T: IntoIterator<Item = u16>>(lengths: T) -> Vec<Self> {
        lengths.into_iter().map(Self::Length).collect()
    }

    /// Build a list of `Percentage` constraints.
    pub fn from_percentages<T: IntoIterator<Item = u16>>(percentages: T) -> Vec<Self> {
        percentages.into_iter().map(Self::Percentage).collect()
    }

    /// Build a list of `Ratio` constraints.
    pub fn from_ratios<T: IntoIterator<Item = (u32, u32)>>(ratios: T) -> Vec<Self> {
        ratios.into_iter().map(|(n, d)| Self::Ratio(n, d)).collect()
    }

    /// Build a list of `Min` constraints.
    pub fn from_mins<T: IntoIterator<Item = u16>>(mins: T) -> Vec<Self> {
        mins.into_iter().map(Self::Min).collect()
    }

    /// Build a list of `Max` constraints.
    pub fn from_maxes<T: IntoIterator<Item = u16>>(maxes: T) -> Vec<Self> {
        maxes.into_iter().map(Self::Max).collect()
    }

    /// Build a list of `Fill` constraints.
    pub fn from_fills<T: IntoIterator<Item = u16>>(weights: T) -> Vec<Self> {
        weights.into_iter().map(Self::Fill).collect()
    }

    pub(crate) const fn priority(self) -> Priority {
        match self {
            Self::Fill(_) => Priority::Fill,
            Self::Percentage(_) | Self::Ratio(_, _) => Priority::Proportional,
            Self::Max(_) => Priority::Max,
            Self::Min(_) => Priority::Min,
            Self::Length(_) => Priority::Length,
        }
    }
}

impl Default for Constraint {
    fn default() -> Self {
        Self::Percentage(100)
    }
}

impl From<u16> for Constraint {
    fn from(length: u16) -> Self {
        Self::Length(length)
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(n) => write!(f, "Length({n})"),
            Self::Percentage(p) => write!(f, "Percentage({p})"),
            Self::Ratio(n, d) => write!(f, "Ratio({n}, {d})"),
            Self::Min(n) => write!(f, "Min({n})"),
            Self::Max(n) => write!(f, "Max({n})"),
            Self::Fill(w) => write!(f, "Fill({w})"),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
