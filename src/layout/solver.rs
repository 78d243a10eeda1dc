//! Solver: Resolve constraints to sizes and offsets along one axis.
//!
//! The solver works on a single axis length and knows nothing about
//! rectangles. It runs in four passes:
//!
//! 1. **Resolve**: every constraint gets a base size. Percentages and ratios
//!    are computed with [`Fraction`] and rounded cumulatively so that
//!    complementary shares add up to exactly the available length.
//! 2. **Shrink**: if the base sizes overflow, the lowest-priority regions
//!    give way first (trailing regions before leading ones).
//! 3. **Grow**: leftover space goes to `Fill` regions by weight, or to `Min`
//!    regions when no `Fill` is present.
//! 4. **Place**: what is still free is spread across the gaps according to
//!    the [`Flex`] mode.

use super::constraint::Constraint;
use super::flex::Flex;
use crate::fraction::Fraction;
use std::cmp::Reverse;

/// One solved region: offset from the axis start and size along the axis.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub(crate) struct Segment {
    pub offset: u16,
    pub size: u16,
}

/// Solve `constraints` against an axis of `length` cells.
///
/// Always returns one segment per constraint, each lying within `0..=length`.
pub(crate) fn solve(
    constraints: &[Constraint],
    flex: Flex,
    spacing: u16,
    length: u16,
) -> Vec<Segment> {
    let count = constraints.len();
    if count == 0 {
        return Vec::new();
    }

    let gap_count = u32::try_from(count - 1).unwrap_or(u32::MAX);
    let total_spacing = (u32::from(spacing).saturating_mul(gap_count)).min(u32::from(length));
    let available = u32::from(length) - total_spacing;

    let mut sizes = resolve(constraints, available);
    let used: u32 = sizes.iter().sum();
    if used > available {
        shrink(constraints, &mut sizes, used - available);
    } else {
        grow(constraints, &mut sizes, available - used, flex);
    }

    let free = available.saturating_sub(sizes.iter().sum());
    let gaps = distribute(free, &flex.gap_weights(count));

    let mut segments = Vec::with_capacity(count);
    let mut position = gaps[0];
    for (i, &size) in sizes.iter().enumerate() {
        let offset = position.min(u32::from(length));
        let size = size.min(u32::from(length) - offset);
        segments.push(Segment {
            offset: offset as u16,
            size: size as u16,
        });
        position = position
            .saturating_add(sizes[i])
            .saturating_add(gaps[i + 1]);
        if i + 1 < count {
            position = position.saturating_add(u32::from(spacing));
        }
    }
    segments
}

/// Base size for every constraint, before any shrinking or growing.
fn resolve(constraints: &[Constraint], available: u32) -> Vec<u32> {
    let whole = Fraction::from(i64::from(available));
    let mut accumulated = Fraction::ZERO;
    let mut proportional = |share: Fraction| -> u32 {
        let before = accumulated.floor();
        accumulated = accumulated.checked_add(share).unwrap_or(accumulated);
        clamp_u32(accumulated.floor() - before)
    };

    constraints
        .iter()
        .map(|&constraint| match constraint {
            Constraint::Length(n) | Constraint::Min(n) | Constraint::Max(n) => u32::from(n),
            Constraint::Percentage(p) => proportional(scaled(whole, i64::from(p), 100)),
            Constraint::Ratio(n, d) => proportional(scaled(whole, i64::from(n), i64::from(d))),
            Constraint::Fill(_) => 0,
        })
        .collect()
}

/// `whole * numerator / denominator`, or zero when the ratio is undefined.
fn scaled(whole: Fraction, numerator: i64, denominator: i64) -> Fraction {
    Fraction::new(numerator, denominator)
        .and_then(|ratio| whole.checked_mul(ratio))
        .unwrap_or(Fraction::ZERO)
}

fn clamp_u32(n: i64) -> u32 {
    u32::try_from(n.max(0)).unwrap_or(u32::MAX)
}

/// Remove `excess` cells, lowest priority first, trailing regions first.
fn shrink(constraints: &[Constraint], sizes: &mut [u32], mut excess: u32) {
    let mut order: Vec<usize> = (0..constraints.len()).collect();
    order.sort_by_key(|&i| (constraints[i].priority(), Reverse(i)));

    for i in order {
        if excess == 0 {
            break;
        }
        let cut = sizes[i].min(excess);
        sizes[i] -= cut;
        excess -= cut;
    }
}

/// Hand `leftover` cells to the regions that are allowed to grow.
fn grow(constraints: &[Constraint], sizes: &mut [u32], leftover: u32, flex: Flex) {
    if leftover == 0 {
        return;
    }

    let fills: Vec<(usize, u32)> = constraints
        .iter()
        .enumerate()
        .filter_map(|(i, c)| match c {
            Constraint::Fill(weight) => Some((i, u32::from(*weight))),
            _ => None,
        })
        .collect();

    if !fills.is_empty() {
        // Zero weights only count when every fill is zero-weighted.
        let all_zero = fills.iter().all(|&(_, w)| w == 0);
        let weights: Vec<u32> = fills
            .iter()
            .map(|&(_, w)| if all_zero { 1 } else { w })
            .collect();
        let shares = distribute(leftover, &weights);
        for (&(i, _), share) in fills.iter().zip(shares) {
            sizes[i] = sizes[i].saturating_add(share);
        }
        return;
    }

    let mins: Vec<usize> = constraints
        .iter()
        .enumerate()
        .filter(|(_, c)| matches!(c, Constraint::Min(_)))
        .map(|(i, _)| i)
        .collect();

    if !mins.is_empty() {
        let shares = distribute(leftover, &vec![1; mins.len()]);
        for (&i, share) in mins.iter().zip(shares) {
            sizes[i] = sizes[i].saturating_add(share);
        }
        return;
    }

    if flex == Flex::Legacy {
        let absorber = (0..constraints.len())
            .min_by_key(|&i| (constraints[i].priority(), Reverse(i)));
        if let Some(i) = absorber {
            sizes[i] = sizes[i].saturating_add(leftover);
        }
    }
}

/// Split `total` into parts proportional to `weights`, summing to exactly `total`.
///
/// Each part is the difference of consecutive cumulative floors, so rounding
/// never drifts. All-zero weights yield all-zero parts.
pub(crate) fn distribute(total: u32, weights: &[u32]) -> Vec<u32> {
    let weight_sum: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    if weight_sum == 0 {
        return vec![0; weights.len()];
    }

    let whole = Fraction::from(i64::from(total));
    let mut running = 0i64;
    let mut previous = 0i64;
    weights
        .iter()
        .map(|&w| {
            running += i64::from(w);
            let boundary = scaled(whole, running, weight_sum).floor();
            let part = boundary - previous;
            previous = boundary;
            clamp_u32(part)
        })
        .collect()
}
