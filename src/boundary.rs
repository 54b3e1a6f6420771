#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Extra constraints closing the spline system.
///
/// Interpolation and derivative continuity leave a degree `n` spline with `n - 1`
/// free parameters, each variant supplies exactly that many equations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoundaryCondition {
    /// Second derivative vanishes at both ends, higher degrees also zero the next
    /// orders (`3`, `4`, ...) until the system is closed. A quadratic has a single
    /// closing equation, so only its left end is natural.
    Natural,
    /// First derivative pinned to `left` and `right`.
    ///
    /// Pinning both slopes takes two equations while a degree `n` spline has only
    /// `n - 1` to spare, so degrees 1 and 2 are rejected. Above degree 3 the remaining
    /// equations zero low order end derivatives.
    Clamped { left: f64, right: f64 },
    /// Highest derivative continuous across the interior knots nearest to the ends,
    /// for a cubic the second and penultimate knots.
    NotAKnot,
    /// Derivatives up to order `n - 1` match between both ends. Requires equal end values.
    Periodic,
}

/// Side of the domain an end condition applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum End {
    Left,
    Right,
}

/// Derivative orders set to zero by [BoundaryCondition::Natural].
///
/// Orders `2, 3, ...` at both ends in ascending order until `degree - 1` equations
/// exist. An odd count puts the last order at the left end only.
pub(crate) fn natural_orders(degree: usize) -> Vec<(End, usize)> {
    let count = degree.saturating_sub(1);
    let pairs = count / 2;
    let extra = if count % 2 == 1 { Some(2 + pairs) } else { None };
    symmetric_orders(2..2 + pairs, extra)
}

/// Derivative orders set to zero by [BoundaryCondition::Clamped] next to the pinned
/// first derivatives.
///
/// Odd degree `2k - 1` zeroes orders `2..=k-1` at both ends, even degree `2k`
/// additionally zeroes order `k` at the left end.
pub(crate) fn clamped_zero_orders(degree: usize) -> Vec<(End, usize)> {
    let half = (degree + 1) / 2;
    let extra = if degree % 2 == 0 { Some(half) } else { None };
    symmetric_orders(2..half, extra)
}

fn symmetric_orders(orders: std::ops::Range<usize>, extra_left: Option<usize>) -> Vec<(End, usize)> {
    let mut result: Vec<(End, usize)> = orders
        .flat_map(|order| [(End::Left, order), (End::Right, order)])
        .collect();
    if let Some(order) = extra_left {
        result.push((End::Left, order));
    }
    result
}

/// Interior knots where [BoundaryCondition::NotAKnot] forces continuity of the
/// highest derivative, alternating from both ends: `1, m-1, 2, m-2, ...`.
///
/// Returns `None` when the spline has too few interior knots.
pub(crate) fn not_a_knot_indices(degree: usize, number_of_intervals: usize) -> Option<Vec<usize>> {
    let required = degree.checked_sub(1)?;
    let interior = number_of_intervals.checked_sub(1)?;
    if required > interior {
        return None;
    }
    let mut indices = Vec::with_capacity(required);
    let mut low = 1;
    let mut high = number_of_intervals - 1;
    while indices.len() < required {
        if indices.len() % 2 == 0 {
            indices.push(low);
            low += 1;
        } else {
            indices.push(high);
            high -= 1;
        }
    }
    Some(indices)
}
