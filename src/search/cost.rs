//! Numeric cost flavors.
//!
//! A search is bound to exactly one flavor when it is constructed:
//! integer costs (`i64`) or real costs (`f64`). The hot loops are generic
//! over [`CostValue`] and monomorphized per flavor, so comparisons use
//! native arithmetic and the theoretical-minimum check is exact equality
//! in both cases.

use super::tracker::ProgressTracker;
use std::fmt;

/// A cost recorded without its static flavor, as stored by the
/// [`ProgressTracker`] and returned in a
/// [`SolutionCostPair`](super::SolutionCostPair).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cost {
    /// Cost produced by an integer-cost problem.
    Integer(i64),
    /// Cost produced by a real-cost problem.
    Real(f64),
}

impl Cost {
    /// Integer view of the cost.
    ///
    /// Real costs are rounded up and saturate at the `i64` range, so the
    /// integer view never reports a value better than the real one.
    pub fn as_i64(self) -> i64 {
        match self {
            Cost::Integer(c) => c,
            Cost::Real(c) => c.ceil() as i64,
        }
    }

    /// Real view of the cost.
    pub fn as_f64(self) -> f64 {
        match self {
            Cost::Integer(c) => c as f64,
            Cost::Real(c) => c,
        }
    }

    /// Whether the cost came from an integer-cost problem.
    pub fn is_integer(self) -> bool {
        matches!(self, Cost::Integer(_))
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Integer(c) => write!(f, "{c}"),
            Cost::Real(c) => write!(f, "{c}"),
        }
    }
}

/// Scalar type a search loop minimizes.
///
/// Implemented for `i64` and `f64` only.
pub trait CostValue:
    Copy + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Value every real cost improves on; used for an empty tracker.
    const WORST: Self;

    /// `self - current` as an `f64`, computed without overflow in the
    /// native type first. Only its magnitude is lossy.
    fn excess_over(self, current: Self) -> f64;

    /// Tags the value with its flavor.
    fn to_cost(self) -> Cost;

    /// Reads the tracker's current best in this flavor without locking.
    fn tracked<T>(tracker: &ProgressTracker<T>) -> Self;
}

impl CostValue for i64 {
    const WORST: Self = i64::MAX;

    fn excess_over(self, current: Self) -> f64 {
        (i128::from(self) - i128::from(current)) as f64
    }

    fn to_cost(self) -> Cost {
        Cost::Integer(self)
    }

    fn tracked<T>(tracker: &ProgressTracker<T>) -> Self {
        tracker.cost()
    }
}

impl CostValue for f64 {
    const WORST: Self = f64::INFINITY;

    fn excess_over(self, current: Self) -> f64 {
        self - current
    }

    fn to_cost(self) -> Cost {
        Cost::Real(self)
    }

    fn tracked<T>(tracker: &ProgressTracker<T>) -> Self {
        tracker.cost_real()
    }
}
