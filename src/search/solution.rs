//! Result snapshot of a single run.

use super::cost::Cost;

/// A candidate together with its cost at the moment a run returned.
///
/// This is the *final* state of a run, which is not necessarily the best
/// state the run visited; the best lives in the
/// [`ProgressTracker`](super::ProgressTracker).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolutionCostPair<T> {
    solution: T,
    cost: Cost,
}

impl<T> SolutionCostPair<T> {
    pub fn new(solution: T, cost: Cost) -> Self {
        Self { solution, cost }
    }

    pub fn solution(&self) -> &T {
        &self.solution
    }

    pub fn into_solution(self) -> T {
        self.solution
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Integer view of the cost (see [`Cost::as_i64`]).
    pub fn cost_int(&self) -> i64 {
        self.cost.as_i64()
    }

    pub fn cost_real(&self) -> f64 {
        self.cost.as_f64()
    }
}
