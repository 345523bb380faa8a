//! Contracts shared by the search procedures in this crate.

use super::problem::ProblemRef;
use super::solution::SolutionCostPair;
use super::tracker::ProgressTracker;
use std::sync::Arc;

/// A search that runs from a single candidate for a bounded number of
/// evaluations and reports through a shared [`ProgressTracker`].
///
/// Every `optimize*` method returns `None` without evaluating anything
/// when the tracker already holds *found best* or *stopped*.
pub trait SingleSolutionMetaheuristic<T>: Send {
    /// Runs from a freshly initialized candidate.
    fn optimize(&mut self, max_evals: usize) -> Option<SolutionCostPair<T>>;

    /// Runs from a copy of `start`; the caller keeps the original.
    fn optimize_from(&mut self, max_evals: usize, start: &T) -> Option<SolutionCostPair<T>>;

    /// Runs from a copy of the tracker's best solution, or from a freshly
    /// initialized candidate when the tracker is empty.
    fn reoptimize(&mut self, max_evals: usize) -> Option<SolutionCostPair<T>>;

    fn problem(&self) -> &ProblemRef<T>;

    fn tracker(&self) -> &Arc<ProgressTracker<T>>;

    fn set_tracker(&mut self, tracker: Arc<ProgressTracker<T>>);

    /// Evaluations performed by this instance over all calls.
    fn total_run_length(&self) -> usize;

    /// Independent copy sharing the tracker and the problem, with a zeroed
    /// evaluation counter. Safe to run concurrently with `self`.
    fn split(&self) -> Self
    where
        Self: Sized;
}

/// A local search that improves a given candidate until it reaches a
/// local optimum by its own criterion.
///
/// Used as the refinement stage after annealing.
pub trait LocalSearch<T>: Send {
    /// Improves `start`; returns `None` when the tracker already holds
    /// *found best* or *stopped*.
    fn optimize(&mut self, start: T) -> Option<SolutionCostPair<T>>;

    fn problem(&self) -> &ProblemRef<T>;

    fn tracker(&self) -> &Arc<ProgressTracker<T>>;

    fn set_tracker(&mut self, tracker: Arc<ProgressTracker<T>>);

    fn total_run_length(&self) -> usize;

    fn split(&self) -> Self
    where
        Self: Sized;
}
