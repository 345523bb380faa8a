//! Annealing followed by a local-search refinement stage.

use super::runner::SimulatedAnnealing;
use super::schedule::AnnealingSchedule;
use crate::error::ConfigError;
use crate::search::{
    Initializer, LocalSearch, ProblemRef, ProgressTracker, SingleSolutionMetaheuristic,
    SolutionCostPair, UndoableMutationOperator,
};
use std::sync::Arc;
use tracing::debug;

/// Wraps a [`SimulatedAnnealing`] engine and hands the final candidate of
/// every run to a [`LocalSearch`].
///
/// The refinement stage must be configured with the same problem
/// instance as the engine and always shares the engine's tracker. It is
/// skipped when the run ended with *found best* or *stopped* set.
pub struct SimulatedAnnealingHc<T, M, I, A, H> {
    sa: SimulatedAnnealing<T, M, I, A>,
    hc: H,
}

impl<T, M, I, A, H> SimulatedAnnealingHc<T, M, I, A, H>
where
    T: Clone + Send + 'static,
    M: UndoableMutationOperator<T>,
    I: Initializer<T>,
    A: AnnealingSchedule,
    H: LocalSearch<T>,
{
    /// Composes an engine with a refinement stage.
    ///
    /// Fails with [`ConfigError::ProblemMismatch`] if the two were built
    /// for different problem instances. A refinement stage with its own
    /// tracker is switched over to the engine's.
    pub fn new(sa: SimulatedAnnealing<T, M, I, A>, mut hc: H) -> Result<Self, ConfigError> {
        if !hc.problem().same_instance(sa.problem()) {
            return Err(ConfigError::ProblemMismatch);
        }
        if !Arc::ptr_eq(hc.tracker(), sa.tracker()) {
            hc.set_tracker(Arc::clone(sa.tracker()));
        }
        Ok(Self { sa, hc })
    }

    pub fn engine(&self) -> &SimulatedAnnealing<T, M, I, A> {
        &self.sa
    }

    pub fn refinement(&self) -> &H {
        &self.hc
    }

    fn refined_run(&mut self, max_evals: usize, start: T) -> SolutionCostPair<T> {
        let annealed = self.sa.single_run(max_evals, start);
        if self.sa.is_finished() {
            return annealed;
        }
        let before = annealed.cost();
        match self.hc.optimize(annealed.solution().clone()) {
            Some(refined) => {
                debug!(%before, after = %refined.cost(), "refinement finished");
                refined
            }
            // Another search finished between the check and the call.
            None => annealed,
        }
    }
}

impl<T, M, I, A, H> SingleSolutionMetaheuristic<T> for SimulatedAnnealingHc<T, M, I, A, H>
where
    T: Clone + Send + 'static,
    M: UndoableMutationOperator<T>,
    I: Initializer<T>,
    A: AnnealingSchedule,
    H: LocalSearch<T>,
{
    fn optimize(&mut self, max_evals: usize) -> Option<SolutionCostPair<T>> {
        if self.sa.is_finished() {
            return None;
        }
        let start = self.sa.fresh_candidate();
        Some(self.refined_run(max_evals, start))
    }

    fn optimize_from(&mut self, max_evals: usize, start: &T) -> Option<SolutionCostPair<T>> {
        if self.sa.is_finished() {
            return None;
        }
        Some(self.refined_run(max_evals, start.clone()))
    }

    fn reoptimize(&mut self, max_evals: usize) -> Option<SolutionCostPair<T>> {
        if self.sa.is_finished() {
            return None;
        }
        let start = self.sa.best_or_fresh_candidate();
        Some(self.refined_run(max_evals, start))
    }

    fn problem(&self) -> &ProblemRef<T> {
        self.sa.problem()
    }

    fn tracker(&self) -> &Arc<ProgressTracker<T>> {
        self.sa.tracker()
    }

    fn set_tracker(&mut self, tracker: Arc<ProgressTracker<T>>) {
        self.hc.set_tracker(Arc::clone(&tracker));
        self.sa.set_tracker(tracker);
    }

    /// Annealing evaluations plus the refinement stage's own count.
    fn total_run_length(&self) -> usize {
        self.sa.total_run_length() + self.hc.total_run_length()
    }

    fn split(&self) -> Self {
        Self {
            sa: self.sa.split(),
            hc: self.hc.split(),
        }
    }
}
