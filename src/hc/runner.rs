//! Hill climbing execution loop.

use super::config::HillClimberConfig;
use crate::error::ConfigError;
use crate::search::{
    CostValue, LocalSearch, Objective, ProblemRef, ProgressTracker, SolutionCostPair,
    UndoableMutationOperator,
};
use std::sync::Arc;
use tracing::{info, trace};

/// First-improvement hill climber driven by an undoable mutation.
pub struct StochasticHillClimber<T, M> {
    problem: ProblemRef<T>,
    mutation: M,
    config: HillClimberConfig,
    tracker: Arc<ProgressTracker<T>>,
    elapsed_evals: usize,
}

impl<T, M> StochasticHillClimber<T, M>
where
    T: Clone + Send + 'static,
    M: UndoableMutationOperator<T>,
{
    pub fn new(
        problem: ProblemRef<T>,
        mutation: M,
        config: HillClimberConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            problem,
            mutation,
            config,
            tracker: Arc::new(ProgressTracker::new()),
            elapsed_evals: 0,
        })
    }

    pub fn with_tracker(mut self, tracker: Arc<ProgressTracker<T>>) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn config(&self) -> &HillClimberConfig {
        &self.config
    }
}

impl<T, M> LocalSearch<T> for StochasticHillClimber<T, M>
where
    T: Clone + Send + 'static,
    M: UndoableMutationOperator<T>,
{
    fn optimize(&mut self, start: T) -> Option<SolutionCostPair<T>> {
        if self.tracker.did_find_best() || self.tracker.is_stopped() {
            return None;
        }
        let max_failures = self.config.max_failures;
        let (result, evals) = match &self.problem {
            ProblemRef::Integer(p) => climb(
                &**p,
                &mut self.mutation,
                &self.tracker,
                max_failures,
                start,
            ),
            ProblemRef::Real(p) => climb(
                &**p,
                &mut self.mutation,
                &self.tracker,
                max_failures,
                start,
            ),
        };
        self.elapsed_evals += evals;
        Some(result)
    }

    fn problem(&self) -> &ProblemRef<T> {
        &self.problem
    }

    fn tracker(&self) -> &Arc<ProgressTracker<T>> {
        &self.tracker
    }

    fn set_tracker(&mut self, tracker: Arc<ProgressTracker<T>>) {
        self.tracker = tracker;
    }

    fn total_run_length(&self) -> usize {
        self.elapsed_evals
    }

    fn split(&self) -> Self {
        Self {
            problem: self.problem.clone(),
            mutation: self.mutation.split(),
            config: self.config.clone(),
            tracker: Arc::clone(&self.tracker),
            elapsed_evals: 0,
        }
    }
}

fn climb<T, P, M>(
    problem: &P,
    mutation: &mut M,
    tracker: &ProgressTracker<T>,
    max_failures: usize,
    mut current: T,
) -> (SolutionCostPair<T>, usize)
where
    T: Clone,
    P: Objective<T> + ?Sized,
    M: UndoableMutationOperator<T>,
{
    let min_cost = problem.theoretical_min();
    let mut current_cost = problem.evaluate(&current);
    let mut evals = 0;

    let mut best_cost = P::Cost::tracked(tracker);
    if current_cost < best_cost {
        best_cost = tracker.update(current_cost, &current);
        if best_cost == min_cost {
            tracker.set_found_best();
            return (SolutionCostPair::new(current, current_cost.to_cost()), evals);
        }
    }

    let mut failures = 0;
    while failures < max_failures {
        if tracker.is_stopped() {
            trace!(evals, "stop requested");
            break;
        }
        mutation.mutate(&mut current);
        let neighbor_cost = problem.evaluate(&current);
        evals += 1;
        if neighbor_cost < current_cost {
            current_cost = neighbor_cost;
            failures = 0;
            if current_cost < best_cost {
                best_cost = tracker.update(current_cost, &current);
                if best_cost == min_cost {
                    tracker.set_found_best();
                    info!(cost = %best_cost, evals, "theoretical best reached");
                    break;
                }
            }
        } else {
            mutation.undo(&mut current);
            failures += 1;
        }
    }

    (SolutionCostPair::new(current, current_cost.to_cost()), evals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::testing::{Abs, ShiftedSquare, Step};
    use crate::search::Cost;

    fn abs_climber(max_failures: usize) -> StochasticHillClimber<i64, Step> {
        StochasticHillClimber::new(
            ProblemRef::integer(Arc::new(Abs::default())),
            Step::new(4),
            HillClimberConfig::default().with_max_failures(max_failures),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = StochasticHillClimber::new(
            ProblemRef::integer(Arc::new(Abs::default())),
            Step::new(1),
            HillClimberConfig::default().with_max_failures(0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_climbs_to_optimum() {
        let mut hc = abs_climber(1_000);
        let result = hc.optimize(-35).unwrap();
        assert_eq!(result.cost(), Cost::Integer(0));
        assert!(hc.tracker().did_find_best());
        assert!(hc.total_run_length() >= 35);
    }

    #[test]
    fn test_real_flavor() {
        let mut hc = StochasticHillClimber::new(
            ProblemRef::real(Arc::new(ShiftedSquare::default())),
            Step::new(4),
            HillClimberConfig::default().with_max_failures(1_000),
        )
        .unwrap();
        let result = hc.optimize(40).unwrap();
        assert_eq!(*result.solution(), 3);
        assert_eq!(result.cost(), Cost::Real(0.0));
    }

    #[test]
    fn test_stops_after_consecutive_failures() {
        let tracker = Arc::new(ProgressTracker::new());
        // Unbeatable tracker entry so the climb cannot exit early.
        tracker.update(-1_i64, &0);
        let mut hc = abs_climber(7).with_tracker(tracker);
        let result = hc.optimize(0).unwrap();
        assert_eq!(*result.solution(), 0);
        assert_eq!(hc.total_run_length(), 7);
    }

    #[test]
    fn test_short_circuits_on_finished_tracker() {
        let mut hc = abs_climber(10);
        hc.tracker().stop();
        assert!(hc.optimize(5).is_none());
        assert_eq!(hc.total_run_length(), 0);
    }

    #[test]
    fn test_split_shares_tracker() {
        let hc = abs_climber(10);
        let copy = hc.split();
        assert!(Arc::ptr_eq(hc.tracker(), copy.tracker()));
        assert!(hc.problem().same_instance(copy.problem()));
        assert_eq!(copy.config(), hc.config());
        assert_eq!(copy.total_run_length(), 0);
    }
}
