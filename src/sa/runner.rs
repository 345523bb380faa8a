//! SA execution engine.

use super::schedule::{AnnealingSchedule, ModifiedLam};
use crate::error::ConfigError;
use crate::search::{
    CostValue, Initializer, IntegerCostProblem, Objective, ProblemRef, ProgressTracker,
    RealCostProblem, SingleSolutionMetaheuristic, SolutionCostPair, UndoableMutationOperator,
};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Simulated annealing over an arbitrary candidate type `T`.
///
/// The engine owns its mutation operator, initializer and schedule, and
/// shares the problem and the [`ProgressTracker`] by `Arc`. Calling
/// [`split`](SingleSolutionMetaheuristic::split) yields a copy that can run
/// on another thread and reports into the same tracker.
///
/// Rejected neighbors are reverted with
/// [`UndoableMutationOperator::undo`], so the loop never copies the
/// candidate except when it improves on the tracked best.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use rand::Rng;
/// use u_anneal::sa::SimulatedAnnealingBuilder;
/// use u_anneal::search::{
///     Initializer, IntegerCostProblem, SingleSolutionMetaheuristic, UndoableMutationOperator,
/// };
///
/// struct Abs;
/// impl IntegerCostProblem<i64> for Abs {
///     fn cost(&self, x: &i64) -> i64 { x.abs() }
///     fn min_cost(&self) -> i64 { 0 }
/// }
///
/// struct Step(i64);
/// impl UndoableMutationOperator<i64> for Step {
///     fn mutate(&mut self, x: &mut i64) {
///         self.0 = if rand::rng().random_bool(0.5) { 1 } else { -1 };
///         *x += self.0;
///     }
///     fn undo(&mut self, x: &mut i64) { *x -= self.0; }
///     fn split(&self) -> Self { Step(0) }
/// }
///
/// struct Start;
/// impl Initializer<i64> for Start {
///     fn create_candidate_solution(&mut self) -> i64 { 25 }
///     fn split(&self) -> Self { Start }
/// }
///
/// let mut sa = SimulatedAnnealingBuilder::new()
///     .with_integer_problem(Arc::new(Abs))
///     .with_mutation(Step(0))
///     .with_initializer(Start)
///     .build()
///     .unwrap();
///
/// sa.optimize(10_000);
/// assert!(sa.tracker().cost() <= 25);
/// ```
pub struct SimulatedAnnealing<T, M, I, A = ModifiedLam> {
    problem: ProblemRef<T>,
    mutation: M,
    initializer: I,
    schedule: A,
    tracker: Arc<ProgressTracker<T>>,
    elapsed_evals: usize,
}

impl<T, M, I, A> SimulatedAnnealing<T, M, I, A>
where
    T: Clone + Send + 'static,
    M: UndoableMutationOperator<T>,
    I: Initializer<T>,
    A: AnnealingSchedule,
{
    /// Assembles an engine from components that are all present.
    ///
    /// See [`SimulatedAnnealingBuilder`] for defaults and error reporting.
    pub fn new(
        problem: ProblemRef<T>,
        mutation: M,
        initializer: I,
        schedule: A,
        tracker: Arc<ProgressTracker<T>>,
    ) -> Self {
        Self {
            problem,
            mutation,
            initializer,
            schedule,
            tracker,
            elapsed_evals: 0,
        }
    }

    pub fn mutation(&self) -> &M {
        &self.mutation
    }

    pub fn schedule(&self) -> &A {
        &self.schedule
    }

    /// Whether the tracker tells every search to stand down.
    pub(crate) fn is_finished(&self) -> bool {
        self.tracker.did_find_best() || self.tracker.is_stopped()
    }

    pub(crate) fn fresh_candidate(&mut self) -> T {
        self.initializer.create_candidate_solution()
    }

    pub(crate) fn best_or_fresh_candidate(&mut self) -> T {
        match self.tracker.solution() {
            Some(best) => best,
            None => self.initializer.create_candidate_solution(),
        }
    }

    /// One annealing run from `start`, without the short-circuit check.
    pub(crate) fn single_run(&mut self, max_evals: usize, start: T) -> SolutionCostPair<T> {
        let (result, evals) = match &self.problem {
            ProblemRef::Integer(p) => anneal(
                &**p,
                &mut self.mutation,
                &mut self.schedule,
                &self.tracker,
                max_evals,
                start,
            ),
            ProblemRef::Real(p) => anneal(
                &**p,
                &mut self.mutation,
                &mut self.schedule,
                &self.tracker,
                max_evals,
                start,
            ),
        };
        self.elapsed_evals += evals;
        debug!(
            evals,
            max_evals,
            cost = %result.cost(),
            "annealing run finished"
        );
        result
    }
}

impl<T, M, I, A> SingleSolutionMetaheuristic<T> for SimulatedAnnealing<T, M, I, A>
where
    T: Clone + Send + 'static,
    M: UndoableMutationOperator<T>,
    I: Initializer<T>,
    A: AnnealingSchedule,
{
    fn optimize(&mut self, max_evals: usize) -> Option<SolutionCostPair<T>> {
        if self.is_finished() {
            return None;
        }
        let start = self.fresh_candidate();
        Some(self.single_run(max_evals, start))
    }

    fn optimize_from(&mut self, max_evals: usize, start: &T) -> Option<SolutionCostPair<T>> {
        if self.is_finished() {
            return None;
        }
        Some(self.single_run(max_evals, start.clone()))
    }

    fn reoptimize(&mut self, max_evals: usize) -> Option<SolutionCostPair<T>> {
        if self.is_finished() {
            return None;
        }
        let start = self.best_or_fresh_candidate();
        Some(self.single_run(max_evals, start))
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
            initializer: self.initializer.split(),
            schedule: self.schedule.split(),
            tracker: Arc::clone(&self.tracker),
            elapsed_evals: 0,
        }
    }
}

/// The annealing loop, instantiated once per cost flavor.
///
/// Returns the final state of the run and the number of loop iterations
/// performed. The starting evaluation is not counted.
fn anneal<T, P, M, A>(
    problem: &P,
    mutation: &mut M,
    schedule: &mut A,
    tracker: &ProgressTracker<T>,
    max_evals: usize,
    mut current: T,
) -> (SolutionCostPair<T>, usize)
where
    T: Clone,
    P: Objective<T> + ?Sized,
    M: UndoableMutationOperator<T>,
    A: AnnealingSchedule,
{
    let min_cost = problem.theoretical_min();
    let mut current_cost = problem.evaluate(&current);

    let mut best_cost = P::Cost::tracked(tracker);
    if current_cost < best_cost {
        best_cost = tracker.update(current_cost, &current);
        if best_cost == min_cost {
            tracker.set_found_best();
            info!(cost = %best_cost, "theoretical best reached by starting candidate");
            return (SolutionCostPair::new(current, current_cost.to_cost()), 0);
        }
    }

    schedule.init(max_evals);

    for i in 1..=max_evals {
        if tracker.is_stopped() {
            trace!(completed = i - 1, "stop requested");
            return (SolutionCostPair::new(current, current_cost.to_cost()), i - 1);
        }
        mutation.mutate(&mut current);
        let neighbor_cost = problem.evaluate(&current);
        if schedule.accept(neighbor_cost, current_cost) {
            current_cost = neighbor_cost;
            if current_cost < best_cost {
                best_cost = tracker.update(current_cost, &current);
                if best_cost == min_cost {
                    tracker.set_found_best();
                    info!(cost = %best_cost, evals = i, "theoretical best reached");
                    return (SolutionCostPair::new(current, current_cost.to_cost()), i);
                }
            }
        } else {
            mutation.undo(&mut current);
        }
    }

    (SolutionCostPair::new(current, current_cost.to_cost()), max_evals)
}

/// Builds a [`SimulatedAnnealing`] engine, reporting absent components.
///
/// The problem, mutation operator and initializer are required. The
/// schedule defaults to [`ModifiedLam`] and the tracker to a fresh
/// [`ProgressTracker`].
pub struct SimulatedAnnealingBuilder<T, M, I, A = ModifiedLam> {
    problem: Option<ProblemRef<T>>,
    mutation: Option<M>,
    initializer: Option<I>,
    schedule: A,
    tracker: Option<Arc<ProgressTracker<T>>>,
}

impl<T, M, I> SimulatedAnnealingBuilder<T, M, I, ModifiedLam> {
    pub fn new() -> Self {
        Self {
            problem: None,
            mutation: None,
            initializer: None,
            schedule: ModifiedLam::new(),
            tracker: None,
        }
    }
}

impl<T, M, I> Default for SimulatedAnnealingBuilder<T, M, I, ModifiedLam> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, M, I, A> SimulatedAnnealingBuilder<T, M, I, A>
where
    T: Clone + Send + 'static,
    M: UndoableMutationOperator<T>,
    I: Initializer<T>,
    A: AnnealingSchedule,
{
    pub fn with_problem(mut self, problem: ProblemRef<T>) -> Self {
        self.problem = Some(problem);
        self
    }

    pub fn with_integer_problem<P: IntegerCostProblem<T> + 'static>(self, problem: Arc<P>) -> Self {
        self.with_problem(ProblemRef::integer(problem))
    }

    pub fn with_real_problem<P: RealCostProblem<T> + 'static>(self, problem: Arc<P>) -> Self {
        self.with_problem(ProblemRef::real(problem))
    }

    pub fn with_mutation(mut self, mutation: M) -> Self {
        self.mutation = Some(mutation);
        self
    }

    pub fn with_initializer(mut self, initializer: I) -> Self {
        self.initializer = Some(initializer);
        self
    }

    /// Replaces the default [`ModifiedLam`] schedule.
    pub fn with_schedule<B: AnnealingSchedule>(
        self,
        schedule: B,
    ) -> SimulatedAnnealingBuilder<T, M, I, B> {
        SimulatedAnnealingBuilder {
            problem: self.problem,
            mutation: self.mutation,
            initializer: self.initializer,
            schedule,
            tracker: self.tracker,
        }
    }

    pub fn with_tracker(mut self, tracker: Arc<ProgressTracker<T>>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn build(self) -> Result<SimulatedAnnealing<T, M, I, A>, ConfigError> {
        let problem = self
            .problem
            .ok_or(ConfigError::MissingComponent("problem"))?;
        let mutation = self
            .mutation
            .ok_or(ConfigError::MissingComponent("mutation"))?;
        let initializer = self
            .initializer
            .ok_or(ConfigError::MissingComponent("initializer"))?;
        let tracker = self.tracker.unwrap_or_default();
        Ok(SimulatedAnnealing::new(
            problem,
            mutation,
            initializer,
            self.schedule,
            tracker,
        ))
    }
}
