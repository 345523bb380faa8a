//! Parallel multistart execution.

use super::config::MultistartConfig;
use crate::error::ConfigError;
use crate::search::{ProgressTracker, SingleSolutionMetaheuristic, SolutionCostPair};
use rayon::prelude::*;
use std::marker::PhantomData;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Outcome of a multistart run, read from the shared tracker.
#[derive(Debug, Clone)]
pub struct MultistartResult<T> {
    /// Best solution recorded by any copy, if any run evaluated anything.
    pub best: Option<SolutionCostPair<T>>,

    /// Evaluations summed over all copies, refinement stages included.
    pub total_run_length: usize,

    /// Whether some copy reached the theoretical minimum.
    pub found_best: bool,

    /// Whether the tracker was stopped.
    pub stopped: bool,
}

/// Runs split copies of one search in parallel.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_anneal::multistart::{MultistartConfig, ParallelMultistart};
/// use u_anneal::reals::{RealValuedInitializer, RealVector, UniformMutation};
/// use u_anneal::sa::SimulatedAnnealingBuilder;
/// use u_anneal::search::RealCostProblem;
///
/// struct Sphere;
///
/// impl RealCostProblem<RealVector> for Sphere {
///     fn cost(&self, v: &RealVector) -> f64 {
///         v.values().iter().map(|x| x * x).sum()
///     }
/// }
///
/// let engine = SimulatedAnnealingBuilder::new()
///     .with_real_problem(Arc::new(Sphere))
///     .with_mutation(UniformMutation::new(0.5).unwrap())
///     .with_initializer(RealValuedInitializer::new(2, -5.0, 5.0).unwrap())
///     .build()
///     .unwrap();
/// let config = MultistartConfig::default()
///     .with_threads(4)
///     .with_restarts(2)
///     .with_run_length(1_000);
/// let mut multistart = ParallelMultistart::new(engine, config).unwrap();
/// let result = multistart.run();
/// assert!(result.best.is_some());
/// ```
pub struct ParallelMultistart<T, S> {
    searches: Vec<S>,
    config: MultistartConfig,
    _candidate: PhantomData<fn() -> T>,
}

impl<T, S> ParallelMultistart<T, S>
where
    T: Clone + Send + 'static,
    S: SingleSolutionMetaheuristic<T>,
{
    /// Splits `search` into `config.threads` copies; `search` itself is
    /// the first.
    pub fn new(search: S, config: MultistartConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut searches = Vec::with_capacity(config.threads);
        for _ in 1..config.threads {
            searches.push(search.split());
        }
        searches.insert(0, search);
        Ok(Self {
            searches,
            config,
            _candidate: PhantomData,
        })
    }

    pub fn config(&self) -> &MultistartConfig {
        &self.config
    }

    pub fn searches(&self) -> &[S] {
        &self.searches
    }

    pub fn tracker(&self) -> &Arc<ProgressTracker<T>> {
        self.searches[0].tracker()
    }

    /// Runs every copy to completion on the rayon pool.
    pub fn run(&mut self) -> MultistartResult<T> {
        debug!(
            threads = self.searches.len(),
            restarts = self.config.restarts,
            run_length = self.config.run_length,
            "starting parallel multistart"
        );
        let config = &self.config;
        self.searches
            .par_iter_mut()
            .for_each(|search| run_restarts::<T, S>(search, config));

        let result = self.result();
        info!(
            cost = ?result.best.as_ref().map(|b| b.cost()),
            total_run_length = result.total_run_length,
            found_best = result.found_best,
            "parallel multistart finished"
        );
        result
    }

    /// Like [`run`](Self::run), but stops the shared tracker once `limit`
    /// has elapsed.
    ///
    /// The stop is cooperative: each copy returns after its current
    /// evaluation. The tracker stays stopped afterwards.
    pub fn run_for(&mut self, limit: Duration) -> MultistartResult<T> {
        let tracker = Arc::clone(self.tracker());
        let (done_tx, done_rx) = mpsc::channel::<()>();
        thread::scope(|s| {
            s.spawn(move || {
                if let Err(RecvTimeoutError::Timeout) = done_rx.recv_timeout(limit) {
                    debug!(?limit, "time limit reached");
                    tracker.stop();
                }
            });
            let result = self.run();
            drop(done_tx);
            result
        })
    }

    fn result(&self) -> MultistartResult<T> {
        let tracker = self.tracker();
        MultistartResult {
            best: tracker.solution_cost_pair(),
            total_run_length: self.searches.iter().map(|s| s.total_run_length()).sum(),
            found_best: tracker.did_find_best(),
            stopped: tracker.is_stopped(),
        }
    }
}

fn run_restarts<T, S>(search: &mut S, config: &MultistartConfig)
where
    S: SingleSolutionMetaheuristic<T>,
{
    for restart in 0..config.restarts {
        let outcome = if restart > 0 && config.reoptimize {
            search.reoptimize(config.run_length)
        } else {
            search.optimize(config.run_length)
        };
        if outcome.is_none() {
            break;
        }
    }
}
