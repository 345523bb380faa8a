//! Fixtures shared by the unit tests of several modules.

use super::{CostValue, Initializer, IntegerCostProblem, RealCostProblem, UndoableMutationOperator};
use crate::sa::AnnealingSchedule;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Minimize |x| over the integers.
#[derive(Default)]
pub(crate) struct Abs {
    pub evaluations: AtomicUsize,
}

impl Abs {
    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }
}

impl IntegerCostProblem<i64> for Abs {
    fn cost(&self, x: &i64) -> i64 {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        x.abs()
    }

    fn min_cost(&self) -> i64 {
        0
    }
}

/// Minimize (x - 3)^2 with real costs; the minimum 0.0 is exactly reachable.
#[derive(Default)]
pub(crate) struct ShiftedSquare {
    pub evaluations: AtomicUsize,
}

impl RealCostProblem<i64> for ShiftedSquare {
    fn cost(&self, x: &i64) -> f64 {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        let d = *x as f64 - 3.0;
        d * d
    }

    fn min_cost(&self) -> f64 {
        0.0
    }
}

/// Adds or subtracts one.
pub(crate) struct Step {
    rng: StdRng,
    last: i64,
    pub mutations: usize,
    pub undos: usize,
}

impl Step {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            last: 0,
            mutations: 0,
            undos: 0,
        }
    }
}

impl UndoableMutationOperator<i64> for Step {
    fn mutate(&mut self, x: &mut i64) {
        self.last = if self.rng.random_bool(0.5) { 1 } else { -1 };
        *x += self.last;
        self.mutations += 1;
    }

    fn undo(&mut self, x: &mut i64) {
        *x -= self.last;
        self.undos += 1;
    }

    fn split(&self) -> Self {
        Self::new(rand::random())
    }
}

/// Always produces the same starting point.
#[derive(Clone)]
pub(crate) struct Fixed(pub i64);

impl Initializer<i64> for Fixed {
    fn create_candidate_solution(&mut self) -> i64 {
        self.0
    }

    fn split(&self) -> Self {
        self.clone()
    }
}

/// Uniform starting point in `-r..=r`.
pub(crate) struct Uniform {
    rng: StdRng,
    radius: i64,
}

impl Uniform {
    pub fn new(radius: i64, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            radius,
        }
    }
}

impl Initializer<i64> for Uniform {
    fn create_candidate_solution(&mut self) -> i64 {
        self.rng.random_range(-self.radius..=self.radius)
    }

    fn split(&self) -> Self {
        Self::new(self.radius, rand::random())
    }
}

/// Accepts every neighbor.
#[derive(Default)]
pub(crate) struct AlwaysAccept {
    pub inits: usize,
}

impl AnnealingSchedule for AlwaysAccept {
    fn init(&mut self, _max_evals: usize) {
        self.inits += 1;
    }

    fn accept<C: CostValue>(&mut self, _neighbor_cost: C, _current_cost: C) -> bool {
        true
    }

    fn split(&self) -> Self {
        Self::default()
    }
}

/// Accepts a neighbor only if it is no worse.
#[derive(Default)]
pub(crate) struct Greedy {
    pub inits: usize,
}

impl AnnealingSchedule for Greedy {
    fn init(&mut self, _max_evals: usize) {
        self.inits += 1;
    }

    fn accept<C: CostValue>(&mut self, neighbor_cost: C, current_cost: C) -> bool {
        neighbor_cost <= current_cost
    }

    fn split(&self) -> Self {
        Self::default()
    }
}
