//! Uniform mutation for real-valued candidates.

use super::types::RealValued;
use crate::error::ConfigError;
use crate::search::UndoableMutationOperator;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

/// Which variables a [`UniformMutation`] perturbs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationScope {
    /// Every variable.
    All,
    /// Exactly `k` distinct variables chosen at random (all of them if the
    /// candidate is shorter).
    Count(usize),
    /// Each variable independently with probability `p`. At least one
    /// variable is always perturbed.
    Probability(f64),
}

/// Adds uniform noise from `[-radius, radius]` to selected variables.
///
/// Remembers the previous values of the variables it touched, so
/// [`undo`](UndoableMutationOperator::undo) restores the candidate
/// exactly, bounds included.
///
/// # Examples
///
/// ```
/// use u_anneal::reals::{RealVector, UniformMutation};
/// use u_anneal::search::UndoableMutationOperator;
///
/// let mut mutation = UniformMutation::new(0.5).unwrap().with_seed(7);
/// let original = RealVector::new(vec![1.0, 2.0, 3.0]);
/// let mut v = original.clone();
/// mutation.mutate(&mut v);
/// mutation.undo(&mut v);
/// assert_eq!(v, original);
/// ```
#[derive(Debug, Clone)]
pub struct UniformMutation {
    radius: f64,
    scope: MutationScope,
    rng: StdRng,
    previous: Vec<(usize, f64)>,
}

impl UniformMutation {
    /// Mutation of every variable with the given radius.
    pub fn new(radius: f64) -> Result<Self, ConfigError> {
        Self::with_scope(radius, MutationScope::All)
    }

    pub fn with_scope(radius: f64, scope: MutationScope) -> Result<Self, ConfigError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::invalid(
                "radius",
                format!("must be positive and finite, got {radius}"),
            ));
        }
        match scope {
            MutationScope::Count(0) => {
                return Err(ConfigError::invalid("k", "must be at least 1"));
            }
            MutationScope::Probability(p) if p.is_nan() || p <= 0.0 || p > 1.0 => {
                return Err(ConfigError::invalid(
                    "p",
                    format!("must be in (0, 1], got {p}"),
                ));
            }
            _ => {}
        }
        Ok(Self {
            radius,
            scope,
            rng: StdRng::seed_from_u64(rand::random()),
            previous: Vec::new(),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<(), ConfigError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::invalid(
                "radius",
                format!("must be positive and finite, got {radius}"),
            ));
        }
        self.radius = radius;
        Ok(())
    }

    pub fn scope(&self) -> MutationScope {
        self.scope
    }

    fn perturb<C: RealValued>(&mut self, candidate: &mut C, i: usize) {
        let old = candidate.get(i);
        self.previous.push((i, old));
        let delta = self.rng.random_range(-self.radius..=self.radius);
        candidate.set(i, old + delta);
    }
}

impl Default for UniformMutation {
    /// Radius 1.0 applied to every variable.
    fn default() -> Self {
        Self {
            radius: 1.0,
            scope: MutationScope::All,
            rng: StdRng::seed_from_u64(rand::random()),
            previous: Vec::new(),
        }
    }
}

impl<C: RealValued> UndoableMutationOperator<C> for UniformMutation {
    fn mutate(&mut self, candidate: &mut C) {
        self.previous.clear();
        let n = candidate.len();
        if n == 0 {
            return;
        }
        match self.scope {
            MutationScope::All => {
                for i in 0..n {
                    self.perturb(candidate, i);
                }
            }
            MutationScope::Count(k) if k >= n => {
                for i in 0..n {
                    self.perturb(candidate, i);
                }
            }
            MutationScope::Count(k) => {
                for i in index::sample(&mut self.rng, n, k) {
                    self.perturb(candidate, i);
                }
            }
            MutationScope::Probability(p) => {
                for i in 0..n {
                    if self.rng.random_bool(p) {
                        self.perturb(candidate, i);
                    }
                }
                if self.previous.is_empty() {
                    let i = self.rng.random_range(0..n);
                    self.perturb(candidate, i);
                }
            }
        }
    }

    fn undo(&mut self, candidate: &mut C) {
        for &(i, old) in self.previous.iter().rev() {
            candidate.set(i, old);
        }
        self.previous.clear();
    }

    fn split(&self) -> Self {
        Self {
            radius: self.radius,
            scope: self.scope,
            rng: StdRng::seed_from_u64(rand::random()),
            previous: Vec::new(),
        }
    }
}
