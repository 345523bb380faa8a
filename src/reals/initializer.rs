//! Random initialization of real-valued candidates.

use super::types::{Bounds, RealVector};
use crate::error::ConfigError;
use crate::search::Initializer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates [`RealVector`] candidates with every variable drawn uniformly
/// from `[a, b)`.
///
/// With [`with_bounds`](Self::with_bounds), candidates carry the bounds
/// and clamp every later `set` into them; initial values are clamped too.
///
/// # Examples
///
/// ```
/// use u_anneal::reals::{RealValued, RealValuedInitializer};
/// use u_anneal::search::Initializer;
///
/// let mut init = RealValuedInitializer::new(3, -5.0, 5.0).unwrap().with_seed(1);
/// let v = init.create_candidate_solution();
/// assert_eq!(v.len(), 3);
/// assert!(v.values().iter().all(|x| (-5.0..5.0).contains(x)));
/// ```
#[derive(Debug, Clone)]
pub struct RealValuedInitializer {
    n: usize,
    a: f64,
    b: f64,
    bounds: Option<Bounds>,
    rng: StdRng,
}

impl RealValuedInitializer {
    pub fn new(n: usize, a: f64, b: f64) -> Result<Self, ConfigError> {
        if n == 0 {
            return Err(ConfigError::invalid("n", "must be at least 1"));
        }
        if !a.is_finite() || !b.is_finite() || a >= b {
            return Err(ConfigError::invalid(
                "interval",
                format!("[{a}, {b}) must be a finite non-empty interval"),
            ));
        }
        Ok(Self {
            n,
            a,
            b,
            bounds: None,
            rng: StdRng::seed_from_u64(rand::random()),
        })
    }

    /// Attaches `[min, max]` bounds to every candidate.
    pub fn with_bounds(mut self, min: f64, max: f64) -> Result<Self, ConfigError> {
        self.bounds = Some(Bounds::new(min, max)?);
        Ok(self)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn dimension(&self) -> usize {
        self.n
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}

impl Initializer<RealVector> for RealValuedInitializer {
    fn create_candidate_solution(&mut self) -> RealVector {
        let values: Vec<f64> = (0..self.n)
            .map(|_| self.rng.random_range(self.a..self.b))
            .collect();
        match self.bounds {
            Some(bounds) => RealVector::bounded(values, bounds),
            None => RealVector::new(values),
        }
    }

    fn split(&self) -> Self {
        Self {
            rng: StdRng::seed_from_u64(rand::random()),
            ..self.clone()
        }
    }
}
