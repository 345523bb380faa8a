//! Problem contracts and the flavor-tagged problem handle.

use super::cost::{Cost, CostValue};
use std::fmt;
use std::sync::Arc;

/// An optimization problem whose cost function is integer-valued.
///
/// Implementations are shared by every split copy of a search and
/// evaluated from several threads at once, hence `Send + Sync`.
///
/// # Examples
///
/// ```
/// use u_anneal::search::IntegerCostProblem;
///
/// /// Minimize |x|.
/// struct Abs;
///
/// impl IntegerCostProblem<i64> for Abs {
///     fn cost(&self, x: &i64) -> i64 {
///         x.abs()
///     }
///
///     fn min_cost(&self) -> i64 {
///         0
///     }
/// }
/// ```
pub trait IntegerCostProblem<T>: Send + Sync {
    /// Cost of a candidate. Lower is better.
    fn cost(&self, candidate: &T) -> i64;

    /// Lower bound on the cost.
    ///
    /// A search that reaches exactly this value stops early. The default
    /// is unreachable in practice, which disables the early exit.
    fn min_cost(&self) -> i64 {
        i64::MIN
    }

    /// Raw objective value; differs from `cost` for maximization problems.
    fn value(&self, candidate: &T) -> i64 {
        self.cost(candidate)
    }
}

/// An optimization problem whose cost function is real-valued.
///
/// The early exit on [`min_cost`](Self::min_cost) uses exact `f64`
/// equality, so it only fires if the search reaches that exact value.
pub trait RealCostProblem<T>: Send + Sync {
    /// Cost of a candidate. Lower is better.
    fn cost(&self, candidate: &T) -> f64;

    /// Lower bound on the cost. Defaults to negative infinity.
    fn min_cost(&self) -> f64 {
        f64::NEG_INFINITY
    }

    /// Raw objective value; differs from `cost` for maximization problems.
    fn value(&self, candidate: &T) -> f64 {
        self.cost(candidate)
    }
}

/// Shared handle to a problem, tagged with its cost flavor.
///
/// The flavor is fixed when the handle is created; searches match on it
/// once per run and then execute a loop specialized to that flavor.
pub enum ProblemRef<T> {
    Integer(Arc<dyn IntegerCostProblem<T>>),
    Real(Arc<dyn RealCostProblem<T>>),
}

impl<T> ProblemRef<T> {
    /// Wraps an integer-cost problem.
    pub fn integer<P: IntegerCostProblem<T> + 'static>(problem: Arc<P>) -> Self {
        ProblemRef::Integer(problem)
    }

    /// Wraps a real-cost problem.
    pub fn real<P: RealCostProblem<T> + 'static>(problem: Arc<P>) -> Self {
        ProblemRef::Real(problem)
    }

    /// Whether the problem has integer costs.
    pub fn is_integer(&self) -> bool {
        matches!(self, ProblemRef::Integer(_))
    }

    /// Whether both handles point at the same problem instance.
    pub fn same_instance(&self, other: &ProblemRef<T>) -> bool {
        match (self, other) {
            (ProblemRef::Integer(a), ProblemRef::Integer(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            (ProblemRef::Real(a), ProblemRef::Real(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            _ => false,
        }
    }

    /// Evaluates a candidate through whichever flavor this handle holds.
    ///
    /// Convenience for callers outside the search loops.
    pub fn cost(&self, candidate: &T) -> Cost {
        match self {
            ProblemRef::Integer(p) => Cost::Integer(p.cost(candidate)),
            ProblemRef::Real(p) => Cost::Real(p.cost(candidate)),
        }
    }

    /// The problem's declared lower bound.
    pub fn min_cost(&self) -> Cost {
        match self {
            ProblemRef::Integer(p) => Cost::Integer(p.min_cost()),
            ProblemRef::Real(p) => Cost::Real(p.min_cost()),
        }
    }
}

impl<T> Clone for ProblemRef<T> {
    fn clone(&self) -> Self {
        match self {
            ProblemRef::Integer(p) => ProblemRef::Integer(Arc::clone(p)),
            ProblemRef::Real(p) => ProblemRef::Real(Arc::clone(p)),
        }
    }
}

impl<T> fmt::Debug for ProblemRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemRef::Integer(p) => write!(f, "ProblemRef::Integer({:p})", Arc::as_ptr(p)),
            ProblemRef::Real(p) => write!(f, "ProblemRef::Real({:p})", Arc::as_ptr(p)),
        }
    }
}

/// Cost evaluation specialized to one flavor.
///
/// Search loops are written once against this trait and instantiated for
/// each flavor after a single match on [`ProblemRef`].
pub(crate) trait Objective<T> {
    type Cost: CostValue;

    fn evaluate(&self, candidate: &T) -> Self::Cost;

    fn theoretical_min(&self) -> Self::Cost;
}

impl<T> Objective<T> for dyn IntegerCostProblem<T> {
    type Cost = i64;

    #[inline]
    fn evaluate(&self, candidate: &T) -> i64 {
        self.cost(candidate)
    }

    #[inline]
    fn theoretical_min(&self) -> i64 {
        self.min_cost()
    }
}

impl<T> Objective<T> for dyn RealCostProblem<T> {
    type Cost = f64;

    #[inline]
    fn evaluate(&self, candidate: &T) -> f64 {
        self.cost(candidate)
    }

    #[inline]
    fn theoretical_min(&self) -> f64 {
        self.min_cost()
    }
}
