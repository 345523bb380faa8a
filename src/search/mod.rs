//! Contracts shared by every search in the crate.
//!
//! - [`IntegerCostProblem`] / [`RealCostProblem`]: the two cost flavors,
//!   wrapped in a [`ProblemRef`] chosen once per search.
//! - [`UndoableMutationOperator`] / [`Initializer`]: user-supplied
//!   operators on the candidate type.
//! - [`ProgressTracker`]: the only object designed to be touched from
//!   several threads at once.
//! - [`SingleSolutionMetaheuristic`] / [`LocalSearch`]: the interfaces
//!   implemented by the annealing engine and the hill climber.

mod cost;
mod metaheuristic;
mod operators;
mod problem;
mod solution;
mod tracker;

#[cfg(test)]
pub(crate) mod testing;

pub use cost::{Cost, CostValue};
pub use metaheuristic::{LocalSearch, SingleSolutionMetaheuristic};
pub use operators::{Initializer, UndoableMutationOperator};
pub(crate) use problem::Objective;
pub use problem::{IntegerCostProblem, ProblemRef, RealCostProblem};
pub use solution::SolutionCostPair;
pub use tracker::ProgressTracker;
