//! Real-valued representations and their operators.
//!
//! - [`SingleReal`] / [`RealVector`]: candidates, optionally bounded.
//! - [`UniformMutation`]: undoable uniform perturbation.
//! - [`RealValuedInitializer`]: uniform random candidates.

mod initializer;
mod mutation;
mod types;

pub use initializer::RealValuedInitializer;
pub use mutation::{MutationScope, UniformMutation};
pub use types::{Bounds, RealValued, RealVector, SingleReal};
