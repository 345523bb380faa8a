//! Stochastic hill climbing.
//!
//! A first-improvement local search over an undoable mutation operator:
//! a random neighbor replaces the current candidate only if it is
//! strictly better, otherwise the mutation is undone. The search ends at
//! a local optimum, detected as a run of consecutive failures.
//!
//! Typically used as the refinement stage of
//! [`SimulatedAnnealingHc`](crate::sa::SimulatedAnnealingHc).

mod config;
mod runner;

pub use config::HillClimberConfig;
pub use runner::StochasticHillClimber;
