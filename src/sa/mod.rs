//! Simulated Annealing (SA).
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Accepts worsening moves with a probability that
//! decreases over time (temperature), allowing the search to escape
//! local optima.
//!
//! - [`SimulatedAnnealing`]: the engine, built with [`SimulatedAnnealingBuilder`].
//! - [`ModifiedLam`]: the default self-tuning schedule.
//! - [`ParameterizedCooling`]: classic cooling driven by a [`CoolingConfig`].
//! - [`SimulatedAnnealingHc`]: annealing followed by a local-search refinement.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Lam & Delosme (1988), "Performance of a New Annealing Schedule"
//! - Swartz (1993), "Automatic Layout of Analog and Digital Mixed Macro/Standard Cell Integrated Circuits"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod refine;
mod runner;
mod schedule;

pub use config::{CoolingConfig, CoolingSchedule};
pub use refine::SimulatedAnnealingHc;
pub use runner::{SimulatedAnnealing, SimulatedAnnealingBuilder};
pub use schedule::{boltzmann_accept, AnnealingSchedule, ModifiedLam, ParameterizedCooling};
