//! Parallel simulated annealing with a shared progress tracker.
//!
//! - **Search core** ([`search`]): problem traits for integer and real
//!   costs, undoable mutation operators, initializers, and the
//!   thread-safe [`ProgressTracker`](search::ProgressTracker) every split
//!   copy of a search reports into.
//! - **Simulated Annealing** ([`sa`]): the annealing engine with the
//!   self-tuning Modified Lam schedule or parameterized cooling, and an
//!   optional hill-climbing refinement stage.
//! - **Hill climbing** ([`hc`]): first-improvement stochastic local search.
//! - **Multistart** ([`multistart`]): runs split copies in parallel on the
//!   rayon pool, with an optional time limit.
//! - **Reals** ([`reals`]): real-valued candidates and operators.
//!
//! Every search is split-able: `split` yields an independent copy with
//! fresh operator state that shares the problem and the tracker. Once
//! some copy reaches the problem's theoretical minimum, or the tracker is
//! stopped, every other copy returns promptly.

pub mod error;
pub mod hc;
pub mod multistart;
pub mod reals;
pub mod sa;
pub mod search;

pub use error::ConfigError;
