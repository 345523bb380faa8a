//! Parallel multistart.
//!
//! Splits one [`SingleSolutionMetaheuristic`](crate::search::SingleSolutionMetaheuristic)
//! into independent copies that share a tracker and runs them on the
//! rayon thread pool. Every copy performs a fixed number of restarts of
//! fixed length; all copies stand down as soon as one of them reaches the
//! problem's theoretical minimum or the tracker is stopped.

mod config;
mod runner;

pub use config::MultistartConfig;
pub use runner::{MultistartResult, ParallelMultistart};
