//! Multistart configuration.

use crate::error::ConfigError;

/// Configuration for [`ParallelMultistart`](super::ParallelMultistart).
///
/// # Examples
///
/// ```
/// use u_anneal::multistart::MultistartConfig;
///
/// let config = MultistartConfig::default()
///     .with_threads(8)
///     .with_restarts(20)
///     .with_run_length(50_000)
///     .with_reoptimize(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultistartConfig {
    /// Number of parallel copies, the original included.
    pub threads: usize,

    /// Runs performed by each copy.
    pub restarts: usize,

    /// Evaluation budget of every run.
    pub run_length: usize,

    /// Whether restarts after the first resume from the tracked best
    /// instead of a fresh candidate.
    pub reoptimize: bool,
}

impl Default for MultistartConfig {
    fn default() -> Self {
        Self {
            threads: rayon::current_num_threads(),
            restarts: 1,
            run_length: 10_000,
            reoptimize: false,
        }
    }
}

impl MultistartConfig {
    pub fn with_threads(mut self, n: usize) -> Self {
        self.threads = n;
        self
    }

    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    pub fn with_run_length(mut self, n: usize) -> Self {
        self.run_length = n;
        self
    }

    pub fn with_reoptimize(mut self, reoptimize: bool) -> Self {
        self.reoptimize = reoptimize;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::invalid("threads", "must be at least 1"));
        }
        if self.restarts == 0 {
            return Err(ConfigError::invalid("restarts", "must be at least 1"));
        }
        Ok(())
    }
}
