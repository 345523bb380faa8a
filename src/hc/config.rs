//! Hill climber configuration.

use crate::error::ConfigError;

/// Configuration for [`StochasticHillClimber`](super::StochasticHillClimber).
///
/// # Examples
///
/// ```
/// use u_anneal::hc::HillClimberConfig;
///
/// let config = HillClimberConfig::default().with_max_failures(500);
/// assert_eq!(config.max_failures, 500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HillClimberConfig {
    /// Consecutive non-improving neighbors after which the candidate is
    /// treated as a local optimum.
    pub max_failures: usize,
}

impl Default for HillClimberConfig {
    fn default() -> Self {
        Self { max_failures: 100 }
    }
}

impl HillClimberConfig {
    pub fn with_max_failures(mut self, n: usize) -> Self {
        self.max_failures = n;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_failures == 0 {
            return Err(ConfigError::invalid("max_failures", "must be at least 1"));
        }
        Ok(())
    }
}
