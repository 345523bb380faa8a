//! Configuration for parameterized cooling schedules.

use crate::error::ConfigError;

/// Temperature reduction rule.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-duration cooling over the run budget
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    ///
    /// Most widely used. Typical `alpha`: 0.95 to 0.99.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling: `T_k = T_0 - k * (T_0 - T_min) / steps`, where
    /// `steps` is the run budget divided by the evaluations per level.
    Linear,

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// One evaluation per temperature step. Cools fast at high T,
    /// slow at low T.
    LundyMees {
        /// Cooling parameter. Typically `(T_0 - T_min) / (max_evals * T_0 * T_min)`.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.95 }
    }
}

/// Parameters for [`ParameterizedCooling`](super::ParameterizedCooling).
///
/// Termination is driven by the evaluation budget handed to the engine;
/// the temperature is floored at `min_temperature` rather than ending the
/// run.
///
/// # Examples
///
/// ```
/// use u_anneal::sa::{CoolingConfig, CoolingSchedule};
///
/// let config = CoolingConfig::default()
///     .with_initial_temperature(100.0)
///     .with_min_temperature(0.001)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.98 })
///     .with_evaluations_per_temperature(200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoolingConfig {
    /// Temperature at the start of every run.
    pub initial_temperature: f64,

    /// Lowest temperature reached.
    pub min_temperature: f64,

    pub cooling: CoolingSchedule,

    /// Evaluations at each temperature level.
    ///
    /// Ignored by `LundyMees`, which cools after every evaluation.
    pub evaluations_per_temperature: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for CoolingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            min_temperature: 1e-6,
            cooling: CoolingSchedule::default(),
            evaluations_per_temperature: 100,
            seed: None,
        }
    }
}

impl CoolingConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_evaluations_per_temperature(mut self, n: usize) -> Self {
        self.evaluations_per_temperature = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(ConfigError::invalid(
                "initial_temperature",
                "must be positive and finite",
            ));
        }
        if !self.min_temperature.is_finite() || self.min_temperature <= 0.0 {
            return Err(ConfigError::invalid(
                "min_temperature",
                "must be positive and finite",
            ));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(ConfigError::invalid(
                "min_temperature",
                "must be less than initial_temperature",
            ));
        }
        if self.evaluations_per_temperature == 0 {
            return Err(ConfigError::invalid(
                "evaluations_per_temperature",
                "must be at least 1",
            ));
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if alpha.is_nan() || alpha <= 0.0 || alpha >= 1.0 {
                    return Err(ConfigError::invalid(
                        "alpha",
                        format!("geometric alpha must be in (0, 1), got {alpha}"),
                    ));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if !beta.is_finite() || beta <= 0.0 {
                    return Err(ConfigError::invalid(
                        "beta",
                        format!("lundy-mees beta must be positive, got {beta}"),
                    ));
                }
            }
            CoolingSchedule::Linear => {}
        }
        Ok(())
    }
}
