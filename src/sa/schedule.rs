//! Annealing schedules: the acceptance decision and its temperature.

use super::config::{CoolingConfig, CoolingSchedule};
use crate::error::ConfigError;
use crate::search::CostValue;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Stateful cooling and acceptance policy.
///
/// The engine calls [`init`](Self::init) at the start of every run with
/// the run's evaluation budget, then [`accept`](Self::accept) once per
/// evaluated neighbor. Schedules are owned by one engine; parallel copies
/// obtain their own through [`split`](Self::split).
pub trait AnnealingSchedule: Send {
    /// Resets all run state for a run of `max_evals` evaluations.
    fn init(&mut self, max_evals: usize);

    /// Decides whether to move to a neighbor, and advances the schedule.
    ///
    /// Costs arrive in the search's own numeric type, so a no-worse
    /// neighbor is recognized exactly even for integer costs beyond the
    /// precision of `f64`.
    fn accept<C: CostValue>(&mut self, neighbor_cost: C, current_cost: C) -> bool;

    /// Independent copy with the same configuration and fresh run state.
    fn split(&self) -> Self
    where
        Self: Sized;
}

/// Metropolis (Boltzmann) criterion for minimization.
///
/// A neighbor that is no worse is always accepted. A worse one is
/// accepted with probability `exp((current - neighbor) / temperature)`;
/// at a non-positive temperature worse neighbors are never accepted.
#[inline]
pub fn boltzmann_accept<R: Rng + ?Sized, C: CostValue>(
    rng: &mut R,
    neighbor_cost: C,
    current_cost: C,
    temperature: f64,
) -> bool {
    neighbor_cost <= current_cost
        || (temperature > 0.0
            && rng.random::<f64>()
                < (-neighbor_cost.excess_over(current_cost) / temperature).exp())
}

/// Self-tuning schedule that steers the acceptance rate along the Lam
/// target profile.
///
/// The acceptance rate is tracked as an exponential moving average. Its
/// target starts near 1, decays to 0.44 over the first 15% of the run,
/// stays at 0.44 until 65%, then decays toward 0. The temperature is
/// multiplied by 0.999 when the rate is above target and divided by 0.999
/// otherwise. No tuning parameters beyond the run budget.
///
/// # References
///
/// - Lam & Delosme (1988), "Performance of a new annealing schedule"
/// - Swartz (1993), modified Lam schedule
#[derive(Debug, Clone)]
pub struct ModifiedLam {
    rng: StdRng,
    temperature: f64,
    accept_rate: f64,
    phase1: f64,
    phase2: f64,
    budget: f64,
    count: usize,
}

impl ModifiedLam {
    const INITIAL_TEMPERATURE: f64 = 0.5;
    const INITIAL_ACCEPT_RATE: f64 = 0.5;
    const RATE_DECAY: f64 = 0.998;
    const TEMPERATURE_FACTOR: f64 = 0.999;

    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            temperature: Self::INITIAL_TEMPERATURE,
            accept_rate: Self::INITIAL_ACCEPT_RATE,
            phase1: 0.0,
            phase2: 0.0,
            budget: 0.0,
            count: 0,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn accept_rate(&self) -> f64 {
        self.accept_rate
    }

    fn target_rate(&self) -> f64 {
        let i = self.count as f64;
        if i <= self.phase1 {
            0.44 + 0.56 * 560f64.powf(-i / self.phase1)
        } else if i <= self.phase2 {
            0.44
        } else {
            0.44 * 440f64.powf(-(i / self.budget - 0.65) / 0.35)
        }
    }
}

impl Default for ModifiedLam {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnealingSchedule for ModifiedLam {
    fn init(&mut self, max_evals: usize) {
        self.temperature = Self::INITIAL_TEMPERATURE;
        self.accept_rate = Self::INITIAL_ACCEPT_RATE;
        self.budget = max_evals as f64;
        self.phase1 = 0.15 * self.budget;
        self.phase2 = 0.65 * self.budget;
        self.count = 0;
    }

    fn accept<C: CostValue>(&mut self, neighbor_cost: C, current_cost: C) -> bool {
        let accepted =
            boltzmann_accept(&mut self.rng, neighbor_cost, current_cost, self.temperature);
        self.count += 1;
        self.accept_rate *= Self::RATE_DECAY;
        if accepted {
            self.accept_rate += 1.0 - Self::RATE_DECAY;
        }
        if self.accept_rate > self.target_rate() {
            self.temperature *= Self::TEMPERATURE_FACTOR;
        } else {
            self.temperature /= Self::TEMPERATURE_FACTOR;
        }
        accepted
    }

    fn split(&self) -> Self {
        Self::new()
    }
}

/// Classic schedule: fixed initial temperature, cooled by a
/// [`CoolingSchedule`] rule after every level of evaluations.
#[derive(Debug, Clone)]
pub struct ParameterizedCooling {
    config: CoolingConfig,
    rng: StdRng,
    temperature: f64,
    level_count: usize,
    step: usize,
    linear_steps: usize,
}

impl ParameterizedCooling {
    pub fn new(config: CoolingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Ok(Self {
            temperature: config.initial_temperature,
            config,
            rng,
            level_count: 0,
            step: 0,
            linear_steps: 0,
        })
    }

    pub fn config(&self) -> &CoolingConfig {
        &self.config
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    fn level_length(&self) -> usize {
        match self.config.cooling {
            CoolingSchedule::LundyMees { .. } => 1,
            _ => self.config.evaluations_per_temperature,
        }
    }

    /// Apply the cooling rule to compute the next temperature.
    fn cool(&self) -> f64 {
        let config = &self.config;
        let next = match config.cooling {
            CoolingSchedule::Geometric { alpha } => self.temperature * alpha,
            CoolingSchedule::Linear => {
                config.initial_temperature
                    - (self.step + 1) as f64
                        * (config.initial_temperature - config.min_temperature)
                        / self.linear_steps as f64
            }
            CoolingSchedule::LundyMees { beta } => {
                self.temperature / (1.0 + beta * self.temperature)
            }
        };
        next.max(config.min_temperature)
    }
}

impl Default for ParameterizedCooling {
    fn default() -> Self {
        let config = CoolingConfig::default();
        Self {
            temperature: config.initial_temperature,
            rng: StdRng::seed_from_u64(rand::random()),
            config,
            level_count: 0,
            step: 0,
            linear_steps: 0,
        }
    }
}

impl AnnealingSchedule for ParameterizedCooling {
    fn init(&mut self, max_evals: usize) {
        self.temperature = self.config.initial_temperature;
        self.level_count = 0;
        self.step = 0;
        self.linear_steps = (max_evals / self.config.evaluations_per_temperature).max(1);
    }

    fn accept<C: CostValue>(&mut self, neighbor_cost: C, current_cost: C) -> bool {
        let accepted =
            boltzmann_accept(&mut self.rng, neighbor_cost, current_cost, self.temperature);
        self.level_count += 1;
        if self.level_count >= self.level_length() {
            self.temperature = self.cool();
            self.level_count = 0;
            self.step += 1;
        }
        accepted
    }

    fn split(&self) -> Self {
        Self {
            config: self.config.clone(),
            rng: StdRng::seed_from_u64(rand::random()),
            temperature: self.config.initial_temperature,
            level_count: 0,
            step: 0,
            linear_steps: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boltzmann_never_rejects_non_worsening() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            assert!(boltzmann_accept(&mut rng, 5.0, 5.0, 1e-12));
            assert!(boltzmann_accept(&mut rng, 4.0, 5.0, 0.0));
        }
    }

    #[test]
    fn test_boltzmann_zero_temperature_rejects_worse() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..1000 {
            assert!(!boltzmann_accept(&mut rng, 5.5, 5.0, 0.0));
        }
    }

    #[test]
    fn test_boltzmann_large_integer_costs_stay_exact() {
        let mut rng = StdRng::seed_from_u64(4);
        let base = 1_i64 << 60;
        for _ in 0..1000 {
            assert!(!boltzmann_accept(&mut rng, base + 1, base, 1e-5));
            assert!(boltzmann_accept(&mut rng, base, base + 1, 1e-5));
            assert!(boltzmann_accept(&mut rng, base, base, 1e-5));
        }
    }

    #[test]
    fn test_boltzmann_probability_shrinks_with_gap() {
        let mut rng = StdRng::seed_from_u64(3);
        let trials = 20_000;
        let small_gap = (0..trials)
            .filter(|_| boltzmann_accept(&mut rng, 10.5, 10.0, 1.0))
            .count();
        let large_gap = (0..trials)
            .filter(|_| boltzmann_accept(&mut rng, 13.0, 10.0, 1.0))
            .count();
        // exp(-0.5) ~ 0.61, exp(-3) ~ 0.05
        assert!(small_gap > trials / 2);
        assert!(large_gap < trials / 10);
        assert!(large_gap > 0);
    }

    #[test]
    fn test_modified_lam_init_resets() {
        let mut lam = ModifiedLam::with_seed(7);
        lam.init(1000);
        for _ in 0..500 {
            lam.accept(2.0, 1.0);
        }
        assert!((lam.temperature() - 0.5).abs() > 1e-9);
        lam.init(1000);
        assert_eq!(lam.temperature(), 0.5);
        assert_eq!(lam.accept_rate(), 0.5);
    }

    #[test]
    fn test_modified_lam_cools_while_acceptance_is_high() {
        let n = 10_000;
        let mut lam = ModifiedLam::with_seed(11);
        lam.init(n);
        let mut early = 0.0;
        for i in 1..=6000 {
            lam.accept(1.0, 1.0);
            if i == 2000 {
                early = lam.temperature();
            }
        }
        assert!(lam.temperature() < early);
        assert!(lam.accept_rate() > 0.9);
    }

    #[test]
    fn test_modified_lam_heats_while_acceptance_is_low() {
        let mut lam = ModifiedLam::with_seed(5);
        lam.init(10_000);
        // Gap so large that nothing worse is accepted near T = 0.5.
        for _ in 0..1000 {
            lam.accept(1000.0, 0.0);
        }
        assert!(lam.temperature() > 0.5);
    }

    #[test]
    fn test_geometric_cools_after_each_level() {
        let config = CoolingConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(0.1)
            .with_cooling(CoolingSchedule::Geometric { alpha: 0.5 })
            .with_evaluations_per_temperature(3)
            .with_seed(1);
        let mut schedule = ParameterizedCooling::new(config).unwrap();
        schedule.init(100);
        schedule.accept(0.0, 1.0);
        schedule.accept(0.0, 1.0);
        assert_eq!(schedule.temperature(), 10.0);
        schedule.accept(0.0, 1.0);
        assert_eq!(schedule.temperature(), 5.0);
        for _ in 0..100 {
            schedule.accept(0.0, 1.0);
        }
        assert_eq!(schedule.temperature(), 0.1);
    }

    #[test]
    fn test_linear_reaches_min_at_budget() {
        let config = CoolingConfig::default()
            .with_initial_temperature(11.0)
            .with_min_temperature(1.0)
            .with_cooling(CoolingSchedule::Linear)
            .with_evaluations_per_temperature(10)
            .with_seed(1);
        let mut schedule = ParameterizedCooling::new(config).unwrap();
        schedule.init(100);
        for _ in 0..50 {
            schedule.accept(0.0, 1.0);
        }
        assert!((schedule.temperature() - 6.0).abs() < 1e-9);
        for _ in 0..50 {
            schedule.accept(0.0, 1.0);
        }
        assert!((schedule.temperature() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_lundy_mees_cools_every_evaluation() {
        let config = CoolingConfig::default()
            .with_initial_temperature(1.0)
            .with_min_temperature(1e-3)
            .with_cooling(CoolingSchedule::LundyMees { beta: 1.0 })
            .with_seed(1);
        let mut schedule = ParameterizedCooling::new(config).unwrap();
        schedule.init(10);
        schedule.accept(0.0, 1.0);
        assert!((schedule.temperature() - 0.5).abs() < 1e-12);
        schedule.accept(0.0, 1.0);
        assert!((schedule.temperature() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CoolingConfig::default().with_min_temperature(0.0);
        assert!(ParameterizedCooling::new(config).is_err());
    }

    #[test]
    fn test_split_keeps_configuration() {
        let config = CoolingConfig::default().with_initial_temperature(42.0);
        let schedule = ParameterizedCooling::new(config.clone()).unwrap();
        let mut copy = schedule.split();
        assert_eq!(copy.config(), &config);
        copy.init(10);
        assert_eq!(copy.temperature(), 42.0);
    }
}
