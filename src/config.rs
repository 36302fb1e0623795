//! Planner configuration.
//!
//! Every constant the optimizer depends on is a field here: GA parameters,
//! grid dimensions and slot limits, the Phase-1 window, Phase-2 batching,
//! penalty coefficients, priority derivation and operator selection.
//! Configuration is plain data loaded from TOML; every field has a default,
//! so a partial file only overrides what it names.
//!
//! # Example
//!
//! ```
//! use brick_schedule::config::PlannerConfig;
//!
//! let config = PlannerConfig::from_toml_str(r#"
//!     [ga]
//!     population_size = 30
//!     seed = 7
//!
//!     [grid]
//!     max_days = 20
//!     slots_per_day = 4
//!
//!     [penalties]
//!     diversity = 0.0
//! "#).unwrap();
//!
//! assert_eq!(config.ga.population_size, 30);
//! assert_eq!(config.ga.seed, Some(7));
//! assert_eq!(config.grid.max_units_per_slot, 4);
//! assert_eq!(config.penalties.diversity, 0.0);
//! assert_eq!(config.penalties.unmet_demand, 1000.0);
//! ```

use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::ga::operators::{CrossoverType, MutationType};
use crate::models::PriorityRules;

/// Complete planner configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Genetic algorithm parameters.
    pub ga: GaSettings,
    /// Horizon and per-slot capacity limits.
    pub grid: GridSettings,
    /// Phase-1 preallocation window.
    pub phase1: Phase1Settings,
    /// Phase-2 batching and diversity.
    pub phase2: Phase2Settings,
    /// Penalty coefficients.
    pub penalties: PenaltyWeights,
    /// Category-prefix → priority class rules.
    pub priority: PriorityRules,
    /// Crossover and mutation strategy.
    pub operators: OperatorSettings,
}

/// Genetic algorithm parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaSettings {
    pub population_size: usize,
    pub generations: usize,
    /// Probability an offspring is mutated.
    pub mutation_rate: f64,
    /// Probability an offspring is bred by crossover rather than copied.
    pub crossover_rate: f64,
    pub tournament_size: usize,
    /// Best individuals carried unchanged into the next generation.
    pub elitism: usize,
    /// Fixed seed for reproducible runs. `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Evaluate fitness with rayon.
    pub parallel: bool,
}

impl Default for GaSettings {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 200,
            mutation_rate: 0.2,
            crossover_rate: 0.8,
            tournament_size: 5,
            elitism: 1,
            seed: None,
            parallel: false,
        }
    }
}

/// Horizon and slot limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Planning horizon in days.
    pub max_days: usize,
    /// Production slots (passes) per day.
    pub slots_per_day: usize,
    /// Lower weight bound of a non-empty slot.
    pub min_slot_weight: f64,
    /// Upper weight bound of a slot.
    pub max_slot_weight: f64,
    /// Upper unit-count bound of a slot.
    pub max_units_per_slot: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            max_days: 50,
            slots_per_day: 15,
            min_slot_weight: 1700.0,
            max_slot_weight: 2200.0,
            max_units_per_slot: 4,
        }
    }
}

/// Phase-1 preallocation of top-priority types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phase1Settings {
    /// Length of the preallocated prefix in days.
    pub days: usize,
    /// Bernoulli probability of producing a type on a given day.
    pub production_probability: f64,
    /// Units per Phase-1 batch.
    pub batch_size: u32,
}

impl Default for Phase1Settings {
    fn default() -> Self {
        Self {
            days: 5,
            production_probability: 0.9,
            batch_size: 2,
        }
    }
}

/// Phase-2 batching and diversity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phase2Settings {
    /// Distinct types expected on every producing day.
    pub min_diversity: usize,
    /// Candidate batch sizes for initialization and relocation.
    pub batch_sizes: Vec<u32>,
    /// Random (day, slot) picks tried per batch before it is dropped.
    pub placement_attempts: usize,
}

impl Default for Phase2Settings {
    fn default() -> Self {
        Self {
            min_diversity: 10,
            batch_sizes: vec![2, 4],
            placement_attempts: 100,
        }
    }
}

/// Penalty coefficients.
///
/// The last group of terms belongs to the coarse single-phase model and is
/// disabled (zero) unless configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyWeights {
    pub overweight: f64,
    pub underweight: f64,
    pub over_count: f64,
    pub priority: f64,
    pub diversity: f64,
    pub unmet_demand: f64,

    /// Per batch above `slots_per_day` in the estimated daily batch count.
    pub batch_count: f64,
    /// Average weight of one batch used to estimate the daily batch count.
    pub expected_batch_weight: f64,
    /// Per unit of top-priority production above the early-window cap.
    pub early_cap: f64,
    pub early_window_days: usize,
    pub early_top_priority_cap: u32,
    /// Per odd-sized cell while more than one unit remains to produce.
    pub parity: f64,
    /// Per unit of whole-horizon shortfall against total catalog demand.
    pub shortfall: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            overweight: 20.0,
            underweight: 15.0,
            over_count: 50.0,
            priority: 30.0,
            diversity: 5.0,
            unmet_demand: 1000.0,
            batch_count: 0.0,
            expected_batch_weight: 0.0,
            early_cap: 0.0,
            early_window_days: 0,
            early_top_priority_cap: 0,
            parity: 0.0,
            shortfall: 0.0,
        }
    }
}

impl PenaltyWeights {
    /// Weights with every term disabled.
    pub fn zero() -> Self {
        Self {
            overweight: 0.0,
            underweight: 0.0,
            over_count: 0.0,
            priority: 0.0,
            diversity: 0.0,
            unmet_demand: 0.0,
            ..Self::default()
        }
    }

    fn coefficients(&self) -> [(&'static str, f64); 11] {
        [
            ("overweight", self.overweight),
            ("underweight", self.underweight),
            ("over_count", self.over_count),
            ("priority", self.priority),
            ("diversity", self.diversity),
            ("unmet_demand", self.unmet_demand),
            ("batch_count", self.batch_count),
            ("expected_batch_weight", self.expected_batch_weight),
            ("early_cap", self.early_cap),
            ("parity", self.parity),
            ("shortfall", self.shortfall),
        ]
    }
}

/// Operator selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorSettings {
    pub crossover: CrossoverType,
    pub mutation: MutationType,
}

impl Default for OperatorSettings {
    fn default() -> Self {
        Self {
            crossover: CrossoverType::TypeSplit,
            mutation: MutationType::Relocate,
        }
    }
}

impl PlannerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.ga.seed = Some(seed);
        self
    }

    /// Sets population size and generation count.
    pub fn with_population(mut self, population_size: usize, generations: usize) -> Self {
        self.ga.population_size = population_size;
        self.ga.generations = generations;
        self
    }

    /// Sets the horizon and slots per day.
    pub fn with_horizon(mut self, max_days: usize, slots_per_day: usize) -> Self {
        self.grid.max_days = max_days;
        self.grid.slots_per_day = slots_per_day;
        self
    }

    /// Sets the Phase-1 window length.
    pub fn with_phase1_days(mut self, days: usize) -> Self {
        self.phase1.days = days;
        self
    }

    /// Replaces the penalty coefficients.
    pub fn with_penalties(mut self, penalties: PenaltyWeights) -> Self {
        self.penalties = penalties;
        self
    }

    /// Enables parallel fitness evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.ga.parallel = parallel;
        self
    }

    /// Checks ranges and cross-field consistency.
    ///
    /// The Phase-1 window must be strictly shorter than the horizon
    /// (`phase1.days < max_days`) so that Phase 2 has at least one day.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(PlannerError::Config(msg)) };

        if self.ga.population_size == 0 {
            return invalid("population_size must be at least 1".into());
        }
        if self.ga.elitism > self.ga.population_size {
            return invalid(format!(
                "elitism {} exceeds population_size {}",
                self.ga.elitism, self.ga.population_size
            ));
        }
        for (name, rate) in [
            ("mutation_rate", self.ga.mutation_rate),
            ("crossover_rate", self.ga.crossover_rate),
            ("production_probability", self.phase1.production_probability),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return invalid(format!("{name} must be within [0, 1], got {rate}"));
            }
        }
        if self.grid.slots_per_day == 0 {
            return invalid("slots_per_day must be at least 1".into());
        }
        if self.phase1.days >= self.grid.max_days {
            return invalid(format!(
                "phase1 days {} leave no Phase-2 window in a {}-day horizon",
                self.phase1.days, self.grid.max_days
            ));
        }
        let (min_weight, max_weight) = (self.grid.min_slot_weight, self.grid.max_slot_weight);
        if !(min_weight >= 0.0 && min_weight <= max_weight) {
            return invalid(format!(
                "slot weight range [{min_weight}, {max_weight}] is empty"
            ));
        }
        if self.phase1.batch_size == 0 {
            return invalid("phase1 batch_size must be positive".into());
        }
        if self.phase2.batch_sizes.is_empty() {
            return invalid("phase2 batch_sizes must not be empty".into());
        }
        if let Some(bad) = self.phase2.batch_sizes.iter().find(|&&b| b == 0 || b % 2 != 0) {
            return invalid(format!("phase2 batch size {bad} is not a positive even number"));
        }
        for (name, value) in self.penalties.coefficients() {
            if !(value >= 0.0 && value.is_finite()) {
                return invalid(format!("penalty {name} must be finite and non-negative"));
            }
        }
        Ok(())
    }

    /// Phase-2 day range: `phase1.days..max_days`, empty if Phase 1
    /// covers the horizon.
    #[inline]
    pub fn window(&self) -> Range<usize> {
        let end = self.grid.max_days;
        self.phase1.days.min(end)..end
    }
}
