//! Two-phase brick production planner.
//!
//! # Algorithm
//!
//! 1. Validate the configuration and the catalog.
//! 2. Phase 1: preallocate top-priority types over the first days.
//! 3. Build the residual demand map.
//! 4. Phase 2: run the GA over the remaining window.
//! 5. Score the best plan term by term and compute its KPIs.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::PlanKpi;
use crate::config::PlannerConfig;
use crate::error::Result;
use crate::ga::{
    BrickGaProblem, FitnessBreakdown, GaRunner, GenerationRecord, Individual, full_demand,
    preallocate,
};
use crate::models::{Brick, DemandMap};
use crate::validation::{into_planner_error, validate_catalog};

/// Everything a planning run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResult {
    /// Seed the run was drawn from; `None` for a caller-supplied RNG.
    pub seed: Option<u64>,
    /// Best plan found.
    pub best: Individual,
    /// Per-term fitness of `best`.
    pub breakdown: FitnessBreakdown,
    /// Residual demand the GA planned for.
    pub demand: DemandMap,
    /// Best-of-generation history.
    pub history: Vec<GenerationRecord>,
    /// Quality metrics of `best`.
    pub kpi: PlanKpi,
}

/// Phase-1 preallocation followed by a Phase-2 GA.
///
/// # Example
///
/// ```
/// use brick_schedule::config::PlannerConfig;
/// use brick_schedule::models::Brick;
/// use brick_schedule::scheduler::BrickPlanner;
///
/// let catalog = vec![
///     Brick::new(1, "ZD-230", 10, 50.0),
///     Brick::new(2, "ZB-114", 6, 80.0),
/// ];
/// let config = PlannerConfig::default()
///     .with_horizon(12, 3)
///     .with_phase1_days(3)
///     .with_population(10, 10)
///     .with_seed(7);
///
/// let result = BrickPlanner::new(config).plan(&catalog).unwrap();
/// assert_eq!(result.seed, Some(7));
/// assert_eq!(result.history.len(), 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BrickPlanner {
    config: PlannerConfig,
}

impl BrickPlanner {
    /// Creates a planner.
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans a catalog with an RNG seeded from `config.ga.seed`, or from
    /// entropy when no seed is set.
    ///
    /// # Errors
    ///
    /// `Config` for an invalid configuration, `InvalidInput` for an empty
    /// or malformed catalog.
    pub fn plan(&self, catalog: &[Brick]) -> Result<PlanResult> {
        let seed = self.config.ga.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut result = self.plan_with_rng(catalog, &mut rng)?;
        result.seed = Some(seed);
        Ok(result)
    }

    /// Plans a catalog with a caller-supplied RNG.
    ///
    /// Priority classes are re-derived from `config.priority`; bricks with
    /// a fixed priority keep theirs.
    pub fn plan_with_rng<R: Rng>(&self, catalog: &[Brick], rng: &mut R) -> Result<PlanResult> {
        self.config.validate()?;
        validate_catalog(catalog).map_err(into_planner_error)?;

        let config = &self.config;
        let catalog: Vec<Brick> = catalog
            .iter()
            .map(|b| b.clone().with_rules(&config.priority))
            .collect();
        let catalog = catalog.as_slice();
        info!(
            event = "plan_start",
            types = catalog.len(),
            units = catalog.iter().map(|b| b.quantity as u64).sum::<u64>(),
            max_days = config.grid.max_days,
            slots_per_day = config.grid.slots_per_day,
        );

        let mut residual = full_demand(catalog);
        let base = preallocate(catalog, config, &mut residual, rng);
        let demand = DemandMap::from_residual(&residual);
        info!(
            event = "phase1_done",
            base_days = base.grid.actual_days(),
            tracked_types = demand.len(),
            residual_units = demand.total(),
        );

        let problem = BrickGaProblem::new(catalog.to_vec(), demand, config.clone(), base);
        let ga = GaRunner::run_with_rng(&problem, &config.ga, rng)?;

        let breakdown = problem.breakdown(&ga.best);
        let kpi = PlanKpi::calculate(&ga.best.grid, catalog, config);
        info!(
            event = "plan_done",
            fitness = ga.best.fitness,
            actual_days = kpi.actual_days,
            demand_met_rate = kpi.demand_met_rate,
            feasible = kpi.is_feasible(),
        );

        Ok(PlanResult {
            seed: None,
            best: ga.best,
            breakdown,
            demand: problem.demand,
            history: ga.history,
            kpi,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use crate::models::PriorityRules;

    fn scenario_catalog() -> Vec<Brick> {
        vec![
            Brick::new(1, "ZD-230", 10, 50.0),
            Brick::new(2, "ZB-114", 6, 80.0),
            Brick::new(3, "QX-65", 4, 120.0),
        ]
    }

    #[test]
    fn test_scenario_meets_demand_exactly() {
        let config = PlannerConfig::default().with_population(20, 30).with_seed(42);
        let result = BrickPlanner::new(config).plan(&scenario_catalog()).unwrap();

        assert_eq!(result.kpi.produced, vec![10, 6, 4]);
        assert_eq!(result.breakdown.unmet_demand, 0.0);
        assert_eq!(result.kpi.total_unmet(), 0);
        assert_eq!(result.best.fitness, result.breakdown.total());
        assert_eq!(result.history.len(), 30);
    }

    #[test]
    fn test_seeded_plans_are_reproducible() {
        let config = PlannerConfig::default()
            .with_horizon(15, 4)
            .with_population(12, 10)
            .with_seed(11);
        let planner = BrickPlanner::new(config);
        let a = planner.plan(&scenario_catalog()).unwrap();
        let b = planner.plan(&scenario_catalog()).unwrap();
        assert_eq!(a.best.grid, b.best.grid);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_plan_with_rng_has_no_seed() {
        let config = PlannerConfig::default().with_horizon(15, 4).with_population(8, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let result = BrickPlanner::new(config)
            .plan_with_rng(&scenario_catalog(), &mut rng)
            .unwrap();
        assert_eq!(result.seed, None);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let planner = BrickPlanner::default();
        assert!(matches!(planner.plan(&[]), Err(PlannerError::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PlannerConfig::default().with_population(0, 10);
        let planner = BrickPlanner::new(config);
        assert!(matches!(
            planner.plan(&scenario_catalog()),
            Err(PlannerError::Config(_))
        ));
    }

    #[test]
    fn test_configured_rules_drive_phase1() {
        let catalog = vec![
            Brick::new(1, "ZD-1", 6, 100.0),
            Brick::new(2, "QX-1", 6, 100.0),
        ];
        let mut config = PlannerConfig::default()
            .with_horizon(10, 2)
            .with_phase1_days(3)
            .with_population(4, 1)
            .with_seed(5);
        config.priority = PriorityRules::new(vec!["QX".into()], vec![]);
        config.phase1.production_probability = 1.0;
        let window_start = config.phase1.days;

        let result = BrickPlanner::new(config).plan(&catalog).unwrap();
        let grid = &result.best.grid;
        // QX is the only top class now: it takes the whole Phase-1 window.
        assert_eq!(grid.total_for_type_in(0..window_start, 1), 6);
        assert_eq!(grid.total_for_type_in(0..window_start, 0), 0);
        assert!(!result.demand.contains(1));
        assert_eq!(result.demand.get(0), 6);
    }

    #[test]
    fn test_fixed_priority_survives_rules() {
        let catalog = vec![
            Brick::new(1, "ZD-1", 6, 100.0).with_priority(0),
            Brick::new(2, "QX-1", 6, 100.0),
        ];
        let mut config = PlannerConfig::default()
            .with_horizon(10, 2)
            .with_phase1_days(3)
            .with_population(4, 1)
            .with_seed(5);
        config.priority = PriorityRules::new(vec!["QX".into()], vec![]);
        config.phase1.production_probability = 1.0;
        let window_start = config.phase1.days;

        let result = BrickPlanner::new(config).plan(&catalog).unwrap();
        let grid = &result.best.grid;
        assert_eq!(grid.total_for_type_in(0..window_start, 0), 6);
        assert_eq!(grid.total_for_type_in(0..window_start, 1), 6);
    }

    #[test]
    fn test_demand_covered_by_phase1() {
        // Two units of a top-priority type: Phase 1 is likely to take all of it.
        let catalog = vec![Brick::new(1, "ZD-1", 2, 100.0)];
        let config = PlannerConfig::default()
            .with_horizon(10, 2)
            .with_phase1_days(3)
            .with_population(6, 5)
            .with_seed(1);
        let result = BrickPlanner::new(config).plan(&catalog).unwrap();
        assert_eq!(result.kpi.produced, vec![2]);
        assert_eq!(result.breakdown.unmet_demand, 0.0);
    }
}
