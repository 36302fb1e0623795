//! Brick planning GA problem definition.
//!
//! [`GaProblem`] is the seam between the generation loop in
//! [`GaRunner`](super::GaRunner) and the domain. [`BrickGaProblem`] owns the
//! catalog, the residual demand and the Phase-1 base, and implements the
//! four GA primitives on top of them.

use rand::Rng;

use super::fitness::{FitnessBreakdown, FitnessEvaluator};
use super::operators::GeneticOperators;
use super::population::seed_individual;
use super::{Individual, PlanContext};
use crate::config::PlannerConfig;
use crate::error::Result;
use crate::models::{Brick, DemandMap};

/// The four domain primitives a GA run needs.
///
/// Evaluation must be free of randomness so the runner can score the
/// population in parallel without changing results.
pub trait GaProblem: Sync {
    /// Builds one member of the initial population.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Individual;

    /// Scores an individual, storing `fitness` and `actual_days` on it.
    fn evaluate(&self, individual: &mut Individual);

    /// Breeds one offspring from two parents.
    fn crossover<R: Rng>(&self, p1: &Individual, p2: &Individual, rng: &mut R) -> Result<Individual>;

    /// Mutates an individual in place.
    fn mutate<R: Rng>(&self, individual: &mut Individual, rng: &mut R);
}

/// GA problem for Phase-2 brick scheduling.
///
/// # Example
///
/// ```
/// use brick_schedule::config::PlannerConfig;
/// use brick_schedule::ga::{BrickGaProblem, GaRunner, full_demand, preallocate};
/// use brick_schedule::models::{Brick, DemandMap};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let catalog = vec![Brick::new(1, "ZD-1", 8, 60.0), Brick::new(2, "ZB-1", 4, 90.0)];
/// let config = PlannerConfig::default().with_horizon(10, 3).with_phase1_days(2).with_population(10, 5);
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
///
/// let mut residual = full_demand(&catalog);
/// let base = preallocate(&catalog, &config, &mut residual, &mut rng);
/// let demand = DemandMap::from_residual(&residual);
///
/// let problem = BrickGaProblem::new(catalog, demand, config.clone(), base);
/// let result = GaRunner::run_with_rng(&problem, &config.ga, &mut rng).unwrap();
/// assert!(result.best.is_evaluated());
/// ```
#[derive(Debug, Clone)]
pub struct BrickGaProblem {
    /// Brick types, indexed by type.
    pub catalog: Vec<Brick>,
    /// Residual demand after Phase 1.
    pub demand: DemandMap,
    /// Planner configuration.
    pub config: PlannerConfig,
    /// Phase-1 base that every initial individual copies.
    pub base: Individual,
    /// Crossover and mutation strategy.
    pub operators: GeneticOperators,
}

impl BrickGaProblem {
    /// Creates the problem; operators follow `config.operators`.
    pub fn new(catalog: Vec<Brick>, demand: DemandMap, config: PlannerConfig, base: Individual) -> Self {
        let operators = GeneticOperators::from(&config.operators);
        Self {
            catalog,
            demand,
            config,
            base,
            operators,
        }
    }

    /// Overrides the operator selection.
    pub fn with_operators(mut self, operators: GeneticOperators) -> Self {
        self.operators = operators;
        self
    }

    /// Borrowed view used by the operators.
    pub fn context(&self) -> PlanContext<'_> {
        PlanContext::new(&self.catalog, &self.demand, &self.config)
    }

    /// Per-term fitness of an individual's grid.
    pub fn breakdown(&self, individual: &Individual) -> FitnessBreakdown {
        FitnessEvaluator::new(self.context()).breakdown(&individual.grid)
    }
}

impl GaProblem for BrickGaProblem {
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Individual {
        seed_individual(&self.base, &self.context(), rng)
    }

    fn evaluate(&self, individual: &mut Individual) {
        FitnessEvaluator::new(self.context()).evaluate(individual);
    }

    fn crossover<R: Rng>(&self, p1: &Individual, p2: &Individual, rng: &mut R) -> Result<Individual> {
        self.operators.crossover(p1, p2, &self.context(), rng)
    }

    fn mutate<R: Rng>(&self, individual: &mut Individual, rng: &mut R) {
        self.operators.mutate(individual, &self.context(), rng);
    }
}
