//! Generational GA loop.
//!
//! # Algorithm
//!
//! 1. Build `population_size` individuals with
//!    [`GaProblem::create_individual`].
//! 2. Each generation: evaluate everyone (optionally with rayon), sort
//!    ascending by fitness, record the best, carry the `elitism` best
//!    unchanged, and fill the rest with offspring: two tournament winners,
//!    crossover with `crossover_rate` (else a copy of the first), mutation
//!    with `mutation_rate`.
//! 3. Evaluate the final population and return its best member.
//!
//! All randomness comes from the caller's RNG, drawn in a fixed order, so a
//! seeded run is reproducible. Parallel evaluation draws nothing and does
//! not affect results.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::selection::tournament_selection;
use super::{GaProblem, Individual};
use crate::config::GaSettings;
use crate::error::{PlannerError, Result};

/// Best-of-generation snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// 1-based generation number.
    pub generation: usize,
    /// Lowest fitness in the generation.
    pub best_fitness: f64,
    /// `actual_days` of that individual.
    pub actual_days: usize,
}

/// Outcome of a GA run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaResult {
    /// Best individual of the final population (evaluated).
    pub best: Individual,
    /// Generations executed.
    pub generations: usize,
    /// One record per generation.
    pub history: Vec<GenerationRecord>,
}

impl GaResult {
    #[inline]
    pub fn best_fitness(&self) -> f64 {
        self.best.fitness
    }
}

/// Runs the generational loop over a [`GaProblem`].
pub struct GaRunner;

impl GaRunner {
    /// Runs with an RNG seeded from `settings.seed`, or from entropy when
    /// no seed is set.
    pub fn run<P: GaProblem>(problem: &P, settings: &GaSettings) -> Result<GaResult> {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::run_with_rng(problem, settings, &mut rng)
    }

    /// Runs with a caller-supplied RNG.
    pub fn run_with_rng<P: GaProblem, R: Rng>(
        problem: &P,
        settings: &GaSettings,
        rng: &mut R,
    ) -> Result<GaResult> {
        Self::run_with_observer(problem, settings, rng, |_| {})
    }

    /// Runs with a caller-supplied RNG, reporting every generation.
    ///
    /// # Errors
    ///
    /// `InvalidState` if `population_size` is 0, or if the problem's
    /// crossover rejects its parents.
    pub fn run_with_observer<P, R, F>(
        problem: &P,
        settings: &GaSettings,
        rng: &mut R,
        mut observer: F,
    ) -> Result<GaResult>
    where
        P: GaProblem,
        R: Rng,
        F: FnMut(&GenerationRecord),
    {
        let size = settings.population_size;
        if size == 0 {
            return Err(PlannerError::InvalidState("population_size is 0".into()));
        }
        let elitism = settings.elitism.min(size);

        info!(
            event = "ga_start",
            population = size,
            generations = settings.generations,
            parallel = settings.parallel,
        );

        let mut population: Vec<Individual> =
            (0..size).map(|_| problem.create_individual(rng)).collect();
        let mut history = Vec::with_capacity(settings.generations);

        for generation in 1..=settings.generations {
            evaluate_all(problem, &mut population, settings.parallel);
            population.sort_by(|a, b| a.fitness.total_cmp(&b.fitness));

            let record = GenerationRecord {
                generation,
                best_fitness: population[0].fitness,
                actual_days: population[0].actual_days,
            };
            debug!(
                generation,
                best_fitness = record.best_fitness,
                actual_days = record.actual_days,
            );
            observer(&record);
            history.push(record);

            let mut next = Vec::with_capacity(size);
            next.extend(population.iter().take(elitism).cloned());
            while next.len() < size {
                let p1 = tournament_selection(&population, settings.tournament_size, rng)?;
                let p2 = tournament_selection(&population, settings.tournament_size, rng)?;

                let mut offspring = if rng.random::<f64>() < settings.crossover_rate {
                    problem.crossover(p1, p2, rng)?
                } else {
                    p1.clone()
                };
                if rng.random::<f64>() < settings.mutation_rate {
                    problem.mutate(&mut offspring, rng);
                }
                next.push(offspring);
            }
            population = next;
        }

        evaluate_all(problem, &mut population, settings.parallel);
        let best = population
            .into_iter()
            .min_by(|a, b| a.fitness.total_cmp(&b.fitness))
            .ok_or_else(|| PlannerError::InvalidState("empty final population".into()))?;

        info!(
            event = "ga_end",
            best_fitness = best.fitness,
            actual_days = best.actual_days,
        );

        Ok(GaResult {
            best,
            generations: settings.generations,
            history,
        })
    }
}

fn evaluate_all<P: GaProblem>(problem: &P, population: &mut [Individual], parallel: bool) {
    if parallel {
        population.par_iter_mut().for_each(|ind| problem.evaluate(ind));
    } else {
        population.iter_mut().for_each(|ind| problem.evaluate(ind));
    }
}
