//! Tournament selection.

use rand::Rng;

use super::Individual;
use crate::error::{PlannerError, Result};

/// Samples `size` individuals with replacement and returns the fittest.
///
/// Ties go to the first one drawn. A `size` of 0 is treated as 1. The
/// population must already be evaluated.
///
/// # Errors
///
/// `InvalidState` on an empty population.
pub fn tournament_selection<'a, R: Rng>(
    population: &'a [Individual],
    size: usize,
    rng: &mut R,
) -> Result<&'a Individual> {
    if population.is_empty() {
        return Err(PlannerError::InvalidState(
            "tournament selection on an empty population".into(),
        ));
    }

    let mut best = &population[rng.random_range(0..population.len())];
    for _ in 1..size.max(1) {
        let contender = &population[rng.random_range(0..population.len())];
        if contender.fitness < best.fitness {
            best = contender;
        }
    }
    Ok(best)
}
