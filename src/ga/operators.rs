//! Configurable genetic operators for production plans.
//!
//! Provides runtime-selectable crossover and mutation strategies
//! via [`GeneticOperators`]. The defaults work on the slot-level grid;
//! the alternatives model the coarse day × type plan and repair their
//! offspring with the demand clamp.
//!
//! # Usage
//!
//! ```
//! use brick_schedule::ga::operators::{GeneticOperators, CrossoverType, MutationType};
//!
//! let ops = GeneticOperators::default();
//! assert_eq!(ops.crossover_type, CrossoverType::TypeSplit);
//! assert_eq!(ops.mutation_type, MutationType::Relocate);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::crossover::{day_crossover, type_crossover};
use super::mutation::{MutationOutcome, relocate_mutation, rewrite_mutation};
use super::{Individual, PlanContext};
use crate::config::OperatorSettings;
use crate::error::Result;

/// Crossover strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverType {
    /// Split on the type axis; no repair needed.
    TypeSplit,
    /// Split on the day axis, then clamp to demand.
    DaySplice,
}

/// Mutation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationType {
    /// Move a batch between slots if the destination has room.
    Relocate,
    /// Rewrite one cell, then clamp to demand.
    Rewrite,
}

/// Runtime-selectable genetic operators.
///
/// # Example
///
/// ```
/// use brick_schedule::ga::operators::{GeneticOperators, CrossoverType, MutationType};
///
/// let ops = GeneticOperators {
///     crossover_type: CrossoverType::DaySplice,
///     mutation_type: MutationType::Rewrite,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneticOperators {
    /// Crossover strategy.
    pub crossover_type: CrossoverType,
    /// Mutation strategy.
    pub mutation_type: MutationType,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self {
            crossover_type: CrossoverType::TypeSplit,
            mutation_type: MutationType::Relocate,
        }
    }
}

impl From<&OperatorSettings> for GeneticOperators {
    fn from(settings: &OperatorSettings) -> Self {
        Self {
            crossover_type: settings.crossover,
            mutation_type: settings.mutation,
        }
    }
}

impl GeneticOperators {
    /// Performs crossover using the configured strategy.
    pub fn crossover<R: Rng>(
        &self,
        p1: &Individual,
        p2: &Individual,
        ctx: &PlanContext<'_>,
        rng: &mut R,
    ) -> Result<Individual> {
        match self.crossover_type {
            CrossoverType::TypeSplit => type_crossover(p1, p2, ctx, rng),
            CrossoverType::DaySplice => day_crossover(p1, p2, ctx, rng),
        }
    }

    /// Performs mutation using the configured strategy.
    pub fn mutate<R: Rng>(
        &self,
        individual: &mut Individual,
        ctx: &PlanContext<'_>,
        rng: &mut R,
    ) -> MutationOutcome {
        match self.mutation_type {
            MutationType::Relocate => relocate_mutation(individual, ctx, rng),
            MutationType::Rewrite => rewrite_mutation(individual, ctx, rng),
        }
    }
}
