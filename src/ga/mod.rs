//! Phase-2 genetic algorithm over the slot grid.
//!
//! A chromosome is a whole [`ScheduleGrid`](crate::models::ScheduleGrid):
//! `days × slots_per_day × num_types` unit counts. Phase 1 fills the first
//! days; the GA only ever touches the window after them.
//!
//! # Pipeline
//!
//! 1. [`preallocate`]: Phase-1 production of top-priority types, consuming
//!    demand and producing the shared base grid.
//! 2. [`seed_individual`]: split the residual demand into batches and place
//!    them at random feasible slots of the window.
//! 3. [`GaRunner`]: tournament selection, crossover, mutation and elitism
//!    scored by [`FitnessEvaluator`].
//!
//! # Submodules
//!
//! - [`operators`]: Runtime-selectable crossover and mutation strategies
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//!   Machine Learning"

mod context;
mod crossover;
mod fitness;
mod individual;
mod mutation;
pub mod operators;
mod phase1;
mod population;
mod problem;
mod runner;
mod selection;

#[cfg(test)]
pub(crate) mod testing;

pub use context::PlanContext;
pub use crossover::{clamp_to_demand, day_crossover, type_crossover};
pub use fitness::{FitnessBreakdown, FitnessEvaluator};
pub use individual::Individual;
pub use mutation::{MutationOutcome, SkipReason, relocate_mutation, rewrite_mutation};
pub use phase1::{full_demand, preallocate};
pub use population::{
    Placement, decompose_batches, draw_batch_size, initialize_population, place_batch,
    seed_individual,
};
pub use problem::{BrickGaProblem, GaProblem};
pub use runner::{GaResult, GaRunner, GenerationRecord};
pub use selection::tournament_selection;
