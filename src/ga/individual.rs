//! A candidate production plan.

use serde::{Deserialize, Serialize};

use crate::models::ScheduleGrid;

/// One candidate schedule and its score.
///
/// Lower fitness = better plan (minimization convention). `fitness` is
/// `f64::INFINITY` and `actual_days` is stale until the evaluator runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// Quantity per (day, slot, type).
    pub grid: ScheduleGrid,
    /// Fitness value (lower = better).
    pub fitness: f64,
    /// One past the last producing day, as of the last evaluation.
    pub actual_days: usize,
}

impl Individual {
    /// Wraps a grid as an unevaluated individual.
    pub fn new(grid: ScheduleGrid) -> Self {
        Self {
            grid,
            fitness: f64::INFINITY,
            actual_days: 0,
        }
    }

    /// An unevaluated individual with an all-zero grid.
    pub fn empty(days: usize, slots_per_day: usize, num_types: usize) -> Self {
        Self::new(ScheduleGrid::new(days, slots_per_day, num_types))
    }

    /// Whether the fitness reflects the current grid.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_finite()
    }

    /// Marks the fitness as stale after the grid changed.
    #[inline]
    pub fn invalidate(&mut self) {
        self.fitness = f64::INFINITY;
    }
}
