//! Read-only inputs shared by every Phase-2 operator.

use std::ops::Range;

use crate::config::PlannerConfig;
use crate::models::{Brick, DemandMap, ScheduleGrid};

/// Catalog, residual demand and configuration, borrowed for the duration
/// of a run.
#[derive(Debug, Clone, Copy)]
pub struct PlanContext<'a> {
    /// Brick types, indexed by type.
    pub catalog: &'a [Brick],
    /// Residual demand after Phase 1.
    pub demand: &'a DemandMap,
    /// Planner configuration.
    pub config: &'a PlannerConfig,
}

impl<'a> PlanContext<'a> {
    pub fn new(catalog: &'a [Brick], demand: &'a DemandMap, config: &'a PlannerConfig) -> Self {
        Self {
            catalog,
            demand,
            config,
        }
    }

    /// Phase-2 day range.
    #[inline]
    pub fn window(&self) -> Range<usize> {
        self.config.window()
    }

    #[inline]
    pub fn slots_per_day(&self) -> usize {
        self.config.grid.slots_per_day
    }

    /// Number of brick types.
    #[inline]
    pub fn num_types(&self) -> usize {
        self.catalog.len()
    }

    /// Whether `units` of type `ty` fit into `(day, slot)` under both
    /// slot ceilings.
    pub fn slot_admits(&self, grid: &ScheduleGrid, day: usize, slot: usize, ty: usize, units: u32) -> bool {
        let grid_cfg = &self.config.grid;
        grid.slot_load(day, slot, self.catalog).admits(
            units,
            self.catalog[ty].weight,
            grid_cfg.max_slot_weight,
            grid_cfg.max_units_per_slot,
        )
    }

    /// An empty grid with the configured dimensions.
    pub fn empty_grid(&self) -> ScheduleGrid {
        ScheduleGrid::new(self.config.grid.max_days, self.slots_per_day(), self.num_types())
    }
}
