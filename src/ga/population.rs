//! Phase-2 population initialization.
//!
//! # Algorithm
//!
//! 1. Copy the Phase-1 base individual.
//! 2. Split every residual demand into even batches (size drawn from the
//!    configured set, capped by what is left).
//! 3. Shuffle all batches across types.
//! 4. For each batch, try random (day, slot) cells in the Phase-2 window
//!    and take the first one with spare weight and unit capacity.
//!
//! A batch that finds no cell within the attempt budget is dropped. The
//! resulting shortfall is left to the unmet-demand penalty.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use super::{Individual, PlanContext};
use crate::models::ScheduleGrid;

/// Outcome of a single batch placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The batch went into `(day, slot)`.
    Placed { day: usize, slot: usize },
    /// No admitting cell was found.
    Dropped,
}

impl Placement {
    #[inline]
    pub fn is_placed(&self) -> bool {
        matches!(self, Placement::Placed { .. })
    }
}

/// Draws a batch size from `sizes`, capped at `cap`.
///
/// Falls back to `cap` when `sizes` is empty.
pub fn draw_batch_size<R: Rng>(sizes: &[u32], cap: u32, rng: &mut R) -> u32 {
    if sizes.is_empty() {
        return cap;
    }
    sizes[rng.random_range(0..sizes.len())].min(cap)
}

/// Splits the residual demand into shuffled `(type, units)` batches.
pub fn decompose_batches<R: Rng>(ctx: &PlanContext<'_>, rng: &mut R) -> Vec<(usize, u32)> {
    let sizes = &ctx.config.phase2.batch_sizes;
    let mut batches = Vec::new();
    for (ty, demand) in ctx.demand.iter() {
        let mut remaining = demand;
        while remaining > 0 {
            let size = draw_batch_size(sizes, remaining, rng).max(1);
            batches.push((ty, size));
            remaining -= size;
        }
    }
    batches.shuffle(rng);
    batches
}

/// Tries to place one batch at random Phase-2 cells.
pub fn place_batch<R: Rng>(
    grid: &mut ScheduleGrid,
    ctx: &PlanContext<'_>,
    ty: usize,
    units: u32,
    rng: &mut R,
) -> Placement {
    let window = ctx.window();
    let slots = ctx.slots_per_day();
    if window.is_empty() || slots == 0 {
        return Placement::Dropped;
    }

    for _ in 0..ctx.config.phase2.placement_attempts {
        let day = rng.random_range(window.clone());
        let slot = rng.random_range(0..slots);
        if ctx.slot_admits(grid, day, slot, ty, units) {
            grid.add(day, slot, ty, units);
            return Placement::Placed { day, slot };
        }
    }
    Placement::Dropped
}

/// Builds one initial individual from the Phase-1 base.
pub fn seed_individual<R: Rng>(base: &Individual, ctx: &PlanContext<'_>, rng: &mut R) -> Individual {
    let mut individual = Individual::new(base.grid.clone());
    let batches = decompose_batches(ctx, rng);
    let mut dropped = 0usize;

    for (ty, units) in batches {
        if !place_batch(&mut individual.grid, ctx, ty, units, rng).is_placed() {
            dropped += 1;
        }
    }

    if dropped > 0 {
        debug!(dropped, "batches left unplaced in initial individual");
    }
    individual
}

/// Builds `population_size` initial individuals.
pub fn initialize_population<R: Rng>(
    base: &Individual,
    ctx: &PlanContext<'_>,
    rng: &mut R,
) -> Vec<Individual> {
    (0..ctx.config.ga.population_size)
        .map(|_| seed_individual(base, ctx, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::phase1::{full_demand, preallocate};
    use crate::ga::testing::{sample_catalog, small_config};
    use crate::models::{Brick, DemandMap};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_draw_batch_size() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let size = draw_batch_size(&[2, 4], 10, &mut rng);
            assert!(size == 2 || size == 4);
        }
        assert_eq!(draw_batch_size(&[2, 4], 1, &mut rng), 1);
        assert_eq!(draw_batch_size(&[], 6, &mut rng), 6);
    }

    #[test]
    fn test_decompose_conserves_demand() {
        let catalog = sample_catalog();
        let config = small_config();
        let demand = DemandMap::from_residual(&[10, 0, 5]);
        let ctx = PlanContext::new(&catalog, &demand, &config);
        let mut rng = SmallRng::seed_from_u64(42);

        let batches = decompose_batches(&ctx, &mut rng);
        let sum = |ty: usize| -> u32 { batches.iter().filter(|b| b.0 == ty).map(|b| b.1).sum() };
        assert_eq!(sum(0), 10);
        assert_eq!(sum(1), 0);
        assert_eq!(sum(2), 5);
        assert!(batches.iter().all(|&(_, units)| units <= 4));
    }

    #[test]
    fn test_place_batch_respects_capacity() {
        let catalog = vec![Brick::new(1, "QX-1", 100, 600.0)];
        let config = small_config();
        let demand = DemandMap::from_residual(&[100]);
        let ctx = PlanContext::new(&catalog, &demand, &config);
        let mut grid = ctx.empty_grid();
        let mut rng = SmallRng::seed_from_u64(7);

        // 2 × 600 = 1200 kg: one batch per slot.
        for _ in 0..60 {
            place_batch(&mut grid, &ctx, 0, 2, &mut rng);
        }
        for day in ctx.window() {
            for slot in 0..ctx.slots_per_day() {
                let load = grid.slot_load(day, slot, &catalog);
                assert!(load.weight <= config.grid.max_slot_weight);
                assert!(load.units <= config.grid.max_units_per_slot);
            }
        }
        assert_eq!(grid.total_for_type_in(0..config.phase1.days, 0), 0);
    }

    #[test]
    fn test_place_batch_drops_oversized() {
        let catalog = vec![Brick::new(1, "QX-1", 2, 5000.0)];
        let config = small_config();
        let demand = DemandMap::from_residual(&[2]);
        let ctx = PlanContext::new(&catalog, &demand, &config);
        let mut grid = ctx.empty_grid();
        let mut rng = SmallRng::seed_from_u64(7);

        assert_eq!(place_batch(&mut grid, &ctx, 0, 2, &mut rng), Placement::Dropped);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_initialize_population_conserves_demand() {
        let catalog = sample_catalog();
        let config = small_config();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut residual = full_demand(&catalog);
        let base = preallocate(&catalog, &config, &mut residual, &mut rng);
        let demand = DemandMap::from_residual(&residual);
        let ctx = PlanContext::new(&catalog, &demand, &config);

        let population = initialize_population(&base, &ctx, &mut rng);
        assert_eq!(population.len(), config.ga.population_size);

        for ind in &population {
            assert!(ind.grid.same_shape(&base.grid));
            assert!(!ind.is_evaluated());
            for (ty, brick) in catalog.iter().enumerate() {
                assert!(ind.grid.total_for_type(ty) <= brick.quantity);
            }
            // Phase-1 prefix is kept verbatim.
            for day in 0..config.phase1.days {
                for slot in 0..config.grid.slots_per_day {
                    assert_eq!(ind.grid.slot(day, slot), base.grid.slot(day, slot));
                }
            }
        }
    }

    #[test]
    fn test_initial_individuals_meet_demand_with_room() {
        let catalog = sample_catalog();
        let config = small_config();
        let demand = DemandMap::from_residual(&[10, 6, 4]);
        let ctx = PlanContext::new(&catalog, &demand, &config);
        let base = Individual::new(ctx.empty_grid());
        let mut rng = SmallRng::seed_from_u64(42);

        let ind = seed_individual(&base, &ctx, &mut rng);
        assert_eq!(ind.grid.totals_in(ctx.window()), vec![10, 6, 4]);
    }
}
