//! Mutation operators.
//!
//! - [`relocate_mutation`]: moves an even amount of one type from one slot
//!   to another. Capacity-respecting: if the destination cannot take the
//!   amount, nothing changes.
//! - [`rewrite_mutation`]: overwrites one cell with a random quantity
//!   bounded by the type's remaining demand, then runs
//!   [`clamp_to_demand`](super::clamp_to_demand). Used by the coarse
//!   day × type model.
//!
//! Neither operator retries. The returned [`MutationOutcome`] says what
//! happened.

use rand::Rng;

use super::crossover::clamp_to_demand;
use super::population::draw_batch_size;
use super::{Individual, PlanContext};

/// Why a mutation left the individual unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No tracked types, or no Phase-2 window.
    NoDemand,
    /// The drawn source cell was empty.
    EmptySource,
    /// Source and destination are the same slot.
    SameSlot,
    /// The destination slot lacks weight or unit capacity.
    NoCapacity,
}

/// Result of one mutation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// `units` of `ty` moved from `from` to `to` (both `(day, slot)`).
    Relocated {
        ty: usize,
        units: u32,
        from: (usize, usize),
        to: (usize, usize),
    },
    /// Cell `(day, slot, ty)` was set to `quantity` before clamping.
    Rewritten {
        ty: usize,
        day: usize,
        slot: usize,
        quantity: u32,
    },
    /// Nothing changed.
    Skipped(SkipReason),
}

impl MutationOutcome {
    /// Whether the grid was modified.
    #[inline]
    pub fn is_applied(&self) -> bool {
        !matches!(self, MutationOutcome::Skipped(_))
    }
}

/// Moves a batch of a tracked type between two Phase-2 slots.
pub fn relocate_mutation<R: Rng>(
    individual: &mut Individual,
    ctx: &PlanContext<'_>,
    rng: &mut R,
) -> MutationOutcome {
    let tracked = ctx.demand.types();
    let window = ctx.window();
    let slots = ctx.slots_per_day();
    if tracked.is_empty() || window.is_empty() || slots == 0 {
        return MutationOutcome::Skipped(SkipReason::NoDemand);
    }

    let from_day = rng.random_range(window.clone());
    let from_slot = rng.random_range(0..slots);
    let ty = tracked[rng.random_range(0..tracked.len())];

    let available = individual.grid.get(from_day, from_slot, ty);
    if available == 0 {
        return MutationOutcome::Skipped(SkipReason::EmptySource);
    }

    let units = draw_batch_size(&ctx.config.phase2.batch_sizes, available, rng);
    let to_day = rng.random_range(window);
    let to_slot = rng.random_range(0..slots);

    if (from_day, from_slot) == (to_day, to_slot) {
        return MutationOutcome::Skipped(SkipReason::SameSlot);
    }
    if !ctx.slot_admits(&individual.grid, to_day, to_slot, ty, units) {
        return MutationOutcome::Skipped(SkipReason::NoCapacity);
    }

    individual.grid.take(from_day, from_slot, ty, units);
    individual.grid.add(to_day, to_slot, ty, units);
    individual.invalidate();

    MutationOutcome::Relocated {
        ty,
        units,
        from: (from_day, from_slot),
        to: (to_day, to_slot),
    }
}

/// Rewrites one Phase-2 cell of a tracked type, then clamps the window
/// back under demand.
///
/// The new quantity is drawn from `0..=remaining`, where `remaining` is the
/// demand not produced by the type's other window cells. It is rounded
/// down to even while more than one unit remains.
pub fn rewrite_mutation<R: Rng>(
    individual: &mut Individual,
    ctx: &PlanContext<'_>,
    rng: &mut R,
) -> MutationOutcome {
    let tracked = ctx.demand.types();
    let window = ctx.window();
    let slots = ctx.slots_per_day();
    if tracked.is_empty() || window.is_empty() || slots == 0 {
        return MutationOutcome::Skipped(SkipReason::NoDemand);
    }

    let day = rng.random_range(window.clone());
    let slot = rng.random_range(0..slots);
    let ty = tracked[rng.random_range(0..tracked.len())];

    let current = individual.grid.get(day, slot, ty);
    let elsewhere = individual.grid.total_for_type_in(window, ty) - current;
    let remaining = ctx.demand.get(ty).saturating_sub(elsewhere);

    let mut quantity = rng.random_range(0..=remaining);
    if quantity % 2 == 1 && remaining > 1 {
        quantity -= 1;
    }

    individual.grid.set(day, slot, ty, quantity);
    clamp_to_demand(&mut individual.grid, ctx);
    individual.invalidate();

    MutationOutcome::Rewritten {
        ty,
        day,
        slot,
        quantity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::population::seed_individual;
    use crate::ga::testing::{sample_catalog, small_config};
    use crate::models::{Brick, DemandMap, ScheduleGrid};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn slot_loads_ok(grid: &ScheduleGrid, catalog: &[Brick], ctx: &PlanContext<'_>) -> bool {
        let g = &ctx.config.grid;
        (0..grid.days()).all(|day| {
            (0..grid.slots_per_day()).all(|slot| {
                let load = grid.slot_load(day, slot, catalog);
                load.weight <= g.max_slot_weight && load.units <= g.max_units_per_slot
            })
        })
    }

    #[test]
    fn test_relocate_conserves_and_respects_capacity() {
        let catalog = sample_catalog();
        let config = small_config();
        let demand = DemandMap::from_residual(&[10, 6, 4]);
        let ctx = PlanContext::new(&catalog, &demand, &config);
        let mut rng = SmallRng::seed_from_u64(42);
        let base = Individual::new(ctx.empty_grid());
        let mut ind = seed_individual(&base, &ctx, &mut rng);
        assert!(slot_loads_ok(&ind.grid, &catalog, &ctx));

        let mut applied = 0;
        for _ in 0..500 {
            let before = ind.grid.clone();
            let outcome = relocate_mutation(&mut ind, &ctx, &mut rng);
            if outcome.is_applied() {
                applied += 1;
            } else {
                assert_eq!(ind.grid, before);
            }
            assert_eq!(ind.grid.totals_in(ctx.window()), vec![10, 6, 4]);
            assert!(slot_loads_ok(&ind.grid, &catalog, &ctx));
        }
        assert!(applied > 0);
    }

    #[test]
    fn test_relocate_moves_exact_amount() {
        let catalog = sample_catalog();
        let config = small_config();
        let demand = DemandMap::from_residual(&[10, 6, 4]);
        let ctx = PlanContext::new(&catalog, &demand, &config);
        let mut rng = SmallRng::seed_from_u64(3);
        let mut ind = seed_individual(&Individual::new(ctx.empty_grid()), &ctx, &mut rng);

        for _ in 0..200 {
            let before = ind.grid.clone();
            if let MutationOutcome::Relocated { ty, units, from, to } =
                relocate_mutation(&mut ind, &ctx, &mut rng)
            {
                assert!(units > 0 && units <= before.get(from.0, from.1, ty));
                assert_eq!(ind.grid.get(from.0, from.1, ty), before.get(from.0, from.1, ty) - units);
                assert_eq!(ind.grid.get(to.0, to.1, ty), before.get(to.0, to.1, ty) + units);
                assert!(!ind.is_evaluated());
                return;
            }
        }
        panic!("no relocation applied in 200 attempts");
    }

    #[test]
    fn test_relocate_without_demand_is_noop() {
        let catalog = sample_catalog();
        let config = small_config();
        let demand = DemandMap::default();
        let ctx = PlanContext::new(&catalog, &demand, &config);
        let mut ind = Individual::new(ctx.empty_grid());
        let mut rng = SmallRng::seed_from_u64(1);

        assert_eq!(
            relocate_mutation(&mut ind, &ctx, &mut rng),
            MutationOutcome::Skipped(SkipReason::NoDemand)
        );
    }

    #[test]
    fn test_relocate_full_destinations_are_rejected() {
        // Every window slot already holds 4 units: no move can fit.
        let catalog = vec![Brick::new(1, "QX-1", 200, 10.0)];
        let config = small_config();
        let demand = DemandMap::from_residual(&[200]);
        let ctx = PlanContext::new(&catalog, &demand, &config);
        let mut grid = ctx.empty_grid();
        for day in ctx.window() {
            for slot in 0..ctx.slots_per_day() {
                grid.set(day, slot, 0, 4);
            }
        }
        let mut ind = Individual::new(grid.clone());
        let mut rng = SmallRng::seed_from_u64(11);

        for _ in 0..100 {
            let outcome = relocate_mutation(&mut ind, &ctx, &mut rng);
            assert!(matches!(
                outcome,
                MutationOutcome::Skipped(SkipReason::NoCapacity | SkipReason::SameSlot)
            ));
        }
        assert_eq!(ind.grid, grid);
    }

    #[test]
    fn test_rewrite_stays_within_demand() {
        let catalog = sample_catalog();
        let config = small_config().with_horizon(10, 1).with_phase1_days(0);
        let demand = DemandMap::from_residual(&[10, 6, 4]);
        let ctx = PlanContext::new(&catalog, &demand, &config);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ind = Individual::new(ctx.empty_grid());

        let mut applied = 0;
        for _ in 0..300 {
            let outcome = rewrite_mutation(&mut ind, &ctx, &mut rng);
            if outcome.is_applied() {
                applied += 1;
            }
            for (ty, d) in demand.iter() {
                assert!(ind.grid.total_for_type(ty) <= d);
            }
        }
        assert!(applied > 0);
        assert!(!ind.grid.is_empty());
    }

    #[test]
    fn test_rewrite_keeps_even_quantities() {
        let catalog = sample_catalog();
        let config = small_config().with_horizon(6, 1).with_phase1_days(0);
        let demand = DemandMap::from_residual(&[10, 6, 4]);
        let ctx = PlanContext::new(&catalog, &demand, &config);
        let mut rng = SmallRng::seed_from_u64(5);
        let mut ind = Individual::new(ctx.empty_grid());

        for _ in 0..100 {
            if let MutationOutcome::Rewritten { quantity, .. } =
                rewrite_mutation(&mut ind, &ctx, &mut rng)
            {
                assert_eq!(quantity % 2, 0);
            }
        }
    }
}
