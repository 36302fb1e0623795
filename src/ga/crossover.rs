//! Crossover operators and the demand clamp.
//!
//! - [`type_crossover`]: splits on the type axis. The child keeps parent 1
//!   for types below a random index and takes parent 2's Phase-2 cells for
//!   the rest. Per-type totals come whole from one parent, so demand is
//!   conserved without repair.
//! - [`day_crossover`]: splits on the day axis, then clamps. Splicing days
//!   can double-count a type, so [`clamp_to_demand`] always follows.

use rand::Rng;

use super::{Individual, PlanContext};
use crate::error::{PlannerError, Result};
use crate::models::ScheduleGrid;

fn ensure_same_shape(p1: &Individual, p2: &Individual) -> Result<()> {
    if p1.grid.same_shape(&p2.grid) {
        Ok(())
    } else {
        Err(PlannerError::InvalidState(format!(
            "crossover parents differ in shape: {}x{}x{} vs {}x{}x{}",
            p1.grid.days(),
            p1.grid.slots_per_day(),
            p1.grid.num_types(),
            p2.grid.days(),
            p2.grid.slots_per_day(),
            p2.grid.num_types(),
        )))
    }
}

/// Type-axis crossover over the Phase-2 window.
///
/// # Errors
///
/// `InvalidState` if the parents' grids differ in shape.
pub fn type_crossover<R: Rng>(
    p1: &Individual,
    p2: &Individual,
    ctx: &PlanContext<'_>,
    rng: &mut R,
) -> Result<Individual> {
    ensure_same_shape(p1, p2)?;
    let num_types = p1.grid.num_types();
    let mut child = Individual::new(p1.grid.clone());
    if num_types == 0 {
        return Ok(child);
    }

    let point = rng.random_range(0..num_types);
    let window = ctx.window().start..p1.grid.days();
    child.grid.copy_type_range_from(&p2.grid, window, point..num_types);
    Ok(child)
}

/// Day-axis crossover followed by [`clamp_to_demand`].
///
/// The split point falls inside the Phase-2 window, no later than the
/// shorter parent's last producing day.
///
/// # Errors
///
/// `InvalidState` if the parents' grids differ in shape.
pub fn day_crossover<R: Rng>(
    p1: &Individual,
    p2: &Individual,
    ctx: &PlanContext<'_>,
    rng: &mut R,
) -> Result<Individual> {
    ensure_same_shape(p1, p2)?;
    let days = p1.grid.days();
    let start = ctx.window().start.min(days);
    let shorter = p1.grid.actual_days().min(p2.grid.actual_days());
    let end = shorter.clamp(start, days);

    let point = rng.random_range(start..=end);
    let mut child = Individual::new(p1.grid.clone());
    child.grid.copy_days_from(&p2.grid, point..days);
    clamp_to_demand(&mut child.grid, ctx);
    Ok(child)
}

/// Trims Phase-2 cells so no type's cumulative window production exceeds
/// its residual demand (0 for untracked types).
///
/// Walks days and slots forward; later cells are cut first. Idempotent.
/// Returns the number of units removed.
pub fn clamp_to_demand(grid: &mut ScheduleGrid, ctx: &PlanContext<'_>) -> u32 {
    let window = ctx.window().start.min(grid.days())..grid.days();
    let mut removed = 0;

    for ty in 0..grid.num_types() {
        let mut left = ctx.demand.get(ty);
        for day in window.clone() {
            for slot in 0..grid.slots_per_day() {
                let quantity = grid.get(day, slot, ty);
                if quantity > left {
                    grid.set(day, slot, ty, left);
                    removed += quantity - left;
                }
                left -= quantity.min(left);
            }
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::population::seed_individual;
    use crate::ga::testing::{sample_catalog, small_config};
    use crate::models::DemandMap;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_type_crossover_identical_parents() {
        let catalog = sample_catalog();
        let config = small_config();
        let demand = DemandMap::from_residual(&[10, 6, 4]);
        let ctx = PlanContext::new(&catalog, &demand, &config);
        let mut rng = SmallRng::seed_from_u64(42);
        let parent = seed_individual(&Individual::new(ctx.empty_grid()), &ctx, &mut rng);

        for _ in 0..10 {
            let child = type_crossover(&parent, &parent, &ctx, &mut rng).unwrap();
            assert_eq!(child.grid, parent.grid);
        }
    }

    #[test]
    fn test_type_crossover_conserves_demand() {
        let catalog = sample_catalog();
        let config = small_config();
        let demand = DemandMap::from_residual(&[10, 6, 4]);
        let ctx = PlanContext::new(&catalog, &demand, &config);
        let mut rng = SmallRng::seed_from_u64(42);
        let base = Individual::new(ctx.empty_grid());
        let p1 = seed_individual(&base, &ctx, &mut rng);
        let p2 = seed_individual(&base, &ctx, &mut rng);

        for _ in 0..20 {
            let child = type_crossover(&p1, &p2, &ctx, &mut rng).unwrap();
            assert!(!child.is_evaluated());
            for ty in 0..catalog.len() {
                let total = child.grid.total_for_type(ty);
                assert!(total == p1.grid.total_for_type(ty) || total == p2.grid.total_for_type(ty));
                assert!(total <= catalog[ty].quantity);
            }
        }
    }

    #[test]
    fn test_type_crossover_keeps_parent1_prefix() {
        let catalog = sample_catalog();
        let config = small_config();
        let demand = DemandMap::from_residual(&[10, 6, 4]);
        let ctx = PlanContext::new(&catalog, &demand, &config);
        let mut p1 = Individual::new(ctx.empty_grid());
        let mut p2 = Individual::new(ctx.empty_grid());
        p1.grid.set(0, 0, 2, 2);
        p2.grid.set(0, 1, 2, 2);
        p2.grid.set(7, 0, 2, 4);
        let mut rng = SmallRng::seed_from_u64(9);

        let child = type_crossover(&p1, &p2, &ctx, &mut rng).unwrap();
        // Phase-1 days always come from parent 1.
        assert_eq!(child.grid.get(0, 0, 2), 2);
        assert_eq!(child.grid.get(0, 1, 2), 0);
        // The last type is always at or after the split point.
        assert_eq!(child.grid.get(7, 0, 2), 4);
    }

    #[test]
    fn test_crossover_shape_mismatch() {
        let catalog = sample_catalog();
        let config = small_config();
        let demand = DemandMap::from_residual(&[10, 6, 4]);
        let ctx = PlanContext::new(&catalog, &demand, &config);
        let p1 = Individual::empty(12, 3, 3);
        let p2 = Individual::empty(12, 2, 3);
        let mut rng = SmallRng::seed_from_u64(1);

        assert!(matches!(
            type_crossover(&p1, &p2, &ctx, &mut rng),
            Err(PlannerError::InvalidState(_))
        ));
        assert!(matches!(
            day_crossover(&p1, &p2, &ctx, &mut rng),
            Err(PlannerError::InvalidState(_))
        ));
    }

    #[test]
    fn test_day_crossover_conserves_demand() {
        let catalog = sample_catalog();
        let config = small_config().with_horizon(10, 1).with_phase1_days(0);
        let demand = DemandMap::from_residual(&[10, 6, 4]);
        let ctx = PlanContext::new(&catalog, &demand, &config);
        let mut p1 = Individual::new(ctx.empty_grid());
        let mut p2 = Individual::new(ctx.empty_grid());
        // p1 front-loads, p2 back-loads: a naive splice would double-count.
        p1.grid.set(0, 0, 0, 10);
        p1.grid.set(1, 0, 1, 6);
        p1.grid.set(2, 0, 2, 4);
        p2.grid.set(7, 0, 0, 10);
        p2.grid.set(8, 0, 1, 6);
        p2.grid.set(9, 0, 2, 4);
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..20 {
            let child = day_crossover(&p1, &p2, &ctx, &mut rng).unwrap();
            for (ty, d) in demand.iter() {
                assert!(child.grid.total_for_type(ty) <= d);
            }
        }
    }

    #[test]
    fn test_day_crossover_identical_parents() {
        let catalog = sample_catalog();
        let config = small_config();
        let demand = DemandMap::from_residual(&[10, 6, 4]);
        let ctx = PlanContext::new(&catalog, &demand, &config);
        let mut rng = SmallRng::seed_from_u64(8);
        let parent = seed_individual(&Individual::new(ctx.empty_grid()), &ctx, &mut rng);

        let child = day_crossover(&parent, &parent, &ctx, &mut rng).unwrap();
        assert_eq!(child.grid, parent.grid);
    }

    #[test]
    fn test_clamp_trims_later_cells() {
        let catalog = sample_catalog();
        let config = small_config().with_horizon(6, 1).with_phase1_days(1);
        let demand = DemandMap::from_residual(&[4, 0, 0]);
        let ctx = PlanContext::new(&catalog, &demand, &config);
        let mut grid = ctx.empty_grid();
        grid.set(0, 0, 0, 8); // Phase 1: untouched
        grid.set(1, 0, 0, 2);
        grid.set(3, 0, 0, 4);
        grid.set(4, 0, 1, 2); // untracked type

        let removed = clamp_to_demand(&mut grid, &ctx);
        assert_eq!(removed, 4);
        assert_eq!(grid.get(0, 0, 0), 8);
        assert_eq!(grid.get(1, 0, 0), 2);
        assert_eq!(grid.get(3, 0, 0), 2);
        assert_eq!(grid.get(4, 0, 1), 0);

        let snapshot = grid.clone();
        assert_eq!(clamp_to_demand(&mut grid, &ctx), 0);
        assert_eq!(grid, snapshot);
    }
}
