//! Phase-1 preallocation of top-priority bricks.
//!
//! # Algorithm
//!
//! For each day of the Phase-1 window, every top-priority type with
//! remaining demand gets a Bernoulli trial. On success one fixed-size batch
//! goes into the first slot (in slot order) whose weight and unit
//! accumulators still admit it. A batch that fits nowhere is skipped and
//! stays in the residual.
//!
//! Front-loading the top class keeps the priority-ordering penalty cheap to
//! satisfy and leaves the combinatorial remainder to the GA.

use rand::Rng;
use tracing::debug;

use super::Individual;
use crate::config::PlannerConfig;
use crate::models::{Brick, SlotLoad};

/// Fills the Phase-1 window of a fresh individual.
///
/// `residual` holds the remaining demand per type and is decremented for
/// every placed batch. A `production_probability` outside `[0, 1]` is
/// clamped into it; NaN counts as 0.
pub fn preallocate<R: Rng>(
    catalog: &[Brick],
    config: &PlannerConfig,
    residual: &mut [u32],
    rng: &mut R,
) -> Individual {
    let grid_cfg = &config.grid;
    let phase1 = &config.phase1;
    let mut base = Individual::empty(grid_cfg.max_days, grid_cfg.slots_per_day, catalog.len());
    let days = phase1.days.min(grid_cfg.max_days);
    let batch = phase1.batch_size;
    let probability = match phase1.production_probability {
        p if p.is_nan() => 0.0,
        p => p.clamp(0.0, 1.0),
    };
    let mut placed = 0usize;

    for day in 0..days {
        let mut loads = vec![SlotLoad::default(); grid_cfg.slots_per_day];

        for (ty, brick) in catalog.iter().enumerate() {
            if !brick.is_top_priority() || residual[ty] == 0 {
                continue;
            }
            if !rng.random_bool(probability) || residual[ty] < batch {
                continue;
            }

            let slot = loads.iter().position(|load| {
                load.admits(batch, brick.weight, grid_cfg.max_slot_weight, grid_cfg.max_units_per_slot)
            });
            if let Some(slot) = slot {
                base.grid.add(day, slot, ty, batch);
                loads[slot].push(batch, brick.weight);
                residual[ty] -= batch;
                placed += 1;
            }
        }
    }

    debug!(days, batches = placed, "phase 1 preallocation done");
    base
}

/// Initial residual: each type's full demand.
pub fn full_demand(catalog: &[Brick]) -> Vec<u32> {
    catalog.iter().map(|b| b.quantity).collect()
}
