//! Fitness evaluation: elapsed days plus weighted penalties.
//!
//! # Terms
//!
//! | Term | Trigger |
//! |------|---------|
//! | duration | `actual_days - phase1_days` |
//! | overweight | slot weight above the ceiling |
//! | underweight | non-empty slot below the floor |
//! | over-count | slot units above the limit |
//! | diversity | producing day with fewer distinct types than the target |
//! | priority | lower class produced before the last tracked top-class day |
//! | unmet demand | `|produced - demand|` per tracked type |
//!
//! Four extra terms (estimated batch count, early top-priority cap, parity,
//! cumulative shortfall) model the coarse day × type plan and stay at zero
//! unless their coefficients are set.
//!
//! Slot, diversity, priority and demand terms only look at the Phase-2
//! window; `actual_days` is taken over the whole horizon.

use serde::{Deserialize, Serialize};

use super::{Individual, PlanContext};
use crate::models::{ScheduleGrid, SlotLoad, TOP_PRIORITY};

/// Per-term contribution to a fitness value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FitnessBreakdown {
    /// One past the last producing day.
    pub actual_days: usize,
    /// Objective term: days beyond the Phase-1 window.
    pub duration: f64,
    pub overweight: f64,
    pub underweight: f64,
    pub over_count: f64,
    pub diversity: f64,
    pub priority: f64,
    pub unmet_demand: f64,
    pub batch_count: f64,
    pub early_cap: f64,
    pub parity: f64,
    pub shortfall: f64,
}

impl FitnessBreakdown {
    /// Sum of all penalty terms.
    pub fn penalty(&self) -> f64 {
        self.overweight
            + self.underweight
            + self.over_count
            + self.diversity
            + self.priority
            + self.unmet_demand
            + self.batch_count
            + self.early_cap
            + self.parity
            + self.shortfall
    }

    /// Fitness: duration plus penalties.
    pub fn total(&self) -> f64 {
        self.duration + self.penalty()
    }
}

/// Scores individuals against one planning context.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    ctx: PlanContext<'a>,
}

impl<'a> FitnessEvaluator<'a> {
    pub fn new(ctx: PlanContext<'a>) -> Self {
        Self { ctx }
    }

    /// Scores `individual` and stores `fitness` and `actual_days` on it.
    pub fn evaluate(&self, individual: &mut Individual) -> FitnessBreakdown {
        let breakdown = self.breakdown(&individual.grid);
        individual.fitness = breakdown.total();
        individual.actual_days = breakdown.actual_days;
        breakdown
    }

    /// Computes every term for a grid without touching any individual.
    pub fn breakdown(&self, grid: &ScheduleGrid) -> FitnessBreakdown {
        let ctx = &self.ctx;
        let grid_cfg = &ctx.config.grid;
        let weights = &ctx.config.penalties;
        let catalog = ctx.catalog;
        let num_types = grid.num_types();
        let window = ctx.window();

        let mut b = FitnessBreakdown {
            actual_days: grid.actual_days(),
            ..FitnessBreakdown::default()
        };
        b.duration = b.actual_days.saturating_sub(ctx.config.phase1.days) as f64;

        let diversity_target = ctx.config.phase2.min_diversity.min(ctx.demand.len());
        let mut produced = vec![0u32; num_types];
        let mut produced_today = vec![false; num_types];
        let mut last_top_day: Option<usize> = None;
        let mut first_lower_day: Option<usize> = None;

        for day in window.clone() {
            produced_today.fill(false);
            let mut day_weight = 0.0;

            for slot in 0..grid.slots_per_day() {
                let mut load = SlotLoad::default();
                for (ty, &quantity) in grid.slot(day, slot).iter().enumerate() {
                    if quantity > 0 {
                        load.push(quantity, catalog[ty].weight);
                        produced_today[ty] = true;
                        produced[ty] += quantity;
                    }
                }

                if load.weight > 0.0 {
                    if load.weight > grid_cfg.max_slot_weight {
                        b.overweight += (load.weight - grid_cfg.max_slot_weight) * weights.overweight;
                    } else if load.weight < grid_cfg.min_slot_weight {
                        b.underweight += (grid_cfg.min_slot_weight - load.weight) * weights.underweight;
                    }
                }
                if load.units > grid_cfg.max_units_per_slot {
                    b.over_count +=
                        (load.units - grid_cfg.max_units_per_slot) as f64 * weights.over_count;
                }
                day_weight += load.weight;
            }

            if day_weight <= 0.0 {
                continue;
            }

            let distinct = produced_today.iter().filter(|&&p| p).count();
            if distinct < diversity_target {
                b.diversity += (diversity_target - distinct) as f64 * weights.diversity;
            }

            if weights.batch_count > 0.0 && weights.expected_batch_weight > 0.0 {
                let estimated = (day_weight / weights.expected_batch_weight).ceil() as usize;
                if estimated > grid.slots_per_day() {
                    b.batch_count += (estimated - grid.slots_per_day()) as f64 * weights.batch_count;
                }
            }

            for ty in (0..num_types).filter(|&ty| produced_today[ty]) {
                let priority = catalog[ty].priority;
                if priority == TOP_PRIORITY {
                    if ctx.demand.contains(ty) {
                        last_top_day = Some(day);
                    }
                } else if first_lower_day.is_none() {
                    first_lower_day = Some(day);
                }
            }
        }

        if let (Some(first_lower), Some(last_top)) = (first_lower_day, last_top_day) {
            if first_lower < last_top {
                b.priority = (last_top - first_lower) as f64 * weights.priority;
            }
        }

        for (ty, demand) in ctx.demand.iter() {
            b.unmet_demand += produced[ty].abs_diff(demand) as f64 * weights.unmet_demand;
        }

        if weights.early_cap > 0.0 && weights.early_window_days > 0 {
            let early_days = weights.early_window_days.min(grid.days());
            let early_top: u32 = catalog
                .iter()
                .enumerate()
                .filter(|(_, brick)| brick.is_top_priority())
                .map(|(ty, _)| grid.total_for_type_in(0..early_days, ty))
                .sum();
            if early_top > weights.early_top_priority_cap {
                b.early_cap = (early_top - weights.early_top_priority_cap) as f64 * weights.early_cap;
            }
        }

        if weights.parity > 0.0 {
            for (ty, demand) in ctx.demand.iter() {
                let mut cumulative = 0u32;
                for day in window.clone() {
                    for slot in 0..grid.slots_per_day() {
                        let quantity = grid.get(day, slot, ty);
                        if quantity == 0 {
                            continue;
                        }
                        let remaining = demand.saturating_sub(cumulative);
                        if quantity % 2 == 1 && remaining > 1 {
                            b.parity += weights.parity;
                        }
                        cumulative += quantity;
                    }
                }
            }
        }

        if weights.shortfall > 0.0 {
            for (ty, brick) in catalog.iter().enumerate() {
                let total = grid.total_for_type(ty);
                if total < brick.quantity {
                    b.shortfall += (brick.quantity - total) as f64 * weights.shortfall;
                }
            }
        }

        b
    }
}
