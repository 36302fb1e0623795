//! Plan quality metrics (KPIs).
//!
//! Computes production and slot-rule indicators from a finished grid and
//! the catalog it was planned for.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Actual days | One past the last producing day |
//! | Produced | Units per type over the whole horizon |
//! | Unmet | max(0, quantity - produced) per type |
//! | Excess | max(0, produced - quantity) per type |
//! | Demand met rate | Σ min(produced, quantity) / Σ quantity |
//! | Used slots | Non-empty slots |
//! | Avg slot weight | Mean weight of used slots |
//! | Slot violations | Used slots over the weight ceiling, under the floor, or over the unit limit |

use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::models::{Brick, ScheduleGrid};

/// Plan performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanKpi {
    /// One past the last producing day.
    pub actual_days: usize,
    /// Units produced per type.
    pub produced: Vec<u32>,
    /// Units still missing per type.
    pub unmet: Vec<u32>,
    /// Units produced beyond the order per type.
    pub excess: Vec<u32>,
    /// Fraction of ordered units produced (0.0..1.0).
    pub demand_met_rate: f64,
    /// Non-empty slots across the horizon.
    pub used_slots: usize,
    /// Mean weight of the used slots (kg).
    pub avg_slot_weight: f64,
    /// Used slots above `max_slot_weight`.
    pub overweight_slots: usize,
    /// Used slots below `min_slot_weight`.
    pub underweight_slots: usize,
    /// Used slots above `max_units_per_slot`.
    pub over_count_slots: usize,
}

impl PlanKpi {
    /// Computes KPIs from a grid and its catalog.
    ///
    /// # Arguments
    /// * `grid` - The finished plan.
    /// * `catalog` - Brick types, indexed like the grid's type axis.
    /// * `config` - Slot limits to check against.
    pub fn calculate(grid: &ScheduleGrid, catalog: &[Brick], config: &PlannerConfig) -> Self {
        let limits = &config.grid;

        let produced: Vec<u32> = (0..catalog.len()).map(|ty| grid.total_for_type(ty)).collect();
        let unmet = catalog
            .iter()
            .zip(&produced)
            .map(|(b, &p)| b.quantity.saturating_sub(p))
            .collect();
        let excess = catalog
            .iter()
            .zip(&produced)
            .map(|(b, &p)| p.saturating_sub(b.quantity))
            .collect();

        let ordered: u64 = catalog.iter().map(|b| b.quantity as u64).sum();
        let met: u64 = catalog
            .iter()
            .zip(&produced)
            .map(|(b, &p)| p.min(b.quantity) as u64)
            .sum();
        let demand_met_rate = if ordered == 0 {
            1.0
        } else {
            met as f64 / ordered as f64
        };

        let mut used_slots = 0;
        let mut total_weight = 0.0;
        let mut overweight_slots = 0;
        let mut underweight_slots = 0;
        let mut over_count_slots = 0;
        for day in 0..grid.days() {
            for slot in 0..grid.slots_per_day() {
                let load = grid.slot_load(day, slot, catalog);
                if load.is_empty() {
                    continue;
                }
                used_slots += 1;
                total_weight += load.weight;
                if load.weight > limits.max_slot_weight {
                    overweight_slots += 1;
                }
                if load.weight < limits.min_slot_weight {
                    underweight_slots += 1;
                }
                if load.units > limits.max_units_per_slot {
                    over_count_slots += 1;
                }
            }
        }

        let avg_slot_weight = if used_slots > 0 {
            total_weight / used_slots as f64
        } else {
            0.0
        };

        Self {
            actual_days: grid.actual_days(),
            produced,
            unmet,
            excess,
            demand_met_rate,
            used_slots,
            avg_slot_weight,
            overweight_slots,
            underweight_slots,
            over_count_slots,
        }
    }

    /// Total units still missing.
    pub fn total_unmet(&self) -> u64 {
        self.unmet.iter().map(|&u| u as u64).sum()
    }

    /// All demand met and no slot above its weight or unit ceiling.
    ///
    /// Underweight slots do not count: the floor is a soft target.
    pub fn is_feasible(&self) -> bool {
        self.total_unmet() == 0 && self.overweight_slots == 0 && self.over_count_slots == 0
    }
}
