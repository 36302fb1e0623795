//! Schedule grid: quantity per (day, slot, type).
//!
//! Stored as one dense buffer indexed by
//! `(day * slots_per_day + slot) * num_types + type`. Cloning copies the
//! whole buffer, so two grids never share cells.
//!
//! With `slots_per_day == 1` the grid is a plain day × type plan.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::Brick;

/// Accumulated weight and unit count of one slot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlotLoad {
    /// Total weight (kg).
    pub weight: f64,
    /// Total units.
    pub units: u32,
}

impl SlotLoad {
    /// Whether `units` more bricks of `unit_weight` fit under both ceilings.
    #[inline]
    pub fn admits(&self, units: u32, unit_weight: f64, max_weight: f64, max_units: u32) -> bool {
        self.weight + units as f64 * unit_weight <= max_weight && self.units + units <= max_units
    }

    /// Adds a batch to the accumulators.
    #[inline]
    pub fn push(&mut self, units: u32, unit_weight: f64) {
        self.weight += units as f64 * unit_weight;
        self.units += units;
    }

    /// Whether the slot holds nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units == 0
    }
}

/// Dense production grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleGrid {
    days: usize,
    slots_per_day: usize,
    num_types: usize,
    cells: Vec<u32>,
}

impl ScheduleGrid {
    /// Creates an all-zero grid.
    pub fn new(days: usize, slots_per_day: usize, num_types: usize) -> Self {
        Self {
            days,
            slots_per_day,
            num_types,
            cells: vec![0; days * slots_per_day * num_types],
        }
    }

    #[inline]
    pub fn days(&self) -> usize {
        self.days
    }

    #[inline]
    pub fn slots_per_day(&self) -> usize {
        self.slots_per_day
    }

    #[inline]
    pub fn num_types(&self) -> usize {
        self.num_types
    }

    /// Whether both grids have identical dimensions.
    pub fn same_shape(&self, other: &ScheduleGrid) -> bool {
        self.days == other.days
            && self.slots_per_day == other.slots_per_day
            && self.num_types == other.num_types
    }

    #[inline]
    fn offset(&self, day: usize, slot: usize, ty: usize) -> usize {
        debug_assert!(day < self.days && slot < self.slots_per_day && ty < self.num_types);
        (day * self.slots_per_day + slot) * self.num_types + ty
    }

    #[inline]
    fn slot_range(&self, day: usize, slot: usize) -> Range<usize> {
        let start = self.offset(day, slot, 0);
        start..start + self.num_types
    }

    /// Quantity of type `ty` in `(day, slot)`.
    #[inline]
    pub fn get(&self, day: usize, slot: usize, ty: usize) -> u32 {
        self.cells[self.offset(day, slot, ty)]
    }

    #[inline]
    pub fn set(&mut self, day: usize, slot: usize, ty: usize, quantity: u32) {
        let idx = self.offset(day, slot, ty);
        self.cells[idx] = quantity;
    }

    #[inline]
    pub fn add(&mut self, day: usize, slot: usize, ty: usize, quantity: u32) {
        let idx = self.offset(day, slot, ty);
        self.cells[idx] += quantity;
    }

    /// Removes up to `quantity` from a cell. Returns the amount removed.
    #[inline]
    pub fn take(&mut self, day: usize, slot: usize, ty: usize, quantity: u32) -> u32 {
        let idx = self.offset(day, slot, ty);
        let removed = self.cells[idx].min(quantity);
        self.cells[idx] -= removed;
        removed
    }

    /// Per-type quantities of one slot.
    pub fn slot(&self, day: usize, slot: usize) -> &[u32] {
        &self.cells[self.slot_range(day, slot)]
    }

    /// Weight and unit count of one slot.
    pub fn slot_load(&self, day: usize, slot: usize, catalog: &[Brick]) -> SlotLoad {
        let mut load = SlotLoad::default();
        for (quantity, brick) in self.slot(day, slot).iter().zip(catalog) {
            if *quantity > 0 {
                load.push(*quantity, brick.weight);
            }
        }
        load
    }

    /// Whether any cell of `day` is non-zero.
    pub fn day_has_production(&self, day: usize) -> bool {
        let start = self.offset(day, 0, 0);
        let len = self.slots_per_day * self.num_types;
        self.cells[start..start + len].iter().any(|&q| q > 0)
    }

    /// Whether type `ty` is produced in any slot of `day`.
    pub fn day_produces_type(&self, day: usize, ty: usize) -> bool {
        (0..self.slots_per_day).any(|slot| self.get(day, slot, ty) > 0)
    }

    /// Units of type `ty` produced on `day` across all slots.
    pub fn day_total_for_type(&self, day: usize, ty: usize) -> u32 {
        (0..self.slots_per_day).map(|slot| self.get(day, slot, ty)).sum()
    }

    /// One past the last day with any production; 0 for an empty grid.
    pub fn actual_days(&self) -> usize {
        (0..self.days)
            .rev()
            .find(|&day| self.day_has_production(day))
            .map_or(0, |day| day + 1)
    }

    /// Units of type `ty` over the whole horizon.
    pub fn total_for_type(&self, ty: usize) -> u32 {
        self.total_for_type_in(0..self.days, ty)
    }

    /// Units of type `ty` over a day range.
    pub fn total_for_type_in(&self, days: Range<usize>, ty: usize) -> u32 {
        days.map(|day| self.day_total_for_type(day, ty)).sum()
    }

    /// Units of every type over a day range.
    pub fn totals_in(&self, days: Range<usize>) -> Vec<u32> {
        let mut totals = vec![0; self.num_types];
        for day in days {
            for slot in 0..self.slots_per_day {
                for (total, q) in totals.iter_mut().zip(self.slot(day, slot)) {
                    *total += q;
                }
            }
        }
        totals
    }

    /// Copies cells of types `types` over `days` from `other`.
    ///
    /// Both grids must have the same shape.
    pub fn copy_type_range_from(&mut self, other: &ScheduleGrid, days: Range<usize>, types: Range<usize>) {
        debug_assert!(self.same_shape(other));
        for day in days {
            for slot in 0..self.slots_per_day {
                let start = self.offset(day, slot, 0);
                let range = start + types.start..start + types.end;
                self.cells[range.clone()].copy_from_slice(&other.cells[range]);
            }
        }
    }

    /// Copies every cell of `days` from `other`.
    ///
    /// Both grids must have the same shape.
    pub fn copy_days_from(&mut self, other: &ScheduleGrid, days: Range<usize>) {
        debug_assert!(self.same_shape(other));
        if days.is_empty() {
            return;
        }
        let day_len = self.slots_per_day * self.num_types;
        let range = days.start * day_len..days.end * day_len;
        self.cells[range.clone()].copy_from_slice(&other.cells[range]);
    }

    /// Whether every cell is zero.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&q| q == 0)
    }
}
