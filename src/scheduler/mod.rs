//! Planner facade and plan KPIs.
//!
//! # Algorithm
//!
//! `BrickPlanner` runs the two planning phases end to end: a randomized
//! front-loading of top-priority types, then a genetic algorithm over the
//! remaining horizon.
//!
//! # KPI
//!
//! `PlanKpi` computes production and slot-rule metrics: actual days,
//! produced and unmet units, demand met rate, slot usage and violations.

mod kpi;
mod planner;

pub use kpi::PlanKpi;
pub use planner::{BrickPlanner, PlanResult};
