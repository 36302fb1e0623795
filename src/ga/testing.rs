//! Shared fixtures for operator tests.

use crate::config::PlannerConfig;
use crate::models::Brick;

/// Three brick types: two top-priority, one third-class.
pub(crate) fn sample_catalog() -> Vec<Brick> {
    vec![
        Brick::new(1, "ZD-230", 10, 50.0),
        Brick::new(2, "ZD-114", 6, 80.0),
        Brick::new(3, "QX-65", 4, 120.0),
    ]
}

/// A short horizon: 12 days × 3 slots, 3-day Phase-1 window.
pub(crate) fn small_config() -> PlannerConfig {
    PlannerConfig::default()
        .with_horizon(12, 3)
        .with_phase1_days(3)
        .with_population(20, 30)
        .with_seed(42)
}
