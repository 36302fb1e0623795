//! Two-phase production planning for refractory bricks.
//!
//! Assigns ordered brick quantities to days and kiln passes (slots) so that
//! every order is met in as few working days as possible while each slot
//! stays inside its weight band and unit limit.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Brick`, `PriorityRules`, `ScheduleGrid`,
//!   `SlotLoad`, `DemandMap`
//! - **`ga`**: Phase-1 preallocation and the Phase-2 genetic algorithm
//! - **`scheduler`**: `BrickPlanner` facade and `PlanKpi`
//! - **`config`**: TOML-loadable planner parameters
//! - **`io`**: Catalog reader, plan table and progress log writers
//! - **`validation`**: Catalog integrity checks (empty, duplicate IDs, weights)
//!
//! # Example
//!
//! ```
//! use brick_schedule::{BrickPlanner, PlannerConfig};
//! use brick_schedule::io::parse_catalog;
//! use brick_schedule::models::PriorityRules;
//!
//! let text = "id,category,quantity,weight\n1,ZD-230,8,60\n2,QX-65,4,110\n";
//! let catalog = parse_catalog(text, ',', &PriorityRules::default());
//!
//! let config = PlannerConfig::default()
//!     .with_horizon(10, 3)
//!     .with_phase1_days(2)
//!     .with_population(10, 10)
//!     .with_seed(1);
//! let plan = BrickPlanner::new(config).plan(&catalog).unwrap();
//! assert_eq!(plan.kpi.produced, vec![8, 4]);
//! ```
//!
//! # References
//!
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//!   Machine Learning"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod error;
pub mod ga;
pub mod io;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::PlannerConfig;
pub use error::{PlannerError, Result};
pub use scheduler::{BrickPlanner, PlanKpi, PlanResult};
