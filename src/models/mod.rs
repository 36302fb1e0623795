//! Production planning domain models.
//!
//! Provides the catalog entry type, the dense production grid, and the
//! residual demand map shared by the preallocator and the GA.
//!
//! # Domain Mappings
//!
//! | brick-schedule | Shop floor |
//! |----------------|------------|
//! | Brick | Refractory brick type / SKU |
//! | Slot | Kiln pass (one firing run) |
//! | ScheduleGrid | Production plan (day × pass × type) |
//! | DemandMap | Open order quantities after the fixed prefix |

mod brick;
mod demand;
mod grid;

pub use brick::{Brick, PriorityRules, TOP_PRIORITY};
pub use demand::DemandMap;
pub use grid::{ScheduleGrid, SlotLoad};
