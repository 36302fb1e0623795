//! Brick (item type) model.
//!
//! A brick type is one catalog entry: a category label, a total demand
//! quantity, a unit weight, and a priority class. Its position in the
//! catalog is the type index used by every grid and demand map.

use serde::{Deserialize, Serialize};

/// Highest priority class. Only this class is preallocated in Phase 1.
pub const TOP_PRIORITY: u8 = 0;

/// A brick type to be produced.
///
/// Lower `priority` = produced earlier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    /// Unique catalog identifier.
    pub id: u32,
    /// Category label (e.g. `"ZD-230"`). Its prefix determines the
    /// default priority class.
    pub category: String,
    /// Total demand (units).
    pub quantity: u32,
    /// Unit weight (kg).
    pub weight: f64,
    /// Priority class (0 = top).
    pub priority: u8,
    /// Set when the class was given explicitly; rules no longer apply.
    #[serde(default)]
    pub fixed_priority: bool,
}

impl Brick {
    /// Creates a brick type, deriving its priority from the default rules.
    pub fn new(id: u32, category: impl Into<String>, quantity: u32, weight: f64) -> Self {
        let category = category.into();
        let priority = PriorityRules::default().classify(&category);
        Self {
            id,
            category,
            quantity,
            weight,
            priority,
            fixed_priority: false,
        }
    }

    /// Fixes the priority class; later [`with_rules`](Self::with_rules)
    /// calls keep it.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self.fixed_priority = true;
        self
    }

    /// Re-derives the priority class from `rules` unless it was fixed.
    pub fn with_rules(mut self, rules: &PriorityRules) -> Self {
        if !self.fixed_priority {
            self.priority = rules.classify(&self.category);
        }
        self
    }

    /// Whether this type belongs to the top priority class.
    #[inline]
    pub fn is_top_priority(&self) -> bool {
        self.priority == TOP_PRIORITY
    }

    /// Weight of `units` bricks of this type.
    #[inline]
    pub fn batch_weight(&self, units: u32) -> f64 {
        units as f64 * self.weight
    }

    /// Total weight of the whole demand.
    pub fn total_weight(&self) -> f64 {
        self.batch_weight(self.quantity)
    }
}

/// Category-prefix → priority class mapping.
///
/// Categories starting with any `top` prefix map to class 0, any `second`
/// prefix to class 1, everything else to class 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityRules {
    pub top: Vec<String>,
    pub second: Vec<String>,
}

impl Default for PriorityRules {
    fn default() -> Self {
        Self {
            top: vec!["ZD".into()],
            second: vec!["ZB".into(), "ZF".into()],
        }
    }
}

impl PriorityRules {
    /// Creates rules from explicit prefix lists.
    pub fn new(top: Vec<String>, second: Vec<String>) -> Self {
        Self { top, second }
    }

    /// Priority class for a category label.
    pub fn classify(&self, category: &str) -> u8 {
        let matches = |prefixes: &[String]| prefixes.iter().any(|p| category.starts_with(p.as_str()));
        if matches(&self.top) {
            0
        } else if matches(&self.second) {
            1
        } else {
            2
        }
    }
}
