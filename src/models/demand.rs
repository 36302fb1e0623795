//! Residual demand after Phase 1.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Remaining quantity per type index.
///
/// Only types with positive residual are tracked. Iteration is in ascending
/// type order. Built once; Phase-2 operators only read it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandMap {
    entries: BTreeMap<usize, u32>,
}

impl DemandMap {
    /// Builds the map from a residual array indexed by type.
    pub fn from_residual(residual: &[u32]) -> Self {
        let entries = residual
            .iter()
            .enumerate()
            .filter(|(_, &q)| q > 0)
            .map(|(ty, &q)| (ty, q))
            .collect();
        Self { entries }
    }

    /// Remaining demand for a type (0 if untracked).
    #[inline]
    pub fn get(&self, ty: usize) -> u32 {
        self.entries.get(&ty).copied().unwrap_or(0)
    }

    #[inline]
    pub fn contains(&self, ty: usize) -> bool {
        self.entries.contains_key(&ty)
    }

    /// (type, quantity) pairs in ascending type order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.entries.iter().map(|(&ty, &q)| (ty, q))
    }

    /// Tracked type indices in ascending order.
    pub fn types(&self) -> Vec<usize> {
        self.entries.keys().copied().collect()
    }

    /// Number of tracked types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all remaining quantities.
    pub fn total(&self) -> u64 {
        self.entries.values().map(|&q| q as u64).sum()
    }
}
