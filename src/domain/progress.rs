//! Catalog progress and status derivation from the completion record.

use crate::domain::entities::{Module, ModuleProgressRecord, ModuleStatus};

/// Completed vs total modules for the catalog progress bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogProgress {
    pub completed: usize,
    pub total: usize,
}

impl CatalogProgress {
    pub fn of(catalog: &[Module]) -> Self {
        Self {
            completed: catalog
                .iter()
                .filter(|m| m.status == ModuleStatus::Completed)
                .count(),
            total: catalog.len(),
        }
    }

    /// 0.0 for an empty catalog.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }

    pub fn percent_rounded(&self) -> u8 {
        self.percent().round() as u8
    }
}

/// Applies the lock policy in catalog order:
/// - ids in `record` become completed;
/// - a locked module whose predecessor is completed becomes in-progress;
/// - everything else keeps its static status.
///
/// Statuses only move forward.
pub fn derive_statuses(catalog: &mut [Module], record: &ModuleProgressRecord) {
    let mut previous_completed = false;
    for module in catalog.iter_mut() {
        if record.contains(&module.id) {
            module.status = module.status.advance_to(ModuleStatus::Completed);
        } else if module.status == ModuleStatus::Locked && previous_completed {
            module.status = ModuleStatus::InProgress;
        }
        previous_completed = module.status == ModuleStatus::Completed;
    }
}
