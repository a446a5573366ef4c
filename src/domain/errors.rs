//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Catalog or module-detail fetch/parse failure. Recovered by retry or return to catalog.
    #[error("Content load failed: {0}")]
    Load(String),

    /// Module view entered with no selected module.
    #[error("No module selected")]
    MissingSelection,

    /// Corrupt persisted data. Callers log it and fall back to empty.
    #[error("Stored data is corrupt ({key}): {reason}")]
    StorageParse { key: String, reason: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),
}
