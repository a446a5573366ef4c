//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod journal;
pub mod progress;

pub use entities::{
    Module, ModuleDetail, ModuleId, ModuleProgressRecord, ModuleStatus, Notification,
    NotificationKind, Section, SelectedModuleRef, Theme,
};
pub use errors::DomainError;
pub use journal::{JournalEntry, QuestionKey};
pub use progress::{CatalogProgress, derive_statuses};
