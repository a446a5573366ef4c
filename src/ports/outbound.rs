//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, Module, ModuleDetail, ModuleId};

/// Static content source: module catalog and per-module detail.
///
/// Single attempt per call. No retry or backoff; callers offer a manual retry.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Load the ordered module catalog. Fails with `DomainError::Load`.
    async fn load_catalog(&self) -> Result<Vec<Module>, DomainError>;

    /// Load sections and previous/next links for one module. Fails with `DomainError::Load`.
    async fn load_module_detail(&self, id: &ModuleId) -> Result<ModuleDetail, DomainError>;
}

/// Durable per-user key/value storage. Values are opaque strings; callers encode JSON.
///
/// Each call is atomic for its key. There is no cross-key atomicity.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), DomainError>;
}
