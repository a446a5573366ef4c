//! In-memory ContentSource. Serves a fixed catalog and details; used by tests and demos.

use crate::domain::{DomainError, Module, ModuleDetail, ModuleId};
use crate::ports::ContentSource;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fixed content. Missing details (or `fail_catalog`) produce `DomainError::Load`.
#[derive(Default)]
pub struct StaticContentSource {
    catalog: Vec<Module>,
    details: HashMap<ModuleId, ModuleDetail>,
    fail_catalog: bool,
    detail_calls: AtomicUsize,
}

impl StaticContentSource {
    pub fn new(catalog: Vec<Module>) -> Self {
        Self {
            catalog,
            ..Default::default()
        }
    }

    pub fn with_detail(mut self, id: impl Into<ModuleId>, detail: ModuleDetail) -> Self {
        self.details.insert(id.into(), detail);
        self
    }

    /// Every catalog load fails, as if the server were unreachable.
    pub fn failing_catalog(mut self) -> Self {
        self.fail_catalog = true;
        self
    }

    /// Number of detail loads attempted so far.
    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ContentSource for StaticContentSource {
    async fn load_catalog(&self) -> Result<Vec<Module>, DomainError> {
        if self.fail_catalog {
            return Err(DomainError::Load("catalog unavailable".into()));
        }
        Ok(self.catalog.clone())
    }

    async fn load_module_detail(&self, id: &ModuleId) -> Result<ModuleDetail, DomainError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::Load(format!("no content for module {}", id)))
    }
}
