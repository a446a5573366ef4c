//! Catalog page logic: load modules, derive statuses from progress, open a module.

use crate::domain::{
    CatalogProgress, DomainError, Module, SelectedModuleRef, derive_statuses,
};
use crate::ports::ContentSource;
use crate::usecases::local_state::LocalState;
use std::sync::Arc;
use tracing::info;

/// Catalog service. Stateless apart from its ports; the UI owns the loaded catalog.
pub struct CatalogService {
    content: Arc<dyn ContentSource>,
    local: LocalState,
}

impl CatalogService {
    pub fn new(content: Arc<dyn ContentSource>, local: LocalState) -> Self {
        Self { content, local }
    }

    /// Load the catalog (single attempt) and apply the completion record.
    pub async fn load_catalog(&self) -> Result<Vec<Module>, DomainError> {
        let mut catalog = self.content.load_catalog().await?;
        let record = self.local.progress().await?;
        derive_statuses(&mut catalog, &record);
        info!(
            modules = catalog.len(),
            completed = record.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn progress(catalog: &[Module]) -> CatalogProgress {
        CatalogProgress::of(catalog)
    }

    /// Persist the selection for the module page. Locked modules are not opened (returns false).
    pub async fn select_module(&self, module: &Module) -> Result<bool, DomainError> {
        if module.is_locked() {
            info!(module_id = %module.id, "locked module not opened");
            return Ok(false);
        }
        self.local
            .set_selected_module(&SelectedModuleRef::with_snapshot(module))
            .await?;
        info!(module_id = %module.id, "module selected");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::content::StaticContentSource;
    use crate::adapters::persistence::MemoryStore;
    use crate::domain::{ModuleId, ModuleProgressRecord, ModuleStatus};

    fn module(id: &str, status: ModuleStatus) -> Module {
        Module {
            status,
            ..Module::placeholder(ModuleId::new(id))
        }
    }

    fn catalog() -> Vec<Module> {
        vec![
            module("1", ModuleStatus::InProgress),
            module("2", ModuleStatus::Locked),
            module("3", ModuleStatus::Locked),
        ]
    }

    #[tokio::test]
    async fn completion_record_is_reflected_on_reload() {
        let local = LocalState::new(Arc::new(MemoryStore::new()));
        let mut record = ModuleProgressRecord::default();
        record.insert(ModuleId::new("1"));
        local.set_progress(&record).await.unwrap();

        let service = CatalogService::new(Arc::new(StaticContentSource::new(catalog())), local);
        let loaded = service.load_catalog().await.unwrap();
        let statuses: Vec<ModuleStatus> = loaded.iter().map(|m| m.status).collect();
        assert_eq!(
            statuses,
            [
                ModuleStatus::Completed,
                ModuleStatus::InProgress,
                ModuleStatus::Locked
            ]
        );
        assert_eq!(CatalogService::progress(&loaded).percent_rounded(), 33);
    }

    #[tokio::test]
    async fn catalog_failure_is_load_error() {
        let local = LocalState::new(Arc::new(MemoryStore::new()));
        let service = CatalogService::new(
            Arc::new(StaticContentSource::new(catalog()).failing_catalog()),
            local,
        );
        assert!(matches!(
            service.load_catalog().await,
            Err(DomainError::Load(_))
        ));
    }

    #[tokio::test]
    async fn locked_module_is_not_selected() {
        let local = LocalState::new(Arc::new(MemoryStore::new()));
        let service = CatalogService::new(
            Arc::new(StaticContentSource::new(catalog())),
            local.clone(),
        );
        let all = catalog();
        assert!(!service.select_module(&all[1]).await.unwrap());
        assert_eq!(local.selected_module().await.unwrap(), None);

        assert!(service.select_module(&all[0]).await.unwrap());
        let selected = local.selected_module().await.unwrap().unwrap();
        assert_eq!(selected.id, ModuleId::new("1"));
        assert!(selected.module.is_some());
    }
}
