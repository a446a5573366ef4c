//! Typed access to the persisted keys. JSON encoding happens here, not in the store.
//!
//! Keys:
//! - `selectedModule`: SelectedModuleRef (page transition catalog -> module)
//! - `completedModules`: ModuleProgressRecord (JSON array of ids)
//! - `journal_module_{id}`: JournalEntry
//! - `theme`: plain `light` / `dark`

use crate::domain::{
    DomainError, JournalEntry, ModuleId, ModuleProgressRecord, SelectedModuleRef, Theme,
};
use crate::ports::KeyValueStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::warn;

pub const KEY_SELECTED_MODULE: &str = "selectedModule";
pub const KEY_COMPLETED_MODULES: &str = "completedModules";
pub const KEY_THEME: &str = "theme";

pub fn journal_key(id: &ModuleId) -> String {
    format!("journal_module_{}", id)
}

/// Typed wrapper over a KeyValueStore. Cheap to clone.
#[derive(Clone)]
pub struct LocalState {
    store: Arc<dyn KeyValueStore>,
}

impl LocalState {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DomainError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| DomainError::StorageParse {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    async fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), DomainError> {
        let json = serde_json::to_string(value).map_err(|e| DomainError::Storage(e.to_string()))?;
        self.store.set(key, &json).await
    }

    /// Corrupt data is logged and reported as no selection.
    pub async fn selected_module(&self) -> Result<Option<SelectedModuleRef>, DomainError> {
        match self.read_json(KEY_SELECTED_MODULE).await {
            Err(e @ DomainError::StorageParse { .. }) => {
                warn!(error = %e, "ignoring corrupt module selection");
                Ok(None)
            }
            other => other,
        }
    }

    pub async fn set_selected_module(&self, selected: &SelectedModuleRef) -> Result<(), DomainError> {
        self.write_json(KEY_SELECTED_MODULE, selected).await
    }

    /// Corrupt data is logged and treated as an empty record.
    pub async fn progress(&self) -> Result<ModuleProgressRecord, DomainError> {
        match self.read_json(KEY_COMPLETED_MODULES).await {
            Ok(record) => Ok(record.unwrap_or_default()),
            Err(e @ DomainError::StorageParse { .. }) => {
                warn!(error = %e, "ignoring corrupt progress record");
                Ok(ModuleProgressRecord::default())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn set_progress(&self, record: &ModuleProgressRecord) -> Result<(), DomainError> {
        self.write_json(KEY_COMPLETED_MODULES, record).await
    }

    /// Raw journal read. `StorageParse` is returned to the caller to decide recovery.
    pub async fn journal(&self, id: &ModuleId) -> Result<Option<JournalEntry>, DomainError> {
        self.read_json(&journal_key(id)).await
    }

    pub async fn set_journal(&self, id: &ModuleId, entry: &JournalEntry) -> Result<(), DomainError> {
        self.write_json(&journal_key(id), entry).await
    }

    pub async fn remove_journal(&self, id: &ModuleId) -> Result<(), DomainError> {
        self.store.remove(&journal_key(id)).await
    }

    /// Unknown values fall back to the default theme.
    pub async fn theme(&self) -> Result<Theme, DomainError> {
        let raw = self.store.get(KEY_THEME).await?;
        Ok(raw.as_deref().and_then(Theme::parse).unwrap_or_default())
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<(), DomainError> {
        self.store.set(KEY_THEME, theme.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::MemoryStore;

    #[tokio::test]
    async fn corrupt_progress_reads_as_empty() {
        let store = MemoryStore::new()
            .with_entry(KEY_COMPLETED_MODULES, "[1,")
            .await;
        let local = LocalState::new(Arc::new(store));
        assert!(local.progress().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn progress_is_a_json_array_of_ids() {
        let store = Arc::new(MemoryStore::new());
        let local = LocalState::new(store.clone());
        let mut record = ModuleProgressRecord::default();
        record.insert(ModuleId::new("1"));
        record.insert(ModuleId::new("3"));
        local.set_progress(&record).await.unwrap();
        assert_eq!(
            store.get(KEY_COMPLETED_MODULES).await.unwrap().as_deref(),
            Some(r#"["1","3"]"#)
        );
    }

    #[tokio::test]
    async fn legacy_numeric_progress_decodes() {
        let store = MemoryStore::new()
            .with_entry(KEY_COMPLETED_MODULES, "[1,2]")
            .await;
        let local = LocalState::new(Arc::new(store));
        let record = local.progress().await.unwrap();
        assert!(record.contains(&ModuleId::new("2")));
    }

    #[tokio::test]
    async fn unknown_theme_falls_back_to_light() {
        let store = MemoryStore::new().with_entry(KEY_THEME, "sepia").await;
        let local = LocalState::new(Arc::new(store));
        assert_eq!(local.theme().await.unwrap(), Theme::Light);
    }

    #[tokio::test]
    async fn minimal_selection_round_trips() {
        let local = LocalState::new(Arc::new(MemoryStore::new()));
        assert_eq!(local.selected_module().await.unwrap(), None);
        let selected = SelectedModuleRef::minimal(ModuleId::new("4"));
        local.set_selected_module(&selected).await.unwrap();
        assert_eq!(local.selected_module().await.unwrap(), Some(selected));
    }
}
