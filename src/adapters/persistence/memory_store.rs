//! In-memory KeyValueStore for tests and ephemeral sessions.

use crate::domain::DomainError;
use crate::ports::KeyValueStore;
use std::collections::HashMap;

/// Non-durable store. Contents vanish with the process.
#[derive(Default)]
pub struct MemoryStore {
    map: tokio::sync::RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing any encoding (e.g. to plant corrupt data).
    pub async fn with_entry(self, key: &str, value: &str) -> Self {
        self.map
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        self
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.map.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.map
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.map.write().await.remove(key);
        Ok(())
    }
}
