//! Implements KeyValueStore using a single JSON object file.
//!
//! The whole map is cached in memory; every write rewrites the file.

use crate::domain::DomainError;
use crate::ports::KeyValueStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// JSON file-based key/value storage (`{"key": "value", ...}`).
pub struct JsonFileStore {
    path: PathBuf,
    cache: tokio::sync::RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: tokio::sync::RwLock::new(BTreeMap::new()),
        }
    }

    /// Open and load in one step.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let store = Self::new(path);
        store.load().await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path a corrupt storage file is moved to before starting empty.
    pub fn corrupt_path(&self) -> PathBuf {
        self.path.with_extension("json.corrupt")
    }

    /// Load from disk. A missing file is empty. A corrupt file is moved aside to
    /// `corrupt_path()` and the store starts empty.
    pub async fn load(&self) -> Result<(), DomainError> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(map) => map,
                Err(e) => {
                    let aside = self.corrupt_path();
                    warn!(
                        path = %self.path.display(),
                        moved_to = %aside.display(),
                        error = %e,
                        "storage file is corrupt, starting empty"
                    );
                    fs::rename(&self.path, &aside).await.map_err(|e| {
                        DomainError::Storage(format!("move corrupt file aside: {}", e))
                    })?;
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(DomainError::Storage(format!(
                    "read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };
        debug!(path = %self.path.display(), keys = data.len(), "storage loaded");
        *self.cache.write().await = data;
        Ok(())
    }

    /// Write-replace: temp file, sync_all, rename. A crash mid-write leaves the old file intact.
    async fn save(&self, data: &BTreeMap<String, String>) -> Result<(), DomainError> {
        let json =
            serde_json::to_string_pretty(data).map_err(|e| DomainError::Storage(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Storage(format!("create data dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Storage(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Storage(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Storage(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Storage(format!("atomic rename failed: {}", e)))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.cache.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        // Write lock held across save so concurrent writers cannot interleave files.
        // The cache only changes once the file holds the new map.
        let mut cache = self.cache.write().await;
        let mut next = cache.clone();
        next.insert(key.to_string(), value.to_string());
        self.save(&next).await?;
        *cache = next;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        let mut cache = self.cache.write().await;
        if !cache.contains_key(key) {
            return Ok(());
        }
        let mut next = cache.clone();
        next.remove(key);
        self.save(&next).await?;
        *cache = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let store = JsonFileStore::open(&path).await.unwrap();
        store.set("theme", "dark").await.unwrap();
        store.set("selectedModule", r#"{"id":"2"}"#).await.unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("theme").await.unwrap().as_deref(), Some("dark"));
        assert_eq!(
            reopened.get("selectedModule").await.unwrap().as_deref(),
            Some(r#"{"id":"2"}"#)
        );
        assert!(!dir.path().join("storage.json.tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(store.get("theme").await.unwrap(), None);
        assert_eq!(
            std::fs::read_to_string(store.corrupt_path()).unwrap(),
            "{not json"
        );

        store.set("theme", "light").await.unwrap();
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("light"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("storage.json.corrupt")).unwrap(),
            "{not json"
        );
    }

    #[tokio::test]
    async fn failed_save_leaves_cache_unchanged() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let store = JsonFileStore::new(blocker.join("storage.json"));
        let err = store.set("completedModules", r#"["1"]"#).await.unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
        assert_eq!(store.get("completedModules").await.unwrap(), None);
        assert!(!blocker.join("storage.json").exists());
    }

    #[tokio::test]
    async fn failed_remove_keeps_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("storage.json");
        let store = JsonFileStore::open(&path).await.unwrap();
        store.set("journal_module_1", r#"{"p1":"a"}"#).await.unwrap();

        // Replace the data dir with a regular file so the next save cannot create its temp file.
        std::fs::remove_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data"), "").unwrap();

        assert!(store.remove("journal_module_1").await.is_err());
        assert_eq!(
            store.get("journal_module_1").await.unwrap().as_deref(),
            Some(r#"{"p1":"a"}"#)
        );
    }

    #[tokio::test]
    async fn remove_deletes_key_and_tolerates_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        let store = JsonFileStore::open(&path).await.unwrap();
        store.remove("absent").await.unwrap();
        store.set("k", "v").await.unwrap();
        store.remove("k").await.unwrap();

        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("k").await.unwrap(), None);
    }
}
