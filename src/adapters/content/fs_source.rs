//! Implements ContentSource by reading JSON files from a base directory.

use crate::adapters::content::mapper::{detail_file_name, parse_catalog, parse_detail};
use crate::domain::{DomainError, Module, ModuleDetail, ModuleId};
use crate::ports::ContentSource;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Directory-backed content: `{base}/{catalog_file}` and `{base}/{module_file_pattern}`.
pub struct FsContentSource {
    base_dir: PathBuf,
    catalog_file: String,
    module_file_pattern: String,
}

impl FsContentSource {
    pub fn new(
        base_dir: impl AsRef<Path>,
        catalog_file: impl Into<String>,
        module_file_pattern: impl Into<String>,
    ) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            catalog_file: catalog_file.into(),
            module_file_pattern: module_file_pattern.into(),
        }
    }

    async fn read(&self, name: &str) -> Result<String, DomainError> {
        let path = self.base_dir.join(name);
        debug!(path = %path.display(), "reading content file");
        fs::read_to_string(&path).await.map_err(|e| {
            warn!(path = %path.display(), error = %e, "content file unreadable");
            DomainError::Load(format!("{}: {}", path.display(), e))
        })
    }
}

#[async_trait::async_trait]
impl ContentSource for FsContentSource {
    async fn load_catalog(&self) -> Result<Vec<Module>, DomainError> {
        let body = self.read(&self.catalog_file).await?;
        parse_catalog(&body)
    }

    async fn load_module_detail(&self, id: &ModuleId) -> Result<ModuleDetail, DomainError> {
        let name = detail_file_name(&self.module_file_pattern, id);
        let body = self.read(&name).await?;
        parse_detail(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn reads_catalog_and_detail_from_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("modulos.json"),
            r#"[{"id": 1, "title": "Foundations", "status": "in_progress"}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("modulo1.json"),
            r#"{"sections": [{"title": "Welcome", "content": "hi"}]}"#,
        )
        .unwrap();

        let source = FsContentSource::new(dir.path(), "modulos.json", "modulo{id}.json");
        let catalog = source.load_catalog().await.unwrap();
        assert_eq!(catalog[0].title, "Foundations");
        let detail = source.load_module_detail(&catalog[0].id).await.unwrap();
        assert_eq!(detail.sections[0].title, "Welcome");
    }

    #[tokio::test]
    async fn missing_detail_is_load_error() {
        let dir = tempdir().unwrap();
        let source = FsContentSource::new(dir.path(), "modulos.json", "modulo{id}.json");
        let err = source
            .load_module_detail(&ModuleId::new("9"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Load(_)));
    }

    #[tokio::test]
    async fn bundled_content_links_form_a_chain() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("content");
        let source = FsContentSource::new(&dir, "modulos.json", "modulo{id}.json");
        let catalog = source.load_catalog().await.unwrap();
        assert_eq!(catalog.len(), 3);

        for (i, module) in catalog.iter().enumerate() {
            let detail = source.load_module_detail(&module.id).await.unwrap();
            assert!(!detail.sections.is_empty());
            let previous = i.checked_sub(1).map(|p| catalog[p].id.clone());
            let next = catalog.get(i + 1).map(|m| m.id.clone());
            assert_eq!(detail.previous_module, previous);
            assert_eq!(detail.next_module, next);
        }
    }
}
