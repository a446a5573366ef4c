//! Implements ContentSource over HTTP. One GET per call; no retry.

use crate::adapters::content::mapper::{detail_file_name, parse_catalog, parse_detail};
use crate::domain::{DomainError, Module, ModuleDetail, ModuleId};
use crate::ports::ContentSource;
use tracing::{debug, warn};

/// Content served from a static web root: `{base_url}/{catalog_file}` etc.
pub struct HttpContentSource {
    client: reqwest::Client,
    base_url: String,
    catalog_file: String,
    module_file_pattern: String,
}

impl HttpContentSource {
    pub fn new(
        base_url: impl Into<String>,
        catalog_file: impl Into<String>,
        module_file_pattern: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            catalog_file: catalog_file.into(),
            module_file_pattern: module_file_pattern.into(),
        }
    }

    fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name)
    }

    async fn fetch(&self, name: &str) -> Result<String, DomainError> {
        let url = self.url_for(name);
        debug!(url = %url, "fetching content");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::Load(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(status = %status, url = %url, "content server returned error");
            return Err(DomainError::Load(format!("{} returned {}", url, status)));
        }

        response
            .text()
            .await
            .map_err(|e| DomainError::Load(format!("read body of {}: {}", url, e)))
    }
}

#[async_trait::async_trait]
impl ContentSource for HttpContentSource {
    async fn load_catalog(&self) -> Result<Vec<Module>, DomainError> {
        let body = self.fetch(&self.catalog_file).await?;
        parse_catalog(&body)
    }

    async fn load_module_detail(&self, id: &ModuleId) -> Result<ModuleDetail, DomainError> {
        let name = detail_file_name(&self.module_file_pattern, id);
        let body = self.fetch(&name).await?;
        parse_detail(&body)
    }
}
