//! Application configuration. Content location, data directory, file names.

use crate::adapters::content::{DEFAULT_CATALOG_FILE, DEFAULT_MODULE_FILE_PATTERN};
use serde::Deserialize;
use std::path::PathBuf;

/// Default content location (directory or http(s) base URL).
pub const DEFAULT_CONTENT_BASE: &str = "./content";
/// Default directory for the learner's local storage file.
pub const DEFAULT_DATA_DIR: &str = "./data";
/// Title shown in the startup banner.
pub const DEFAULT_COURSE_TITLE: &str = "COURSE";
/// Name of the key/value storage file inside the data directory.
pub const STORAGE_FILE: &str = "storage.json";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory or http(s) URL holding the catalog and module files. Read from COURSE_VIEWER_CONTENT_BASE.
    #[serde(default)]
    pub content_base: Option<String>,

    /// Directory for local progress / journal storage. Read from COURSE_VIEWER_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Catalog file name (default "modulos.json"). Read from COURSE_VIEWER_CATALOG_FILE.
    #[serde(default)]
    pub catalog_file: Option<String>,

    /// Module detail file pattern with an `{id}` placeholder. Read from COURSE_VIEWER_MODULE_FILE_PATTERN.
    #[serde(default)]
    pub module_file_pattern: Option<String>,

    /// Banner title. Read from COURSE_VIEWER_COURSE_TITLE.
    #[serde(default)]
    pub course_title: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("COURSE_VIEWER"));
        if let Ok(path) = std::env::var("COURSE_VIEWER_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    pub fn content_base_or_default(&self) -> String {
        self.content_base
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_BASE.to_string())
    }

    pub fn data_dir_or_default(&self) -> PathBuf {
        PathBuf::from(
            self.data_dir
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(DEFAULT_DATA_DIR),
        )
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir_or_default().join(STORAGE_FILE)
    }

    pub fn catalog_file_or_default(&self) -> String {
        self.catalog_file
            .clone()
            .unwrap_or_else(|| DEFAULT_CATALOG_FILE.to_string())
    }

    pub fn course_title_or_default(&self) -> String {
        self.course_title
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COURSE_TITLE.to_string())
    }

    /// Falls back to the default when the configured pattern lacks `{id}`.
    pub fn module_file_pattern_or_default(&self) -> String {
        self.module_file_pattern
            .clone()
            .filter(|p| p.contains("{id}"))
            .unwrap_or_else(|| DEFAULT_MODULE_FILE_PATTERN.to_string())
    }
}
