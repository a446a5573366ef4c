//! Content adapters. Implement ContentSource over a directory, an HTTP base URL, or memory.

pub mod fs_source;
pub mod http_source;
pub mod mapper;
pub mod static_source;

pub use fs_source::FsContentSource;
pub use http_source::HttpContentSource;
pub use static_source::StaticContentSource;

/// Catalog file name used by the bundled content.
pub const DEFAULT_CATALOG_FILE: &str = "modulos.json";
/// Detail file pattern; `{id}` is replaced by the module id.
pub const DEFAULT_MODULE_FILE_PATTERN: &str = "modulo{id}.json";

/// True if `base` should be fetched over HTTP rather than read from disk.
pub fn is_remote(base: &str) -> bool {
    base.starts_with("http://") || base.starts_with("https://")
}
