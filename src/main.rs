//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use course_viewer::adapters::content::{FsContentSource, HttpContentSource, is_remote};
use course_viewer::adapters::persistence::JsonFileStore;
use course_viewer::adapters::ui::tui::TuiInputPort;
use course_viewer::ports::{ContentSource, InputPort, KeyValueStore};
use course_viewer::shared::config::AppConfig;
use course_viewer::usecases::{LocalState, PreferencesService};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    // Logs go to stderr so they do not interleave with the prompts on stdout.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration, using defaults");
        AppConfig::default()
    });

    // --- Local storage ---
    let storage_path = cfg.storage_path();
    let store = JsonFileStore::open(&storage_path)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    info!(path = %store.path().display(), "local storage ready");
    let store: Arc<dyn KeyValueStore> = Arc::new(store);
    let local = LocalState::new(store);

    // --- Content source: directory or http(s) base ---
    let base = cfg.content_base_or_default();
    let catalog_file = cfg.catalog_file_or_default();
    let module_pattern = cfg.module_file_pattern_or_default();
    let content: Arc<dyn ContentSource> = if is_remote(&base) {
        info!(url = %base, "reading content over HTTP");
        Arc::new(HttpContentSource::new(base, catalog_file, module_pattern))
    } else {
        info!(dir = %base, "reading content from directory");
        Arc::new(FsContentSource::new(base, catalog_file, module_pattern))
    };

    let theme = PreferencesService::new(local.clone())
        .theme()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    course_viewer::adapters::ui::init_ui(&cfg.course_title_or_default(), theme);

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(content, local));
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
