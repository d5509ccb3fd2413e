use anyhow::Context;
use sdlc_guide_core::catalog::StageCatalog;
use sdlc_guide_core::config::Config;
use sdlc_guide_core::page;
use std::path::Path;
use std::sync::Arc;

/// Shared application state passed to all route handlers. Everything is
/// loaded once at startup; the page is rendered up front.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<StageCatalog>,
    pub config: Arc<Config>,
    pub page: Arc<str>,
}

impl AppState {
    /// Load config and stage table for the project at `root`.
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let config = Config::load(root).context("failed to load config")?;
        let catalog = StageCatalog::load(root, &config).context("failed to load stage table")?;
        Ok(Self::new(catalog, config))
    }

    pub fn new(catalog: StageCatalog, config: Config) -> Self {
        let page = page::render_page(&catalog, &config);
        tracing::debug!(bytes = page.len(), "page prerendered");
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
            page: page.into(),
        }
    }
}
