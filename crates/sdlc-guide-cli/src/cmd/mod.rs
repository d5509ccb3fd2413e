pub mod config;
pub mod init;
pub mod render;
pub mod serve;
pub mod stage;
pub mod stages;

use anyhow::Context;
use sdlc_guide_core::catalog::StageCatalog;
use sdlc_guide_core::config::Config;
use std::path::Path;

/// Config plus the stage table it selects.
pub(crate) fn load_project(root: &Path) -> anyhow::Result<(Config, StageCatalog)> {
    let config = Config::load(root).context("failed to load config")?;
    let catalog = StageCatalog::load(root, &config).context("failed to load stage table")?;
    Ok((config, catalog))
}
