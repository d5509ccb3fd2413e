use anyhow::Context;
use sdlc_guide_core::catalog::StageCatalog;
use sdlc_guide_core::config::Config;
use sdlc_guide_core::{io, paths};
use std::path::{Path, PathBuf};

pub fn run(root: &Path, with_data: bool) -> anyhow::Result<()> {
    println!("Initializing SDLC guide in: {}", root.display());

    let guide_dir = paths::guide_dir(root);
    std::fs::create_dir_all(&guide_dir)
        .with_context(|| format!("failed to create {}", guide_dir.display()))?;

    // 1. Editable copy of the builtin stage table
    if with_data {
        let stages_path = paths::stages_path(root);
        let written = io::write_if_missing(&stages_path, StageCatalog::builtin_yaml().as_bytes())
            .context("failed to write stages.yaml")?;
        report(written, paths::STAGES_FILE);
    }

    // 2. config.yaml
    let config_path = paths::config_path(root);
    if config_path.exists() {
        report(false, paths::CONFIG_FILE);
        let config = Config::load(root).context("failed to load config")?;
        if with_data && config.data.is_none() {
            println!(
                "  note:    set `data: {}` in {} to use the stage table copy",
                paths::STAGES_FILE,
                paths::CONFIG_FILE
            );
        }
    } else {
        let config = Config {
            data: with_data.then(|| PathBuf::from(paths::STAGES_FILE)),
            ..Config::default()
        };
        config.save(root).context("failed to write config.yaml")?;
        report(true, paths::CONFIG_FILE);
    }

    println!("\nRun `sdlc-guide serve` to browse the guide.");
    Ok(())
}

fn report(created: bool, rel: &str) {
    if created {
        println!("  created: {rel}");
    } else {
        println!("  exists:  {rel}");
    }
}
