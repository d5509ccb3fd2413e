use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const GUIDE_DIR: &str = ".sdlc-guide";
pub const CONFIG_FILE: &str = ".sdlc-guide/config.yaml";
pub const STAGES_FILE: &str = ".sdlc-guide/stages.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn guide_dir(root: &Path) -> PathBuf {
    root.join(GUIDE_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn stages_path(root: &Path) -> PathBuf {
    root.join(STAGES_FILE)
}
