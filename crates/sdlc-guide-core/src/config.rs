use crate::catalog::StageCatalog;
use crate::error::Result;
use crate::paths;
use crate::types::StageKey;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// PageConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_stylesheet")]
    pub stylesheet: String,
    /// Browser script that keeps the page live; empty serves a static page.
    #[serde(default = "default_script")]
    pub script: String,
    /// Stage highlighted before any interaction.
    #[serde(default = "default_stage")]
    pub default_stage: StageKey,
}

fn default_title() -> String {
    "SDLC Prompt Engineering Guide".to_string()
}

fn default_stylesheet() -> String {
    "/assets/guide.css".to_string()
}

fn default_script() -> String {
    "/assets/guide.js".to_string()
}

fn default_stage() -> StageKey {
    StageKey::Requirements
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            stylesheet: default_stylesheet(),
            script: default_script(),
            default_stage: default_stage(),
        }
    }
}

// ---------------------------------------------------------------------------
// SyncConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Minimum visible fraction a section must exceed to become active.
    #[serde(default = "default_visibility_floor")]
    pub visibility_floor: f64,
    /// Intersection ratio above which an observer entry triggers a refresh.
    #[serde(default = "default_intersection_ratio")]
    pub intersection_ratio: f64,
    /// Minimum spacing between scroll-driven refreshes; 0 disables throttling.
    #[serde(default)]
    pub scroll_throttle_ms: u64,
    #[serde(default = "default_active_class")]
    pub active_class: String,
    #[serde(default = "default_progress_property")]
    pub progress_property: String,
}

fn default_visibility_floor() -> f64 {
    0.1
}

fn default_intersection_ratio() -> f64 {
    0.2
}

fn default_active_class() -> String {
    "active".to_string()
}

fn default_progress_property() -> String {
    "--scroll-progress".to_string()
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            visibility_floor: default_visibility_floor(),
            intersection_ratio: default_intersection_ratio(),
            scroll_throttle_ms: 0,
            active_class: default_active_class(),
            progress_property: default_progress_property(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    /// Custom stage table, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PathBuf>,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            page: PageConfig::default(),
            sync: SyncConfig::default(),
            data: None,
        }
    }
}

static CLASS_RE: OnceLock<Regex> = OnceLock::new();
static PROPERTY_RE: OnceLock<Regex> = OnceLock::new();

fn class_re() -> &'static Regex {
    CLASS_RE.get_or_init(|| Regex::new(r"^-?[A-Za-z_][A-Za-z0-9_-]*$").unwrap())
}

fn property_re() -> &'static Regex {
    PROPERTY_RE.get_or_init(|| Regex::new(r"^--[A-Za-z0-9_-]+$").unwrap())
}

impl Config {
    /// Load `.sdlc-guide/config.yaml`. A project without one gets defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self, root: &Path) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let floor = self.sync.visibility_floor;
        if !(floor > 0.0 && floor < 1.0) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("sync.visibility_floor must be in (0, 1), got {floor}"),
            });
        }

        let ratio = self.sync.intersection_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("sync.intersection_ratio must be in [0, 1], got {ratio}"),
            });
        }

        if !class_re().is_match(&self.sync.active_class) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "sync.active_class '{}' is not a valid CSS class name",
                    self.sync.active_class
                ),
            });
        }

        if !property_re().is_match(&self.sync.progress_property) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "sync.progress_property '{}' must be a custom property (--name)",
                    self.sync.progress_property
                ),
            });
        }

        if self.sync.scroll_throttle_ms > 1000 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "sync.scroll_throttle_ms={} (>1000 makes the sidebar lag behind scrolling)",
                    self.sync.scroll_throttle_ms
                ),
            });
        }

        match StageCatalog::load(root, self) {
            Ok(catalog) => {
                if !catalog.contains(self.page.default_stage) {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!(
                            "page.default_stage '{}' is not in the stage table",
                            self.page.default_stage
                        ),
                    });
                }
            }
            Err(e) => warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("stage table failed to load: {e}"),
            }),
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
