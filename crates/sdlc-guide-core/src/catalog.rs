use crate::config::Config;
use crate::error::{GuideError, Result};
use crate::types::StageKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const BUILTIN_STAGES: &str = include_str!("../data/stages.yaml");

// ---------------------------------------------------------------------------
// Framework
// ---------------------------------------------------------------------------

/// Five-step prompt scaffold attached to a stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Framework {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterate: Option<String>,
}

impl Framework {
    /// Step names in presentation order, paired with their text. Steps keep
    /// their position number even when an earlier step is absent.
    pub fn steps(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("task", self.task.as_deref()),
            ("context", self.context.as_deref()),
            ("references", self.references.as_deref()),
            ("evaluate", self.evaluate.as_deref()),
            ("iterate", self.iterate.as_deref()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stage {
    pub key: StageKey,
    pub title: String,
    pub description: String,
    pub prompts: Vec<String>,
    pub best_practices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<Framework>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Stage {
    /// Heading text: the title, or the key when the title is empty.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            self.key.as_str()
        } else {
            &self.title
        }
    }

    pub fn first_prompt(&self) -> &str {
        self.prompts.first().map(String::as_str).unwrap_or("")
    }

    pub fn prompt(&self, index: usize) -> Result<&str> {
        self.prompts
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| GuideError::PromptOutOfRange {
                stage: self.key.to_string(),
                index,
                count: self.prompts.len(),
            })
    }
}

/// Listing row for a stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSummary {
    pub key: StageKey,
    pub title: String,
    pub description: String,
    pub prompt_count: usize,
    pub has_framework: bool,
}

impl From<&Stage> for StageSummary {
    fn from(stage: &Stage) -> Self {
        Self {
            key: stage.key,
            title: stage.display_title().to_string(),
            description: stage.description.clone(),
            prompt_count: stage.prompts.len(),
            has_framework: stage.framework.is_some(),
        }
    }
}

/// On-disk shape of a stage; the key comes from the surrounding map.
#[derive(Debug, Deserialize)]
struct StageEntry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    prompts: Vec<String>,
    #[serde(default)]
    best_practices: Vec<String>,
    #[serde(default)]
    framework: Option<Framework>,
    #[serde(default)]
    content: Option<String>,
}

impl StageEntry {
    fn into_stage(self, key: StageKey) -> Result<Stage> {
        if self.prompts.is_empty() {
            return Err(GuideError::EmptyPrompts(key.to_string()));
        }
        Ok(Stage {
            key,
            title: self.title,
            description: self.description,
            prompts: self.prompts,
            best_practices: self.best_practices,
            framework: self.framework,
            content: self.content.filter(|c| !c.is_empty()),
        })
    }
}

// ---------------------------------------------------------------------------
// StageCatalog
// ---------------------------------------------------------------------------

/// Immutable stage table. Iteration follows lifecycle order.
#[derive(Debug, Clone, Default)]
pub struct StageCatalog {
    stages: BTreeMap<StageKey, Stage>,
}

impl StageCatalog {
    /// The table compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_STAGES)
    }

    /// Raw YAML of the builtin table, used to scaffold an editable copy.
    pub fn builtin_yaml() -> &'static str {
        BUILTIN_STAGES
    }

    pub fn from_yaml_str(data: &str) -> Result<Self> {
        let entries: BTreeMap<StageKey, StageEntry> = serde_yaml::from_str(data)?;
        let stages = entries
            .into_iter()
            .map(|(key, entry)| entry.into_stage(key).map(|s| (key, s)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(Self { stages })
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GuideError::DataNotFound(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&data)
    }

    /// Resolve the table for a project: the configured data file, relative
    /// to `root`, or the builtin table.
    pub fn load(root: &Path, config: &Config) -> Result<Self> {
        match &config.data {
            Some(rel) => {
                let path = root.join(rel);
                tracing::debug!(path = %path.display(), "loading stage table");
                Self::load_file(&path)
            }
            None => Self::builtin(),
        }
    }

    pub fn get(&self, key: StageKey) -> Option<&Stage> {
        self.stages.get(&key)
    }

    /// Lookup by raw string. Unknown keys are simply absent.
    pub fn get_str(&self, key: &str) -> Option<&Stage> {
        key.parse::<StageKey>().ok().and_then(|k| self.get(k))
    }

    /// Lookup by raw string, reporting unknown or absent keys as errors.
    pub fn lookup(&self, key: &str) -> Result<&Stage> {
        self.get_str(key)
            .ok_or_else(|| GuideError::UnknownStage(key.to_string()))
    }

    pub fn summaries(&self) -> Vec<StageSummary> {
        self.iter().map(StageSummary::from).collect()
    }

    pub fn contains(&self, key: StageKey) -> bool {
        self.stages.contains_key(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = StageKey> + '_ {
        self.stages.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stage> {
        self.stages.values()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl FromIterator<Stage> for StageCatalog {
    fn from_iter<I: IntoIterator<Item = Stage>>(iter: I) -> Self {
        Self {
            stages: iter.into_iter().map(|s| (s.key, s)).collect(),
        }
    }
}
