use serde::{Deserialize, Serialize};
use std::fmt;

/// Sidebar key of the overview entry. Never a key in the stage table.
pub const OVERVIEW_KEY: &str = "Overview";

/// Prefix of every stage section id (`section-Design`).
pub const SECTION_ID_PREFIX: &str = "section-";

// ---------------------------------------------------------------------------
// StageKey
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StageKey {
    Requirements,
    Feasibility,
    Design,
    Implementation,
    Testing,
    Deployment,
    Maintenance,
}

impl StageKey {
    pub fn all() -> &'static [StageKey] {
        &[
            StageKey::Requirements,
            StageKey::Feasibility,
            StageKey::Design,
            StageKey::Implementation,
            StageKey::Testing,
            StageKey::Deployment,
            StageKey::Maintenance,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StageKey::Requirements => "Requirements",
            StageKey::Feasibility => "Feasibility",
            StageKey::Design => "Design",
            StageKey::Implementation => "Implementation",
            StageKey::Testing => "Testing",
            StageKey::Deployment => "Deployment",
            StageKey::Maintenance => "Maintenance",
        }
    }

    /// Id of the DOM section that renders this stage.
    pub fn section_id(self) -> String {
        format!("{SECTION_ID_PREFIX}{}", self.as_str())
    }
}

impl fmt::Display for StageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StageKey {
    type Err = crate::error::GuideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StageKey::all()
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| crate::error::GuideError::UnknownStage(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// NavTarget
// ---------------------------------------------------------------------------

/// What a sidebar entry or stage card points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavTarget {
    Overview,
    Stage(StageKey),
}

impl NavTarget {
    /// The `data-stage` value carried by the matching sidebar entry.
    pub fn key(self) -> &'static str {
        match self {
            NavTarget::Overview => OVERVIEW_KEY,
            NavTarget::Stage(k) => k.as_str(),
        }
    }

    /// Parse a `data-stage` attribute or section id suffix. Unknown keys
    /// yield `None`; they are not an error at the view layer.
    pub fn parse(key: &str) -> Option<NavTarget> {
        if key == OVERVIEW_KEY {
            return Some(NavTarget::Overview);
        }
        key.parse::<StageKey>().ok().map(NavTarget::Stage)
    }

    /// Map a tracked section's id back to its target. Sections without a
    /// `section-` id are the overview.
    pub fn from_section_id(id: Option<&str>) -> Option<NavTarget> {
        match id.and_then(|id| id.strip_prefix(SECTION_ID_PREFIX)) {
            Some(rest) if !rest.is_empty() => NavTarget::parse(rest),
            _ => Some(NavTarget::Overview),
        }
    }
}

impl fmt::Display for NavTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl From<StageKey> for NavTarget {
    fn from(key: StageKey) -> Self {
        NavTarget::Stage(key)
    }
}
