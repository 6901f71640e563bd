//! Board Configuration
//!
//! JSON-backed settings and the seed projects the page starts with.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};
use crate::project_list::ListType;

/// A project present when the page loads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSeed {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Tooltip text, rendered as `data-extra-info`
    #[serde(default)]
    pub extra_info: Option<String>,
    #[serde(default)]
    pub list: ListType,
}

/// Tooltip placement and fallback text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipSettings {
    /// Horizontal offset from the host's left edge, px
    pub offset_x: f64,
    /// Vertical offset from the host's bottom edge, px
    pub offset_y: f64,
    /// Shown when a project has no extra info
    pub placeholder: String,
}

impl Default for TooltipSettings {
    fn default() -> Self {
        Self {
            offset_x: 20.0,
            offset_y: -10.0,
            placeholder: "No further details for this project.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Page heading
    pub title: String,
    pub projects: Vec<ProjectSeed>,
    pub tooltip: TooltipSettings,
    /// Scroll a project into view after it changes lists
    pub scroll_on_move: bool,
    /// Script loaded once at startup, fire-and-forget
    pub analytics_script: Option<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            title: "Project Planner".to_string(),
            projects: Vec::new(),
            tooltip: TooltipSettings::default(),
            scroll_on_move: true,
            analytics_script: None,
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Project ids must be non-empty, unique, and usable as element ids
    pub fn validate(&self) -> BoardResult<()> {
        let mut seen = HashSet::new();
        for project in &self.projects {
            let id = project.id.as_str();
            if id.is_empty() || id.chars().any(char::is_whitespace) {
                return Err(BoardError::InvalidConfig(format!("bad project id {id:?}")));
            }
            if !seen.insert(id) {
                return Err(BoardError::DuplicateId(id.to_string()));
            }
        }
        Ok(())
    }

    pub fn projects_in(&self, list: ListType) -> impl Iterator<Item = &ProjectSeed> {
        self.projects.iter().filter(move |p| p.list == list)
    }
}
