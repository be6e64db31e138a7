use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DotaiError;
use crate::providers;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    #[default]
    Global,
    Project,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Project => write!(f, "project"),
        }
    }
}

impl FromStr for Scope {
    type Err = DotaiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(Self::Global),
            "project" => Ok(Self::Project),
            other => Err(DotaiError::InvalidScope(other.to_string())),
        }
    }
}

/// User preferences stored in `~/.dotai/config.json`.
///
/// Every field has a default so partial or older files load cleanly; keys
/// this version does not know about are carried through `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalConfig {
    pub enabled_providers: Vec<String>,
    pub default_scope: Scope,
    pub skills_repo: Option<PathBuf>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            enabled_providers: providers::skill_provider_ids()
                .map(str::to_string)
                .collect(),
            default_scope: Scope::default(),
            skills_repo: None,
            created_at: Utc::now(),
            updated_at: None,
            extra: serde_json::Map::new(),
        }
    }
}
