use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DotaiError {
    #[error("failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory: {path}")]
    DirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove: {path}")]
    FileRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON in {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("failed to serialize YAML: {0}")]
    YamlSerialize(#[from] serde_yaml::Error),

    #[error("skill '{name}' not found in central repository")]
    SkillNotFound { name: String },

    #[error("skill '{name}' already exists")]
    SkillExists { name: String },

    #[error("failed to parse {path}: {reason}")]
    SkillParse { path: PathBuf, reason: String },

    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("invalid description: {0}")]
    InvalidDescription(String),

    #[error("unknown provider: {id}")]
    UnknownProvider { id: String },

    #[error("provider '{id}' has no project-level config")]
    NoProjectPath { id: String },

    #[error("invalid scope '{0}' (expected global or project)")]
    InvalidScope(String),

    #[error("failed to determine home directory; set DOTAI_HOME or --home")]
    HomeDirNotFound,
}
