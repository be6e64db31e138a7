//! Reconciles the central repository into each provider's own files.
//!
//! Skills are owned subtrees: a provider's copy of a skill is replaced
//! wholesale. MCP servers live in files the provider owns: only the server
//! map under the provider's key is touched and everything else in the file is
//! written back unchanged.

pub mod mcp;
pub mod skills;

use std::path::PathBuf;

use crate::error::DotaiError;
use crate::paths::Environment;
use crate::store::{McpStore, SkillStore};

/// Result of one provider's share of a fan-out operation.
#[derive(Debug)]
pub struct ProviderOutcome<T> {
    pub provider_id: String,
    pub result: Result<T, DotaiError>,
}

impl<T> ProviderOutcome<T> {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct SyncEngine<'a> {
    env: &'a Environment,
    skills: &'a SkillStore,
    mcp: &'a McpStore,
    project_root: PathBuf,
}

impl<'a> SyncEngine<'a> {
    pub fn new(
        env: &'a Environment,
        skills: &'a SkillStore,
        mcp: &'a McpStore,
        project_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            env,
            skills,
            mcp,
            project_root: project_root.into(),
        }
    }

    /// Run `op` for every provider id in order, capturing each failure in
    /// that provider's outcome.
    fn fan_out<I, S, T, F>(&self, provider_ids: I, mut op: F) -> Vec<ProviderOutcome<T>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: FnMut(&str) -> Result<T, DotaiError>,
    {
        provider_ids
            .into_iter()
            .map(|id| {
                let id = id.as_ref();
                let result = op(id);
                if let Err(e) = &result {
                    tracing::debug!(provider = id, "provider failed: {e}");
                }
                ProviderOutcome {
                    provider_id: id.to_string(),
                    result,
                }
            })
            .collect()
    }
}
