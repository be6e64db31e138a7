use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::{ProviderOutcome, SyncEngine};
use crate::error::DotaiError;
use crate::model::Scope;
use crate::providers::{self, McpProvider};
use crate::store::files;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpSyncOutcome {
    pub synced: usize,
    /// `None` when there was nothing to write.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpInstallStatus {
    pub provider_id: &'static str,
    pub provider_name: &'static str,
    pub installed: bool,
    pub path: PathBuf,
}

fn lookup(provider_id: &str) -> Result<&'static McpProvider, DotaiError> {
    providers::mcp_provider(provider_id).ok_or_else(|| DotaiError::UnknownProvider {
        id: provider_id.to_string(),
    })
}

/// A provider's config file as a JSON object. Missing, unreadable, or
/// non-object files read as empty.
fn read_provider_document(path: &Path) -> Map<String, Value> {
    match files::load_json_or_default::<Value>(path) {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        _ => {
            warn!(path = %path.display(), "provider config is not a JSON object; starting fresh");
            Map::new()
        }
    }
}

/// Merge `servers` into `doc[key]`. Other keys, and servers not named in
/// `servers`, are left as they were.
fn merge_servers<T: Serialize>(
    doc: &mut Map<String, Value>,
    key: &str,
    servers: &BTreeMap<String, T>,
) -> Result<(), DotaiError> {
    let slot = doc
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    if let Value::Object(existing) = slot {
        for (name, server) in servers {
            existing.insert(name.clone(), serde_json::to_value(server)?);
        }
    }
    Ok(())
}

impl SyncEngine<'_> {
    /// Merge `servers` into a provider's config file for `scope` and write it
    /// back. Returns the written path.
    pub fn write_provider_mcp_config<T: Serialize>(
        &self,
        provider_id: &str,
        servers: &BTreeMap<String, T>,
        scope: Scope,
    ) -> Result<PathBuf, DotaiError> {
        let provider = lookup(provider_id)?;
        let path = provider.config_path(scope, self.env, &self.project_root)?;

        let mut doc = read_provider_document(&path);
        merge_servers(&mut doc, provider.key_for(scope), servers)?;
        files::write_json(&path, &Value::Object(doc))?;
        Ok(path)
    }

    /// Push every central server into one provider, extra per-server keys
    /// included. Entries that do not parse are skipped.
    pub fn sync_mcp_to_provider(
        &self,
        provider_id: &str,
        scope: Scope,
    ) -> Result<McpSyncOutcome, DotaiError> {
        let provider = lookup(provider_id)?;
        let servers = self.mcp.entries();
        if servers.is_empty() {
            return Ok(McpSyncOutcome {
                synced: 0,
                path: None,
            });
        }

        let path = self.write_provider_mcp_config(provider.id_str(), &servers, scope)?;
        info!(provider = provider_id, count = servers.len(), path = %path.display(), "synced MCP servers");
        Ok(McpSyncOutcome {
            synced: servers.len(),
            path: Some(path),
        })
    }

    /// [`Self::sync_mcp_to_provider`] for each id, or for every MCP
    /// provider when `provider_ids` is `None`.
    pub fn sync_mcp_to_providers(
        &self,
        provider_ids: Option<&[String]>,
        scope: Scope,
    ) -> Vec<ProviderOutcome<McpSyncOutcome>> {
        let ids: Vec<String> = match provider_ids {
            Some(ids) => ids.to_vec(),
            None => providers::mcp_provider_ids().map(str::to_string).collect(),
        };
        self.fan_out(ids, |id| self.sync_mcp_to_provider(id, scope))
    }

    /// Whether `server_name` is present in each provider's global config,
    /// looked up under that provider's own key.
    pub fn mcp_install_status(&self, server_name: &str) -> Vec<McpInstallStatus> {
        providers::MCP_PROVIDERS
            .iter()
            .map(|provider| {
                let path = provider.global_path(self.env);
                let doc = read_provider_document(&path);
                let installed = doc
                    .get(provider.key_for(Scope::Global))
                    .and_then(Value::as_object)
                    .is_some_and(|servers| servers.contains_key(server_name));
                McpInstallStatus {
                    provider_id: provider.id_str(),
                    provider_name: provider.name,
                    installed,
                    path,
                }
            })
            .collect()
    }
}
