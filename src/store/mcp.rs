use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::DotaiError;
use crate::model::mcp::normalize_entry;
use crate::model::{McpConfig, McpServer};
use crate::store::files;

/// The central `mcp_servers.json`.
pub struct McpStore {
    path: PathBuf,
}

impl McpStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, keeping a parse failure visible.
    pub fn try_load(&self) -> Result<McpConfig, DotaiError> {
        Ok(files::read_json(&self.path)?.unwrap_or_default())
    }

    /// Load the document; an absent or unreadable file is an empty one.
    pub fn load(&self) -> McpConfig {
        self.try_load().unwrap_or_else(|e| {
            warn!("{e}; using an empty document");
            McpConfig::default()
        })
    }

    pub fn save(&self, config: &McpConfig) -> Result<(), DotaiError> {
        files::write_json(&self.path, config)
    }

    /// Insert or replace a server definition.
    pub fn add(&self, name: &str, server: McpServer) -> Result<McpConfig, DotaiError> {
        validate_server_name(name)?;
        let mut config = self.load();
        let entry = serde_json::to_value(&server)?;
        if config.mcp_servers.insert(name.to_string(), entry).is_some() {
            debug!(server = name, "replacing existing MCP server");
        }
        self.save(&config)?;
        Ok(config)
    }

    /// Returns whether the server was present.
    pub fn remove(&self, name: &str) -> Result<bool, DotaiError> {
        let mut config = self.load();
        if config.mcp_servers.remove(name).is_none() {
            return Ok(false);
        }
        self.save(&config)?;
        Ok(true)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.load().mcp_servers.contains_key(name)
    }

    /// Every entry that parses as a server. Entries that do not are logged
    /// and skipped; they stay in the file untouched.
    pub fn list(&self) -> BTreeMap<String, McpServer> {
        self.parsed()
            .map(|(name, (server, _))| (name, server))
            .collect()
    }

    /// Like [`Self::list`], but as the JSON to hand to providers: typed
    /// fields plus whatever extra keys each entry carries.
    pub fn entries(&self) -> BTreeMap<String, Value> {
        self.parsed()
            .map(|(name, (_, normalized))| (name, normalized))
            .collect()
    }

    fn parsed(&self) -> impl Iterator<Item = (String, (McpServer, Value))> {
        self.load()
            .mcp_servers
            .into_iter()
            .filter_map(|(name, raw)| match normalize_entry(&raw) {
                Ok(parsed) => Some((name, parsed)),
                Err(e) => {
                    warn!(server = %name, "skipping MCP server: {e}");
                    None
                }
            })
    }
}

pub fn validate_server_name(name: &str) -> Result<(), DotaiError> {
    if name.is_empty() {
        return Err(DotaiError::InvalidName {
            name: name.to_string(),
            reason: "name cannot be empty".to_string(),
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(DotaiError::InvalidName {
            name: name.to_string(),
            reason: "server names may only contain letters, digits, hyphens, and underscores"
                .to_string(),
        });
    }
    Ok(())
}
