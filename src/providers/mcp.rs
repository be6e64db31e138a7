use std::path::{Path, PathBuf};

use crate::error::DotaiError;
use crate::model::Scope;
use crate::paths::Environment;

pub const DEFAULT_CONFIG_KEY: &str = "mcpServers";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McpProviderId {
    ClaudeCode,
    ClaudeDesktop,
    Cursor,
    Windsurf,
    VsCode,
    Cline,
    Zed,
    RooCode,
    Antigravity,
}

impl McpProviderId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClaudeCode => "claude-code",
            Self::ClaudeDesktop => "claude-desktop",
            Self::Cursor => "cursor",
            Self::Windsurf => "windsurf",
            Self::VsCode => "vscode",
            Self::Cline => "cline",
            Self::Zed => "zed",
            Self::RooCode => "roo-code",
            Self::Antigravity => "antigravity",
        }
    }
}

/// An assistant that reads MCP server definitions from a JSON file.
#[derive(Debug)]
pub struct McpProvider {
    pub id: McpProviderId,
    pub name: &'static str,
    pub description: &'static str,
    /// Relative to the project root; `None` when the app has no project config.
    pub project_path: Option<&'static str>,
    /// Property the servers live under.
    pub config_key: &'static str,
    /// Property used in the global file when it differs from `config_key`.
    pub global_config_key: Option<&'static str>,
    pub note: Option<&'static str>,
}

pub static MCP_PROVIDERS: &[McpProvider] = &[
    McpProvider {
        id: McpProviderId::ClaudeCode,
        name: "Claude Code",
        description: "Anthropic Claude Code CLI",
        project_path: Some(".mcp.json"),
        config_key: DEFAULT_CONFIG_KEY,
        global_config_key: None,
        note: None,
    },
    McpProvider {
        id: McpProviderId::ClaudeDesktop,
        name: "Claude Desktop",
        description: "Claude Desktop App",
        project_path: None,
        config_key: DEFAULT_CONFIG_KEY,
        global_config_key: None,
        note: None,
    },
    McpProvider {
        id: McpProviderId::Cursor,
        name: "Cursor",
        description: "Cursor AI IDE",
        project_path: Some(".cursor/mcp.json"),
        config_key: DEFAULT_CONFIG_KEY,
        global_config_key: None,
        note: None,
    },
    McpProvider {
        id: McpProviderId::Windsurf,
        name: "Windsurf",
        description: "Windsurf IDE by Codeium",
        project_path: None,
        config_key: DEFAULT_CONFIG_KEY,
        global_config_key: None,
        note: None,
    },
    McpProvider {
        id: McpProviderId::VsCode,
        name: "VS Code",
        description: "Visual Studio Code with GitHub Copilot",
        project_path: Some(".vscode/mcp.json"),
        config_key: DEFAULT_CONFIG_KEY,
        global_config_key: Some("mcp.servers"),
        note: None,
    },
    McpProvider {
        id: McpProviderId::Cline,
        name: "Cline",
        description: "Cline VS Code Extension",
        project_path: None,
        config_key: DEFAULT_CONFIG_KEY,
        global_config_key: None,
        note: None,
    },
    McpProvider {
        id: McpProviderId::Zed,
        name: "Zed",
        description: "Zed Editor",
        project_path: None,
        config_key: "context_servers",
        global_config_key: None,
        note: None,
    },
    McpProvider {
        id: McpProviderId::RooCode,
        name: "Roo Code",
        description: "Roo Code VS Code Extension",
        project_path: Some(".roo/mcp.json"),
        config_key: DEFAULT_CONFIG_KEY,
        global_config_key: None,
        note: None,
    },
    McpProvider {
        id: McpProviderId::Antigravity,
        name: "Antigravity",
        description: "Antigravity Editor",
        project_path: None,
        config_key: DEFAULT_CONFIG_KEY,
        global_config_key: None,
        note: Some("Config accessible via MCP Store > Manage MCP Servers > View raw config"),
    },
];

fn vscode_global_storage(env: &Environment, extension: &str, file: &str) -> PathBuf {
    env.app_config_dir()
        .join("Code")
        .join("User")
        .join("globalStorage")
        .join(extension)
        .join("settings")
        .join(file)
}

fn global_config_path(id: McpProviderId, env: &Environment) -> PathBuf {
    let home = &env.home;
    match id {
        McpProviderId::ClaudeCode => home.join(".claude.json"),
        McpProviderId::ClaudeDesktop => env
            .app_config_dir()
            .join("Claude")
            .join("claude_desktop_config.json"),
        McpProviderId::Cursor => home.join(".cursor").join("mcp.json"),
        McpProviderId::Windsurf => home.join(".codeium").join("windsurf").join("mcp_config.json"),
        McpProviderId::VsCode => env
            .app_config_dir()
            .join("Code")
            .join("User")
            .join("settings.json"),
        McpProviderId::Cline => vscode_global_storage(
            env,
            "saoudrizwan.claude-dev",
            "cline_mcp_settings.json",
        ),
        McpProviderId::Zed => home.join(".config").join("zed").join("settings.json"),
        McpProviderId::RooCode => {
            vscode_global_storage(env, "rooveterinaryinc.roo-cline", "mcp_settings.json")
        }
        McpProviderId::Antigravity => home.join(".antigravity").join("mcp_config.json"),
    }
}

impl McpProvider {
    pub fn id_str(&self) -> &'static str {
        self.id.as_str()
    }

    pub fn global_path(&self, env: &Environment) -> PathBuf {
        global_config_path(self.id, env)
    }

    pub fn project_path(&self, project_root: &Path) -> Option<PathBuf> {
        self.project_path.map(|p| project_root.join(p))
    }

    pub fn config_path(
        &self,
        scope: Scope,
        env: &Environment,
        project_root: &Path,
    ) -> Result<PathBuf, DotaiError> {
        match scope {
            Scope::Global => Ok(self.global_path(env)),
            Scope::Project => {
                self.project_path(project_root)
                    .ok_or_else(|| DotaiError::NoProjectPath {
                        id: self.id_str().to_string(),
                    })
            }
        }
    }

    /// Property holding the servers in the file for `scope`.
    pub fn key_for(&self, scope: Scope) -> &'static str {
        match scope {
            Scope::Global => self.global_config_key.unwrap_or(self.config_key),
            Scope::Project => self.config_key,
        }
    }
}

pub fn mcp_provider(id: &str) -> Option<&'static McpProvider> {
    MCP_PROVIDERS.iter().find(|p| p.id_str() == id)
}

pub fn mcp_provider_ids() -> impl Iterator<Item = &'static str> {
    MCP_PROVIDERS.iter().map(McpProvider::id_str)
}
