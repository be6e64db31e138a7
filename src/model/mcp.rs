use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    Stdio,
    Sse,
    Http,
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdio => write!(f, "stdio"),
            Self::Sse => write!(f, "sse"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// One MCP server definition.
///
/// Serialized with an explicit `type` field. Entries written by hand or by
/// other tools often omit it, so on read the variant falls back to field
/// presence: `command` means stdio, `url` means http.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMcpServer", into = "RawMcpServer")]
pub enum McpServer {
    Stdio {
        command: String,
        args: Vec<String>,
        env: BTreeMap<String, String>,
    },
    Sse {
        url: String,
        headers: BTreeMap<String, String>,
    },
    Http {
        url: String,
        headers: BTreeMap<String, String>,
    },
}

impl McpServer {
    pub fn transport(&self) -> Transport {
        match self {
            Self::Stdio { .. } => Transport::Stdio,
            Self::Sse { .. } => Transport::Sse,
            Self::Http { .. } => Transport::Http,
        }
    }

    /// Short human-readable target: the command line or the URL.
    pub fn summary(&self) -> String {
        match self {
            Self::Stdio { command, args, .. } if args.is_empty() => command.clone(),
            Self::Stdio { command, args, .. } => format!("{command} {}", args.join(" ")),
            Self::Sse { url, .. } | Self::Http { url, .. } => url.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawMcpServer {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<Transport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    args: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    env: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    headers: BTreeMap<String, String>,
}

impl TryFrom<RawMcpServer> for McpServer {
    type Error = String;

    fn try_from(raw: RawMcpServer) -> Result<Self, Self::Error> {
        let kind = match (raw.kind, &raw.command, &raw.url) {
            (Some(kind), _, _) => kind,
            (None, Some(_), _) => Transport::Stdio,
            (None, None, Some(_)) => Transport::Http,
            (None, None, None) => {
                return Err("MCP server needs either `command` or `url`".to_string());
            }
        };

        match kind {
            Transport::Stdio => Ok(Self::Stdio {
                command: raw
                    .command
                    .ok_or("stdio MCP server is missing `command`")?,
                args: raw.args.unwrap_or_default(),
                env: raw.env,
            }),
            Transport::Sse => Ok(Self::Sse {
                url: raw.url.ok_or("sse MCP server is missing `url`")?,
                headers: raw.headers,
            }),
            Transport::Http => Ok(Self::Http {
                url: raw.url.ok_or("http MCP server is missing `url`")?,
                headers: raw.headers,
            }),
        }
    }
}

impl From<McpServer> for RawMcpServer {
    fn from(server: McpServer) -> Self {
        let kind = Some(server.transport());
        match server {
            McpServer::Stdio { command, args, env } => Self {
                kind,
                command: Some(command),
                args: Some(args),
                env,
                ..Self::default()
            },
            McpServer::Sse { url, headers } | McpServer::Http { url, headers } => Self {
                kind,
                url: Some(url),
                headers,
                ..Self::default()
            },
        }
    }
}

/// Parse one stored entry and return it with its normalized JSON: the typed
/// fields (with an explicit `type`) followed by every other key the entry
/// carried, such as `cwd`, `disabled` or `alwaysAllow`.
pub fn normalize_entry(raw: &Value) -> Result<(McpServer, Value), serde_json::Error> {
    let server = McpServer::deserialize(raw)?;
    let mut normalized = serde_json::to_value(&server)?;
    if let (Value::Object(out), Value::Object(fields)) = (&mut normalized, raw) {
        for (key, value) in fields {
            if !out.contains_key(key) {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    Ok((server, normalized))
}

/// Central `mcp_servers.json` document.
///
/// Entries stay raw JSON so that one malformed server, or a transport this
/// tool does not model, never costs the others on load or save.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpConfig {
    #[serde(default)]
    pub mcp_servers: BTreeMap<String, Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
