//! Static catalog of the assistants dotai can write into.
//!
//! Each table is plain data; paths are computed on demand from an
//! [`Environment`](crate::paths::Environment) so OS and environment lookups
//! are never cached.

pub mod mcp;
pub mod skills;

pub use mcp::{MCP_PROVIDERS, McpProvider, mcp_provider, mcp_provider_ids};
pub use skills::{
    SKILL_PROVIDERS, SkillProvider, skill_provider, skill_provider_ids,
    skill_target_path,
};
