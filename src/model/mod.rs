pub mod config;
pub mod mcp;
pub mod skill;

pub use config::{GlobalConfig, Scope};
pub use mcp::{McpConfig, McpServer};
pub use skill::Skill;
