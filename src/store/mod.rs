pub mod config;
pub mod files;
pub mod mcp;
pub mod skills;

pub use config::ConfigStore;
pub use mcp::McpStore;
pub use skills::SkillStore;
