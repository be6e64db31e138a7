pub mod config;
pub mod mcp;
pub mod open;
pub mod providers;
pub mod skill;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::Scope;
use crate::paths::{Environment, Paths};
use crate::store::{ConfigStore, McpStore, SkillStore};
use crate::sync::ProviderOutcome;

#[derive(Debug, Parser)]
#[command(
    name = "dotai",
    about = "Dotfiles for AI: manage skills and MCP servers across your AI coding assistants",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Override the home directory dotai and provider paths resolve against
    #[arg(long, env = "DOTAI_HOME", global = true)]
    pub home: Option<PathBuf>,

    /// Project root for project-scope operations (default: current directory)
    #[arg(long, global = true)]
    pub project_root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage AI agent skills
    #[command(subcommand)]
    Skill(SkillSubcommand),

    /// Manage MCP servers
    #[command(subcommand)]
    Mcp(McpSubcommand),

    /// List all supported skill providers
    Providers,

    /// Manage dotai configuration
    #[command(subcommand)]
    Config(ConfigSubcommand),

    /// Enable a skill provider
    Enable {
        /// Provider id (see `dotai providers`)
        provider: String,
    },

    /// Disable a skill provider
    Disable {
        /// Provider id (see `dotai providers`)
        provider: String,
    },

    /// Open the skills repository folder
    Repo {
        /// Print the path instead of opening it
        #[arg(long)]
        print: bool,
    },
}

/// Provider and scope selection shared by the skill fan-out commands.
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Comma-separated list of providers (default: enabled providers)
    #[arg(short, long, value_delimiter = ',')]
    pub providers: Vec<String>,

    /// Target every known provider
    #[arg(short, long, conflicts_with = "providers")]
    pub all: bool,

    /// Use project scope
    #[arg(long, conflicts_with = "global")]
    pub project: bool,

    /// Use global scope
    #[arg(long)]
    pub global: bool,
}

#[derive(Debug, Subcommand)]
pub enum SkillSubcommand {
    /// Create a new skill in the central repository
    Create {
        /// Skill name (lowercase letters, digits, hyphens)
        name: String,

        /// Short description used for auto-discovery (max 200 chars)
        #[arg(short, long)]
        description: String,

        /// Instruction body (default: a generated template)
        #[arg(long)]
        instructions: Option<String>,

        /// Open SKILL.md in your editor afterwards
        #[arg(long)]
        edit: bool,
    },

    /// Install a skill (by name, or from a skill folder path) to providers
    Install {
        /// Skill name or path to a folder containing SKILL.md
        skill: String,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Remove a skill from providers (the central copy is kept)
    Uninstall {
        /// Skill name
        skill: String,

        #[command(flatten)]
        target: TargetArgs,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List all skills in the central repository
    #[command(alias = "ls")]
    List {
        /// Show where each skill is installed
        #[arg(short, long)]
        verbose: bool,
    },

    /// Install every skill to providers
    Sync {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Open a skill folder or its SKILL.md
    Open {
        /// Skill name
        skill: String,

        /// Open SKILL.md directly
        #[arg(short, long)]
        file: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RemoteTransport {
    Sse,
    Http,
}

#[derive(Debug, Subcommand)]
pub enum McpSubcommand {
    /// Add or replace an MCP server in the central config
    Add {
        /// Server name (letters, digits, hyphens, underscores)
        name: String,

        /// Command to launch a stdio server
        #[arg(long, required_unless_present = "url", conflicts_with = "url")]
        command: Option<String>,

        /// Argument passed to the command (repeatable)
        #[arg(long = "arg", allow_hyphen_values = true, requires = "command")]
        args: Vec<String>,

        /// Environment variable for the command, KEY=VALUE (repeatable)
        #[arg(long = "env", value_parser = parse_key_val, requires = "command")]
        env: Vec<(String, String)>,

        /// URL of a remote server
        #[arg(long)]
        url: Option<String>,

        /// Remote transport
        #[arg(long, value_enum, default_value_t = RemoteTransport::Http, requires = "url")]
        transport: RemoteTransport,

        /// HTTP header for a remote server, KEY=VALUE (repeatable)
        #[arg(long = "header", value_parser = parse_key_val, requires = "url")]
        headers: Vec<(String, String)>,

        /// Sync to all MCP providers after adding
        #[arg(long)]
        sync: bool,
    },

    /// List MCP servers in the central config
    List {
        /// Show which providers each server is synced to
        #[arg(short, long)]
        verbose: bool,
    },

    /// Merge central MCP servers into provider config files
    Sync {
        /// Comma-separated list of providers (default: all MCP providers)
        #[arg(short, long, value_delimiter = ',')]
        providers: Vec<String>,

        /// Write project-level config files instead of global ones
        #[arg(long)]
        project: bool,
    },

    /// Remove an MCP server from the central config
    Remove {
        /// Server name
        name: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List supported MCP providers
    Providers,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (default_scope, skills_repo, enabled_providers)
        key: String,
        /// Configuration value
        value: String,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key
        key: String,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{s}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Everything a command needs: resolved environment, dotai's paths, the
/// loaded config, and the project root.
pub struct Workspace {
    pub env: Environment,
    pub paths: Paths,
    pub config: ConfigStore,
    pub project_root: PathBuf,
}

impl Workspace {
    pub fn open(home: Option<&Path>, project_root: Option<PathBuf>) -> Result<Self> {
        let env = Environment::detect(home)?;
        let paths = Paths::new(&env);
        let config = ConfigStore::init(&paths).context("failed to initialize dotai config")?;
        let project_root = match project_root {
            Some(root) => root,
            None => std::env::current_dir().context("failed to determine current directory")?,
        };
        Ok(Self {
            env,
            paths,
            config,
            project_root,
        })
    }

    pub fn skills(&self) -> SkillStore {
        SkillStore::new(self.config.skills_dir())
    }

    pub fn mcp(&self) -> McpStore {
        McpStore::new(self.paths.mcp_file())
    }

    pub fn scope(&self, target: &TargetArgs) -> Scope {
        if target.project {
            Scope::Project
        } else if target.global {
            Scope::Global
        } else {
            self.config.config().default_scope
        }
    }

    /// Explicit `--providers`, every provider with `--all`, otherwise the
    /// enabled ones.
    pub fn skill_targets(&self, target: &TargetArgs) -> Vec<String> {
        if target.all {
            crate::providers::skill_provider_ids()
                .map(str::to_string)
                .collect()
        } else if !target.providers.is_empty() {
            target.providers.iter().map(|p| p.trim().to_string()).collect()
        } else {
            self.config.config().enabled_providers.clone()
        }
    }
}

/// Ask a yes/no question on stderr. Anything but `y`/`yes` is a no.
pub fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{prompt} [y/N] ");
    std::io::stderr().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    let answer = input.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

/// Print one line per provider and return `(succeeded, failed)`.
pub fn report<T>(results: &[ProviderOutcome<T>], describe: impl Fn(&T) -> String) -> (usize, usize) {
    for outcome in results {
        match &outcome.result {
            Ok(value) => println!("  {}: {}", outcome.provider_id, describe(value)),
            Err(e) => println!("  {}: FAILED - {e}", outcome.provider_id),
        }
    }
    let ok = results.iter().filter(|o| o.is_success()).count();
    (ok, results.len() - ok)
}
