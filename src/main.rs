use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod error;
mod model;
mod paths;
mod providers;
mod store;
mod sync;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let default_filter = if cli.debug { "dotai=debug" } else { "dotai=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut ws = cli::Workspace::open(cli.home.as_deref(), cli.project_root)?;

    match cli.command {
        cli::Command::Skill(cmd) => cli::skill::run(&ws, cmd),
        cli::Command::Mcp(cmd) => cli::mcp::run(&ws, cmd),
        cli::Command::Providers => cli::providers::run(&ws),
        cli::Command::Config(cmd) => cli::config::run(&mut ws, cmd),
        cli::Command::Enable { provider } => cli::config::run_enable(&mut ws, &provider),
        cli::Command::Disable { provider } => cli::config::run_disable(&mut ws, &provider),
        cli::Command::Repo { print } => cli::open::run_repo(&ws, print),
    }
}
