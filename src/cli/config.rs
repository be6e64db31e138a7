use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::{ConfigSubcommand, Workspace};
use crate::error::DotaiError;
use crate::model::Scope;
use crate::providers;

pub fn run(ws: &mut Workspace, cmd: ConfigSubcommand) -> Result<()> {
    match cmd {
        ConfigSubcommand::Show => run_show(ws),
        ConfigSubcommand::Set { key, value } => run_set(ws, key, value),
        ConfigSubcommand::Get { key } => run_get(ws, key),
    }
}

fn run_show(ws: &Workspace) -> Result<()> {
    let config = ws.config.config();
    println!("Config file:    {}", ws.config.path().display());
    println!("Skills repo:    {}", ws.config.skills_dir().display());
    println!("MCP servers:    {}", ws.paths.mcp_file().display());
    println!("Default scope:  {}", config.default_scope);
    println!("Enabled:        {}", format_providers(&config.enabled_providers));
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(config).context("failed to render config")?
    );
    Ok(())
}

fn run_set(ws: &mut Workspace, key: String, value: String) -> Result<()> {
    match key.as_str() {
        "default_scope" => {
            let scope: Scope = value.parse()?;
            ws.config.config_mut().default_scope = scope;
        }
        "skills_repo" => {
            if value.is_empty() || value == "none" {
                ws.config.set_skills_repo(None);
            } else if value.starts_with('~') {
                ws.config.set_skills_repo(Some(Path::new(&value)));
            } else {
                let repo = std::path::absolute(&value)
                    .with_context(|| format!("invalid skills_repo path: {value}"))?;
                ws.config.set_skills_repo(Some(&repo));
            }
        }
        "enabled_providers" => {
            let ids: Vec<String> = value
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect();
            for id in &ids {
                ensure_skill_provider(id)?;
            }
            ws.config.config_mut().enabled_providers = ids;
        }
        _ => anyhow::bail!(
            "unknown config key: {key}\nValid keys: default_scope, skills_repo, enabled_providers"
        ),
    }

    ws.config.save().context("failed to save config")?;
    println!("Set {key} = {value}");
    Ok(())
}

fn run_get(ws: &Workspace, key: String) -> Result<()> {
    let config = ws.config.config();
    match key.as_str() {
        "default_scope" => println!("{}", config.default_scope),
        "skills_repo" => match &config.skills_repo {
            Some(repo) => println!("{}", repo.display()),
            None => println!("(not set)"),
        },
        "enabled_providers" => println!("{}", config.enabled_providers.join(",")),
        _ => anyhow::bail!("unknown config key: {key}"),
    }
    Ok(())
}

pub fn run_enable(ws: &mut Workspace, provider: &str) -> Result<()> {
    ensure_skill_provider(provider)?;
    if ws
        .config
        .enable_provider(provider)
        .context("failed to save config")?
    {
        println!("Enabled {provider}");
    } else {
        println!("{provider} is already enabled");
    }
    Ok(())
}

pub fn run_disable(ws: &mut Workspace, provider: &str) -> Result<()> {
    ensure_skill_provider(provider)?;
    ws.config
        .disable_provider(provider)
        .context("failed to save config")?;
    println!("Disabled {provider}");
    Ok(())
}

fn ensure_skill_provider(id: &str) -> Result<(), DotaiError> {
    match providers::skill_provider(id) {
        Some(_) => Ok(()),
        None => Err(DotaiError::UnknownProvider { id: id.to_string() }),
    }
}

fn format_providers(ids: &[String]) -> String {
    if ids.is_empty() {
        "(none)".to_string()
    } else {
        ids.join(", ")
    }
}
