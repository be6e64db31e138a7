use std::collections::BTreeMap;

use anyhow::{Context, Result};

use crate::cli::{McpSubcommand, RemoteTransport, Workspace, confirm, report};
use crate::model::{McpServer, Scope};
use crate::providers::MCP_PROVIDERS;
use crate::sync::SyncEngine;

pub fn run(ws: &Workspace, cmd: McpSubcommand) -> Result<()> {
    match cmd {
        McpSubcommand::Add {
            name,
            command,
            args,
            env,
            url,
            transport,
            headers,
            sync,
        } => {
            let server = match (command, url) {
                (Some(command), _) => McpServer::Stdio {
                    command,
                    args,
                    env: env.into_iter().collect(),
                },
                (None, Some(url)) => {
                    let headers: BTreeMap<_, _> = headers.into_iter().collect();
                    match transport {
                        RemoteTransport::Sse => McpServer::Sse { url, headers },
                        RemoteTransport::Http => McpServer::Http { url, headers },
                    }
                }
                (None, None) => anyhow::bail!("either --command or --url is required"),
            };
            run_add(ws, &name, server, sync)
        }
        McpSubcommand::List { verbose } => run_list(ws, verbose),
        McpSubcommand::Sync { providers, project } => {
            let scope = if project { Scope::Project } else { Scope::Global };
            run_sync(ws, &providers, scope)
        }
        McpSubcommand::Remove { name, yes } => run_remove(ws, &name, yes),
        McpSubcommand::Providers => run_providers(ws),
    }
}

fn run_add(ws: &Workspace, name: &str, server: McpServer, sync: bool) -> Result<()> {
    let store = ws.mcp();
    let replaced = store.contains(name);
    let summary = format!("{}: {}", server.transport(), server.summary());
    store
        .add(name, server)
        .with_context(|| format!("failed to add MCP server '{name}'"))?;

    if replaced {
        println!("Updated MCP server '{name}' ({summary})");
    } else {
        println!("Added MCP server '{name}' ({summary})");
    }

    if sync {
        run_sync(ws, &[], Scope::Global)?;
    } else {
        println!("Push it to your tools with `dotai mcp sync`");
    }
    Ok(())
}

fn run_list(ws: &Workspace, verbose: bool) -> Result<()> {
    let store = ws.mcp();
    let servers = store.list();

    if servers.is_empty() {
        println!(
            "No MCP servers configured in {}. Add one with `dotai mcp add`.",
            store.path().display()
        );
        return Ok(());
    }

    let skills = ws.skills();
    let engine = SyncEngine::new(&ws.env, &skills, &store, &ws.project_root);

    for (name, server) in &servers {
        println!("  {name} ({}) {}", server.transport(), server.summary());
        if verbose {
            let synced: Vec<String> = engine
                .mcp_install_status(name)
                .into_iter()
                .filter(|s| s.installed)
                .map(|s| format!("{} ({})", s.provider_id, s.provider_name))
                .collect();
            if synced.is_empty() {
                println!("    not synced");
            } else {
                println!("    synced to: {}", synced.join(", "));
            }
        }
    }
    Ok(())
}

fn run_sync(ws: &Workspace, providers: &[String], scope: Scope) -> Result<()> {
    let store = ws.mcp();
    let count = store.entries().len();
    if count == 0 {
        println!("No MCP servers configured. Add one with `dotai mcp add`.");
        return Ok(());
    }

    let skills = ws.skills();
    let engine = SyncEngine::new(&ws.env, &skills, &store, &ws.project_root);
    let selected = (!providers.is_empty()).then_some(providers);

    println!("Syncing {count} MCP server(s) ({scope})");
    let results = engine.sync_mcp_to_providers(selected, scope);
    let (synced, failed) = report(&results, |outcome| match &outcome.path {
        Some(path) => format!("{} server(s) -> {}", outcome.synced, path.display()),
        None => "nothing to sync".to_string(),
    });

    println!("Sync complete: {synced} synced, {failed} failed");
    Ok(())
}

fn run_remove(ws: &Workspace, name: &str, yes: bool) -> Result<()> {
    let store = ws.mcp();
    if !store.contains(name) {
        anyhow::bail!("MCP server '{name}' not found");
    }

    if !yes && !confirm(&format!("Remove MCP server '{name}'?"))? {
        println!("Cancelled.");
        return Ok(());
    }

    store
        .remove(name)
        .with_context(|| format!("failed to remove MCP server '{name}'"))?;
    println!("Removed MCP server '{name}'");
    println!("Provider config files still list it; edit them to remove it there.");
    Ok(())
}

fn run_providers(ws: &Workspace) -> Result<()> {
    for provider in MCP_PROVIDERS {
        println!("  {} ({})", provider.id_str(), provider.name);
        println!("    {}", provider.description);
        println!(
            "    global:  {} [{}]",
            provider.global_path(&ws.env).display(),
            provider.key_for(Scope::Global)
        );
        match provider.project_path(&ws.project_root) {
            Some(path) => println!(
                "    project: {} [{}]",
                path.display(),
                provider.key_for(Scope::Project)
            ),
            None => println!("    project: (not supported)"),
        }
        if let Some(note) = provider.note {
            println!("    note: {note}");
        }
    }
    Ok(())
}
