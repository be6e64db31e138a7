use anyhow::Result;

use crate::cli::Workspace;
use crate::providers::SKILL_PROVIDERS;

pub fn run(ws: &Workspace) -> Result<()> {
    let enabled = &ws.config.config().enabled_providers;

    for provider in SKILL_PROVIDERS {
        let id = provider.id_str();
        let marker = if enabled.iter().any(|e| e == id) {
            " [enabled]"
        } else {
            ""
        };
        println!("  {id} ({}){marker}", provider.name);
        println!("    {} - {}", provider.description, provider.website);
        println!("    global:  {}", provider.global_dir(&ws.env).display());
        println!("    project: {}", provider.project_dir(&ws.project_root).display());
    }
    Ok(())
}
