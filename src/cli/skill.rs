use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::{SkillSubcommand, TargetArgs, Workspace, confirm, open, report};
use crate::error::DotaiError;
use crate::store::SkillStore;
use crate::sync::SyncEngine;

pub fn run(ws: &Workspace, cmd: SkillSubcommand) -> Result<()> {
    match cmd {
        SkillSubcommand::Create {
            name,
            description,
            instructions,
            edit,
        } => run_create(ws, &name, &description, instructions.as_deref(), edit),
        SkillSubcommand::Install { skill, target } => run_install(ws, &skill, &target),
        SkillSubcommand::Uninstall { skill, target, yes } => {
            run_uninstall(ws, &skill, &target, yes)
        }
        SkillSubcommand::List { verbose } => run_list(ws, verbose),
        SkillSubcommand::Sync { target } => run_sync(ws, &target),
        SkillSubcommand::Open { skill, file } => run_open(ws, &skill, file),
    }
}

fn run_create(
    ws: &Workspace,
    name: &str,
    description: &str,
    instructions: Option<&str>,
    edit: bool,
) -> Result<()> {
    let created = ws
        .skills()
        .create(name, description, instructions)
        .with_context(|| format!("failed to create skill '{name}'"))?;

    println!("Created skill '{}' at {}", created.name, created.path.display());
    println!("Install it with `dotai skill install {}`", created.name);

    if edit {
        open::open_in_editor(&created.file_path)?;
    }
    Ok(())
}

/// A name already in the repository wins; otherwise an existing folder is
/// imported first.
fn resolve_skill(skills: &SkillStore, skill: &str) -> Result<String> {
    match skills.get(skill) {
        Ok(found) => Ok(found.name),
        Err(DotaiError::SkillNotFound { .. }) if Path::new(skill).is_dir() => {
            let imported = skills
                .import(Path::new(skill))
                .with_context(|| format!("failed to import skill from {skill}"))?;
            println!(
                "Imported '{}' into {}",
                imported.name,
                imported.path.display()
            );
            Ok(imported.name)
        }
        Err(e) => Err(e.into()),
    }
}

fn run_install(ws: &Workspace, skill: &str, target: &TargetArgs) -> Result<()> {
    let skills = ws.skills();
    let mcp = ws.mcp();
    let name = resolve_skill(&skills, skill)?;

    let providers = ws.skill_targets(target);
    if providers.is_empty() {
        println!("No providers enabled. Enable one with `dotai enable <id>` or pass --providers.");
        return Ok(());
    }

    let scope = ws.scope(target);
    let engine = SyncEngine::new(&ws.env, &skills, &mcp, &ws.project_root);

    println!(
        "Installing '{name}' to {} provider(s) ({scope})",
        providers.len()
    );
    let results = engine.install_skill(&name, &providers, scope);
    let (installed, failed) = report(&results, |path| format!("installed -> {}", path.display()));

    println!("Install complete: {installed} installed, {failed} failed");
    Ok(())
}

fn run_uninstall(ws: &Workspace, skill: &str, target: &TargetArgs, yes: bool) -> Result<()> {
    let providers = ws.skill_targets(target);
    if providers.is_empty() {
        println!("No providers enabled. Enable one with `dotai enable <id>` or pass --providers.");
        return Ok(());
    }
    let scope = ws.scope(target);

    if !yes
        && !confirm(&format!(
            "Uninstall '{skill}' from {} provider(s) ({scope})?",
            providers.len()
        ))?
    {
        println!("Cancelled.");
        return Ok(());
    }

    let skills = ws.skills();
    let mcp = ws.mcp();
    let engine = SyncEngine::new(&ws.env, &skills, &mcp, &ws.project_root);
    let results = engine.uninstall_skill(skill, &providers, scope);
    let (removed, failed) = report(&results, |outcome| {
        if outcome.removed {
            format!("removed {}", outcome.path.display())
        } else {
            "not installed".to_string()
        }
    });

    println!("Uninstall complete: {removed} processed, {failed} failed");
    Ok(())
}

fn run_list(ws: &Workspace, verbose: bool) -> Result<()> {
    let skills = ws.skills();
    let all: Vec<_> = skills.list().collect();

    if all.is_empty() {
        println!(
            "No skills in {}. Create one with `dotai skill create`.",
            skills.root().display()
        );
        return Ok(());
    }

    let mcp = ws.mcp();
    let engine = SyncEngine::new(&ws.env, &skills, &mcp, &ws.project_root);

    for skill in &all {
        let desc = if skill.description.is_empty() {
            String::new()
        } else {
            format!(" - {}", skill.description)
        };
        println!("  {}{}", skill.name, desc);

        if verbose {
            println!("    path: {}", skill.path.display());
            if skill.folder != skill.name {
                println!("    folder: {}", skill.folder);
            }
            if !skill.metadata.is_empty() {
                let keys: Vec<&str> = skill.metadata.keys().map(String::as_str).collect();
                println!("    metadata: {}", keys.join(", "));
            }
            println!("    instructions: {} line(s)", skill.body.lines().count());
            let mut installed = Vec::new();
            for status in engine.skill_install_status(&skill.name) {
                if status.global {
                    installed.push(format!(
                        "{} (global): {}",
                        status.provider_id,
                        status.global_path.display()
                    ));
                }
                if status.project {
                    installed.push(format!(
                        "{} (project): {}",
                        status.provider_id,
                        status.project_path.display()
                    ));
                }
            }
            if installed.is_empty() {
                println!("    not installed");
            } else {
                println!("    installed:");
                for line in &installed {
                    println!("      {line}");
                }
            }
        }
    }
    Ok(())
}

fn run_sync(ws: &Workspace, target: &TargetArgs) -> Result<()> {
    let skills = ws.skills();
    let names: Vec<String> = skills.list().map(|s| s.name).collect();
    if names.is_empty() {
        println!("No skills to sync. Create one with `dotai skill create`.");
        return Ok(());
    }

    let providers = ws.skill_targets(target);
    if providers.is_empty() {
        println!("No providers enabled. Enable one with `dotai enable <id>` or pass --providers.");
        return Ok(());
    }

    let scope = ws.scope(target);
    let mcp = ws.mcp();
    let engine = SyncEngine::new(&ws.env, &skills, &mcp, &ws.project_root);

    let mut synced = 0;
    let mut failed = 0;
    for name in &names {
        println!("{name}:");
        let results = engine.install_skill(name, &providers, scope);
        let (ok, err) = report(&results, |_| "ok".to_string());
        synced += ok;
        failed += err;
    }

    println!(
        "Sync complete: {synced} synced, {failed} failed ({} skill(s), {scope})",
        names.len()
    );
    Ok(())
}

fn run_open(ws: &Workspace, skill: &str, file: bool) -> Result<()> {
    let found = ws.skills().get(skill)?;
    if file {
        open::open_in_editor(&found.file_path)
    } else {
        open::open_path(&found.path)
    }
}
