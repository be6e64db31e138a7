use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::Workspace;
use crate::paths::Platform;

pub fn run_repo(ws: &Workspace, print: bool) -> Result<()> {
    let repo = ws.config.skills_dir();
    if print {
        println!("{}", repo.display());
        return Ok(());
    }
    open_path(&repo)
}

/// Open `path` with `$EDITOR`, then `$VISUAL`, then the platform's text
/// editor. The editor is not waited on.
pub fn open_in_editor(path: &Path) -> Result<()> {
    let configured = ["EDITOR", "VISUAL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty());

    let words: Vec<String> = match configured {
        Some(editor) => editor.split_whitespace().map(str::to_string).collect(),
        None => default_editor(Platform::current())
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };
    let Some((program, args)) = words.split_first() else {
        anyhow::bail!("no editor configured; set EDITOR");
    };
    spawn_detached(program, args, path)?;
    println!("Opened {} in {program}", path.display());
    Ok(())
}

/// Open a folder or file with the platform's file opener.
pub fn open_path(path: &Path) -> Result<()> {
    let program = file_opener(Platform::current());
    spawn_detached(program, &[], path)?;
    println!("Opened {}", path.display());
    Ok(())
}

fn default_editor(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::MacOs => &["open", "-t"],
        Platform::Windows => &["notepad"],
        Platform::Linux => &["xdg-open"],
    }
}

fn file_opener(platform: Platform) -> &'static str {
    match platform {
        Platform::MacOs => "open",
        Platform::Windows => "explorer",
        Platform::Linux => "xdg-open",
    }
}

fn spawn_detached(program: &str, args: &[String], path: &Path) -> Result<()> {
    debug!(program, path = %path.display(), "spawning");
    Command::new(program)
        .args(args)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to launch {program}"))?;
    Ok(())
}
