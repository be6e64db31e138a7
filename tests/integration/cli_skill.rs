use std::fs;

use predicates::prelude::*;

use crate::common::TestEnv;

#[test]
fn create_writes_skill_md() {
    let env = TestEnv::new();

    env.cmd()
        .args(["skill", "create", "code-review", "-d", "Review pull requests"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created skill 'code-review'"));

    let content = fs::read_to_string(env.skills_dir().join("code-review/SKILL.md")).unwrap();
    assert!(content.starts_with("---\n"));
    assert!(content.contains("name: code-review"));
    assert!(content.contains("description: Review pull requests"));
}

#[test]
fn create_with_instructions_uses_them_as_body() {
    let env = TestEnv::new();

    env.cmd()
        .args(["skill", "create", "tidy", "-d", "Tidy up"])
        .args(["--instructions", "Always run the formatter."])
        .assert()
        .success();

    let content = fs::read_to_string(env.skills_dir().join("tidy/SKILL.md")).unwrap();
    assert!(content.contains("Always run the formatter."));
}

#[test]
fn create_twice_fails_and_keeps_content() {
    let env = TestEnv::new();
    env.create_skill("lint", "First");
    let path = env.skills_dir().join("lint/SKILL.md");
    let before = fs::read_to_string(&path).unwrap();

    env.cmd()
        .args(["skill", "create", "lint", "-d", "Second"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn create_rejects_invalid_name() {
    let env = TestEnv::new();

    env.cmd()
        .args(["skill", "create", "Bad_Name", "-d", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid name"));

    assert!(!env.skills_dir().join("Bad_Name").exists());
}

#[test]
fn create_rejects_long_description() {
    let env = TestEnv::new();
    let description = "x".repeat(201);

    env.cmd()
        .args(["skill", "create", "wordy", "-d", &description])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid description"));
}

#[test]
fn list_empty_and_populated() {
    let env = TestEnv::new();

    env.cmd()
        .args(["skill", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No skills"));

    env.create_skill("alpha", "First skill");
    env.create_skill("beta", "Second skill");

    env.cmd()
        .args(["skill", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha - First skill"))
        .stdout(predicate::str::contains("beta - Second skill"));
}

#[test]
fn list_skips_folders_without_skill_md() {
    let env = TestEnv::new();
    env.create_skill("real", "A real skill");
    fs::create_dir_all(env.skills_dir().join("junk")).unwrap();

    env.cmd()
        .args(["skill", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("real"))
        .stdout(predicate::str::contains("junk").not());
}

#[test]
fn install_copies_to_selected_provider() {
    let env = TestEnv::new();
    env.create_skill("lint", "Lint things");
    fs::write(env.skills_dir().join("lint/notes.txt"), "extra file\n").unwrap();

    env.cmd()
        .args(["skill", "install", "lint", "-p", "claude-code"])
        .assert()
        .success()
        .stdout(predicate::str::contains("claude-code: installed"))
        .stdout(predicate::str::contains("1 installed, 0 failed"));

    let target = env.home().join(".claude/skills/lint");
    assert_eq!(
        fs::read(target.join("SKILL.md")).unwrap(),
        fs::read(env.skills_dir().join("lint/SKILL.md")).unwrap()
    );
    assert_eq!(
        fs::read_to_string(target.join("notes.txt")).unwrap(),
        "extra file\n"
    );
    assert!(!env.home().join(".cursor/skills/lint").exists());
}

#[test]
fn install_defaults_to_enabled_providers() {
    let env = TestEnv::new();
    env.create_skill("lint", "Lint things");

    env.cmd()
        .args(["config", "set", "enabled_providers", "cursor,gemini-cli"])
        .assert()
        .success();

    env.cmd()
        .args(["skill", "install", "lint"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 installed"));

    assert!(env.home().join(".cursor/skills/lint/SKILL.md").exists());
    assert!(env.home().join(".gemini/skills/lint/SKILL.md").exists());
    assert!(!env.home().join(".claude/skills/lint").exists());
}

#[test]
fn install_all_covers_every_provider() {
    let env = TestEnv::new();
    env.create_skill("lint", "Lint things");
    env.cmd().args(["disable", "cursor"]).assert().success();

    env.cmd()
        .args(["skill", "install", "lint", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6 installed, 0 failed"));

    assert!(env.home().join(".cursor/skills/lint/SKILL.md").exists());
    assert!(env.home().join(".codex/skills/lint/SKILL.md").exists());
    assert!(
        env.home()
            .join(".gemini/antigravity/skills/lint/SKILL.md")
            .exists()
    );
}

#[test]
fn install_project_scope() {
    let env = TestEnv::new();
    env.create_skill("lint", "Lint things");

    env.cmd()
        .args(["skill", "install", "lint", "-p", "cursor,codex-cli", "--project"])
        .assert()
        .success();

    assert!(env.project().join(".cursor/skills/lint/SKILL.md").exists());
    assert!(env.project().join("skills/lint/SKILL.md").exists());
    assert!(!env.home().join(".cursor/skills/lint").exists());
}

#[test]
fn install_twice_replaces_stale_files() {
    let env = TestEnv::new();
    env.create_skill("lint", "Lint things");

    env.cmd()
        .args(["skill", "install", "lint", "-p", "cursor"])
        .assert()
        .success();
    let target = env.home().join(".cursor/skills/lint");
    fs::write(target.join("stale.txt"), "left behind").unwrap();

    env.cmd()
        .args(["skill", "install", "lint", "-p", "cursor"])
        .assert()
        .success();

    assert!(target.join("SKILL.md").exists());
    assert!(!target.join("stale.txt").exists());
}

#[test]
fn install_reports_unknown_provider_without_failing_others() {
    let env = TestEnv::new();
    env.create_skill("lint", "Lint things");

    env.cmd()
        .args(["skill", "install", "lint", "-p", "cursor,notepad"])
        .assert()
        .success()
        .stdout(predicate::str::contains("notepad: FAILED - unknown provider"))
        .stdout(predicate::str::contains("1 installed, 1 failed"));

    assert!(env.home().join(".cursor/skills/lint/SKILL.md").exists());
}

#[test]
fn install_unknown_skill_fails() {
    let env = TestEnv::new();

    env.cmd()
        .args(["skill", "install", "ghost", "-p", "cursor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn install_from_path_imports_first() {
    let env = TestEnv::new();
    let source = env.create_external_skill("deploy");

    env.cmd()
        .args(["skill", "install"])
        .arg(&source)
        .args(["-p", "claude-code"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 'deploy'"))
        .stdout(predicate::str::contains("claude-code: installed"));

    assert!(env.skills_dir().join("deploy/scripts/run.sh").exists());
    assert!(
        env.home()
            .join(".claude/skills/deploy/scripts/run.sh")
            .exists()
    );
}

#[test]
fn uninstall_removes_provider_copy_only() {
    let env = TestEnv::new();
    env.create_skill("lint", "Lint things");
    env.cmd()
        .args(["skill", "install", "lint", "-p", "cursor"])
        .assert()
        .success();

    env.cmd()
        .args(["skill", "uninstall", "lint", "-p", "cursor,claude-code", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cursor: removed"))
        .stdout(predicate::str::contains("claude-code: not installed"));

    assert!(!env.home().join(".cursor/skills/lint").exists());
    assert!(env.skills_dir().join("lint/SKILL.md").exists());
}

#[test]
fn uninstall_rejects_names_that_escape_the_skills_dir() {
    let env = TestEnv::new();
    let claude = env.home().join(".claude");
    fs::create_dir_all(claude.join("skills/keep")).unwrap();
    fs::write(claude.join("settings.json"), "{}").unwrap();

    for name in ["..", ""] {
        env.cmd()
            .args(["skill", "uninstall", name, "-p", "claude-code", "--global", "-y"])
            .assert()
            .success()
            .stdout(predicate::str::contains("claude-code: FAILED"))
            .stdout(predicate::str::contains("0 processed, 1 failed"));
    }

    assert!(claude.join("settings.json").exists());
    assert!(claude.join("skills/keep").is_dir());
}

#[test]
fn sync_uses_folder_name_when_metadata_name_is_invalid() {
    let env = TestEnv::new();
    let folder = env.skills_dir().join("evil");
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join("SKILL.md"), "---\nname: \"..\"\ndescription: x\n---\n").unwrap();
    let claude = env.home().join(".claude");
    fs::create_dir_all(&claude).unwrap();
    fs::write(claude.join("settings.json"), "{}").unwrap();

    env.cmd()
        .args(["skill", "sync", "-p", "claude-code", "--global"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 synced, 0 failed"));

    assert!(claude.join("settings.json").exists());
    assert!(claude.join("skills/evil/SKILL.md").exists());
}

#[test]
fn uninstall_cancelled_at_prompt() {
    let env = TestEnv::new();
    env.create_skill("lint", "Lint things");
    env.cmd()
        .args(["skill", "install", "lint", "-p", "cursor"])
        .assert()
        .success();

    env.cmd()
        .args(["skill", "uninstall", "lint", "-p", "cursor"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."));

    assert!(env.home().join(".cursor/skills/lint").exists());
}

#[test]
fn list_verbose_shows_install_locations() {
    let env = TestEnv::new();
    env.create_skill("lint", "Lint things");
    env.cmd()
        .args(["skill", "install", "lint", "-p", "cursor"])
        .assert()
        .success();
    env.cmd()
        .args(["skill", "install", "lint", "-p", "gemini-cli", "--project"])
        .assert()
        .success();

    env.cmd()
        .args(["skill", "list", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cursor (global)"))
        .stdout(predicate::str::contains("gemini-cli (project)"))
        .stdout(predicate::str::contains(
            env.home().join(".cursor/skills/lint").display().to_string(),
        ))
        .stdout(predicate::str::contains(
            env.project().join(".gemini/skills/lint").display().to_string(),
        ));
}

#[test]
fn sync_installs_every_skill() {
    let env = TestEnv::new();
    env.create_skill("alpha", "First");
    env.create_skill("beta", "Second");

    env.cmd()
        .args(["skill", "sync", "-p", "opencode"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 synced, 0 failed"));

    assert!(env.home().join(".config/opencode/skill/alpha/SKILL.md").exists());
    assert!(env.home().join(".config/opencode/skill/beta/SKILL.md").exists());
}

#[test]
fn default_scope_project_applies_to_install() {
    let env = TestEnv::new();
    env.create_skill("lint", "Lint things");
    env.cmd()
        .args(["config", "set", "default_scope", "project"])
        .assert()
        .success();

    env.cmd()
        .args(["skill", "install", "lint", "-p", "claude-code"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(project)"));
    assert!(env.project().join(".claude/skills/lint/SKILL.md").exists());

    env.cmd()
        .args(["skill", "install", "lint", "-p", "claude-code", "--global"])
        .assert()
        .success();
    assert!(env.home().join(".claude/skills/lint/SKILL.md").exists());
}

#[test]
fn open_file_uses_editor() {
    let env = TestEnv::new();
    env.create_skill("lint", "Lint things");

    env.cmd()
        .env("EDITOR", "true")
        .args(["skill", "open", "lint", "--file"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SKILL.md in true"));
}
