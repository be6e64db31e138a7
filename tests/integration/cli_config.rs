use std::fs;

use predicates::prelude::*;

use crate::common::TestEnv;

#[test]
fn first_run_creates_config() {
    let env = TestEnv::new();

    env.cmd().args(["config", "show"]).assert().success();

    let config = env.read_json(&env.home().join(".dotai/config.json"));
    assert_eq!(config["defaultScope"], "global");
    assert_eq!(config["enabledProviders"].as_array().unwrap().len(), 6);
    assert!(config["createdAt"].is_string());
    assert!(env.skills_dir().is_dir());
}

#[test]
fn config_show_defaults() {
    let env = TestEnv::new();

    env.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default scope:  global"))
        .stdout(predicate::str::contains("claude-code"))
        .stdout(predicate::str::contains(".dotai/skills"));
}

#[test]
fn config_set_default_scope() {
    let env = TestEnv::new();

    env.cmd()
        .args(["config", "set", "default_scope", "project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set default_scope = project"));

    env.cmd()
        .args(["config", "get", "default_scope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project"));

    let config = env.read_json(&env.home().join(".dotai/config.json"));
    assert!(config["updatedAt"].is_string());
}

#[test]
fn config_set_invalid_scope() {
    let env = TestEnv::new();

    env.cmd()
        .args(["config", "set", "default_scope", "galaxy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid scope"));
}

#[test]
fn config_unknown_key() {
    let env = TestEnv::new();

    env.cmd()
        .args(["config", "set", "nope", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown config key"));

    env.cmd()
        .args(["config", "get", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown config key"));
}

#[test]
fn custom_skills_repo_is_used() {
    let env = TestEnv::new();
    let repo = env.project().join("my-skills");

    env.cmd()
        .args(["config", "set", "skills_repo"])
        .arg(&repo)
        .assert()
        .success();

    env.cmd()
        .args(["repo", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("my-skills"));

    env.create_skill("lint", "Lint things");
    assert!(repo.join("lint/SKILL.md").exists());

    env.cmd()
        .args(["config", "set", "skills_repo", "none"])
        .assert()
        .success();
    env.cmd()
        .args(["config", "get", "skills_repo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(not set)"));
}

#[test]
fn skills_repo_expands_tilde() {
    let env = TestEnv::new();

    env.cmd()
        .args(["config", "set", "skills_repo", "~/dotfiles/skills"])
        .assert()
        .success();

    let expected = env.home().join("dotfiles/skills");
    env.cmd()
        .args(["repo", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_string_lossy().into_owned()));
}

#[test]
fn enable_and_disable_provider() {
    let env = TestEnv::new();

    env.cmd()
        .args(["disable", "cursor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Disabled cursor"));

    env.cmd()
        .args(["config", "get", "enabled_providers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cursor").not());

    env.cmd()
        .args(["enable", "cursor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Enabled cursor"));

    env.cmd()
        .args(["enable", "cursor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already enabled"));
}

#[test]
fn enable_unknown_provider_fails() {
    let env = TestEnv::new();

    env.cmd()
        .args(["enable", "notepad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown provider: notepad"));
}

#[test]
fn corrupt_config_falls_back_to_defaults() {
    let env = TestEnv::new();
    let path = env.home().join(".dotai/config.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ broken").unwrap();

    env.cmd()
        .args(["config", "get", "default_scope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("global"));
}

#[test]
fn unknown_config_keys_survive_a_save() {
    let env = TestEnv::new();
    let path = env.home().join(".dotai/config.json");
    env.write_json(
        &path,
        &serde_json::json!({ "defaultScope": "global", "theme": "dark" }),
    );

    env.cmd()
        .args(["config", "set", "default_scope", "project"])
        .assert()
        .success();

    let config = env.read_json(&path);
    assert_eq!(config["theme"], "dark");
    assert_eq!(config["defaultScope"], "project");
}

#[test]
fn providers_marks_enabled() {
    let env = TestEnv::new();
    env.cmd().args(["disable", "codex-cli"]).assert().success();

    env.cmd()
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("claude-code (Claude Code) [enabled]"))
        .stdout(predicate::str::contains("codex-cli (Codex CLI)\n"));
}

#[test]
fn home_from_environment_variable() {
    let env = TestEnv::new();

    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("dotai"));
    cmd.env("DOTAI_HOME", env.home())
        .current_dir(env.project())
        .args(["repo", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".dotai/skills"));

    assert!(env.home().join(".dotai/config.json").exists());
}
