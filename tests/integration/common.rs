use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub struct TestEnv {
    pub home_dir: TempDir,
    pub project_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home_dir: TempDir::new().expect("failed to create home_dir"),
            project_dir: TempDir::new().expect("failed to create project_dir"),
        }
    }

    pub fn home(&self) -> &Path {
        self.home_dir.path()
    }

    pub fn project(&self) -> &Path {
        self.project_dir.path()
    }

    /// Build a dotai Command sandboxed to home_dir, with cwd = project_dir.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dotai"));
        cmd.arg("--home")
            .arg(self.home())
            .arg("--project-root")
            .arg(self.project())
            .current_dir(self.project())
            .env_remove("DOTAI_HOME")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn skills_dir(&self) -> PathBuf {
        self.home().join(".dotai/skills")
    }

    pub fn mcp_file(&self) -> PathBuf {
        self.home().join(".dotai/mcp_servers.json")
    }

    /// Shorthand: create a skill in the central repository.
    pub fn create_skill(&self, name: &str, description: &str) {
        self.cmd()
            .args(["skill", "create", name, "--description", description])
            .assert()
            .success();
    }

    /// Create a skill folder outside the repository and return its path.
    /// Structure:
    ///   external/<name>/
    ///     SKILL.md
    ///     scripts/run.sh
    pub fn create_external_skill(&self, name: &str) -> PathBuf {
        let root = self.project().join("external").join(name);
        fs::create_dir_all(root.join("scripts")).unwrap();
        fs::write(
            root.join("SKILL.md"),
            format!("---\nname: {name}\ndescription: Imported skill\n---\n\n# {name}\n"),
        )
        .unwrap();
        fs::write(root.join("scripts/run.sh"), "#!/bin/sh\necho run\n").unwrap();
        root
    }

    pub fn write_json(&self, path: &Path, value: &serde_json::Value) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    }

    pub fn read_json(&self, path: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }
}
