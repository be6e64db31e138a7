use std::path::{Path, PathBuf};

use crate::model::Scope;
use crate::paths::Environment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillProviderId {
    ClaudeCode,
    Cursor,
    GeminiCli,
    OpenCode,
    CodexCli,
    Antigravity,
}

impl SkillProviderId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClaudeCode => "claude-code",
            Self::Cursor => "cursor",
            Self::GeminiCli => "gemini-cli",
            Self::OpenCode => "opencode",
            Self::CodexCli => "codex-cli",
            Self::Antigravity => "antigravity",
        }
    }
}

/// An assistant that loads skills from a directory of skill folders.
#[derive(Debug)]
pub struct SkillProvider {
    pub id: SkillProviderId,
    pub name: &'static str,
    pub description: &'static str,
    pub website: &'static str,
    /// Relative to the project root.
    pub project_path: &'static str,
}

pub static SKILL_PROVIDERS: &[SkillProvider] = &[
    SkillProvider {
        id: SkillProviderId::ClaudeCode,
        name: "Claude Code",
        description: "Anthropic Claude Code CLI",
        website: "https://claude.ai/code",
        project_path: ".claude/skills",
    },
    SkillProvider {
        id: SkillProviderId::Cursor,
        name: "Cursor",
        description: "Cursor AI IDE",
        website: "https://cursor.com",
        project_path: ".cursor/skills",
    },
    SkillProvider {
        id: SkillProviderId::GeminiCli,
        name: "Gemini CLI",
        description: "Google Gemini CLI",
        website: "https://geminicli.com",
        project_path: ".gemini/skills",
    },
    SkillProvider {
        id: SkillProviderId::OpenCode,
        name: "OpenCode",
        description: "OpenCode AI coding agent",
        website: "https://opencode.ai",
        project_path: ".opencode/skill",
    },
    SkillProvider {
        id: SkillProviderId::CodexCli,
        name: "Codex CLI",
        description: "OpenAI Codex CLI",
        website: "https://openai.com/codex",
        project_path: "skills",
    },
    SkillProvider {
        id: SkillProviderId::Antigravity,
        name: "Antigravity",
        description: "Antigravity agentic system",
        website: "https://github.com/vuralserhat86/antigravity-agentic-skills",
        project_path: ".agent/skills",
    },
];

fn global_skills_dir(id: SkillProviderId, env: &Environment) -> PathBuf {
    let home = &env.home;
    match id {
        SkillProviderId::ClaudeCode => home.join(".claude").join("skills"),
        SkillProviderId::Cursor => home.join(".cursor").join("skills"),
        SkillProviderId::GeminiCli => home.join(".gemini").join("skills"),
        SkillProviderId::OpenCode => home.join(".config").join("opencode").join("skill"),
        SkillProviderId::CodexCli => home.join(".codex").join("skills"),
        SkillProviderId::Antigravity => home.join(".gemini").join("antigravity").join("skills"),
    }
}

impl SkillProvider {
    pub fn id_str(&self) -> &'static str {
        self.id.as_str()
    }

    pub fn global_dir(&self, env: &Environment) -> PathBuf {
        global_skills_dir(self.id, env)
    }

    pub fn project_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(self.project_path)
    }

    pub fn skills_dir(&self, scope: Scope, env: &Environment, project_root: &Path) -> PathBuf {
        match scope {
            Scope::Global => self.global_dir(env),
            Scope::Project => self.project_dir(project_root),
        }
    }

    /// Where `skill` lives for this provider in the given scope.
    pub fn skill_path(
        &self,
        skill: &str,
        scope: Scope,
        env: &Environment,
        project_root: &Path,
    ) -> PathBuf {
        self.skills_dir(scope, env, project_root).join(skill)
    }
}

pub fn skill_provider(id: &str) -> Option<&'static SkillProvider> {
    SKILL_PROVIDERS.iter().find(|p| p.id_str() == id)
}

pub fn skill_provider_ids() -> impl Iterator<Item = &'static str> {
    SKILL_PROVIDERS.iter().map(SkillProvider::id_str)
}

/// [`SkillProvider::skill_path`] by provider id; `None` for unknown ids.
pub fn skill_target_path(
    provider_id: &str,
    scope: Scope,
    skill: &str,
    env: &Environment,
    project_root: &Path,
) -> Option<PathBuf> {
    skill_provider(provider_id).map(|p| p.skill_path(skill, scope, env, project_root))
}
