use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const SKILL_FILE: &str = "SKILL.md";
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// A skill as found in the central repository.
#[derive(Debug, Clone)]
pub struct Skill {
    pub name: String,
    pub description: String,
    pub metadata: BTreeMap<String, serde_yaml::Value>,
    pub body: String,
    /// Directory name under the skills root; may differ from `name`.
    pub folder: String,
    pub path: PathBuf,
    pub file_path: PathBuf,
}

/// Frontmatter and body of a `SKILL.md`.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillDocument {
    pub name: String,
    pub description: String,
    pub metadata: BTreeMap<String, serde_yaml::Value>,
    pub body: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawFrontmatter {
    name: Option<String>,
    description: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_yaml::Value>,
}

/// Parse a skill document. A document without frontmatter is still a skill,
/// named after `fallback_name` with an empty description.
pub fn parse_document(content: &str, fallback_name: &str) -> Result<SkillDocument, String> {
    let (yaml, body) = split_frontmatter(content)?;

    let raw = match yaml {
        Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str::<RawFrontmatter>(yaml)
            .map_err(|e| format!("invalid YAML frontmatter: {e}"))?,
        _ => RawFrontmatter::default(),
    };

    Ok(SkillDocument {
        name: raw
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| fallback_name.to_string()),
        description: raw.description.unwrap_or_default(),
        metadata: raw.extra,
        body: body.to_string(),
    })
}

fn split_frontmatter(content: &str) -> Result<(Option<&str>, &str), String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(after_open) = content
        .strip_prefix("---\r\n")
        .or_else(|| content.strip_prefix("---\n"))
    else {
        return Ok((None, content));
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Ok((Some(yaml), body));
        }
        offset += line.len();
    }
    Err("frontmatter is missing its closing '---'".to_string())
}

#[derive(Serialize)]
struct NewFrontmatter<'a> {
    name: &'a str,
    description: &'a str,
}

/// Generated `SKILL.md` for a new skill.
pub fn render_template(
    name: &str,
    description: &str,
    instructions: &str,
) -> Result<String, serde_yaml::Error> {
    let frontmatter = serde_yaml::to_string(&NewFrontmatter { name, description })?;
    let instructions = if instructions.trim().is_empty() {
        format!(
            "Instructions for the {name} skill.

## When to use this skill

- Use this when...
- This is helpful for...

## How to use it

Step-by-step guidance, conventions, and patterns the agent should follow.

## Examples

Include examples to help the agent understand expected behavior.
"
        )
    } else {
        instructions.to_string()
    };

    Ok(format!(
        "---\n{frontmatter}---\n\n# {name}\n\n{instructions}\n"
    ))
}
