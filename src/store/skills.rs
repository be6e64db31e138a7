use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::DotaiError;
use crate::model::skill::{self, MAX_DESCRIPTION_LEN, SKILL_FILE};
use crate::model::Skill;
use crate::store::files;

/// Result of [`SkillStore::create`].
#[derive(Debug, Clone)]
pub struct CreatedSkill {
    pub name: String,
    pub path: PathBuf,
    pub file_path: PathBuf,
}

/// Result of [`SkillStore::import`].
#[derive(Debug, Clone)]
pub struct ImportedSkill {
    pub name: String,
    pub path: PathBuf,
}

/// The central skills repository: one folder per skill, each holding a
/// `SKILL.md`.
pub struct SkillStore {
    root: PathBuf,
}

impl SkillStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn skill_dir(&self, folder: &str) -> PathBuf {
        self.root.join(folder)
    }

    pub fn create(
        &self,
        name: &str,
        description: &str,
        instructions: Option<&str>,
    ) -> Result<CreatedSkill, DotaiError> {
        validate_skill_name(name)?;
        validate_description(description)?;

        let path = self.skill_dir(name);
        if path.exists() {
            return Err(DotaiError::SkillExists {
                name: name.to_string(),
            });
        }

        files::ensure_dir(&path)?;
        let file_path = path.join(SKILL_FILE);
        let content = skill::render_template(name, description, instructions.unwrap_or_default())?;
        fs::write(&file_path, content).map_err(|source| DotaiError::FileWrite {
            path: file_path.clone(),
            source,
        })?;
        debug!(skill = name, path = %path.display(), "created skill");

        Ok(CreatedSkill {
            name: name.to_string(),
            path,
            file_path,
        })
    }

    /// Skills found under the root, read fresh on every call. Folders
    /// without a readable `SKILL.md` are skipped.
    pub fn list(&self) -> impl Iterator<Item = Skill> + '_ {
        fs::read_dir(&self.root)
            .into_iter()
            .flatten()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
            .filter_map(|entry| {
                let folder = entry.file_name().to_string_lossy().into_owned();
                match load_skill(&entry.path(), &folder) {
                    Ok(skill) => Some(skill),
                    Err(e) => {
                        debug!(folder = %folder, "skipping: {e}");
                        None
                    }
                }
            })
    }

    /// Look up a skill by folder name, then by the name in its metadata.
    pub fn get(&self, name: &str) -> Result<Skill, DotaiError> {
        let path = self.skill_dir(name);
        if is_plain_name(name) && path.join(SKILL_FILE).is_file() {
            return load_skill(&path, name);
        }
        self.list()
            .find(|s| s.name == name)
            .ok_or_else(|| DotaiError::SkillNotFound {
                name: name.to_string(),
            })
    }

    /// Copy an external skill folder into the repository, replacing any
    /// skill of the same name.
    pub fn import(&self, source: &Path) -> Result<ImportedSkill, DotaiError> {
        let file_path = source.join(SKILL_FILE);
        if !file_path.is_file() {
            return Err(DotaiError::SkillParse {
                path: file_path,
                reason: format!("no {SKILL_FILE} found"),
            });
        }
        let folder = source
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_default();
        let imported = load_skill(source, &folder)?;
        validate_skill_name(&imported.name)?;

        let target = self.skill_dir(&imported.name);
        files::ensure_dir(&self.root)?;
        files::replace_dir(source, &target)?;
        debug!(skill = %imported.name, from = %source.display(), "imported skill");

        Ok(ImportedSkill {
            name: imported.name,
            path: target,
        })
    }
}

fn load_skill(dir: &Path, folder: &str) -> Result<Skill, DotaiError> {
    let file_path = dir.join(SKILL_FILE);
    if !file_path.is_file() {
        return Err(DotaiError::SkillNotFound {
            name: folder.to_string(),
        });
    }
    let content = fs::read_to_string(&file_path).map_err(|source| DotaiError::FileRead {
        path: file_path.clone(),
        source,
    })?;
    let doc = skill::parse_document(&content, folder).map_err(|reason| DotaiError::SkillParse {
        path: file_path.clone(),
        reason,
    })?;

    let name = if validate_skill_name(&doc.name).is_ok() {
        doc.name
    } else {
        validate_skill_name(folder)?;
        warn!(folder, name = %doc.name, "invalid skill name in metadata; using the folder name");
        folder.to_string()
    };

    Ok(Skill {
        name,
        description: doc.description,
        metadata: doc.metadata,
        body: doc.body,
        folder: folder.to_string(),
        path: dir.to_path_buf(),
        file_path,
    })
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}

pub fn validate_skill_name(name: &str) -> Result<(), DotaiError> {
    if name.is_empty() {
        return Err(DotaiError::InvalidName {
            name: name.to_string(),
            reason: "name cannot be empty".to_string(),
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(DotaiError::InvalidName {
            name: name.to_string(),
            reason: "skill names may only contain lowercase letters, digits, and hyphens"
                .to_string(),
        });
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), DotaiError> {
    if description.trim().is_empty() {
        return Err(DotaiError::InvalidDescription(
            "description is required".to_string(),
        ));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(DotaiError::InvalidDescription(format!(
            "description must be {MAX_DESCRIPTION_LEN} characters or less"
        )));
    }
    Ok(())
}
