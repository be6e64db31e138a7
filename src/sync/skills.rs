use std::path::PathBuf;

use tracing::{debug, info};

use super::{ProviderOutcome, SyncEngine};
use crate::error::DotaiError;
use crate::model::Scope;
use crate::providers::{self, SkillProvider};
use crate::store::files;
use crate::store::skills::validate_skill_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UninstallOutcome {
    pub removed: bool,
    pub path: PathBuf,
}

/// Where a skill currently exists for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillInstallStatus {
    pub provider_id: &'static str,
    pub global: bool,
    pub global_path: PathBuf,
    pub project: bool,
    pub project_path: PathBuf,
}

fn lookup(provider_id: &str) -> Result<&'static SkillProvider, DotaiError> {
    providers::skill_provider(provider_id).ok_or_else(|| DotaiError::UnknownProvider {
        id: provider_id.to_string(),
    })
}

impl SyncEngine<'_> {
    /// Copy a central skill into one provider, replacing any previous copy.
    /// Returns the installed path.
    pub fn install_skill_to_provider(
        &self,
        skill_name: &str,
        provider_id: &str,
        scope: Scope,
    ) -> Result<PathBuf, DotaiError> {
        validate_skill_name(skill_name)?;
        let provider = lookup(provider_id)?;
        let skill = self.skills.get(skill_name)?;

        let target = provider.skill_path(skill_name, scope, self.env, &self.project_root);
        files::replace_dir(&skill.path, &target)?;
        info!(skill = skill_name, provider = provider_id, %scope, "installed skill");
        Ok(target)
    }

    pub fn install_skill<I, S>(
        &self,
        skill_name: &str,
        provider_ids: I,
        scope: Scope,
    ) -> Vec<ProviderOutcome<PathBuf>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.fan_out(provider_ids, |id| {
            self.install_skill_to_provider(skill_name, id, scope)
        })
    }

    /// Remove a provider's copy of a skill. Nothing to remove is not an
    /// error.
    pub fn uninstall_skill_from_provider(
        &self,
        skill_name: &str,
        provider_id: &str,
        scope: Scope,
    ) -> Result<UninstallOutcome, DotaiError> {
        validate_skill_name(skill_name)?;
        let path = providers::skill_target_path(
            provider_id,
            scope,
            skill_name,
            self.env,
            &self.project_root,
        )
        .ok_or_else(|| DotaiError::UnknownProvider {
            id: provider_id.to_string(),
        })?;
        let removed = files::remove_path(&path)?;
        if removed {
            info!(skill = skill_name, provider = provider_id, %scope, "uninstalled skill");
        } else {
            debug!(skill = skill_name, provider = provider_id, "skill not installed");
        }
        Ok(UninstallOutcome { removed, path })
    }

    pub fn uninstall_skill<I, S>(
        &self,
        skill_name: &str,
        provider_ids: I,
        scope: Scope,
    ) -> Vec<ProviderOutcome<UninstallOutcome>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.fan_out(provider_ids, |id| {
            self.uninstall_skill_from_provider(skill_name, id, scope)
        })
    }

    /// Existence of the skill's global and project copies for every skill
    /// provider. Contents are not compared.
    pub fn skill_install_status(&self, skill_name: &str) -> Vec<SkillInstallStatus> {
        providers::SKILL_PROVIDERS
            .iter()
            .map(|provider| {
                let global_path =
                    provider.skill_path(skill_name, Scope::Global, self.env, &self.project_root);
                let project_path =
                    provider.skill_path(skill_name, Scope::Project, self.env, &self.project_root);
                SkillInstallStatus {
                    provider_id: provider.id_str(),
                    global: global_path.exists(),
                    global_path,
                    project: project_path.exists(),
                    project_path,
                }
            })
            .collect()
    }
}
