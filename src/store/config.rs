use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use crate::error::DotaiError;
use crate::model::GlobalConfig;
use crate::paths::Paths;
use crate::store::files;

pub struct ConfigStore {
    paths: Paths,
    config: GlobalConfig,
}

impl ConfigStore {
    /// Create dotai's directories and a default config file if missing,
    /// then load the config.
    pub fn init(paths: &Paths) -> Result<Self, DotaiError> {
        files::ensure_dir(&paths.config_dir())?;
        files::ensure_dir(&paths.skills_dir())?;

        let config_file = paths.config_file();
        if !config_file.exists() {
            files::write_json(&config_file, &GlobalConfig::default())?;
            debug!(path = %config_file.display(), "wrote default config");
        }
        Ok(Self::open(paths))
    }

    /// Load the config; missing fields take their defaults and an
    /// unreadable file falls back to the defaults entirely.
    pub fn open(paths: &Paths) -> Self {
        Self {
            paths: paths.clone(),
            config: files::load_json_or_default(&paths.config_file()),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.paths.config_file()
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut GlobalConfig {
        &mut self.config
    }

    pub fn save(&mut self) -> Result<(), DotaiError> {
        self.config.updated_at = Some(Utc::now());
        files::write_json(&self.paths.config_file(), &self.config)
    }

    /// The skills repository: the configured `skillsRepo`, or
    /// `~/.dotai/skills`.
    pub fn skills_dir(&self) -> PathBuf {
        match &self.config.skills_repo {
            Some(repo) => self.paths.expand_home(repo),
            None => self.paths.skills_dir(),
        }
    }

    /// Returns `false` when the provider was already enabled.
    pub fn enable_provider(&mut self, id: &str) -> Result<bool, DotaiError> {
        if self.config.enabled_providers.iter().any(|p| p == id) {
            return Ok(false);
        }
        self.config.enabled_providers.push(id.to_string());
        self.save()?;
        Ok(true)
    }

    pub fn disable_provider(&mut self, id: &str) -> Result<(), DotaiError> {
        self.config.enabled_providers.retain(|p| p != id);
        self.save()
    }

    pub fn set_skills_repo(&mut self, repo: Option<&Path>) {
        self.config.skills_repo = repo.map(Path::to_path_buf);
    }
}
