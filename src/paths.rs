use std::path::{Path, PathBuf};

use crate::error::DotaiError;

const CONFIG_DIR: &str = ".dotai";
const SKILLS_DIR: &str = "skills";
const CONFIG_FILE: &str = "config.json";
const MCP_FILE: &str = "mcp_servers.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(windows) {
            Self::Windows
        } else {
            Self::Linux
        }
    }
}

/// Snapshot of the OS facts provider paths are derived from.
#[derive(Debug, Clone)]
pub struct Environment {
    pub home: PathBuf,
    pub platform: Platform,
    pub app_data: Option<PathBuf>,
}

impl Environment {
    pub fn detect(home_override: Option<&Path>) -> Result<Self, DotaiError> {
        let home = match home_override {
            Some(dir) => dir.to_path_buf(),
            None => dirs::home_dir().ok_or(DotaiError::HomeDirNotFound)?,
        };
        Ok(Self {
            home,
            platform: Platform::current(),
            app_data: std::env::var_os("APPDATA").map(PathBuf::from),
        })
    }

    /// Base directory for per-user application settings:
    /// `%APPDATA%` on Windows (`~\AppData\Roaming` when unset),
    /// `~/Library/Application Support` on macOS and `~/.config` elsewhere.
    pub fn app_config_dir(&self) -> PathBuf {
        match self.platform {
            Platform::Windows => self
                .app_data
                .clone()
                .unwrap_or_else(|| self.home.join("AppData").join("Roaming")),
            Platform::MacOs => self.home.join("Library").join("Application Support"),
            Platform::Linux => self.home.join(".config"),
        }
    }
}

/// Locations of dotai's own files.
#[derive(Debug, Clone)]
pub struct Paths {
    home: PathBuf,
}

impl Paths {
    pub fn new(env: &Environment) -> Self {
        Self {
            home: env.home.clone(),
        }
    }

    pub fn config_dir(&self) -> PathBuf {
        self.home.join(CONFIG_DIR)
    }

    pub fn skills_dir(&self) -> PathBuf {
        self.config_dir().join(SKILLS_DIR)
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir().join(CONFIG_FILE)
    }

    pub fn mcp_file(&self) -> PathBuf {
        self.config_dir().join(MCP_FILE)
    }

    pub fn expand_home(&self, path: &Path) -> PathBuf {
        match path.strip_prefix("~") {
            Ok(rest) => self.home.join(rest),
            Err(_) => path.to_path_buf(),
        }
    }
}
