//! User Configuration
//!
//! Optional `config.toml` supplying defaults for Gradle invocation options.
//! Command-line flags always win over values read here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OvrBuildError, Result};
use crate::request::LogLevel;

/// Environment variable overriding the configuration file location
pub const CONFIG_ENV_VAR: &str = "OVRBUILD_CONFIG";

/// Root project name Gradle reports when a task is missing
pub const DEFAULT_ROOT_PROJECT_NAME: &str = "OculusRoot";

/// Defaults for Gradle invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradleDefaults {
    /// Reuse the Gradle daemon unless `--no-daemon` is given
    pub daemon: bool,
    /// Log level used when `-log` is absent
    pub log_level: LogLevel,
    /// Always pass `--profile`
    pub profile: bool,
    /// Name of the root project in `settings.gradle`
    pub root_project_name: String,
}

impl Default for GradleDefaults {
    fn default() -> Self {
        Self {
            daemon: true,
            log_level: LogLevel::Quiet,
            profile: false,
            root_project_name: DEFAULT_ROOT_PROJECT_NAME.to_string(),
        }
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvrBuildConfig {
    pub gradle: GradleDefaults,
}

impl OvrBuildConfig {
    /// Location of the configuration file
    pub fn config_file() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("ovrbuild").join("config.toml"))
    }

    /// Load configuration, falling back to defaults when no file exists
    pub async fn load() -> Result<Self> {
        match Self::config_file() {
            Some(path) => Self::load_from(&path).await,
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        debug!("Loading config from {:?}", path);
        let contents = tokio::fs::read_to_string(path).await?;
        toml::from_str(&contents).map_err(|source| OvrBuildError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
