//! Configuration file management.
//!
//! Handles reading, writing, and validating `.lockstep.toml`. Every section is
//! optional; a missing file yields the built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::types::SecretKey;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `.lockstep.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the secret set is read from
    pub source: SourceConfig,
    /// Remote secret store settings
    pub remote: RemoteConfig,
    /// Console report settings
    pub report: ReportConfig,
    /// CI publishing settings
    pub github: GithubConfig,
}

/// Source file section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Path to the `KEY=VALUE` file
    pub file: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(constants::ENV_FILE),
        }
    }
}

/// Remote store section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Identifier of the secret record
    pub secret_id: String,
    /// Description used when the record is created
    pub description: String,
    /// AWS region; `AWS_REGION` takes precedence when set
    pub region: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            secret_id: constants::SECRET_ID.to_string(),
            description: constants::SECRET_DESCRIPTION.to_string(),
            region: constants::DEFAULT_REGION.to_string(),
        }
    }
}

impl RemoteConfig {
    /// Effective region, preferring the `AWS_REGION` environment variable.
    pub fn region(&self) -> String {
        std::env::var("AWS_REGION")
            .ok()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| self.region.clone())
    }
}

/// Report section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Replacement printed for sensitive values
    pub mask: String,
    /// Key-name substrings that mark a value as sensitive
    pub markers: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            mask: constants::MASK.to_string(),
            markers: constants::SENSITIVE_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

/// GitHub Actions section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// REST API base URL
    pub api_url: String,
    /// Allow-list of variables published to the repository
    pub required: Vec<SecretKey>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            owner: constants::GITHUB_OWNER.to_string(),
            repo: constants::GITHUB_REPO.to_string(),
            api_url: constants::GITHUB_API_URL.to_string(),
            required: constants::REQUIRED_CI_VARS
                .iter()
                .map(|v| v.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, falling back to defaults if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse` if the file exists
    /// but cannot be read, and `ConfigError::Invalid` if validation fails.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            debug!("no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        config.validate()?;

        debug!(
            secret_id = %config.remote.secret_id,
            required = config.github.required.len(),
            "config loaded"
        );
        Ok(config)
    }

    /// Write configuration to `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AlreadyExists` if the file exists and `force` is false.
    pub fn save(&self, path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists(path.display().to_string()).into());
        }

        debug!(path = %path.display(), "saving config");
        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Validate the configuration contents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        fn require(field: &str, value: &str) -> Result<()> {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{} must not be empty", field)).into());
            }
            Ok(())
        }

        require("remote.secret_id", &self.remote.secret_id)?;
        require("report.mask", &self.report.mask)?;
        require("github.owner", &self.github.owner)?;
        require("github.repo", &self.github.repo)?;
        require("github.api_url", &self.github.api_url)?;

        if self.report.markers.iter().any(|m| m.is_empty()) {
            return Err(ConfigError::Invalid("report.markers contains an empty marker".into()).into());
        }
        if self.github.required.iter().any(|v| v.trim().is_empty()) {
            return Err(
                ConfigError::Invalid("github.required contains an empty name".into()).into(),
            );
        }

        Ok(())
    }
}
