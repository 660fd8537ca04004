//! Configuration management for producer.
//!
//! Handles loading and saving configuration from TOML files.
//! Config files are stored in platform-specific locations:
//!
//! - **macOS/Linux**: `~/.config/producer/config.toml`
//! - **Windows**: `%APPDATA%\producer\config.toml`
//!
//! # Example
//!
//! ```ignore
//! use producer_core::config::{Config, GitHubConfig};
//!
//! let mut config = Config::load()?.apply_env();
//! config.github = Some(GitHubConfig {
//!     username: "octocat".to_string(),
//!     token: "ghp_xxx".to_string(),
//! });
//! config.save()?;
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Config directory name.
const CONFIG_DIR_NAME: &str = "producer";

/// Changelog file used when none is configured.
pub const DEFAULT_CHANGELOG: &str = "CHANGELOG.md";

/// Placeholder shown instead of secrets.
const REDACTED: &str = "********";

// =============================================================================
// Configuration structures
// =============================================================================

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// GitHub credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GitHubConfig>,

    /// GitLab credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitlab: Option<GitLabConfig>,

    /// Project-level settings
    #[serde(default)]
    pub project: ProjectConfig,
}

/// GitHub credentials, sent as HTTP basic auth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitHubConfig {
    pub username: String,
    pub token: String,
}

/// GitLab credentials, sent as the `private_token` query parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitLabConfig {
    pub token: String,
}

/// Project-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Changelog file, relative to the repository root
    #[serde(default = "default_changelog")]
    pub changelog: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            changelog: default_changelog(),
        }
    }
}

fn default_changelog() -> String {
    DEFAULT_CHANGELOG.to_string()
}

// =============================================================================
// Config implementation
// =============================================================================

impl Config {
    /// Get the configuration directory path.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(CONFIG_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default location.
    ///
    /// Returns a default (empty) config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// Returns a default (empty) config if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = ?path, "Config file does not exist, using defaults");
            return Ok(Self::default());
        }

        debug!(path = ?path, "Loading config");

        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;

        info!(path = ?path, "Config loaded successfully");
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        debug!(path = ?path, "Saving config");

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        info!(path = ?path, "Config saved successfully");
        Ok(())
    }

    /// Overlay credentials from `GITHUB_USERNAME`, `GITHUB_TOKEN` and `GITLAB_TOKEN`.
    pub fn apply_env(self) -> Self {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    fn apply_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(username) = var("GITHUB_USERNAME") {
            self.github.get_or_insert_with(GitHubConfig::default).username = username;
        }
        if let Some(token) = var("GITHUB_TOKEN") {
            self.github.get_or_insert_with(GitHubConfig::default).token = token;
        }
        if let Some(token) = var("GITLAB_TOKEN") {
            self.gitlab.get_or_insert_with(GitLabConfig::default).token = token;
        }
        self
    }

    /// Copy of this config with tokens masked, for display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if let Some(github) = &mut config.github {
            github.token = mask(&github.token);
        }
        if let Some(gitlab) = &mut config.gitlab {
            gitlab.token = mask(&gitlab.token);
        }
        config
    }

    /// Set a configuration value by key path.
    ///
    /// Key format: `section.field` (e.g., `github.token`, `project.changelog`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let (section, field) = split_key(key)?;

        match section {
            "github" => {
                let config = self.github.get_or_insert_with(GitHubConfig::default);
                match field {
                    "username" | "user" => config.username = value.to_string(),
                    "token" => config.token = value.to_string(),
                    _ => return Err(unknown_field("GitHub", field)),
                }
            }
            "gitlab" => {
                let config = self.gitlab.get_or_insert_with(GitLabConfig::default);
                match field {
                    "token" => config.token = value.to_string(),
                    _ => return Err(unknown_field("GitLab", field)),
                }
            }
            "project" => match field {
                "changelog" => self.project.changelog = value.to_string(),
                _ => return Err(unknown_field("project", field)),
            },
            _ => {
                return Err(Error::Config(format!("Unknown config section: {}", section)));
            }
        }

        Ok(())
    }

    /// Get a configuration value by key path.
    ///
    /// Key format: `section.field` (e.g., `github.username`, `gitlab.token`)
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let (section, field) = split_key(key)?;

        match section {
            "github" => {
                let Some(config) = &self.github else {
                    return Ok(None);
                };
                match field {
                    "username" | "user" => Ok(Some(config.username.clone())),
                    "token" => Ok(Some(config.token.clone())),
                    _ => Err(unknown_field("GitHub", field)),
                }
            }
            "gitlab" => {
                let Some(config) = &self.gitlab else {
                    return Ok(None);
                };
                match field {
                    "token" => Ok(Some(config.token.clone())),
                    _ => Err(unknown_field("GitLab", field)),
                }
            }
            "project" => match field {
                "changelog" => Ok(Some(self.project.changelog.clone())),
                _ => Err(unknown_field("project", field)),
            },
            _ => Err(Error::Config(format!("Unknown config section: {}", section))),
        }
    }
}

fn split_key(key: &str) -> Result<(&str, &str)> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.len() != 2 {
        return Err(Error::Config(format!(
            "Invalid config key '{}'. Expected format: section.field",
            key
        )));
    }
    Ok((parts[0], parts[1]))
}

fn unknown_field(section: &str, field: &str) -> Error {
    Error::Config(format!("Unknown {} config field: {}", section, field))
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        REDACTED.to_string()
    }
}

// =============================================================================
// Tests
// =============================================================================
