//! User configuration file
//!
//! Stored in ~/.config/dropbignore/config.toml. Every key is optional; a
//! missing file behaves like an empty one.

use crate::config::sync_config::SyncConfig;
use crate::core::error::{DropbignoreError, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default synchronized folder below the home directory
const DEFAULT_ROOT_DIR: &str = "Dropbox";

/// Contents of the user configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// Synchronized folder (default: ~/Dropbox)
    pub root: Option<PathBuf>,
    /// Ignore file (default: <root>/.dropbignore)
    pub ignore_file: Option<PathBuf>,
    /// Replaces the built-in pattern list
    pub builtin_patterns: Option<Vec<String>>,
    /// Synchronize attributes in parallel
    pub parallel: Option<bool>,
}

/// Values given on the command line; they win over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root: Option<PathBuf>,
    pub ignore_file: Option<PathBuf>,
    pub parallel: bool,
    pub dry_run: bool,
    pub max_depth: Option<usize>,
}

impl GlobalConfig {
    /// Load global configuration from disk
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            // Return default configuration if file doesn't exist
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: GlobalConfig =
            toml::from_str(&content).map_err(|e| DropbignoreError::ConfigurationError {
                reason: format!("Failed to parse {}: {}", config_path.display(), e),
            })?;

        Ok(config)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| DropbignoreError::ConfigurationError {
                reason: format!("Failed to serialize config: {}", e),
            })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Get the path to the global configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        let user_dirs = UserDirs::new().ok_or(DropbignoreError::HomeDirectoryNotFound)?;

        Ok(user_dirs
            .home_dir()
            .join(".config")
            .join("dropbignore")
            .join("config.toml"))
    }

    /// The synchronized folder used when nothing else is configured
    pub fn default_root() -> Result<PathBuf> {
        let user_dirs = UserDirs::new().ok_or(DropbignoreError::HomeDirectoryNotFound)?;
        Ok(user_dirs.home_dir().join(DEFAULT_ROOT_DIR))
    }

    /// Merge command-line overrides, file values and defaults into run parameters
    pub fn resolve(&self, overrides: ConfigOverrides) -> Result<SyncConfig> {
        let root = match overrides.root.or_else(|| self.root.clone()) {
            Some(root) => root,
            None => Self::default_root()?,
        };

        let mut config = SyncConfig::new(root)
            .dry_run(overrides.dry_run)
            .parallel(overrides.parallel || self.parallel.unwrap_or(false))
            .max_depth(overrides.max_depth);

        if let Some(ignore_file) = overrides.ignore_file.or_else(|| self.ignore_file.clone()) {
            config = config.with_ignore_file(ignore_file);
        }
        if let Some(patterns) = &self.builtin_patterns {
            config = config.with_builtin_patterns(patterns.iter().cloned());
        }

        Ok(config)
    }

    /// List all configured values as key/value pairs
    pub fn list(&self) -> Vec<(String, String)> {
        let mut entries = Vec::new();

        if let Some(root) = &self.root {
            entries.push(("root".to_string(), root.display().to_string()));
        }
        if let Some(ignore_file) = &self.ignore_file {
            entries.push(("ignore_file".to_string(), ignore_file.display().to_string()));
        }
        if let Some(patterns) = &self.builtin_patterns {
            entries.push(("builtin_patterns".to_string(), patterns.join(", ")));
        }
        if let Some(parallel) = self.parallel {
            entries.push(("parallel".to_string(), parallel.to_string()));
        }

        entries
    }
}
