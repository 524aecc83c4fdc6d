//! Share bridge configuration, loaded from YAML.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PACKAGE_NAME: &str = "io.kristal.shareplugin";
pub const DEFAULT_STORAGE_DIR_NAME: &str = "CobaltiansStorage";
pub const DEFAULT_CHOOSER_TITLE: &str = "Share {type} with...";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShareConfig {
    /// Root under which the per-application storage directory lives.
    pub storage_root: PathBuf,
    pub package_name: String,
    pub storage_dir_name: String,
    /// Wrap every action in a chooser instead of launching it directly.
    pub force_chooser: bool,
    /// Chooser title; `{type}` is replaced with the share type.
    pub chooser_title: String,
    pub fetch_timeout_secs: u64,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            storage_root: dirs::data_local_dir().unwrap_or_else(std::env::temp_dir),
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            storage_dir_name: DEFAULT_STORAGE_DIR_NAME.to_string(),
            force_chooser: true,
            chooser_title: DEFAULT_CHOOSER_TITLE.to_string(),
            fetch_timeout_secs: 30,
        }
    }
}

impl ShareConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_yaml(&content).map_err(|error| match error {
            ConfigError::Yaml(source) => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document means "all defaults".
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(content).map_err(ConfigError::Yaml)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_required("package_name", &self.package_name)?;
        validate_required("storage_dir_name", &self.storage_dir_name)?;

        if self.fetch_timeout_secs == 0 {
            return Err("fetch_timeout_secs must be greater than zero".to_string());
        }

        Ok(())
    }

    /// `<storage_root>/Android/data/<package_name>/<storage_dir_name>`
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_root
            .join("Android")
            .join("data")
            .join(&self.package_name)
            .join(&self.storage_dir_name)
    }

    pub fn chooser_title_for(&self, share_type: &str) -> String {
        self.chooser_title.replace("{type}", share_type)
    }
}

fn validate_required(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} cannot be empty"));
    }

    Ok(())
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse config: {0}")]
    Yaml(#[source] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
