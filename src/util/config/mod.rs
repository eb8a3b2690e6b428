//! Launch configuration.
//!
//! [`ConfigureOptions`] names the directories the engine works with at run
//! time. Values come from a TOML file named on the command line; every key is
//! optional, so a partial file works.
//!
//! # File format
//!
//! ```toml
//! data-path = "data"
//! settings-path = "settings"
//! saves-path = "saves"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Resolved launch directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigureOptions {
    /// Directory holding immutable game data.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    /// Directory holding user-editable settings.
    #[serde(default = "default_settings_path")]
    pub settings_path: PathBuf,
    /// Directory holding save games.
    #[serde(default = "default_saves_path")]
    pub saves_path: PathBuf,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data")
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("settings")
}

fn default_saves_path() -> PathBuf {
    PathBuf::from("saves")
}

impl Default for ConfigureOptions {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            settings_path: default_settings_path(),
            saves_path: default_saves_path(),
        }
    }
}

impl ConfigureOptions {
    /// Load options from a TOML file.
    ///
    /// Missing keys fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Render the options as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Write the options to a TOML file.
    pub fn save(
        &self,
        path: &Path,
    ) -> Result<(), ConfigError> {
        let content = self.to_toml()?;
        fs::write(path, content).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("cannot access config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not valid TOML for these options.
    #[error("cannot parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// The options could not be rendered as TOML.
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
