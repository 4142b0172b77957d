//! Configuration persistence utilities
//!
//! The clock face reads its style from a TOML file in the platform config
//! directory. A missing file is seeded with defaults so it can be edited.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    /// No platform config directory for the clock face
    NoConfigDir,
    /// Config file could not be read or written
    Io { path: PathBuf, source: io::Error },
    /// Config file is not valid TOML for the clock face
    Parse { path: PathBuf, source: toml::de::Error },
    /// Config could not be encoded as TOML
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoConfigDir => {
                write!(f, "No config directory for the clock face on this platform")
            }
            ConfigError::Io { path, source } => {
                write!(f, "Clock face config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "Clock face config {} is malformed: {}", path.display(), source)
            }
            ConfigError::Serialize(e) => write!(f, "Could not encode clock face config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::NoConfigDir => None,
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Serialize(e) => Some(e),
        }
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> ConfigError + '_ {
    move |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Get the base configuration directory
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "miui-alarm", "miui_alarm")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the configuration file path for a named clock face
pub fn config_path(clock_name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(format!("{}.toml", clock_name)))
}

/// Load configuration for a named clock face
///
/// Returns `None` if the config file doesn't exist yet.
/// Returns an error if the file exists but can't be parsed.
pub fn load_config<T: DeserializeOwned>(clock_name: &str) -> Result<Option<T>, ConfigError> {
    let path = config_path(clock_name).ok_or(ConfigError::NoConfigDir)?;
    read_config_file(&path)
}

/// Save configuration for a named clock face
pub fn save_config<T: Serialize>(clock_name: &str, config: &T) -> Result<(), ConfigError> {
    let path = config_path(clock_name).ok_or(ConfigError::NoConfigDir)?;
    write_config_file(&path, config)
}

fn read_config_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(io_error(path))?;
    let config: T = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded config from {}", path.display());
    Ok(Some(config))
}

fn write_config_file<T: Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents).map_err(io_error(path))?;
    log::info!("wrote config to {}", path.display());
    Ok(())
}
