//! YAML source loading and config-path resolution.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, warn};

use crate::schema::ServerConfig;

/// Environment variable naming a config file to use when no explicit path is
/// given.
pub const CONFIG_PATH_VAR: &str = "ARBOR_CONFIG_PATH";

/// Why a config file could not be applied. Callers log and keep the previous
/// configuration; none of these escape the public surface.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("config file does not exist")]
    Missing,

    #[error("failed to read config file: {0}")]
    Unreadable(std::io::Error),

    #[error("config file is empty or contains only comments")]
    Empty,

    #[error("invalid YAML: {0}")]
    Parse(serde_yaml::Error),

    #[error("top-level YAML value is not a mapping")]
    NotAMapping,

    #[error("config file does not match the schema: {0}")]
    Schema(serde_yaml::Error),
}

impl ConfigFileError {
    /// Emit the log record for this failure at its contractual severity:
    /// missing or empty files warn, structural problems are errors.
    pub fn log(&self, path: &Path) {
        match self {
            ConfigFileError::Missing | ConfigFileError::Empty => {
                warn!(path = %path.display(), "{self}, keeping current configuration");
            }
            _ => {
                error!(path = %path.display(), "{self}, keeping current configuration");
            }
        }
    }
}

/// Load a `ServerConfig` from a YAML file.
///
/// A bad file never partially applies: the function either returns a fully
/// validated config or an error describing why the file was rejected.
pub fn load_file(path: &Path) -> Result<ServerConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::Missing);
    }

    let raw = fs::read_to_string(path).map_err(ConfigFileError::Unreadable)?;
    if raw.trim().is_empty() {
        return Err(ConfigFileError::Empty);
    }

    let value: serde_yaml::Value = serde_yaml::from_str(&raw).map_err(ConfigFileError::Parse)?;
    // A comment-only file parses to null
    if value.is_null() {
        return Err(ConfigFileError::Empty);
    }
    if !value.is_mapping() {
        return Err(ConfigFileError::NotAMapping);
    }

    serde_yaml::from_value(value).map_err(ConfigFileError::Schema)
}

/// Resolve the config path: explicit path > `ARBOR_CONFIG_PATH` env >
/// platform user config directory.
///
/// The user-config-dir fallback is consulted only when the file actually
/// exists there; explicit and env-var paths are returned as given so a
/// missing file surfaces through the loader's own handling.
pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    if let Ok(p) = std::env::var(CONFIG_PATH_VAR) {
        return Some(PathBuf::from(p));
    }
    let default = dirs::config_dir()?.join("arbor").join("config.yaml");
    default.exists().then_some(default)
}
