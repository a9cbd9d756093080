// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{Config, RawConfig};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfig`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfig = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Config> {
    let raw_config = load_from_path(&path)?;
    let config = Config::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the configuration for a run.
///
/// - An explicit path must exist and is loaded + validated.
/// - Otherwise [`default_config_path`] is used if present.
/// - Otherwise built-in defaults apply.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        debug!(path = ?path, "loading explicit config file");
        return load_and_validate(path);
    }

    let default_path = default_config_path();
    if default_path.is_file() {
        debug!(path = ?default_path, "loading default config file");
        return load_and_validate(&default_path);
    }

    debug!("no config file found; using built-in defaults");
    Config::try_from(RawConfig::default())
}

/// `Baxoo.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Baxoo.toml")
}
