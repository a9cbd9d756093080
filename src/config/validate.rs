// src/config/validate.rs

use std::path::{Component, Path};

use crate::config::model::{Config, RawConfig};
use crate::errors::{BaxooError, Result};

impl TryFrom<RawConfig> for Config {
    type Error = crate::errors::BaxooError;

    fn try_from(raw: RawConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(Config::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfig) -> Result<()> {
    validate_repository(cfg)?;
    validate_workspace(cfg)?;
    validate_install(cfg)?;
    validate_env_file(cfg)?;
    Ok(())
}

fn validate_repository(cfg: &RawConfig) -> Result<()> {
    let url = cfg.repository.url.trim();
    if url.is_empty() {
        return Err(BaxooError::ConfigError(
            "[repository].url must not be empty".to_string(),
        ));
    }
    // The URL is interpolated into a shell command line.
    if url.chars().any(|c| c.is_whitespace() || "'\"`$;&|<>".contains(c)) {
        return Err(BaxooError::ConfigError(format!(
            "[repository].url contains characters that are not allowed: {url}"
        )));
    }
    Ok(())
}

fn validate_workspace(cfg: &RawConfig) -> Result<()> {
    ensure_single_component("[workspace].dir_name", &cfg.workspace.dir_name)?;
    ensure_single_component("[workspace].state_dir", &cfg.workspace.state_dir)?;
    if let Some(base) = &cfg.workspace.base_dir {
        if !base.is_absolute() {
            return Err(BaxooError::ConfigError(format!(
                "[workspace].base_dir must be an absolute path (got {:?})",
                base
            )));
        }
    }
    Ok(())
}

fn validate_install(cfg: &RawConfig) -> Result<()> {
    if cfg.install.subprojects.is_empty() {
        return Err(BaxooError::ConfigError(
            "[install].subprojects must list at least one sub-project".to_string(),
        ));
    }
    for sub in cfg.install.subprojects.iter() {
        ensure_relative("[install].subprojects", sub)?;
    }
    ensure_relative("[install].static_assets", &cfg.install.static_assets)?;

    for (key, cmd) in [
        ("[install].js_install", &cfg.install.js_install),
        ("[install].php_install", &cfg.install.php_install),
    ] {
        if cmd.trim().is_empty() {
            return Err(BaxooError::ConfigError(format!("{key} must not be empty")));
        }
    }
    Ok(())
}

fn validate_env_file(cfg: &RawConfig) -> Result<()> {
    ensure_relative("[env_file].config_dir", &cfg.env_file.config_dir)?;
    ensure_single_component("[env_file].template", &cfg.env_file.template)?;
    ensure_single_component("[env_file].active", &cfg.env_file.active)?;
    if cfg.env_file.template == cfg.env_file.active {
        return Err(BaxooError::ConfigError(format!(
            "[env_file].template and [env_file].active must differ (both are '{}')",
            cfg.env_file.active
        )));
    }
    Ok(())
}

/// A non-empty relative path made only of normal components (no `..`, no
/// root, no prefix).
fn ensure_relative(key: &str, value: &str) -> Result<()> {
    let path = Path::new(value);
    let valid = !value.trim().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !valid {
        return Err(BaxooError::ConfigError(format!(
            "{key} must be a relative path inside the workspace (got '{value}')"
        )));
    }
    Ok(())
}

/// A plain file or directory name, safe to pass on a shell command line.
fn ensure_single_component(key: &str, value: &str) -> Result<()> {
    let mut components = Path::new(value).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    let shell_safe = !value
        .chars()
        .any(|c| c.is_whitespace() || "'\"`$;&|<>\\".contains(c));
    if !single_normal || !shell_safe {
        return Err(BaxooError::ConfigError(format!(
            "{key} must be a plain name without separators or shell metacharacters (got '{value}')"
        )));
    }
    Ok(())
}
