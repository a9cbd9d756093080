// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::OutputMode;

pub const DEFAULT_REPOSITORY_URL: &str = "https://github.com/leo-lb29/baxoo-app.git";

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [workspace]
/// dir_name = "baxoo-app"
///
/// [repository]
/// url = "https://github.com/leo-lb29/baxoo-app.git"
///
/// [install]
/// subprojects = ["dash", "app_desktop"]
/// ```
///
/// All sections are optional and have reasonable defaults; an absent file is
/// equivalent to an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    #[serde(default)]
    pub workspace: WorkspaceSection,

    #[serde(default)]
    pub repository: RepositorySection,

    #[serde(default)]
    pub install: InstallSection,

    #[serde(default)]
    pub env_file: EnvFileSection,
}

/// `[workspace]` section: where the application gets cloned.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceSection {
    /// Anchor directory the workspace is created in.
    ///
    /// When unset, `BAXOO_HOME` is used, then the directory containing the
    /// `baxoo` executable.
    #[serde(default)]
    pub base_dir: Option<PathBuf>,

    /// Name of the clone directory inside `base_dir`.
    #[serde(default = "default_dir_name")]
    pub dir_name: String,

    /// Hidden directory inside the workspace holding the state marker.
    #[serde(default = "default_state_dir")]
    pub state_dir: String,
}

fn default_dir_name() -> String {
    "baxoo-app".to_string()
}

fn default_state_dir() -> String {
    ".baxoo".to_string()
}

impl Default for WorkspaceSection {
    fn default() -> Self {
        Self {
            base_dir: None,
            dir_name: default_dir_name(),
            state_dir: default_state_dir(),
        }
    }
}

/// `[repository]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositorySection {
    #[serde(default = "default_url")]
    pub url: String,
}

fn default_url() -> String {
    DEFAULT_REPOSITORY_URL.to_string()
}

impl Default for RepositorySection {
    fn default() -> Self {
        Self { url: default_url() }
    }
}

/// `[install]` section: dependency installation commands and locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallSection {
    /// Sub-projects (relative to the workspace) that get both JS and PHP
    /// dependencies installed, in this order.
    #[serde(default = "default_subprojects")]
    pub subprojects: Vec<String>,

    #[serde(default = "default_js_install")]
    pub js_install: String,

    #[serde(default = "default_php_install")]
    pub php_install: String,

    /// Static-assets project (relative to the workspace), JS dependencies only.
    #[serde(default = "default_static_assets")]
    pub static_assets: String,

    /// Output visibility for the package manager invocations.
    #[serde(default)]
    pub output: OutputMode,
}

fn default_subprojects() -> Vec<String> {
    vec!["dash".to_string(), "app_desktop".to_string()]
}

fn default_js_install() -> String {
    "npm install".to_string()
}

fn default_php_install() -> String {
    "composer install".to_string()
}

fn default_static_assets() -> String {
    "static/v1/dash".to_string()
}

impl Default for InstallSection {
    fn default() -> Self {
        Self {
            subprojects: default_subprojects(),
            js_install: default_js_install(),
            php_install: default_php_install(),
            static_assets: default_static_assets(),
            output: OutputMode::default(),
        }
    }
}

/// `[env_file]` section: the environment template copied into place.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvFileSection {
    #[serde(default = "default_config_dir")]
    pub config_dir: String,

    #[serde(default = "default_template")]
    pub template: String,

    #[serde(default = "default_active")]
    pub active: String,
}

fn default_config_dir() -> String {
    "allcode/config".to_string()
}

fn default_template() -> String {
    ".env.example".to_string()
}

fn default_active() -> String {
    ".env".to_string()
}

impl Default for EnvFileSection {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            template: default_template(),
            active: default_active(),
        }
    }
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfig>` (see `validate.rs`), so
/// holders can rely on every path being a safe relative path and every
/// command being non-empty.
#[derive(Debug, Clone)]
pub struct Config {
    pub workspace: WorkspaceSection,
    pub repository: RepositorySection,
    pub install: InstallSection,
    pub env_file: EnvFileSection,
}

impl Config {
    pub(crate) fn new_unchecked(raw: RawConfig) -> Self {
        Self {
            workspace: raw.workspace,
            repository: raw.repository,
            install: raw.install,
            env_file: raw.env_file,
        }
    }
}
