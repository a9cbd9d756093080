// src/workspace/layout.rs

//! Absolute paths for every location the pipeline touches.
//!
//! All paths hang off one anchor directory (`base_dir`), so no step depends
//! on the process working directory or on what an earlier step did to it.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::config::Config;
use crate::errors::Result;
use crate::fs::FileSystem;

/// Environment variable overriding the anchor directory.
pub const BASE_DIR_ENV: &str = "BAXOO_HOME";

/// File name of the state marker inside the state directory.
pub const MARKER_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Directory the repository is cloned into (the clone runs from here).
    pub base_dir: PathBuf,
    /// `<base_dir>/<dir_name>`: the cloned workspace.
    pub workspace_dir: PathBuf,
    /// Name of the clone directory, as passed to the version-control client.
    pub workspace_name: String,
    pub state_dir: PathBuf,
    pub marker_file: PathBuf,
    /// Sub-projects in install order.
    pub subprojects: Vec<PathBuf>,
    pub config_dir: PathBuf,
    pub env_template: PathBuf,
    pub env_active: PathBuf,
    pub static_assets_dir: PathBuf,
}

impl Layout {
    /// Derive every path from an absolute anchor directory.
    pub fn new(base_dir: impl Into<PathBuf>, cfg: &Config) -> Self {
        let base_dir = base_dir.into();
        let workspace_dir = base_dir.join(&cfg.workspace.dir_name);
        let state_dir = workspace_dir.join(&cfg.workspace.state_dir);
        let marker_file = state_dir.join(MARKER_FILE_NAME);
        let subprojects = cfg
            .install
            .subprojects
            .iter()
            .map(|s| workspace_dir.join(s))
            .collect();
        let config_dir = workspace_dir.join(&cfg.env_file.config_dir);
        let env_template = config_dir.join(&cfg.env_file.template);
        let env_active = config_dir.join(&cfg.env_file.active);
        let static_assets_dir = workspace_dir.join(&cfg.install.static_assets);

        Self {
            base_dir,
            workspace_dir,
            workspace_name: cfg.workspace.dir_name.clone(),
            state_dir,
            marker_file,
            subprojects,
            config_dir,
            env_template,
            env_active,
            static_assets_dir,
        }
    }

    /// Resolve the anchor directory and build the layout.
    ///
    /// Priority:
    /// 1. `[workspace].base_dir` from the config file
    /// 2. `BAXOO_HOME`
    /// 3. the directory containing the running executable
    pub fn discover(fs: &dyn FileSystem, cfg: &Config) -> Result<Self> {
        let candidate = match &cfg.workspace.base_dir {
            Some(dir) => dir.clone(),
            None => match std::env::var_os(BASE_DIR_ENV) {
                Some(dir) if !dir.is_empty() => absolutize(Path::new(&dir))?,
                _ => executable_dir()?,
            },
        };

        let base_dir = if fs.is_dir(&candidate) {
            fs.canonicalize(&candidate)?
        } else {
            candidate
        };
        debug!(base_dir = ?base_dir, "resolved workspace anchor directory");

        Ok(Self::new(base_dir, cfg))
    }
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("reading current directory")?;
    Ok(cwd.join(path))
}

fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("locating the baxoo executable")?;
    let dir = exe
        .parent()
        .map(Path::to_path_buf)
        .with_context(|| format!("executable path {:?} has no parent directory", exe))?;
    Ok(dir)
}
