// src/errors.rs

//! Crate-wide error type.
//!
//! The provisioning variants mirror the abort reasons of the pipeline. Each
//! one maps to a single diagnostic line and exit status `1`; only
//! [`BaxooError::Unexpected`] (and friends) print their full cause chain.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BaxooError {
    #[error("the project is already installed (marker at {})", .marker.display())]
    AlreadyInstalled { marker: PathBuf },

    #[error(
        "the directory '{}' is not empty ({entries} entries); please ensure it's empty before cloning",
        .path.display()
    )]
    DirtyTarget { path: PathBuf, entries: usize },

    #[error("you do not have permission to clone the repository {url}: {detail}")]
    ClonePermissionDenied { url: String, detail: String },

    #[error("cloning {url} failed: {detail}")]
    CloneFailed { url: String, detail: String },

    #[error("`{command}` failed in {}: {detail}", .dir.display())]
    DependencyInstallFailed {
        command: String,
        dir: PathBuf,
        detail: String,
    },

    #[error("static assets directory {} does not exist", .path.display())]
    StaticAssetsPathMissing { path: PathBuf },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl BaxooError {
    /// Whether this is one of the anticipated abort reasons of the pipeline.
    ///
    /// Anticipated errors are reported with a single line; everything else is
    /// reported with its full cause chain.
    pub fn is_anticipated(&self) -> bool {
        matches!(
            self,
            BaxooError::AlreadyInstalled { .. }
                | BaxooError::DirtyTarget { .. }
                | BaxooError::ClonePermissionDenied { .. }
                | BaxooError::CloneFailed { .. }
                | BaxooError::DependencyInstallFailed { .. }
                | BaxooError::StaticAssetsPathMissing { .. }
        )
    }

    /// Severity marker printed in front of the diagnostic.
    pub fn marker(&self) -> &'static str {
        match self {
            BaxooError::AlreadyInstalled { .. } => "⚠️",
            _ => "❌",
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, BaxooError>;
