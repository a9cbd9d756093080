// src/workspace/preflight.rs

//! Checks that run before anything is mutated.

use std::path::Path;

use tracing::{debug, warn};

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::types::InstallStatus;
use crate::workspace::{Layout, StateStore};

/// State of the clone destination before cloning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetDirState {
    /// Nothing at the path; safe to clone into.
    Absent,
    /// An empty directory; safe to clone into.
    EmptyExisting,
    /// A directory with at least one entry, or a non-directory; unsafe.
    NonEmptyExisting { entries: usize },
}

impl TargetDirState {
    pub fn is_usable(&self) -> bool {
        !matches!(self, TargetDirState::NonEmptyExisting { .. })
    }
}

/// Whether the workspace marker says `installed`.
///
/// A missing, unreadable or malformed marker counts as not installed; the
/// problem is logged rather than propagated.
pub fn is_already_installed(fs: &dyn FileSystem, layout: &Layout) -> bool {
    let store = StateStore::new(fs, layout);
    match store.status() {
        Ok(status) => {
            debug!(marker = ?store.marker_path(), %status, "state marker checked");
            status == InstallStatus::Installed
        }
        Err(err) => {
            warn!(
                marker = ?store.marker_path(),
                error = %err,
                "state marker unreadable; treating workspace as not installed"
            );
            false
        }
    }
}

/// Classify the clone destination.
///
/// Any entry at all (file, subdirectory, dotfile) makes a directory
/// non-empty. A path that exists but is not a directory is never usable.
pub fn is_target_dir_usable(fs: &dyn FileSystem, path: &Path) -> Result<TargetDirState> {
    if !fs.exists(path) {
        return Ok(TargetDirState::Absent);
    }
    if !fs.is_dir(path) {
        return Ok(TargetDirState::NonEmptyExisting { entries: 1 });
    }

    let entries = fs.read_dir(path)?.len();
    if entries == 0 {
        Ok(TargetDirState::EmptyExisting)
    } else {
        Ok(TargetDirState::NonEmptyExisting { entries })
    }
}
