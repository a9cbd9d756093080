// src/workspace/state.rs

//! Persisted installation marker (`<workspace>/.baxoo/config.json`).
//!
//! The marker is read straight from disk on every check; nothing is cached
//! between invocations.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::types::InstallStatus;
use crate::workspace::Layout;

/// Contents of the state marker file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceState {
    pub status: InstallStatus,
}

impl WorkspaceState {
    pub fn installed() -> Self {
        Self {
            status: InstallStatus::Installed,
        }
    }
}

/// Reads and writes the state marker of one workspace.
#[derive(Debug, Clone, Copy)]
pub struct StateStore<'a> {
    fs: &'a dyn FileSystem,
    state_dir: &'a Path,
    marker_file: &'a Path,
}

impl<'a> StateStore<'a> {
    pub fn new(fs: &'a dyn FileSystem, layout: &'a Layout) -> Self {
        Self {
            fs,
            state_dir: &layout.state_dir,
            marker_file: &layout.marker_file,
        }
    }

    pub fn marker_path(&self) -> &Path {
        self.marker_file
    }

    /// Read the marker.
    ///
    /// Returns `Ok(None)` when the file does not exist and an error when it
    /// exists but cannot be read or does not hold a known status.
    pub fn load(&self) -> Result<Option<WorkspaceState>> {
        if !self.fs.exists(self.marker_file) {
            return Ok(None);
        }
        let contents = self.fs.read_to_string(self.marker_file)?;
        let state: WorkspaceState = serde_json::from_str(&contents)
            .with_context(|| format!("parsing state marker {:?}", self.marker_file))?;
        Ok(Some(state))
    }

    /// Status recorded on disk; a missing marker means `uninstalled`.
    pub fn status(&self) -> Result<InstallStatus> {
        Ok(self.load()?.map(|s| s.status).unwrap_or_default())
    }

    /// Write the marker, creating the state directory if needed.
    pub fn save(&self, state: &WorkspaceState) -> Result<()> {
        if !self.fs.is_dir(self.state_dir) {
            self.fs.create_dir_all(self.state_dir)?;
        }
        let json = serde_json::to_string_pretty(state).context("serializing state marker")?;
        self.fs.write(self.marker_file, json.as_bytes())?;
        debug!(marker = ?self.marker_file, status = %state.status, "wrote state marker");
        Ok(())
    }
}
