// src/workspace/mod.rs

//! The target workspace on disk.
//!
//! - [`layout`] resolves every path the pipeline uses.
//! - [`state`] owns the persisted installation marker.
//! - [`preflight`] inspects the marker and the clone destination before any
//!   step runs.

pub mod layout;
pub mod preflight;
pub mod state;

pub use layout::Layout;
pub use preflight::{is_already_installed, is_target_dir_usable, TargetDirState};
pub use state::{StateStore, WorkspaceState};
