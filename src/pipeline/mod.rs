// src/pipeline/mod.rs

//! The provisioning pipeline.
//!
//! States, strictly in order:
//!
//! ```text
//! Start -> PreconditionCheck -> Clone -> InstallDeps(0..N) -> WriteConfig
//!       -> InstallStaticDeps -> MarkInstalled -> Done
//! ```
//!
//! Any failure moves straight to `Aborted`; nothing is retried or rolled
//! back, so the workspace may be left partially provisioned, but the state
//! marker is never written.
//!
//! - [`step`] builds the ordered step list (and is what `--dry-run` prints).
//! - [`provisioner`] executes it.
//! - [`diagnose`] maps failed command outcomes to error kinds.

pub mod diagnose;
pub mod provisioner;
pub mod step;

pub use provisioner::{Provisioner, RunReport};
pub use step::{plan, PipelineStep, Stage};
