// src/exec/mod.rs

//! Process execution layer.
//!
//! This module runs the external programs the pipeline depends on (the
//! version-control client and the package managers) using
//! `tokio::process::Command`, one at a time, and reports a plain
//! success/failure outcome back.
//!
//! - [`backend`] provides the `CommandRunner` trait plus the request and
//!   outcome types; tests replace the runner with a fake implementation.
//! - [`shell`] provides `ShellRunner`, the production runner.

pub mod backend;
pub mod shell;

pub use backend::{CommandOutcome, CommandRunner, CommandSpec};
pub use shell::ShellRunner;
