// src/config/mod.rs

//! Configuration loading and validation for baxoo.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load an optional config file from disk (`loader.rs`).
//! - Validate paths and commands before anything touches the disk (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, resolve_config};
pub use model::{
    Config, EnvFileSection, InstallSection, RawConfig, RepositorySection, WorkspaceSection,
};
