// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod pipeline;
pub mod types;
pub mod workspace;

use std::error::Error as _;
use std::fmt::Write as _;

use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::resolve_config;
use crate::errors::{BaxooError, Result};
use crate::exec::{CommandRunner, ShellRunner};
use crate::fs::RealFileSystem;
use crate::pipeline::Provisioner;
use crate::workspace::Layout;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - workspace layout resolution
/// - the provisioning pipeline with the real filesystem and shell runner
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(args.config.as_deref())?;
    let fs = RealFileSystem;
    let layout = Layout::discover(&fs, &cfg)?;
    info!(workspace = ?layout.workspace_dir, "resolved workspace");

    match args.command {
        Command::New => {
            let mut provisioner = Provisioner::new(&fs, ShellRunner::new(), layout, &cfg);
            if args.dry_run {
                return print_dry_run(&provisioner);
            }
            let report = provisioner.run().await?;
            debug!(completed = ?report.completed, "provisioning finished");
            Ok(())
        }
    }
}

/// Print the planned steps, then run the read-only precondition checks.
fn print_dry_run<R: CommandRunner>(provisioner: &Provisioner<'_, R>) -> Result<()> {
    let layout = provisioner.layout();
    println!("baxoo dry-run");
    println!("  base_dir  = {}", layout.base_dir.display());
    println!("  workspace = {}", layout.workspace_dir.display());
    println!("  marker    = {}", layout.marker_file.display());
    println!();

    println!("steps ({}):", provisioner.steps().len());
    for step in provisioner.steps() {
        println!("  - {}: {}", step.stage, step.description);
        for cmd in step.commands.iter() {
            println!("      run: {} (output: {:?})", cmd, cmd.output);
        }
    }
    println!();

    let target = provisioner.check_preconditions()?;
    println!("preconditions ok (clone destination: {:?})", target);

    debug!("dry-run complete (no execution)");
    Ok(())
}

/// Diagnostic text for an error that ends the process.
///
/// Anticipated aborts get a single line; anything else gets the full cause
/// chain so the failure can be tracked down.
pub fn render_error(err: &BaxooError) -> String {
    if err.is_anticipated() {
        return format!("{} {err}", err.marker());
    }

    let mut out = format!("{} An error occurred during installation.\n", err.marker());
    match err {
        BaxooError::Unexpected(inner) => {
            let _ = write!(out, "{inner:?}");
        }
        other => {
            let _ = write!(out, "{other}");
            let mut source = other.source();
            while let Some(cause) = source {
                let _ = write!(out, "\n  caused by: {cause}");
                source = cause.source();
            }
        }
    }
    out
}
