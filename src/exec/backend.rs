// src/exec/backend.rs

//! Pluggable command runner abstraction.
//!
//! The pipeline talks to a `CommandRunner` instead of spawning processes
//! itself. Production code uses [`ShellRunner`](super::ShellRunner); tests
//! provide a runner that records which commands were requested and decides
//! their outcome without touching the system.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::errors::Result;
use crate::types::OutputMode;

/// A single shell command to run to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Shell command line (run through `sh -c` / `cmd /C`).
    pub command: String,
    /// Absolute directory the command runs in.
    pub cwd: PathBuf,
    pub output: OutputMode,
}

impl CommandSpec {
    pub fn new(command: impl Into<String>, cwd: impl Into<PathBuf>, output: OutputMode) -> Self {
        Self {
            command: command.into(),
            cwd: cwd.into(),
            output,
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` in {}", self.command, self.cwd.display())
    }
}

/// Result of running a command.
///
/// A process that could not be launched at all is reported the same way as
/// one that exited non-zero: `success = false`, with `exit_code = None` and
/// the launch error in `stderr`. A process killed by a signal also has no
/// exit code; `signal` says which one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub signal: Option<i32>,
    /// Captured standard error, kept for diagnostics.
    pub stderr: String,
}

impl CommandOutcome {
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            signal: None,
            stderr: String::new(),
        }
    }

    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code: Some(exit_code),
            signal: None,
            stderr: stderr.into(),
        }
    }

    pub fn launch_failed(error: impl fmt::Display) -> Self {
        Self {
            success: false,
            exit_code: None,
            signal: None,
            stderr: error.to_string(),
        }
    }

    /// The process was started but terminated by `signal` before exiting.
    pub fn killed(signal: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code: None,
            signal: Some(signal),
            stderr: stderr.into(),
        }
    }

    /// Short human-readable description of a failure.
    pub fn describe_failure(&self) -> String {
        let last_line = self
            .stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .map(str::trim);
        let head = match (self.exit_code, self.signal) {
            (Some(code), _) => format!("exit status {code}"),
            (None, Some(signal)) => format!("killed by signal {signal}"),
            (None, None) => "could not be started".to_string(),
        };
        match last_line {
            Some(line) => format!("{head}: {line}"),
            None => head,
        }
    }
}

/// Trait abstracting how external commands are executed.
///
/// Implementations must run the command to completion before the returned
/// future resolves; the pipeline never has two commands in flight.
pub trait CommandRunner: Send {
    fn run<'a>(
        &'a mut self,
        spec: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutcome>> + Send + 'a>>;
}
