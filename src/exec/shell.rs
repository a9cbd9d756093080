// src/exec/shell.rs

//! Production command runner.

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};

use anyhow::Context;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::exec::backend::{CommandOutcome, CommandRunner, CommandSpec};
use crate::types::OutputMode;

/// Runs commands through the platform shell and waits for them to exit.
///
/// - `Inherit`: stdin/stdout are inherited; stderr is forwarded to our
///   stderr byte for byte as it arrives and captured.
/// - `Silent`: stdin/stdout go to the null device; stderr is captured and
///   logged at debug.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ShellRunner {
    fn run<'a>(
        &'a mut self,
        spec: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutcome>> + Send + 'a>> {
        Box::pin(run_command(spec))
    }
}

async fn run_command(spec: &CommandSpec) -> Result<CommandOutcome> {
    info!(cmd = %spec.command, cwd = ?spec.cwd, output = ?spec.output, "starting process");

    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(&spec.command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(&spec.command);
        c
    };

    cmd.current_dir(&spec.cwd).stderr(Stdio::piped()).kill_on_drop(true);
    match spec.output {
        OutputMode::Inherit => {
            cmd.stdin(Stdio::inherit()).stdout(Stdio::inherit());
        }
        OutputMode::Silent => {
            cmd.stdin(Stdio::null()).stdout(Stdio::null());
        }
    }

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => {
            warn!(cmd = %spec.command, cwd = ?spec.cwd, error = %err, "failed to start process");
            return Ok(CommandOutcome::launch_failed(err));
        }
    };

    // Drain stderr to EOF whatever it contains; closing the pipe early would
    // kill the child with SIGPIPE on its next write.
    let echo = spec.output == OutputMode::Inherit;
    let stderr_task = child.stderr.take().map(|mut stderr| {
        let command = spec.command.clone();
        tokio::spawn(async move {
            let mut captured = Vec::new();
            let mut chunk = [0u8; 4096];
            let mut terminal = tokio::io::stderr();
            loop {
                match stderr.read(&mut chunk).await {
                    Ok(0) => break,
                    Ok(n) => {
                        if echo {
                            // Raw bytes, so `\r`-driven progress output redraws in place.
                            let _ = terminal.write_all(&chunk[..n]).await;
                            let _ = terminal.flush().await;
                        }
                        captured.extend_from_slice(&chunk[..n]);
                    }
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => {
                        warn!(cmd = %command, error = %err, "stopped reading stderr");
                        break;
                    }
                }
            }

            let text = String::from_utf8_lossy(&captured).into_owned();
            if !echo {
                for line in text.lines() {
                    debug!(cmd = %command, "stderr: {}", line);
                }
            }
            text
        })
    });

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process `{}`", spec.command))?;

    let stderr = match stderr_task {
        Some(handle) => handle
            .await
            .with_context(|| format!("collecting stderr of `{}`", spec.command))?,
        None => String::new(),
    };

    info!(
        cmd = %spec.command,
        exit_code = ?status.code(),
        signal = ?termination_signal(&status),
        success = status.success(),
        "process exited"
    );

    let outcome = if status.success() {
        CommandOutcome {
            stderr,
            ..CommandOutcome::success()
        }
    } else if let Some(code) = status.code() {
        CommandOutcome::failed(code, stderr)
    } else {
        match termination_signal(&status) {
            Some(signal) => CommandOutcome::killed(signal, stderr),
            None => CommandOutcome::failed(-1, stderr),
        }
    };
    Ok(outcome)
}

#[cfg(unix)]
fn termination_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn termination_signal(_status: &ExitStatus) -> Option<i32> {
    None
}
