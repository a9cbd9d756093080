// src/pipeline/diagnose.rs

//! Turning failed command outcomes into pipeline errors.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::BaxooError;
use crate::exec::{CommandOutcome, CommandSpec};

/// git / ssh / HTTP messages that mean "you are not allowed to read this
/// repository" rather than "something else went wrong".
static ACCESS_DENIED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)permission denied|authentication failed|could not read (?:username|password)|repository not found|access denied|access rights|requested url returned error: 40[13]|terminal prompts disabled",
    )
    .expect("access-denied pattern is valid")
});

/// Whether captured stderr looks like an authorization failure.
pub fn is_access_denied(stderr: &str) -> bool {
    ACCESS_DENIED.is_match(stderr)
}

/// Classify a failed clone.
pub fn clone_failure(url: &str, outcome: &CommandOutcome) -> BaxooError {
    let detail = outcome.describe_failure();
    if outcome.exit_code.is_some() && is_access_denied(&outcome.stderr) {
        BaxooError::ClonePermissionDenied {
            url: url.to_string(),
            detail,
        }
    } else {
        BaxooError::CloneFailed {
            url: url.to_string(),
            detail,
        }
    }
}

/// A failed package-manager invocation.
pub fn install_failure(spec: &CommandSpec, outcome: &CommandOutcome) -> BaxooError {
    BaxooError::DependencyInstallFailed {
        command: spec.command.clone(),
        dir: spec.cwd.clone(),
        detail: outcome.describe_failure(),
    }
}

/// A sub-project the clone should have produced is not there.
pub fn missing_subproject(command: &str, dir: &Path) -> BaxooError {
    BaxooError::DependencyInstallFailed {
        command: command.to_string(),
        dir: dir.to_path_buf(),
        detail: "directory does not exist".to_string(),
    }
}
