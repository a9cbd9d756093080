use std::fmt;

use serde::{Deserialize, Serialize};

/// What happens to the output of an external command.
///
/// - `Inherit`: stream to the controlling terminal (stderr is also captured
///   for diagnostics). stderr goes through a pipe, so tools that only draw
///   progress on a tty must be asked to (`git clone --progress`).
/// - `Silent`: discard stdout; stderr is captured and only surfaced when the
///   command fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Inherit,
    Silent,
}

impl Default for OutputMode {
    fn default() -> Self {
        OutputMode::Silent
    }
}

/// Installation status recorded in the workspace state marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallStatus {
    Uninstalled,
    Installed,
}

impl Default for InstallStatus {
    fn default() -> Self {
        InstallStatus::Uninstalled
    }
}

impl fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallStatus::Uninstalled => f.write_str("uninstalled"),
            InstallStatus::Installed => f.write_str("installed"),
        }
    }
}
