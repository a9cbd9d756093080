// src/pipeline/step.rs

//! The fixed, ordered list of provisioning steps.

use std::fmt;

use crate::config::Config;
use crate::exec::CommandSpec;
use crate::types::OutputMode;
use crate::workspace::Layout;

/// Which kind of work a step performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Clone,
    /// Install JS then PHP dependencies of the sub-project at this index of
    /// [`Layout::subprojects`].
    InstallDeps { index: usize },
    WriteConfig,
    InstallStaticDeps,
    MarkInstalled,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Clone => f.write_str("clone"),
            Stage::InstallDeps { index } => write!(f, "install-deps[{index}]"),
            Stage::WriteConfig => f.write_str("write-config"),
            Stage::InstallStaticDeps => f.write_str("install-static-deps"),
            Stage::MarkInstalled => f.write_str("mark-installed"),
        }
    }
}

/// One unit of work in a pipeline run.
///
/// `commands` are run in order; stages that only touch the filesystem have
/// none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStep {
    pub stage: Stage,
    pub description: String,
    pub commands: Vec<CommandSpec>,
}

/// Build the ordered step list for a layout.
///
/// Clone, then one install step per sub-project, then the config copy, the
/// static-assets install and finally the marker write.
pub fn plan(layout: &Layout, cfg: &Config) -> Vec<PipelineStep> {
    let install = &cfg.install;
    let mut steps = Vec::with_capacity(layout.subprojects.len() + 4);

    steps.push(PipelineStep {
        stage: Stage::Clone,
        description: format!(
            "Cloning {} into {}",
            cfg.repository.url,
            layout.workspace_dir.display()
        ),
        commands: vec![CommandSpec::new(
            format!("git clone --progress {} {}", cfg.repository.url, layout.workspace_name),
            &layout.base_dir,
            OutputMode::Inherit,
        )],
    });

    for (index, dir) in layout.subprojects.iter().enumerate() {
        steps.push(PipelineStep {
            stage: Stage::InstallDeps { index },
            description: format!("Installing dependencies in {}", dir.display()),
            commands: vec![
                CommandSpec::new(&install.js_install, dir, install.output),
                CommandSpec::new(&install.php_install, dir, install.output),
            ],
        });
    }

    steps.push(PipelineStep {
        stage: Stage::WriteConfig,
        description: format!(
            "Configuring the application ({} -> {})",
            layout.env_template.display(),
            layout.env_active.display()
        ),
        commands: Vec::new(),
    });

    steps.push(PipelineStep {
        stage: Stage::InstallStaticDeps,
        description: format!(
            "Installing static project dependencies in {}",
            layout.static_assets_dir.display()
        ),
        commands: vec![CommandSpec::new(
            &install.js_install,
            &layout.static_assets_dir,
            install.output,
        )],
    });

    steps.push(PipelineStep {
        stage: Stage::MarkInstalled,
        description: format!("Marking installation complete ({})", layout.marker_file.display()),
        commands: Vec::new(),
    });

    steps
}
