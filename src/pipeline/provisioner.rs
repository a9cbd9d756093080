// src/pipeline/provisioner.rs

//! Runs the provisioning steps in order, stopping at the first failure.

use anyhow::anyhow;
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::{BaxooError, Result};
use crate::exec::CommandRunner;
use crate::fs::FileSystem;
use crate::pipeline::diagnose::{clone_failure, install_failure, missing_subproject};
use crate::pipeline::step::{plan, PipelineStep, Stage};
use crate::workspace::{
    is_already_installed, is_target_dir_usable, Layout, StateStore, TargetDirState,
    WorkspaceState,
};

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// State of the clone destination before cloning.
    pub target: TargetDirState,
    /// Stages in the order they completed.
    pub completed: Vec<Stage>,
}

/// Linear, fail-fast provisioning pipeline.
///
/// Owns the command runner; all filesystem access goes through `fs` and
/// every path comes from the [`Layout`].
#[derive(Debug)]
pub struct Provisioner<'a, R> {
    fs: &'a dyn FileSystem,
    runner: R,
    layout: Layout,
    repository_url: String,
    steps: Vec<PipelineStep>,
}

impl<'a, R: CommandRunner> Provisioner<'a, R> {
    pub fn new(fs: &'a dyn FileSystem, runner: R, layout: Layout, cfg: &Config) -> Self {
        let steps = plan(&layout, cfg);
        Self {
            fs,
            runner,
            layout,
            repository_url: cfg.repository.url.clone(),
            steps,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    /// Read-only checks that gate the whole run.
    ///
    /// Fails with [`BaxooError::AlreadyInstalled`] when the marker says so and
    /// with [`BaxooError::DirtyTarget`] when the clone destination has content.
    pub fn check_preconditions(&self) -> Result<TargetDirState> {
        if is_already_installed(self.fs, &self.layout) {
            return Err(BaxooError::AlreadyInstalled {
                marker: self.layout.marker_file.clone(),
            });
        }

        let target = is_target_dir_usable(self.fs, &self.layout.workspace_dir)?;
        debug!(target = ?target, dir = ?self.layout.workspace_dir, "clone destination checked");
        match target {
            TargetDirState::NonEmptyExisting { entries } => Err(BaxooError::DirtyTarget {
                path: self.layout.workspace_dir.clone(),
                entries,
            }),
            state => Ok(state),
        }
    }

    /// Run every step in order.
    ///
    /// The first failing step aborts the run; later steps never execute and
    /// the state marker is only written by the last step.
    pub async fn run(&mut self) -> Result<RunReport> {
        let target = self.check_preconditions()?;
        let dir = self.layout.workspace_dir.display().to_string();
        match target {
            TargetDirState::Absent => {
                println!("🔄 Directory '{dir}' does not exist, proceeding with clone...")
            }
            _ => println!("⚠️ The directory '{dir}' already exists but is empty, proceeding with clone..."),
        }

        let steps = self.steps.clone();
        let mut completed = Vec::with_capacity(steps.len());
        for step in steps.iter() {
            println!("{} {}...", stage_marker(step.stage), step.description);
            info!(stage = %step.stage, "running step");
            self.execute(step).await?;
            info!(stage = %step.stage, "step succeeded");
            completed.push(step.stage);
        }

        println!("🎉 Installation completed!");
        Ok(RunReport { target, completed })
    }

    async fn execute(&mut self, step: &PipelineStep) -> Result<()> {
        match step.stage {
            Stage::Clone => self.clone_repository(step).await,
            Stage::InstallDeps { index } => self.install_subproject(step, index).await,
            Stage::WriteConfig => self.write_config(),
            Stage::InstallStaticDeps => self.install_static(step).await,
            Stage::MarkInstalled => {
                StateStore::new(self.fs, &self.layout).save(&WorkspaceState::installed())
            }
        }
    }

    async fn clone_repository(&mut self, step: &PipelineStep) -> Result<()> {
        for spec in step.commands.iter() {
            let outcome = self.runner.run(spec).await?;
            if !outcome.success {
                return Err(clone_failure(&self.repository_url, &outcome));
            }
        }
        println!("✅ Repository cloned successfully.");
        Ok(())
    }

    async fn install_subproject(&mut self, step: &PipelineStep, index: usize) -> Result<()> {
        let dir = self
            .layout
            .subprojects
            .get(index)
            .ok_or_else(|| anyhow!("no sub-project at index {index}"))?;
        if !self.fs.is_dir(dir) {
            let command = step
                .commands
                .first()
                .map(|c| c.command.as_str())
                .unwrap_or_default();
            return Err(missing_subproject(command, dir));
        }
        self.run_installs(step).await
    }

    fn write_config(&self) -> Result<()> {
        let template = &self.layout.env_template;
        if !self.fs.is_file(template) {
            return Err(anyhow!("environment template {:?} does not exist", template).into());
        }
        // Not guarded: a re-run after a partial failure copies the template again.
        self.fs.copy(template, &self.layout.env_active)?;
        Ok(())
    }

    async fn install_static(&mut self, step: &PipelineStep) -> Result<()> {
        let dir = &self.layout.static_assets_dir;
        if !self.fs.is_dir(dir) {
            return Err(BaxooError::StaticAssetsPathMissing { path: dir.clone() });
        }
        self.run_installs(step).await
    }

    async fn run_installs(&mut self, step: &PipelineStep) -> Result<()> {
        for spec in step.commands.iter() {
            let outcome = self.runner.run(spec).await?;
            if !outcome.success {
                return Err(install_failure(spec, &outcome));
            }
        }
        Ok(())
    }
}

fn stage_marker(stage: Stage) -> &'static str {
    match stage {
        Stage::Clone => "📥",
        Stage::InstallDeps { .. } | Stage::InstallStaticDeps => "📦",
        Stage::WriteConfig => "⚙️",
        Stage::MarkInstalled => "📝",
    }
}
