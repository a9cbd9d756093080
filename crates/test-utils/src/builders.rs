#![allow(dead_code)]

use std::path::{Path, PathBuf};

use baxoo::config::{Config, RawConfig};
use baxoo::fs::mock::MockFileSystem;
use baxoo::types::OutputMode;
use baxoo::workspace::Layout;

/// Anchor directory used by tests that run against a `MockFileSystem`.
pub const MOCK_BASE_DIR: &str = "/opt/baxoo";

/// Builder for `Config` to simplify test setup.
pub struct ConfigBuilder {
    config: RawConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfig::default(),
        }
    }

    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.workspace.base_dir = Some(dir.into());
        self
    }

    pub fn dir_name(mut self, name: &str) -> Self {
        self.config.workspace.dir_name = name.to_string();
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.config.repository.url = url.to_string();
        self
    }

    pub fn subprojects(mut self, subprojects: &[&str]) -> Self {
        self.config.install.subprojects = subprojects.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn js_install(mut self, cmd: &str) -> Self {
        self.config.install.js_install = cmd.to_string();
        self
    }

    pub fn php_install(mut self, cmd: &str) -> Self {
        self.config.install.php_install = cmd.to_string();
        self
    }

    pub fn output(mut self, output: OutputMode) -> Self {
        self.config.install.output = output;
        self
    }

    pub fn build_raw(self) -> RawConfig {
        self.config
    }

    pub fn build(self) -> Config {
        Config::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Layout rooted at [`MOCK_BASE_DIR`].
pub fn mock_layout(cfg: &Config) -> Layout {
    Layout::new(MOCK_BASE_DIR, cfg)
}

/// Populate `fs` with what a successful clone of the application produces:
/// every sub-project, the environment template and the static-assets project.
pub fn seed_cloned_workspace(fs: &MockFileSystem, layout: &Layout) {
    for dir in layout.subprojects.iter() {
        fs.add_file(dir.join("package.json"), "{}");
        fs.add_file(dir.join("composer.json"), "{}");
    }
    fs.add_file(&layout.env_template, "APP_ENV=local\n");
    fs.add_file(layout.static_assets_dir.join("package.json"), "{}");
    fs.add_file(layout.workspace_dir.join("README.md"), "# baxoo-app\n");
}

/// A side effect for `FakeRunner::on_clone` that seeds the workspace.
pub fn clone_effect(fs: &MockFileSystem, layout: &Layout) -> impl Fn() + Send + use<> {
    let fs = fs.clone();
    let layout = layout.clone();
    move || seed_cloned_workspace(&fs, &layout)
}

/// Write an `installed` marker directly (bypassing the pipeline).
pub fn seed_installed_marker(fs: &MockFileSystem, marker: &Path) {
    fs.add_file(marker, "{\n  \"status\": \"installed\"\n}");
}
