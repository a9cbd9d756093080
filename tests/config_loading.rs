// tests/config_loading.rs

use baxoo_test_utils::builders::ConfigBuilder;
use baxoo_test_utils::init_tracing;

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use baxoo::config::{load_and_validate, Config, RawConfig};
use baxoo::errors::BaxooError;
use baxoo::types::OutputMode;
use baxoo::workspace::Layout;

type TestResult = Result<(), Box<dyn Error>>;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn expect_config_error(raw: RawConfig, needle: &str) {
    match Config::try_from(raw) {
        Err(BaxooError::ConfigError(msg)) => {
            assert!(msg.contains(needle), "message {msg:?} should mention {needle:?}")
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn empty_file_uses_defaults() -> TestResult {
    init_tracing();

    let file = config_file("");
    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.workspace.dir_name, "baxoo-app");
    assert_eq!(cfg.workspace.state_dir, ".baxoo");
    assert_eq!(cfg.workspace.base_dir, None);
    assert_eq!(cfg.repository.url, "https://github.com/leo-lb29/baxoo-app.git");
    assert_eq!(cfg.install.subprojects, vec!["dash", "app_desktop"]);
    assert_eq!(cfg.install.js_install, "npm install");
    assert_eq!(cfg.install.php_install, "composer install");
    assert_eq!(cfg.install.static_assets, "static/v1/dash");
    assert_eq!(cfg.install.output, OutputMode::Silent);
    assert_eq!(cfg.env_file.config_dir, "allcode/config");
    assert_eq!(cfg.env_file.template, ".env.example");
    assert_eq!(cfg.env_file.active, ".env");
    Ok(())
}

#[test]
fn sections_override_defaults() -> TestResult {
    init_tracing();

    let file = config_file(
        r#"
[workspace]
base_dir = "/srv/apps"
dir_name = "my-app"

[repository]
url = "git@github.com:example/my-app.git"

[install]
subprojects = ["backend"]
js_install = "yarn install"
output = "inherit"
"#,
    );
    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.workspace.base_dir, Some(PathBuf::from("/srv/apps")));
    assert_eq!(cfg.workspace.dir_name, "my-app");
    assert_eq!(cfg.repository.url, "git@github.com:example/my-app.git");
    assert_eq!(cfg.install.subprojects, vec!["backend"]);
    assert_eq!(cfg.install.js_install, "yarn install");
    assert_eq!(cfg.install.php_install, "composer install");
    assert_eq!(cfg.install.output, OutputMode::Inherit);
    Ok(())
}

#[test]
fn unknown_keys_are_rejected() {
    init_tracing();

    let file = config_file(
        r#"
[install]
subproject = ["typo"]
"#,
    );
    match load_and_validate(file.path()) {
        Err(BaxooError::TomlError(_)) => {}
        other => panic!("Expected TomlError, got: {:?}", other),
    }
}

#[test]
fn invalid_output_mode_is_rejected() {
    init_tracing();

    let file = config_file(
        r#"
[install]
output = "loud"
"#,
    );
    assert!(matches!(
        load_and_validate(file.path()),
        Err(BaxooError::TomlError(_))
    ));
}

#[test]
fn missing_explicit_file_is_an_io_error() {
    init_tracing();

    let result = load_and_validate("/definitely/not/here/Baxoo.toml");
    assert!(matches!(result, Err(BaxooError::IoError(_))));
}

#[test]
fn workspace_names_must_be_plain() {
    init_tracing();

    expect_config_error(ConfigBuilder::new().dir_name("nested/app").build_raw(), "dir_name");
    expect_config_error(ConfigBuilder::new().dir_name("..").build_raw(), "dir_name");
    expect_config_error(ConfigBuilder::new().dir_name("my app").build_raw(), "dir_name");
    expect_config_error(ConfigBuilder::new().dir_name("").build_raw(), "dir_name");
}

#[test]
fn repository_url_must_be_shell_safe() {
    init_tracing();

    expect_config_error(ConfigBuilder::new().url("").build_raw(), "url");
    expect_config_error(
        ConfigBuilder::new().url("https://example.com/a.git; rm -rf ~").build_raw(),
        "url",
    );
}

#[test]
fn subprojects_must_stay_inside_workspace() {
    init_tracing();

    expect_config_error(ConfigBuilder::new().subprojects(&[]).build_raw(), "at least one");
    expect_config_error(
        ConfigBuilder::new().subprojects(&["dash", "../outside"]).build_raw(),
        "subprojects",
    );
    expect_config_error(ConfigBuilder::new().subprojects(&["/etc"]).build_raw(), "subprojects");
}

#[test]
fn base_dir_must_be_absolute() {
    init_tracing();

    expect_config_error(ConfigBuilder::new().base_dir("relative/dir").build_raw(), "base_dir");
}

#[test]
fn install_commands_must_not_be_empty() {
    init_tracing();

    expect_config_error(ConfigBuilder::new().php_install("  ").build_raw(), "php_install");
    expect_config_error(ConfigBuilder::new().js_install("").build_raw(), "js_install");
}

#[test]
fn env_template_and_active_must_differ() {
    init_tracing();

    let mut raw = ConfigBuilder::new().build_raw();
    raw.env_file.active = raw.env_file.template.clone();
    expect_config_error(raw, "must differ");
}

#[test]
fn layout_derives_absolute_paths_from_anchor() {
    let cfg = ConfigBuilder::new().build();
    let layout = Layout::new("/opt/tools", &cfg);

    assert_eq!(layout.workspace_dir, PathBuf::from("/opt/tools/baxoo-app"));
    assert_eq!(layout.workspace_name, "baxoo-app");
    assert_eq!(layout.state_dir, PathBuf::from("/opt/tools/baxoo-app/.baxoo"));
    assert_eq!(
        layout.marker_file,
        PathBuf::from("/opt/tools/baxoo-app/.baxoo/config.json")
    );
    assert_eq!(
        layout.subprojects,
        vec![
            PathBuf::from("/opt/tools/baxoo-app/dash"),
            PathBuf::from("/opt/tools/baxoo-app/app_desktop"),
        ]
    );
    assert_eq!(
        layout.env_template,
        PathBuf::from("/opt/tools/baxoo-app/allcode/config/.env.example")
    );
    assert_eq!(
        layout.env_active,
        PathBuf::from("/opt/tools/baxoo-app/allcode/config/.env")
    );
    assert_eq!(
        layout.static_assets_dir,
        PathBuf::from("/opt/tools/baxoo-app/static/v1/dash")
    );
}

#[test]
fn layout_discovery_prefers_configured_base_dir() -> TestResult {
    init_tracing();

    let tmp = tempfile::TempDir::new()?;
    let cfg = ConfigBuilder::new().base_dir(tmp.path()).build();
    let layout = Layout::discover(&baxoo::fs::RealFileSystem, &cfg)?;

    assert_eq!(layout.base_dir, tmp.path().canonicalize()?);
    assert!(layout.workspace_dir.starts_with(&layout.base_dir));
    Ok(())
}
