// tests/state_marker.rs

use baxoo_test_utils::builders::ConfigBuilder;
use baxoo_test_utils::init_tracing;

use std::error::Error;
use std::fs;

use tempfile::TempDir;

use baxoo::fs::{FileSystem, RealFileSystem};
use baxoo::types::InstallStatus;
use baxoo::workspace::{is_already_installed, Layout, StateStore, WorkspaceState};

type TestResult = Result<(), Box<dyn Error>>;

fn temp_layout(tmp: &TempDir) -> Layout {
    let cfg = ConfigBuilder::new().build();
    Layout::new(tmp.path(), &cfg)
}

#[test]
fn marker_round_trip_on_disk() -> TestResult {
    init_tracing();

    let tmp = TempDir::new()?;
    let layout = temp_layout(&tmp);
    let fs = RealFileSystem;
    let store = StateStore::new(&fs, &layout);

    assert!(!is_already_installed(&fs, &layout));

    store.save(&WorkspaceState::installed())?;
    assert!(layout.state_dir.is_dir());
    assert!(is_already_installed(&fs, &layout));

    fs.remove_file(&layout.marker_file)?;
    assert!(!is_already_installed(&fs, &layout));
    Ok(())
}

#[test]
fn marker_is_pretty_printed_json() -> TestResult {
    init_tracing();

    let tmp = TempDir::new()?;
    let layout = temp_layout(&tmp);
    let fs = RealFileSystem;

    StateStore::new(&fs, &layout).save(&WorkspaceState::installed())?;

    let written = fs::read_to_string(&layout.marker_file)?;
    assert_eq!(written, "{\n  \"status\": \"installed\"\n}");
    assert!(layout.marker_file.ends_with("baxoo-app/.baxoo/config.json"));
    Ok(())
}

#[test]
fn missing_marker_means_uninstalled() -> TestResult {
    init_tracing();

    let tmp = TempDir::new()?;
    let layout = temp_layout(&tmp);
    let fs = RealFileSystem;
    let store = StateStore::new(&fs, &layout);

    assert_eq!(store.load()?, None);
    assert_eq!(store.status()?, InstallStatus::Uninstalled);
    Ok(())
}

#[test]
fn uninstalled_status_is_not_installed() -> TestResult {
    init_tracing();

    let tmp = TempDir::new()?;
    let layout = temp_layout(&tmp);
    fs::create_dir_all(&layout.state_dir)?;
    fs::write(&layout.marker_file, r#"{"status":"uninstalled"}"#)?;

    let fs = RealFileSystem;
    assert_eq!(StateStore::new(&fs, &layout).status()?, InstallStatus::Uninstalled);
    assert!(!is_already_installed(&fs, &layout));
    Ok(())
}

#[test]
fn malformed_marker_is_not_installed_and_does_not_panic() -> TestResult {
    init_tracing();

    let real_fs = RealFileSystem;
    for contents in [
        "",
        "not json at all",
        "{\"status\":",
        r#"{"status":"done"}"#,
        r#"{"state":"installed"}"#,
        r#"{"status":true}"#,
    ] {
        let tmp = TempDir::new()?;
        let layout = temp_layout(&tmp);
        fs::create_dir_all(&layout.state_dir)?;
        fs::write(&layout.marker_file, contents)?;

        assert!(
            StateStore::new(&real_fs, &layout).load().is_err(),
            "expected load error for {contents:?}"
        );
        assert!(
            !is_already_installed(&real_fs, &layout),
            "malformed marker {contents:?} must not count as installed"
        );
    }
    Ok(())
}

#[test]
fn save_overwrites_previous_marker() -> TestResult {
    init_tracing();

    let tmp = TempDir::new()?;
    let layout = temp_layout(&tmp);
    fs::create_dir_all(&layout.state_dir)?;
    fs::write(&layout.marker_file, "garbage")?;

    let fs = RealFileSystem;
    let store = StateStore::new(&fs, &layout);
    store.save(&WorkspaceState::installed())?;

    assert_eq!(store.load()?, Some(WorkspaceState::installed()));
    Ok(())
}
