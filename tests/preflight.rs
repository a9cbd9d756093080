// tests/preflight.rs

use baxoo_test_utils::builders::{mock_layout, seed_installed_marker, ConfigBuilder};
use baxoo_test_utils::fake_runner::FakeRunner;
use baxoo_test_utils::init_tracing;

use std::error::Error;
use std::fs;

use tempfile::TempDir;

use baxoo::errors::BaxooError;
use baxoo::fs::mock::MockFileSystem;
use baxoo::fs::RealFileSystem;
use baxoo::pipeline::Provisioner;
use baxoo::workspace::{is_target_dir_usable, TargetDirState};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn absent_directory_is_usable() -> TestResult {
    init_tracing();

    let tmp = TempDir::new()?;
    let state = is_target_dir_usable(&RealFileSystem, &tmp.path().join("baxoo-app"))?;
    assert_eq!(state, TargetDirState::Absent);
    assert!(state.is_usable());
    Ok(())
}

#[test]
fn empty_directory_is_usable() -> TestResult {
    init_tracing();

    let tmp = TempDir::new()?;
    let target = tmp.path().join("baxoo-app");
    fs::create_dir(&target)?;

    let state = is_target_dir_usable(&RealFileSystem, &target)?;
    assert_eq!(state, TargetDirState::EmptyExisting);
    assert!(state.is_usable());
    Ok(())
}

#[test]
fn any_entry_makes_directory_unusable() -> TestResult {
    init_tracing();

    for entry in ["README.md", ".env", ".git"] {
        let tmp = TempDir::new()?;
        let target = tmp.path().join("baxoo-app");
        fs::create_dir(&target)?;
        if entry == ".git" {
            fs::create_dir(target.join(entry))?;
        } else {
            fs::write(target.join(entry), "x")?;
        }

        let state = is_target_dir_usable(&RealFileSystem, &target)?;
        assert_eq!(
            state,
            TargetDirState::NonEmptyExisting { entries: 1 },
            "entry {entry}"
        );
        assert!(!state.is_usable());
    }
    Ok(())
}

#[test]
fn plain_file_at_target_is_unusable() -> TestResult {
    init_tracing();

    let tmp = TempDir::new()?;
    let target = tmp.path().join("baxoo-app");
    fs::write(&target, "not a directory")?;

    let state = is_target_dir_usable(&RealFileSystem, &target)?;
    assert!(!state.is_usable());
    Ok(())
}

#[test]
fn preconditions_check_marker_before_directory() -> TestResult {
    init_tracing();

    let cfg = ConfigBuilder::new().build();
    let layout = mock_layout(&cfg);
    let fs = MockFileSystem::new();
    // The marker also makes the workspace non-empty; the marker wins.
    seed_installed_marker(&fs, &layout.marker_file);

    let provisioner = Provisioner::new(&fs, FakeRunner::new(), layout, &cfg);
    let err = provisioner.check_preconditions().unwrap_err();
    assert!(matches!(err, BaxooError::AlreadyInstalled { .. }), "got {err:?}");
    Ok(())
}

#[test]
fn malformed_marker_falls_through_to_directory_check() -> TestResult {
    init_tracing();

    let cfg = ConfigBuilder::new().build();
    let layout = mock_layout(&cfg);
    let fs = MockFileSystem::new();
    fs.add_file(&layout.marker_file, "{ definitely not json");

    let provisioner = Provisioner::new(&fs, FakeRunner::new(), layout, &cfg);
    let err = provisioner.check_preconditions().unwrap_err();
    assert!(matches!(err, BaxooError::DirtyTarget { .. }), "got {err:?}");
    Ok(())
}
