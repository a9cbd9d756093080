// tests/cli_exit_status.rs

use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

type TestResult = Result<(), Box<dyn Error>>;

/// Run the built binary with `BAXOO_HOME` pointing at `home`.
///
/// The working directory is `home` too, so no stray `Baxoo.toml` is picked up.
fn baxoo(home: &Path, args: &[&str]) -> std::io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_baxoo"))
        .args(args)
        .current_dir(home)
        .env("BAXOO_HOME", home)
        .env_remove("BAXOO_LOG")
        .output()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn non_empty_target_exits_with_status_1_without_cloning() -> TestResult {
    let home = TempDir::new()?;
    let workspace = home.path().join("baxoo-app");
    fs::create_dir_all(&workspace)?;
    fs::write(workspace.join("README.md"), "# leftover\n")?;

    let output = baxoo(home.path(), &["new"])?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("❌"), "stderr was {stderr:?}");
    assert!(stderr.contains("is not empty"), "stderr was {stderr:?}");

    let entries: Vec<_> = fs::read_dir(&workspace)?.collect::<Result<_, _>>()?;
    assert_eq!(entries.len(), 1);
    assert!(!workspace.join(".git").exists());
    assert!(!workspace.join(".baxoo").exists());
    Ok(())
}

#[test]
fn installed_marker_exits_with_status_1() -> TestResult {
    let home = TempDir::new()?;
    let state_dir = home.path().join("baxoo-app").join(".baxoo");
    fs::create_dir_all(&state_dir)?;
    let marker = state_dir.join("config.json");
    fs::write(&marker, r#"{"status":"installed"}"#)?;

    let output = baxoo(home.path(), &["new"])?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("⚠️"), "stderr was {stderr:?}");
    assert!(stderr.contains("already installed"), "stderr was {stderr:?}");
    assert_eq!(fs::read_to_string(&marker)?, r#"{"status":"installed"}"#);
    Ok(())
}

#[test]
fn dry_run_on_empty_anchor_exits_with_status_0() -> TestResult {
    let home = TempDir::new()?;

    let output = baxoo(home.path(), &["new", "--dry-run"])?;

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr was {:?}",
        stderr_of(&output)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("baxoo dry-run"));
    assert!(stdout.contains("git clone"));
    assert!(!home.path().join("baxoo-app").exists());
    Ok(())
}

#[test]
fn dry_run_still_reports_a_dirty_target() -> TestResult {
    let home = TempDir::new()?;
    let workspace = home.path().join("baxoo-app");
    fs::create_dir_all(&workspace)?;
    fs::write(workspace.join(".env"), "APP_ENV=local\n")?;

    let output = baxoo(home.path(), &["new", "--dry-run"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("is not empty"));
    Ok(())
}

#[test]
fn missing_explicit_config_prints_cause_chain_and_exits_with_status_1() -> TestResult {
    let home = TempDir::new()?;
    let missing = home.path().join("nope.toml");

    let output = baxoo(
        home.path(),
        &["new", "--config", missing.to_str().ok_or("non-utf8 temp path")?],
    )?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(
        stderr.contains("An error occurred during installation."),
        "stderr was {stderr:?}"
    );
    assert!(stderr.lines().count() >= 2, "stderr was {stderr:?}");
    Ok(())
}
