//! Binary tests for release-runner.
#![cfg(unix)]

use std::{fs, os::unix::fs::PermissionsExt, path::Path, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Build a command for the binary, isolated from any ambient token and run
/// inside `dir` so no stray .env file is picked up.
fn runner_cmd(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("release-runner");
    cmd.current_dir(dir).env_remove("GH_TOKEN");
    cmd
}

/// Write a fake release tool that checks its contract, prints a marker and
/// exits with `exit_code`.
fn fake_tool(dir: &Path, exit_code: i32) -> PathBuf {
    let path = dir.join("fake-release");
    let script = format!(
        "#!/bin/sh\n\
         [ \"$1\" = \"--no-ci\" ] || exit 90\n\
         [ \"$GH_TOKEN\" = \"T\" ] || exit 91\n\
         echo \"fake tool ran with $*\"\n\
         echo \"fake tool stderr\" >&2\n\
         exit {exit_code}\n"
    );
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn missing_token_exits_one_without_launching() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("launched");
    let tool = dir.path().join("tool");
    fs::write(&tool, format!("#!/bin/sh\ntouch {}\n", marker.display()))
        .unwrap();
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

    runner_cmd(dir.path())
        .arg("--tool")
        .arg(&tool)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "GH_TOKEN not found in environment or .env file",
        ));

    assert!(!marker.exists());
}

#[test]
fn empty_token_exits_one() {
    let dir = TempDir::new().unwrap();

    runner_cmd(dir.path())
        .env("GH_TOKEN", "")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error during release process"));
}

#[test]
fn successful_tool_run_exits_zero() {
    let dir = TempDir::new().unwrap();
    let tool = fake_tool(dir.path(), 0);

    runner_cmd(dir.path())
        .env("GH_TOKEN", "T")
        .arg("--tool")
        .arg(&tool)
        .arg("--")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("starting release process..."))
        .stdout(predicate::str::contains("fake tool ran with --no-ci --dry-run"))
        .stdout(predicate::str::contains("release completed successfully!"))
        .stderr(predicate::str::contains("fake tool stderr"));
}

#[test]
fn failing_tool_exits_one_not_child_code() {
    let dir = TempDir::new().unwrap();
    let tool = fake_tool(dir.path(), 5);

    runner_cmd(dir.path())
        .env("GH_TOKEN", "T")
        .arg("--tool")
        .arg(&tool)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("exited with status 5"));
}

#[test]
fn unknown_tool_exits_one() {
    let dir = TempDir::new().unwrap();

    runner_cmd(dir.path())
        .env("GH_TOKEN", "T")
        .arg("--tool")
        .arg("release-runner-no-such-tool")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot be launched"));
}

#[test]
fn reads_token_from_dotenv_file() {
    let dir = TempDir::new().unwrap();
    let tool = fake_tool(dir.path(), 0);
    fs::write(dir.path().join(".env"), "GH_TOKEN=T\n").unwrap();

    runner_cmd(dir.path())
        .arg("--tool")
        .arg(&tool)
        .assert()
        .success()
        .stdout(predicate::str::contains("release completed successfully!"));
}

#[test]
fn missing_explicit_env_file_exits_one() {
    let dir = TempDir::new().unwrap();

    runner_cmd(dir.path())
        .env("GH_TOKEN", "T")
        .arg("--env-file")
        .arg("does-not-exist.env")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to load env file"));
}

#[test]
fn nul_byte_in_default_env_file_exits_one() {
    let dir = TempDir::new().unwrap();
    let tool = fake_tool(dir.path(), 0);
    fs::write(dir.path().join(".env"), b"GH_TOKEN=a\0b\n").unwrap();

    runner_cmd(dir.path())
        .arg("--tool")
        .arg(&tool)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("GH_TOKEN not found"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn nul_byte_in_explicit_env_file_exits_one() {
    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join("release.env");
    fs::write(&env_file, b"GH_TOKEN=a\0b\n").unwrap();

    runner_cmd(dir.path())
        .env("GH_TOKEN", "T")
        .arg("--env-file")
        .arg(&env_file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid entry \"GH_TOKEN\""));
}

#[test]
fn malformed_default_env_file_still_releases() {
    let dir = TempDir::new().unwrap();
    let tool = fake_tool(dir.path(), 0);
    fs::write(dir.path().join(".env"), "OTHER=\"unterminated\n").unwrap();

    runner_cmd(dir.path())
        .env("GH_TOKEN", "T")
        .arg("--tool")
        .arg(&tool)
        .assert()
        .success()
        .stdout(predicate::str::contains("fake tool ran with --no-ci"))
        .stdout(predicate::str::contains("release completed successfully!"));
}

#[test]
fn env_file_vars_reach_the_tool() {
    let dir = TempDir::new().unwrap();
    let tool = dir.path().join("print-env");
    fs::write(&tool, "#!/bin/sh\necho \"npm token is $NPM_TOKEN\"\n").unwrap();
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();
    fs::write(dir.path().join(".env"), "GH_TOKEN=T\nNPM_TOKEN=npm\n").unwrap();

    runner_cmd(dir.path())
        .env_remove("NPM_TOKEN")
        .arg("--tool")
        .arg(&tool)
        .assert()
        .success()
        .stdout(predicate::str::contains("npm token is npm"));
}

#[test]
fn tool_reads_our_stdin() {
    let dir = TempDir::new().unwrap();
    let tool = dir.path().join("read-line");
    fs::write(&tool, "#!/bin/sh\nread line\necho \"got $line\"\n").unwrap();
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

    runner_cmd(dir.path())
        .env("GH_TOKEN", "T")
        .arg("--tool")
        .arg(&tool)
        .write_stdin("x\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("got x"));
}
