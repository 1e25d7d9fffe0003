//! CLI smoke tests for prebuild.
//!
//! Each test lays out a throwaway project with a fake bundler script and
//! checks exit codes, output and the resulting directories.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

/// Get a Command for the prebuild binary with layout overrides cleared.
fn prebuild_cmd() -> Command {
  let mut cmd = cargo_bin_cmd!("prebuild");
  for var in [
    "PREBUILD_PROJECT",
    "PREBUILD_BUNDLER",
    "PREBUILD_BUILD_DIR",
    "PREBUILD_OUTPUT_DIR",
    "RUST_LOG",
  ] {
    cmd.env_remove(var);
  }
  cmd
}

fn populate(dir: &Path, files: &[(&str, &str)]) {
  fs::create_dir_all(dir).unwrap();
  for (name, content) in files {
    fs::write(dir.join(name), content).unwrap();
  }
}

fn names(dir: &Path) -> Vec<String> {
  let mut names: Vec<String> = fs::read_dir(dir)
    .unwrap()
    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
    .collect();
  names.sort();
  names
}

#[cfg(unix)]
fn write_bundler(project: &Path, body: &str) {
  use std::os::unix::fs::PermissionsExt;

  let path = project.join("node_modules/.bin/react-scripts");
  fs::create_dir_all(path.parent().unwrap()).unwrap();
  fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
  fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
const BUNDLER_OK: &str = "mkdir -p build\necho a > build/a\necho b > build/b";

// =============================================================================
// Help & Version
// =============================================================================

#[test]
#[serial]
fn help_flag_works() {
  prebuild_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
#[serial]
fn version_flag_works() {
  prebuild_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("prebuild"));
}

#[test]
#[serial]
fn subcommand_help_works() {
  for cmd in &["run", "relocate", "status"] {
    prebuild_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

// =============================================================================
// run
// =============================================================================

#[test]
#[serial]
#[cfg(unix)]
fn run_replaces_output_directory() {
  let temp = TempDir::new().unwrap();
  write_bundler(temp.path(), BUNDLER_OK);
  populate(&temp.path().join("www"), &[("x", "old")]);

  prebuild_cmd()
    .arg("run")
    .arg("--project")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Successfully built!"))
    .stdout(predicate::str::contains("Files: 2"));

  assert_eq!(names(&temp.path().join("www")), ["a", "b"]);
  assert!(!temp.path().join("build").exists());
}

#[test]
#[serial]
#[cfg(unix)]
fn run_bundler_failure_exits_nonzero() {
  let temp = TempDir::new().unwrap();
  write_bundler(temp.path(), "echo 'Failed to compile.' >&2\nexit 1");
  populate(&temp.path().join("www"), &[("x", "old")]);

  prebuild_cmd()
    .arg("run")
    .arg("--project")
    .arg(temp.path())
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("Failed to compile."));

  assert_eq!(names(&temp.path().join("www")), ["x"]);
}

#[test]
#[serial]
#[cfg(unix)]
fn run_honors_project_env_var() {
  let temp = TempDir::new().unwrap();
  write_bundler(temp.path(), BUNDLER_OK);

  prebuild_cmd()
    .arg("run")
    .env("PREBUILD_PROJECT", temp.path())
    .assert()
    .success();

  assert_eq!(names(&temp.path().join("www")), ["a", "b"]);
}

#[test]
#[serial]
fn run_without_bundler_fails() {
  let temp = TempDir::new().unwrap();

  prebuild_cmd()
    .arg("run")
    .arg("--project")
    .arg(temp.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("bundler not found"));
}

// =============================================================================
// relocate
// =============================================================================

#[test]
#[serial]
fn relocate_outputs_json() {
  let temp = TempDir::new().unwrap();
  populate(&temp.path().join("build"), &[("index.html", "<html/>")]);

  let assert = prebuild_cmd()
    .args(["relocate", "--swap", "--output", "json", "--project"])
    .arg(temp.path())
    .assert()
    .success();

  let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
  assert_eq!(json["message"], "Successfully built!");
  assert_eq!(json["strategy"], "swap");
  assert_eq!(json["bundler_exit_code"], serde_json::Value::Null);
  assert_eq!(json["digest"]["files"], 1);
  assert_eq!(names(&temp.path().join("www")), ["index.html"]);
}

#[test]
#[serial]
fn relocate_without_build_dir_fails() {
  let temp = TempDir::new().unwrap();

  prebuild_cmd()
    .arg("relocate")
    .arg("--project")
    .arg(temp.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("build folder does not exist"));
}

#[test]
#[serial]
fn relocate_refuses_overlapping_output() {
  let temp = TempDir::new().unwrap();
  populate(&temp.path().join("build"), &[("a", "1")]);

  prebuild_cmd()
    .arg("relocate")
    .arg("--project")
    .arg(temp.path())
    .env("PREBUILD_OUTPUT_DIR", "build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("overlap"));

  assert_eq!(names(&temp.path().join("build")), ["a"]);
}

// =============================================================================
// status
// =============================================================================

#[test]
#[serial]
fn status_reports_layout() {
  let temp = TempDir::new().unwrap();
  populate(&temp.path().join("build"), &[("a", "1")]);

  prebuild_cmd()
    .arg("status")
    .arg("--project")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Build dir"))
    .stdout(predicate::str::contains("Lock: free"));
}

#[test]
#[serial]
fn status_json() {
  let temp = TempDir::new().unwrap();

  let assert = prebuild_cmd()
    .args(["status", "-o", "json", "-p"])
    .arg(temp.path())
    .assert()
    .success();

  let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
  assert_eq!(json["build_dir_present"], false);
  assert_eq!(json["lock"]["state"], "free");
}

#[test]
#[serial]
fn status_missing_project_fails() {
  let temp = TempDir::new().unwrap();

  prebuild_cmd()
    .arg("status")
    .arg("--project")
    .arg(temp.path().join("missing"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to resolve project layout"));
}
