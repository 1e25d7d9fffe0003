//! External bundler invocation.
//!
//! The bundler is a project-local executable (by default
//! `node_modules/.bin/react-scripts`) run with a single `build` argument from
//! the project root. Its exit status decides success; it is never retried.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

use crate::consts::BUNDLER_ARG;

/// Lines of stderr kept in a `Failed` error.
const STDERR_TAIL_LINES: usize = 20;

#[derive(Debug, Error)]
pub enum BundlerError {
  /// The bundler executable does not exist.
  #[error("bundler not found at {0} (did you install dependencies?)")]
  NotFound(PathBuf),

  /// The process could not be started.
  #[error("failed to spawn bundler {path}: {source}")]
  Spawn {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The process ran and exited unsuccessfully.
  #[error("bundler exited with code {code:?}{}", format_stderr(.stderr))]
  Failed { code: Option<i32>, stderr: String },
}

fn format_stderr(stderr: &str) -> String {
  if stderr.is_empty() {
    String::new()
  } else {
    format!(":\n{}", stderr)
  }
}

/// Output of a successful bundler run.
#[derive(Debug, Clone)]
pub struct BundlerOutput {
  pub code: Option<i32>,
  pub stdout: String,
}

/// Run `<bundler> build` with `cwd` as the working directory.
pub async fn run_bundler(bundler: &Path, cwd: &Path) -> Result<BundlerOutput, BundlerError> {
  if !bundler.exists() {
    return Err(BundlerError::NotFound(bundler.to_path_buf()));
  }

  info!(bundler = %bundler.display(), "running bundler");

  let output = Command::new(bundler)
    .arg(BUNDLER_ARG)
    .current_dir(cwd)
    .stdin(Stdio::null())
    .output()
    .await
    .map_err(|source| BundlerError::Spawn {
      path: bundler.to_path_buf(),
      source,
    })?;

  let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
  if !stdout.is_empty() {
    debug!(stdout = %stdout, "bundler stdout");
  }

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    return Err(BundlerError::Failed {
      code: output.status.code(),
      stderr: tail(&stderr, STDERR_TAIL_LINES),
    });
  }

  Ok(BundlerOutput {
    code: output.status.code(),
    stdout,
  })
}

fn tail(text: &str, lines: usize) -> String {
  let all: Vec<&str> = text.trim_end().lines().collect();
  all[all.len().saturating_sub(lines)..].join("\n")
}
