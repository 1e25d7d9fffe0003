//! Output relocation.
//!
//! Moves the bundler's build directory into the output directory, replacing
//! whatever was there. Two strategies are available:
//!
//! - [`RelocateStrategy::Replace`]: delete the old output, then rename the
//!   build directory into place. A crash between the two steps leaves nothing
//!   at the output path.
//! - [`RelocateStrategy::Swap`]: rename the old output aside, rename the build
//!   directory into place, then delete the aside copy. The output path is only
//!   empty for the instant between the two renames, and a failed second rename
//!   restores the old output.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::consts::{ASIDE_SUFFIX, SUCCESS_MESSAGE};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelocateStrategy {
  #[default]
  Replace,
  Swap,
}

#[derive(Debug, Error)]
pub enum RelocateError {
  #[error("build folder does not exist: {0}")]
  SourceMissing(PathBuf),

  /// Build and output directories are the same or nested; replacing one would destroy the other.
  #[error("build folder {build} and output folder {output} overlap")]
  Overlap { build: PathBuf, output: PathBuf },

  #[error("failed to inspect {path}: {source}")]
  Inspect {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to remove {path}: {source}")]
  Remove {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to rename {from} to {to}: {source}")]
  Rename {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The swap failed and the previous output could not be put back.
  #[error("failed to restore previous output from {aside}: {source}")]
  Restore {
    aside: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Replace `output_dir` with `build_dir` using [`RelocateStrategy::Replace`].
pub async fn relocate(build_dir: &Path, output_dir: &Path) -> Result<&'static str, RelocateError> {
  relocate_with(build_dir, output_dir, RelocateStrategy::Replace).await
}

/// Replace `output_dir` with `build_dir`.
///
/// Fails before touching anything if `build_dir` does not exist or if the two
/// directories overlap. Filesystem errors are returned as-is; no repair is
/// attempted beyond the swap rollback.
pub async fn relocate_with(
  build_dir: &Path,
  output_dir: &Path,
  strategy: RelocateStrategy,
) -> Result<&'static str, RelocateError> {
  if !exists(build_dir).await? {
    return Err(RelocateError::SourceMissing(build_dir.to_path_buf()));
  }
  if paths_overlap(build_dir, output_dir) {
    return Err(RelocateError::Overlap {
      build: build_dir.to_path_buf(),
      output: output_dir.to_path_buf(),
    });
  }

  debug!(from = ?build_dir, to = ?output_dir, ?strategy, "relocating build output");

  match strategy {
    RelocateStrategy::Replace => replace(build_dir, output_dir).await?,
    RelocateStrategy::Swap => swap(build_dir, output_dir).await?,
  }

  info!(path = ?output_dir, "output directory replaced");
  Ok(SUCCESS_MESSAGE)
}

async fn replace(build_dir: &Path, output_dir: &Path) -> Result<(), RelocateError> {
  if exists(output_dir).await? {
    debug!(path = ?output_dir, "removing previous output");
    remove_dir(output_dir).await?;
  }
  rename(build_dir, output_dir).await
}

async fn swap(build_dir: &Path, output_dir: &Path) -> Result<(), RelocateError> {
  if !exists(output_dir).await? {
    return rename(build_dir, output_dir).await;
  }

  let aside = aside_path(output_dir);
  if exists(&aside).await? {
    warn!(path = ?aside, "removing stale output from an interrupted swap");
    remove_dir(&aside).await?;
  }

  rename(output_dir, &aside).await?;

  if let Err(err) = rename(build_dir, output_dir).await {
    fs::rename(&aside, output_dir)
      .await
      .map_err(|source| RelocateError::Restore {
        aside: aside.clone(),
        source,
      })?;
    return Err(err);
  }

  if let Err(err) = remove_dir(&aside).await {
    warn!(error = %err, "previous output left behind");
  }
  Ok(())
}

/// `<output>.prebuild-old`, next to the output directory.
pub fn aside_path(output_dir: &Path) -> PathBuf {
  let mut name = output_dir
    .file_name()
    .map(|n| n.to_os_string())
    .unwrap_or_default();
  name.push(ASIDE_SUFFIX);
  output_dir.with_file_name(name)
}

/// True when `a` and `b` name the same directory or one contains the other.
///
/// Symlinks and `..` are resolved through the longest existing ancestor, so
/// paths that do not exist yet can still be compared.
pub fn paths_overlap(a: &Path, b: &Path) -> bool {
  let (a, b) = (resolve(a), resolve(b));
  a.starts_with(&b) || b.starts_with(&a)
}

fn resolve(path: &Path) -> PathBuf {
  let mut tail = Vec::new();
  let mut current = path;
  loop {
    if let Ok(base) = dunce::canonicalize(current) {
      return tail.iter().rev().fold(base, |acc, name| acc.join(name));
    }
    match (current.parent(), current.file_name()) {
      (Some(parent), Some(name)) => {
        tail.push(name.to_os_string());
        current = parent;
      }
      _ => return path.to_path_buf(),
    }
  }
}

async fn exists(path: &Path) -> Result<bool, RelocateError> {
  fs::try_exists(path).await.map_err(|source| RelocateError::Inspect {
    path: path.to_path_buf(),
    source,
  })
}

async fn remove_dir(path: &Path) -> Result<(), RelocateError> {
  fs::remove_dir_all(path).await.map_err(|source| RelocateError::Remove {
    path: path.to_path_buf(),
    source,
  })
}

async fn rename(from: &Path, to: &Path) -> Result<(), RelocateError> {
  fs::rename(from, to).await.map_err(|source| RelocateError::Rename {
    from: from.to_path_buf(),
    to: to.to_path_buf(),
    source,
  })
}
