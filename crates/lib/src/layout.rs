//! Project layout resolution.
//!
//! Every path the tool touches is fixed relative to the project root. The
//! defaults can be overridden through environment variables:
//! - `PREBUILD_PROJECT`: the project root (otherwise the current directory)
//! - `PREBUILD_BUNDLER`: the bundler executable
//! - `PREBUILD_BUILD_DIR`: where the bundler writes its output
//! - `PREBUILD_OUTPUT_DIR`: the directory consumers read from
//!
//! Relative overrides are resolved against the project root.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::{
  DEFAULT_BUILD_DIR, DEFAULT_BUNDLER, DEFAULT_OUTPUT_DIR, ENV_BUILD_DIR, ENV_BUNDLER, ENV_OUTPUT_DIR, ENV_PROJECT,
  LOCK_FILENAME,
};
use crate::relocate::paths_overlap;

#[derive(Debug, Error)]
pub enum LayoutError {
  #[error("failed to determine current directory: {0}")]
  CurrentDir(#[source] io::Error),

  #[error("project directory {path} is not accessible: {source}")]
  ProjectRoot {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("project path {0} is not a directory")]
  NotADirectory(PathBuf),

  #[error("build folder {build} and output folder {output} overlap")]
  Overlap { build: PathBuf, output: PathBuf },
}

/// Resolved paths for a single project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectLayout {
  pub root: PathBuf,
  pub bundler: PathBuf,
  pub build_dir: PathBuf,
  pub output_dir: PathBuf,
  pub lock_file: PathBuf,
}

impl ProjectLayout {
  /// Layout with default relative paths under `root`. The environment is not consulted.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    let root = root.into();
    Self {
      bundler: root.join(DEFAULT_BUNDLER),
      build_dir: root.join(DEFAULT_BUILD_DIR),
      output_dir: root.join(DEFAULT_OUTPUT_DIR),
      lock_file: root.join(LOCK_FILENAME),
      root,
    }
  }

  /// Resolve the layout for `project`, falling back to `PREBUILD_PROJECT` and
  /// then the current directory. Environment overrides are applied.
  pub fn discover(project: Option<&Path>) -> Result<Self, LayoutError> {
    let root = match project {
      Some(path) => path.to_path_buf(),
      None => match std::env::var_os(ENV_PROJECT) {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir().map_err(LayoutError::CurrentDir)?,
      },
    };

    let root = dunce::canonicalize(&root).map_err(|source| LayoutError::ProjectRoot {
      path: root.clone(),
      source,
    })?;
    if !root.is_dir() {
      return Err(LayoutError::NotADirectory(root));
    }

    let layout = Self::new(root).with_env_overrides();
    if paths_overlap(&layout.build_dir, &layout.output_dir) {
      return Err(LayoutError::Overlap {
        build: layout.build_dir,
        output: layout.output_dir,
      });
    }
    debug!(?layout, "resolved project layout");
    Ok(layout)
  }

  pub fn with_env_overrides(mut self) -> Self {
    if let Some(path) = std::env::var_os(ENV_BUNDLER) {
      self.bundler = self.root.join(path);
    }
    if let Some(path) = std::env::var_os(ENV_BUILD_DIR) {
      self.build_dir = self.root.join(path);
    }
    if let Some(path) = std::env::var_os(ENV_OUTPUT_DIR) {
      self.output_dir = self.root.join(path);
    }
    self
  }
}
