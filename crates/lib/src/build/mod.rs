//! Build orchestration.
//!
//! A run is a linear pipeline executed under the project lock:
//! 1. Run the bundler (`<bundler> build` in the project root)
//! 2. Relocate the build directory onto the output directory
//! 3. Digest the new output directory for reporting
//!
//! A bundler failure stops the pipeline before the output directory is touched.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::bundler::{BundlerError, run_bundler};
use crate::layout::ProjectLayout;
use crate::lock::{LockError, LockMode, ProjectLock};
use crate::relocate::{RelocateError, RelocateStrategy, relocate_with};
use crate::util::hash::{DirDigest, digest_directory};

#[derive(Debug, Error)]
pub enum BuildError {
  #[error(transparent)]
  Lock(#[from] LockError),

  #[error(transparent)]
  Bundler(#[from] BundlerError),

  #[error(transparent)]
  Relocate(#[from] RelocateError),
}

#[derive(Debug, Clone)]
pub struct BuildOptions {
  pub layout: ProjectLayout,
  pub strategy: RelocateStrategy,
  /// Relocate an existing build directory without running the bundler.
  pub skip_bundler: bool,
}

impl BuildOptions {
  pub fn new(layout: ProjectLayout) -> Self {
    Self {
      layout,
      strategy: RelocateStrategy::default(),
      skip_bundler: false,
    }
  }

  fn command(&self) -> &'static str {
    if self.skip_bundler { "relocate" } else { "run" }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildOutcome {
  pub message: String,
  pub output_dir: PathBuf,
  pub strategy: RelocateStrategy,
  /// Exit code of the bundler, `None` when it was skipped.
  pub bundler_exit_code: Option<i32>,
  /// `None` if the output directory could not be read back.
  pub digest: Option<DirDigest>,
  pub elapsed_ms: u64,
}

/// Run the bundler, then replace the output directory with its build directory.
pub async fn build(options: &BuildOptions) -> Result<BuildOutcome, BuildError> {
  let start = Instant::now();
  let layout = &options.layout;

  let _lock = ProjectLock::acquire(LockMode::Exclusive, &layout.lock_file, options.command())?;

  let bundler_exit_code = if options.skip_bundler {
    None
  } else {
    match run_bundler(&layout.bundler, &layout.root).await {
      Ok(output) => output.code,
      Err(e) => {
        error!(error = %e, "bundler failed");
        return Err(e.into());
      }
    }
  };

  let message = match relocate_with(&layout.build_dir, &layout.output_dir, options.strategy).await {
    Ok(message) => message,
    Err(e) => {
      error!(error = %e, "relocation failed");
      return Err(e.into());
    }
  };
  info!("{}", message);

  let digest = digest_output(layout.output_dir.clone()).await;

  Ok(BuildOutcome {
    message: message.to_string(),
    output_dir: layout.output_dir.clone(),
    strategy: options.strategy,
    bundler_exit_code,
    digest,
    elapsed_ms: elapsed_ms(start.elapsed()),
  })
}

fn elapsed_ms(elapsed: Duration) -> u64 {
  u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

async fn digest_output(path: PathBuf) -> Option<DirDigest> {
  match tokio::task::spawn_blocking(move || digest_directory(&path)).await {
    Ok(Ok(digest)) => Some(digest),
    Ok(Err(e)) => {
      warn!(error = %e, "failed to digest output directory");
      None
    }
    Err(e) => {
      warn!(error = %e, "digest task failed");
      None
    }
  }
}
