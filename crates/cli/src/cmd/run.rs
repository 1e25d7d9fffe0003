//! Implementation of the `prebuild run` command.
//!
//! Runs the project's bundler and, if it succeeds, replaces the output
//! directory with the freshly built one.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use prebuild_lib::build::{BuildOptions, BuildOutcome, build};
use prebuild_lib::layout::ProjectLayout;
use prebuild_lib::relocate::RelocateStrategy;

use crate::output::{OutputFormat, format_bytes, format_duration, print_json, print_stat, print_success, short_hash};

/// Execute the run command.
///
/// # Errors
///
/// Fails if the project is locked, the bundler fails, or the output directory
/// cannot be replaced. The output directory is untouched when the bundler fails.
pub fn cmd_run(project: Option<&Path>, strategy: RelocateStrategy, output: OutputFormat) -> Result<()> {
  execute(project, strategy, false, output)
}

pub(super) fn execute(
  project: Option<&Path>,
  strategy: RelocateStrategy,
  skip_bundler: bool,
  output: OutputFormat,
) -> Result<()> {
  let layout = ProjectLayout::discover(project).context("Failed to resolve project layout")?;
  let options = BuildOptions {
    strategy,
    skip_bundler,
    ..BuildOptions::new(layout)
  };
  debug!(?strategy, skip_bundler, "starting build pipeline");

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let outcome = rt.block_on(build(&options)).context("Build failed")?;

  if output.is_json() {
    print_json(&outcome)?;
  } else {
    print_summary(&outcome);
  }

  Ok(())
}

fn print_summary(outcome: &BuildOutcome) {
  println!();
  print_success(&outcome.message);
  print_stat("Output", &outcome.output_dir.display().to_string());
  if let Some(digest) = &outcome.digest {
    print_stat("Files", &digest.files.to_string());
    print_stat("Size", &format_bytes(digest.bytes));
    print_stat("Digest", short_hash(&digest.hash.0));
  }
  print_stat("Duration", &format_duration(Duration::from_millis(outcome.elapsed_ms)));
}
