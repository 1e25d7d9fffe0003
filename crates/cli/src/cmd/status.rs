use std::path::Path;

use anyhow::{Context, Result};

use prebuild_lib::layout::ProjectLayout;
use prebuild_lib::lock::LockState;
use prebuild_lib::status::inspect;

use crate::output::{OutputFormat, print_info, print_json, print_stat, print_warning, yes_no};

pub fn cmd_status(project: Option<&Path>, output: OutputFormat) -> Result<()> {
  let layout = ProjectLayout::discover(project).context("Failed to resolve project layout")?;
  let status = inspect(&layout).context("Failed to inspect project lock")?;

  if output.is_json() {
    return print_json(&status);
  }

  print_info(&format!("Project: {}", layout.root.display()));
  print_stat("Bundler", &format!("{} ({})", layout.bundler.display(), yes_no(status.bundler_present)));
  print_stat("Build dir", &format!("{} ({})", layout.build_dir.display(), yes_no(status.build_dir_present)));
  print_stat("Output dir", &format!("{} ({})", layout.output_dir.display(), yes_no(status.output_dir_present)));

  match &status.lock {
    LockState::Free => print_stat("Lock", "free"),
    LockState::Held { holder: Some(meta) } => {
      print_warning(&format!("Run in progress: {} (PID {})", meta.command, meta.pid));
    }
    LockState::Held { holder: None } => print_warning("Run in progress (holder unknown)"),
  }

  if status.stale_aside_present {
    print_warning("Previous output left behind by an interrupted swap; it is removed on the next --swap run");
  }

  Ok(())
}
