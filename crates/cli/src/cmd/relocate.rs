//! Implementation of the `prebuild relocate` command.
//!
//! Replaces the output directory with an already-built directory, for when
//! the bundler was run by other means.

use std::path::Path;

use anyhow::Result;

use prebuild_lib::relocate::RelocateStrategy;

use crate::output::OutputFormat;

pub fn cmd_relocate(project: Option<&Path>, strategy: RelocateStrategy, output: OutputFormat) -> Result<()> {
  super::run::execute(project, strategy, true, output)
}
