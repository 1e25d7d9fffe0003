mod cmd;
mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use prebuild_lib::relocate::RelocateStrategy;

use crate::output::{OutputFormat, print_error};

/// prebuild - run the web bundler and publish its output directory
#[derive(Parser)]
#[command(name = "prebuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Args)]
struct ProjectArgs {
  /// Project root (default: $PREBUILD_PROJECT, then the current directory)
  #[arg(short, long)]
  project: Option<PathBuf>,

  /// Output format
  #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,
}

#[derive(Args)]
struct RelocateArgs {
  #[command(flatten)]
  project: ProjectArgs,

  /// Move the previous output aside instead of deleting it first
  #[arg(long)]
  swap: bool,
}

impl RelocateArgs {
  fn strategy(&self) -> RelocateStrategy {
    if self.swap {
      RelocateStrategy::Swap
    } else {
      RelocateStrategy::Replace
    }
  }
}

#[derive(Subcommand)]
enum Commands {
  /// Run the bundler, then replace the output directory with its build
  Run(RelocateArgs),

  /// Replace the output directory with an existing build, without running the bundler
  Relocate(RelocateArgs),

  /// Show the resolved layout and whether a run is in progress
  Status(ProjectArgs),
}

fn main() {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match &cli.command {
    Commands::Run(args) => cmd::cmd_run(args.project.project.as_deref(), args.strategy(), args.project.output),
    Commands::Relocate(args) => {
      cmd::cmd_relocate(args.project.project.as_deref(), args.strategy(), args.project.output)
    }
    Commands::Status(args) => cmd::cmd_status(args.project.as_deref(), args.output),
  };

  if let Err(e) = result {
    print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}
