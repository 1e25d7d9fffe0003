//! Terminal output for prebuild commands.
//!
//! Human-readable lines are prefixed with a colored marker whose stream and
//! color follow from its [`Tone`]; `--output json` bypasses all of it.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
  Success,
  Error,
  Warning,
  Info,
}

impl Tone {
  fn marker(self) -> &'static str {
    match self {
      Tone::Success => "✓",
      Tone::Error => "✗",
      Tone::Warning => "⚠",
      Tone::Info => "•",
    }
  }

  /// Problems go to stderr so stdout stays clean for scripting.
  fn stream(self) -> Stream {
    match self {
      Tone::Error | Tone::Warning => Stream::Stderr,
      Tone::Success | Tone::Info => Stream::Stdout,
    }
  }
}

fn emit(tone: Tone, message: &str) {
  let stream = tone.stream();
  let marker = tone.marker();
  match tone {
    Tone::Success => println!("{} {}", marker.if_supports_color(stream, |s| s.green()), message),
    Tone::Info => println!("{} {}", marker.if_supports_color(stream, |s| s.blue()), message),
    Tone::Warning => eprintln!(
      "{} {}",
      marker.if_supports_color(stream, |s| s.yellow()),
      message.if_supports_color(stream, |s| s.yellow())
    ),
    Tone::Error => eprintln!(
      "{} {}",
      marker.if_supports_color(stream, |s| s.red()),
      message.if_supports_color(stream, |s| s.red())
    ),
  }
}

pub fn print_success(message: &str) {
  emit(Tone::Success, message);
}

pub fn print_error(message: &str) {
  emit(Tone::Error, message);
}

pub fn print_warning(message: &str) {
  emit(Tone::Warning, message);
}

pub fn print_info(message: &str) {
  emit(Tone::Info, message);
}

/// Indented `label: value` detail under a status line.
pub fn print_stat(label: &str, value: &str) {
  println!("  {}: {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Size of the relocated tree, in binary units with one decimal.
pub fn format_bytes(bytes: u64) -> String {
  const UNITS: [&str; 3] = ["KB", "MB", "GB"];

  if bytes < 1024 {
    return format!("{} B", bytes);
  }
  let mut value = bytes as f64 / 1024.0;
  let mut unit = 0;
  while value >= 1024.0 && unit + 1 < UNITS.len() {
    value /= 1024.0;
    unit += 1;
  }
  format!("{:.1} {}", value, UNITS[unit])
}

pub fn format_duration(duration: Duration) -> String {
  match duration.as_secs() {
    0 => format!("{}ms", duration.subsec_millis()),
    secs @ 1..60 => format!("{}.{:02}s", secs, duration.subsec_millis() / 10),
    secs => format!("{}m {}s", secs / 60, secs % 60),
  }
}

/// Leading 12 hex digits, enough to tell two outputs apart at a glance.
pub fn short_hash(hash: &str) -> &str {
  hash.get(..12).unwrap_or(hash)
}

pub fn yes_no(present: bool) -> &'static str {
  if present { "yes" } else { "no" }
}
