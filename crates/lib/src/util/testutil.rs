//! Test utilities for prebuild-lib.
//!
//! Helpers for laying out a fake project: a bundler script under
//! `node_modules/.bin` and pre-populated build/output directories.

use std::fs;
use std::path::Path;

use crate::layout::ProjectLayout;

/// Write an executable shell script at `path`.
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) {
  use std::os::unix::fs::PermissionsExt;

  fs::create_dir_all(path.parent().unwrap()).unwrap();
  fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
  fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Bundler script that materializes `build/` with the given files.
#[cfg(unix)]
pub fn write_bundler(layout: &ProjectLayout, files: &[(&str, &str)]) {
  let mut body = String::from("[ \"$1\" = build ] || exit 64\nmkdir -p build\n");
  for (name, content) in files {
    body.push_str(&format!("printf '%s' '{}' > build/{}\n", content, name));
  }
  write_script(&layout.bundler, &body);
}

/// Create `dir` containing the given files.
pub fn populate(dir: &Path, files: &[(&str, &str)]) {
  fs::create_dir_all(dir).unwrap();
  for (name, content) in files {
    fs::write(dir.join(name), content).unwrap();
  }
}

/// Sorted file names directly under `dir`.
pub fn list_names(dir: &Path) -> Vec<String> {
  let mut names: Vec<String> = fs::read_dir(dir)
    .unwrap()
    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
    .collect();
  names.sort();
  names
}
