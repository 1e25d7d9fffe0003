//! Read-only project inspection for `prebuild status`.

use serde::Serialize;

use crate::layout::ProjectLayout;
use crate::lock::{LockError, LockState, ProjectLock};
use crate::relocate::aside_path;

#[derive(Debug, Clone, Serialize)]
pub struct ProjectStatus {
  pub layout: ProjectLayout,
  pub bundler_present: bool,
  pub build_dir_present: bool,
  pub output_dir_present: bool,
  /// Left behind by an interrupted swap relocation.
  pub stale_aside_present: bool,
  pub lock: LockState,
}

pub fn inspect(layout: &ProjectLayout) -> Result<ProjectStatus, LockError> {
  Ok(ProjectStatus {
    bundler_present: layout.bundler.is_file(),
    build_dir_present: layout.build_dir.is_dir(),
    output_dir_present: layout.output_dir.is_dir(),
    stale_aside_present: aside_path(&layout.output_dir).exists(),
    lock: ProjectLock::peek(&layout.lock_file)?,
    layout: layout.clone(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::util::testutil::populate;
  use tempfile::TempDir;

  #[test]
  fn empty_project() {
    let temp = TempDir::new().unwrap();
    let status = inspect(&ProjectLayout::new(temp.path())).unwrap();

    assert!(!status.bundler_present);
    assert!(!status.build_dir_present);
    assert!(!status.output_dir_present);
    assert!(!status.stale_aside_present);
    assert_eq!(status.lock, LockState::Free);
  }

  #[test]
  fn reports_present_directories() {
    let temp = TempDir::new().unwrap();
    let layout = ProjectLayout::new(temp.path());
    populate(&layout.build_dir, &[("a", "1")]);
    populate(&layout.output_dir, &[("x", "old")]);

    let status = inspect(&layout).unwrap();

    assert!(status.build_dir_present);
    assert!(status.output_dir_present);
  }

  #[test]
  fn status_serializes_lock_state() {
    let temp = TempDir::new().unwrap();
    let status = inspect(&ProjectLayout::new(temp.path())).unwrap();

    let json = serde_json::to_value(&status).unwrap();

    assert_eq!(json["lock"]["state"], "free");
    assert_eq!(json["output_dir_present"], false);
  }
}
