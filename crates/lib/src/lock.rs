//! Advisory project locking.
//!
//! Two invocations against the same project would race on the build and
//! output directories, so the whole build-and-relocate sequence runs under an
//! exclusive `flock` on `<project>/.prebuild.lock`. The lock file is never
//! removed; only the OS-level lock matters.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
  Shared,
  Exclusive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockMetadata {
  pub version: u32,
  pub pid: u32,
  pub started_at_unix: u64,
  pub command: String,
  pub project: PathBuf,
}

#[derive(Debug, Error)]
pub enum LockError {
  #[error(
    "Project is locked by another process: {command} (PID {pid}, started {started_at})\n\
             If you're sure no prebuild process is running, remove the lock file:\n  {lock_path}"
  )]
  Contention {
    command: String,
    pid: u32,
    started_at: String,
    lock_path: PathBuf,
  },

  #[error(
    "Project is locked (could not read lock metadata)\n\
             If you're sure no prebuild process is running, remove the lock file:\n  {lock_path}"
  )]
  ContentionUnknown { lock_path: PathBuf },

  #[error("Failed to open lock file: {0}")]
  OpenFile(#[source] io::Error),

  #[error("Failed to write lock metadata: {0}")]
  WriteMetadata(#[source] io::Error),

  #[error("Failed to acquire lock: {0}")]
  LockFailed(#[source] io::Error),
}

/// Observed state of a project lock, as reported by `prebuild status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LockState {
  Free,
  Held { holder: Option<LockMetadata> },
}

/// Held lock. Released when dropped.
#[derive(Debug)]
pub struct ProjectLock {
  file: File,
  lock_path: PathBuf,
}

impl ProjectLock {
  pub fn acquire(mode: LockMode, lock_path: &Path, command: &str) -> Result<Self, LockError> {
    let file = OpenOptions::new()
      .read(true)
      .write(true)
      .create(true)
      .truncate(false)
      .open(lock_path)
      .map_err(LockError::OpenFile)?;

    if let Err(err) = try_lock(&file, mode) {
      if err.kind() == io::ErrorKind::WouldBlock {
        return Err(Self::read_contention_error(lock_path));
      }
      return Err(LockError::LockFailed(err));
    }

    if mode == LockMode::Exclusive {
      Self::write_metadata(&file, command, lock_path)?;
    }

    debug!(path = ?lock_path, ?mode, "acquired project lock");
    Ok(ProjectLock {
      file,
      lock_path: lock_path.to_path_buf(),
    })
  }

  /// Check whether another process holds the lock without keeping it.
  pub fn peek(lock_path: &Path) -> Result<LockState, LockError> {
    if !lock_path.exists() {
      return Ok(LockState::Free);
    }

    match Self::acquire(LockMode::Shared, lock_path, "status") {
      Ok(_lock) => Ok(LockState::Free),
      Err(LockError::Contention { lock_path: path, .. }) => Ok(LockState::Held {
        holder: read_metadata_at(&path).ok(),
      }),
      Err(LockError::ContentionUnknown { .. }) => Ok(LockState::Held { holder: None }),
      Err(e) => Err(e),
    }
  }

  /// Reads the lock metadata from the held file handle.
  ///
  /// Opening a second handle would fail on Windows due to mandatory locking.
  pub fn read_metadata(&self) -> io::Result<LockMetadata> {
    use std::io::{Seek, SeekFrom};

    let mut file = &self.file;
    file.seek(SeekFrom::Start(0))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    serde_json::from_str(&contents).map_err(io::Error::other)
  }

  fn write_metadata(file: &File, command: &str, lock_path: &Path) -> Result<(), LockError> {
    let metadata = LockMetadata {
      version: 1,
      pid: std::process::id(),
      started_at_unix: SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs(),
      command: command.to_string(),
      project: lock_path.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    file.set_len(0).map_err(LockError::WriteMetadata)?;
    let mut writer = io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &metadata).map_err(|e| LockError::WriteMetadata(io::Error::other(e)))?;
    writer.flush().map_err(LockError::WriteMetadata)?;

    Ok(())
  }

  fn read_contention_error(lock_path: &Path) -> LockError {
    if let Ok(metadata) = read_metadata_at(lock_path) {
      return LockError::Contention {
        command: metadata.command,
        pid: metadata.pid,
        started_at: format!("Unix timestamp {}", metadata.started_at_unix),
        lock_path: lock_path.to_path_buf(),
      };
    }

    LockError::ContentionUnknown {
      lock_path: lock_path.to_path_buf(),
    }
  }

  pub fn lock_path(&self) -> &Path {
    &self.lock_path
  }
}

fn read_metadata_at(lock_path: &Path) -> io::Result<LockMetadata> {
  let mut contents = String::new();
  File::open(lock_path)?.read_to_string(&mut contents)?;
  serde_json::from_str(&contents).map_err(io::Error::other)
}

#[cfg(unix)]
fn try_lock(file: &File, mode: LockMode) -> io::Result<()> {
  use rustix::fs::{FlockOperation, flock};
  use std::os::unix::io::AsFd;

  let operation = match mode {
    LockMode::Shared => FlockOperation::NonBlockingLockShared,
    LockMode::Exclusive => FlockOperation::NonBlockingLockExclusive,
  };

  flock(file.as_fd(), operation).map_err(|e| io::Error::from_raw_os_error(e.raw_os_error()))
}

#[cfg(windows)]
fn try_lock(file: &File, mode: LockMode) -> io::Result<()> {
  use std::os::windows::io::AsRawHandle;
  use windows_sys::Win32::Foundation::HANDLE;
  use windows_sys::Win32::Storage::FileSystem::{LOCKFILE_EXCLUSIVE_LOCK, LOCKFILE_FAIL_IMMEDIATELY, LockFileEx};

  let handle = file.as_raw_handle() as HANDLE;
  let flags = match mode {
    LockMode::Shared => LOCKFILE_FAIL_IMMEDIATELY,
    LockMode::Exclusive => LOCKFILE_FAIL_IMMEDIATELY | LOCKFILE_EXCLUSIVE_LOCK,
  };

  // SAFETY: OVERLAPPED is a plain data struct that is valid when zero-initialized.
  // LockFileEx is safe to call with a valid file handle and zeroed OVERLAPPED.
  let result = unsafe {
    let mut overlapped = std::mem::zeroed();
    LockFileEx(handle, flags, 0, 1, 0, &mut overlapped)
  };

  if result == 0 {
    Err(io::Error::last_os_error())
  } else {
    Ok(())
  }
}
