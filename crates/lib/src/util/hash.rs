//! Directory digests.
//!
//! After relocation the output directory is summarized by a deterministic
//! SHA-256 over its tree, plus file and byte counts. Two runs that produce the
//! same artifacts report the same hash.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

/// A full 64-character SHA256 hash, lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContentHash(pub String);

impl std::fmt::Display for ContentHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Summary of a directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirDigest {
  pub hash: ContentHash,
  pub files: u64,
  pub bytes: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum DirHashError {
  #[error("failed to walk directory: {message}")]
  WalkDir { message: String },

  #[error("failed to read file {path}: {message}")]
  ReadFile { path: String, message: String },

  #[error("failed to read symlink {path}: {message}")]
  ReadSymlink { path: String, message: String },
}

/// Compute a deterministic digest of a directory's contents.
///
/// The hash covers file contents, directory structure and symlink targets.
/// Timestamps and permissions are ignored. Entries are visited in file-name
/// order so the result does not depend on the filesystem's listing order.
pub fn digest_directory(path: &Path) -> Result<DirDigest, DirHashError> {
  let mut hasher = Sha256::new();
  let mut files = 0u64;
  let mut bytes = 0u64;

  for entry in WalkDir::new(path).sort_by_file_name() {
    let entry = entry.map_err(|e| DirHashError::WalkDir { message: e.to_string() })?;
    let entry_path = entry.path();

    let rel_path = entry_path
      .strip_prefix(path)
      .unwrap_or(entry_path)
      .to_string_lossy()
      .replace('\\', "/");

    // Root
    if rel_path.is_empty() {
      continue;
    }

    let file_type = entry.file_type();
    let line = if file_type.is_file() {
      let (content_hash, len) = hash_file(entry_path)?;
      files += 1;
      bytes += len;
      format!("F:{}:{}", rel_path, content_hash.0)
    } else if file_type.is_dir() {
      format!("D:{}", rel_path)
    } else if file_type.is_symlink() {
      let target = fs::read_link(entry_path).map_err(|e| DirHashError::ReadSymlink {
        path: entry_path.display().to_string(),
        message: e.to_string(),
      })?;
      format!("L:{}:{}", rel_path, hash_bytes(target.to_string_lossy().as_bytes()).0)
    } else {
      continue;
    };

    hasher.update(line.as_bytes());
    hasher.update(b"\n");
  }

  Ok(DirDigest {
    hash: ContentHash(hex::encode(hasher.finalize())),
    files,
    bytes,
  })
}

/// Hash a file's contents, returning the hash and the number of bytes read.
pub fn hash_file(path: &Path) -> Result<(ContentHash, u64), DirHashError> {
  let read_err = |e: std::io::Error| DirHashError::ReadFile {
    path: path.display().to_string(),
    message: e.to_string(),
  };

  let mut file = fs::File::open(path).map_err(read_err)?;
  let mut hasher = Sha256::new();
  let mut buffer = [0u8; 8192];
  let mut total = 0u64;

  loop {
    let bytes_read = file.read(&mut buffer).map_err(read_err)?;
    if bytes_read == 0 {
      break;
    }
    total += bytes_read as u64;
    hasher.update(&buffer[..bytes_read]);
  }

  Ok((ContentHash(hex::encode(hasher.finalize())), total))
}

pub fn hash_bytes(data: &[u8]) -> ContentHash {
  ContentHash(hex::encode(Sha256::digest(data)))
}
