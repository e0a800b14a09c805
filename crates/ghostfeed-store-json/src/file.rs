//! Blocking file operations. Callers run these on the blocking pool.

use std::{
  fs::{self, File, OpenOptions},
  io::{self, Write as _},
  path::{Path, PathBuf},
};

use fs2::FileExt;
use ghostfeed_core::{error::PersistenceError, post::Feed, store::FeedLoad};
use tempfile::NamedTempFile;

/// Read and parse the feed at `path`.
pub(crate) fn read_feed(path: &Path) -> FeedLoad {
  let raw = match fs::read(path) {
    Ok(raw) => raw,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return FeedLoad::Missing,
    Err(e) => return FeedLoad::Corrupt { reason: e.to_string() },
  };

  match serde_json::from_slice::<Feed>(&raw) {
    Ok(feed) => FeedLoad::Loaded(feed),
    Err(e) => FeedLoad::Corrupt { reason: e.to_string() },
  }
}

/// Replace the file at `path` with `feed`, via a temp file and rename.
pub(crate) fn write_feed(path: &Path, feed: &Feed) -> Result<(), PersistenceError> {
  let dir = parent_dir(path);
  fs::create_dir_all(&dir).map_err(|e| PersistenceError::io(&dir, e))?;

  let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| PersistenceError::io(&dir, e))?;
  serde_json::to_writer_pretty(&mut tmp, feed)?;
  tmp.flush().map_err(|e| PersistenceError::io(tmp.path(), e))?;
  tmp
    .as_file()
    .sync_all()
    .map_err(|e| PersistenceError::io(tmp.path(), e))?;

  match fs::metadata(path) {
    Ok(meta) => tmp
      .as_file()
      .set_permissions(meta.permissions())
      .map_err(|e| PersistenceError::io(tmp.path(), e))?,
    #[cfg(unix)]
    Err(_) => {
      use std::os::unix::fs::PermissionsExt as _;
      tmp
        .as_file()
        .set_permissions(fs::Permissions::from_mode(0o644))
        .map_err(|e| PersistenceError::io(tmp.path(), e))?;
    }
    #[cfg(not(unix))]
    Err(_) => {}
  }

  tmp
    .persist(path)
    .map_err(|e| PersistenceError::io(path, e.error))?;
  Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
  match path.parent() {
    Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
    _ => PathBuf::from("."),
  }
}

// ─── Lock ────────────────────────────────────────────────────────────────────

/// An exclusive advisory lock on a sidecar file. Released on drop.
pub(crate) struct FeedLock {
  file: File,
}

impl FeedLock {
  /// Block until the lock at `lock_path` is ours.
  pub(crate) fn acquire(lock_path: &Path) -> Result<Self, PersistenceError> {
    let dir = parent_dir(lock_path);
    fs::create_dir_all(&dir).map_err(|e| PersistenceError::io(&dir, e))?;

    let file = OpenOptions::new()
      .create(true)
      .truncate(false)
      .write(true)
      .open(lock_path)
      .map_err(|e| PersistenceError::io(lock_path, e))?;

    file.lock_exclusive().map_err(|source| PersistenceError::Lock {
      path: lock_path.to_path_buf(),
      source,
    })?;
    Ok(Self { file })
  }
}

impl Drop for FeedLock {
  fn drop(&mut self) { let _ = FileExt::unlock(&self.file); }
}
