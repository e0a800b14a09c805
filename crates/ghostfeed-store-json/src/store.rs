//! [`JsonFeedStore`], the JSON-file implementation of [`FeedStore`].

use std::{
  ffi::OsString,
  path::{Path, PathBuf},
};

use ghostfeed_core::{
  error::PersistenceError,
  post::{Feed, PostRecord},
  store::{FeedLoad, FeedStore},
};

use crate::file::{FeedLock, read_feed, write_feed};

/// A feed stored as one JSON file.
///
/// Cloning is cheap; clones share nothing but the paths.
#[derive(Debug, Clone)]
pub struct JsonFeedStore {
  path:      PathBuf,
  lock_path: PathBuf,
}

impl JsonFeedStore {
  /// A store for the feed at `path`. Nothing is touched until first use.
  pub fn new(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let mut lock_name: OsString =
      path.file_name().map(ToOwned::to_owned).unwrap_or_else(|| "feed".into());
    lock_name.push(".lock");
    let lock_path = path.with_file_name(lock_name);
    Self { path, lock_path }
  }

  pub fn path(&self) -> &Path { &self.path }

  pub fn lock_path(&self) -> &Path { &self.lock_path }
}

fn log_load(path: &Path, load: &FeedLoad) {
  match load {
    FeedLoad::Loaded(feed) => {
      tracing::debug!(path = %path.display(), posts = feed.len(), "loaded feed");
    }
    FeedLoad::Missing => {
      tracing::info!(path = %path.display(), "no feed file yet, starting empty");
    }
    FeedLoad::Corrupt { reason } => {
      tracing::warn!(path = %path.display(), %reason, "feed file unreadable, treating as empty");
    }
  }
}

fn task_error(e: tokio::task::JoinError) -> PersistenceError {
  PersistenceError::Task(e.to_string())
}

impl FeedStore for JsonFeedStore {
  async fn load(&self) -> FeedLoad {
    let path = self.path.clone();
    let load = tokio::task::spawn_blocking(move || read_feed(&path))
      .await
      .unwrap_or_else(|e| FeedLoad::Corrupt { reason: e.to_string() });
    log_load(&self.path, &load);
    load
  }

  async fn save<'a>(&'a self, feed: &'a Feed) -> Result<(), PersistenceError> {
    let path = self.path.clone();
    let feed = feed.clone();
    let posts = feed.len();
    tokio::task::spawn_blocking(move || write_feed(&path, &feed))
      .await
      .map_err(task_error)??;
    tracing::info!(path = %self.path.display(), posts, "saved feed");
    Ok(())
  }

  async fn prepend(&self, post: PostRecord) -> Result<usize, PersistenceError> {
    let path = self.path.clone();
    let lock_path = self.lock_path.clone();

    let len = tokio::task::spawn_blocking(move || {
      let _lock = FeedLock::acquire(&lock_path)?;
      let load = read_feed(&path);
      log_load(&path, &load);

      let mut feed = load.into_feed();
      feed.prepend(post);
      write_feed(&path, &feed)?;
      Ok::<_, PersistenceError>(feed.len())
    })
    .await
    .map_err(task_error)??;

    tracing::info!(path = %self.path.display(), posts = len, "saved feed");
    Ok(len)
  }
}
