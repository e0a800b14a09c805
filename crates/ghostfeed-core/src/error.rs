//! Error types for `ghostfeed-core`.

use std::path::PathBuf;

use thiserror::Error;

/// Why a generation attempt fell back to canned text.
///
/// Never surfaced as an error from the generator; carried inside
/// [`Generated::Fallback`](crate::source::Generated::Fallback) so callers and
/// tests can see which path was taken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationFailure {
  #[error("credential {var} is not set")]
  MissingCredential { var: String },

  #[error("backend error: {0}")]
  Backend(String),
}

/// Failure to durably write the feed.
#[derive(Debug, Error)]
pub enum PersistenceError {
  #[error("failed to serialise feed: {0}")]
  Serialize(#[from] serde_json::Error),

  #[error("i/o error on {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("could not lock {path}: {source}")]
  Lock {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("storage task failed: {0}")]
  Task(String),
}

impl PersistenceError {
  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io { path: path.into(), source }
  }
}
