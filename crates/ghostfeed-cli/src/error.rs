//! Error type for a pipeline run.

use ghostfeed_core::PersistenceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
  /// The topic list was empty even after fallback.
  #[error("no topics available")]
  NoTopics,

  #[error("failed to persist feed: {0}")]
  Persistence(#[from] PersistenceError),
}
