//! Error type for `ghostfeed-trends`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("feed responded with status {0}")]
  Status(u16),

  #[error("xml error: {0}")]
  Xml(String),

  #[error("feed contained no entries")]
  NoEntries,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
