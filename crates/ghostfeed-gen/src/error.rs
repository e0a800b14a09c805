//! Error type for `ghostfeed-gen`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("backend responded with status {status}: {body}")]
  Status { status: u16, body: String },

  #[error("malformed response: {0}")]
  Malformed(String),

  #[error("backend returned no text")]
  Empty,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
