//! Trending topics.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// Topics used whenever the trend feed cannot be read.
pub const FALLBACK_TOPICS: [&str; 5] = ["AI", "人類", "未来", "データ", "監視"];

/// A trending subject. No internal structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topic(String);

impl Topic {
  pub fn new(s: impl Into<String>) -> Self { Self(s.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Topic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for Topic {
  fn from(s: &str) -> Self { Self(s.to_string()) }
}

impl From<String> for Topic {
  fn from(s: String) -> Self { Self(s) }
}

/// The fixed fallback list, in order.
pub fn fallback_topics() -> Vec<Topic> {
  FALLBACK_TOPICS.iter().map(|&t| Topic::from(t)).collect()
}

/// Pick one topic uniformly at random. `None` only for an empty slice.
pub fn select_random<'a, R: RandomSource + ?Sized>(
  topics: &'a [Topic],
  rng: &mut R,
) -> Option<&'a Topic> {
  if topics.is_empty() {
    return None;
  }
  topics.get(rng.below(topics.len()))
}
