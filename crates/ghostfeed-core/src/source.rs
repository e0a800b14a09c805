//! The two external inputs of a run: trending topics and generated text.
//!
//! Both seams never fail outward. Instead of `Result` they return an outcome
//! enum whose fallback variant still carries usable data, so the pipeline can
//! always proceed while the fallback stays visible to logs and tests.

use std::future::Future;

use crate::{
  error::GenerationFailure,
  persona::Persona,
  random::RandomSource,
  topic::{Topic, fallback_topics},
};

// ─── Topics ──────────────────────────────────────────────────────────────────

/// Result of asking a [`TrendSource`] for topics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicFetch {
  /// Topics read from the feed, in the feed's rank order.
  Live(Vec<Topic>),
  /// The feed could not be used; `topics` is the fixed fallback list.
  Fallback { topics: Vec<Topic>, reason: String },
}

impl TopicFetch {
  /// The fallback outcome with the standard topic list.
  pub fn fallback(reason: impl Into<String>) -> Self {
    Self::Fallback { topics: fallback_topics(), reason: reason.into() }
  }

  pub fn topics(&self) -> &[Topic] {
    match self {
      Self::Live(topics) | Self::Fallback { topics, .. } => topics,
    }
  }

  pub fn into_topics(self) -> Vec<Topic> {
    match self {
      Self::Live(topics) | Self::Fallback { topics, .. } => topics,
    }
  }

  pub fn is_fallback(&self) -> bool { matches!(self, Self::Fallback { .. }) }
}

/// A provider of currently trending topics.
pub trait TrendSource: Send + Sync {
  /// Fetch up to the source's limit of topics. Never fails; see
  /// [`TopicFetch::Fallback`].
  fn fetch_topics(&self) -> impl Future<Output = TopicFetch> + Send + '_;
}

// ─── Text ────────────────────────────────────────────────────────────────────

/// Result of a [`ContentGenerator`] call. The text is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated {
  Live(String),
  Fallback { text: String, cause: GenerationFailure },
}

impl Generated {
  pub fn text(&self) -> &str {
    match self {
      Self::Live(text) | Self::Fallback { text, .. } => text,
    }
  }

  pub fn into_text(self) -> String {
    match self {
      Self::Live(text) | Self::Fallback { text, .. } => text,
    }
  }

  pub fn is_fallback(&self) -> bool { matches!(self, Self::Fallback { .. }) }
}

/// Produces the text of a post in a persona's voice.
pub trait ContentGenerator: Send + Sync {
  /// Generate text for `topic` as `persona`. Never fails; any backend
  /// problem yields [`Generated::Fallback`]. `rng` picks among fallback
  /// templates.
  fn generate<'a, R>(
    &'a self,
    topic: &'a Topic,
    persona: &'a Persona,
    rng: &'a mut R,
  ) -> impl Future<Output = Generated> + Send + 'a
  where
    R: RandomSource + Send + ?Sized;
}
