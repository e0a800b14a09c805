//! The `FeedStore` trait.
//!
//! Implemented by storage backends (e.g. `ghostfeed-store-json`). The
//! orchestrator depends on this abstraction, not on a concrete file format.

use std::future::Future;

use crate::{
  error::PersistenceError,
  post::{Feed, PostRecord},
};

/// What a [`FeedStore::load`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLoad {
  Loaded(Feed),
  /// Nothing stored yet.
  Missing,
  /// Stored data could not be parsed. Treated as an empty feed.
  Corrupt { reason: String },
}

impl FeedLoad {
  /// The loaded feed, or an empty one.
  pub fn into_feed(self) -> Feed {
    match self {
      Self::Loaded(feed) => feed,
      Self::Missing | Self::Corrupt { .. } => Feed::new(),
    }
  }
}

/// Durable storage for the feed.
pub trait FeedStore: Send + Sync {
  /// Read the stored feed. Never fails: missing or unreadable data is
  /// reported as [`FeedLoad::Missing`] or [`FeedLoad::Corrupt`].
  fn load(&self) -> impl Future<Output = FeedLoad> + Send + '_;

  /// Replace the stored feed with `feed` in full.
  fn save<'a>(
    &'a self,
    feed: &'a Feed,
  ) -> impl Future<Output = Result<(), PersistenceError>> + Send + 'a;

  /// Load, put `post` at the head, save. Returns the new feed length.
  ///
  /// The default implementation is not isolated from concurrent writers;
  /// backends that can lock should override it.
  fn prepend(
    &self,
    post: PostRecord,
  ) -> impl Future<Output = Result<usize, PersistenceError>> + Send + '_ {
    async move {
      let mut feed = self.load().await.into_feed();
      feed.prepend(post);
      self.save(&feed).await?;
      Ok(feed.len())
    }
  }
}
