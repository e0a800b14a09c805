//! JSON-file backend for the ghostfeed post feed.
//!
//! The feed is a single pretty-printed JSON array, newest first, read by the
//! static renderer. Writes replace the file atomically, and
//! [`FeedStore::prepend`] holds an exclusive lock on a sidecar `.lock` file
//! for the whole read-modify-write so concurrent runs cannot drop each
//! other's posts.

mod file;
mod store;

pub use store::JsonFeedStore;
