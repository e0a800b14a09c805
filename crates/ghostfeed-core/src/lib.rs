//! Core types and trait definitions for ghostfeed.
//!
//! This crate is deliberately free of HTTP and filesystem dependencies. The
//! trend feed, the generation backend and the feed file are reached through
//! the traits in [`source`] and [`store`]; concrete adapters live in their own
//! crates.

pub mod error;
pub mod factory;
pub mod persona;
pub mod post;
pub mod random;
pub mod source;
pub mod store;
pub mod topic;

pub use error::{GenerationFailure, PersistenceError};
pub use factory::PostFactory;
pub use persona::Persona;
pub use post::{Feed, PostRecord};
pub use random::{RandomSource, RngSource, SequenceRandom};
pub use topic::Topic;
