//! One run of the ghostfeed content pipeline.
//!
//! [`Pipeline`] wires a [`TrendSource`](ghostfeed_core::source::TrendSource),
//! a [`PostFactory`](ghostfeed_core::PostFactory) and a
//! [`FeedStore`](ghostfeed_core::store::FeedStore) together and produces
//! exactly one post per call. [`Settings`] is the layered configuration the
//! `ghostfeed` binary builds them from.

pub mod error;
pub mod pipeline;
pub mod settings;

pub use error::PipelineError;
pub use pipeline::{Pipeline, RunReport};
pub use settings::Settings;
