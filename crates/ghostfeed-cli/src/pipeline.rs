//! [`Pipeline`]: the fixed six-step sequence behind every run.
//!
//! 1. fetch topics, 2. pick a topic and a persona, 3. build the post,
//! 4. load the feed, 5. put the post at its head, 6. save it.
//! Steps 4–6 happen inside [`FeedStore::prepend`] so a backend can hold one
//! lock across them.

use ghostfeed_core::{
  PostFactory,
  factory::Draft,
  persona::{self, Persona},
  post::PostRecord,
  random::RandomSource,
  source::{ContentGenerator, TrendSource},
  store::FeedStore,
  topic::{self, Topic},
};

use crate::error::PipelineError;

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
  pub topic:           Topic,
  pub persona:         &'static Persona,
  pub post:            PostRecord,
  /// Topics came from the fallback list.
  pub topics_fallback: bool,
  /// Text came from a fallback message.
  pub text_fallback:   bool,
  /// Feed length after the post was saved. `None` for a dry run.
  pub feed_len:        Option<usize>,
}

pub struct Pipeline<T, G, S> {
  trends:  T,
  factory: PostFactory<G>,
  store:   S,
}

impl<T, G, S> Pipeline<T, G, S>
where
  T: TrendSource,
  G: ContentGenerator,
  S: FeedStore,
{
  pub fn new(trends: T, factory: PostFactory<G>, store: S) -> Self {
    Self { trends, factory, store }
  }

  pub fn store(&self) -> &S { &self.store }

  /// Steps 1–3: choose inputs and build the post without touching the feed.
  pub async fn draft<R>(&self, rng: &mut R) -> Result<RunReport, PipelineError>
  where
    R: RandomSource + Send + ?Sized,
  {
    tracing::info!("[1] fetching trends");
    let fetch = self.trends.fetch_topics().await;
    let topics_fallback = fetch.is_fallback();
    let topics = fetch.into_topics();

    tracing::info!("[2] selecting trend and persona");
    let Some(topic) = topic::select_random(&topics, rng).cloned() else {
      tracing::error!("no trends available, aborting");
      return Err(PipelineError::NoTopics);
    };
    let persona = persona::select_random(rng);
    tracing::info!(%topic, persona = persona.display_name, identity = persona.identity, "selected");

    tracing::info!("[3] generating post content");
    let Draft { post, text_fallback } = self.factory.create_post(&topic, persona, rng).await;

    Ok(RunReport { topic, persona, post, topics_fallback, text_fallback, feed_len: None })
  }

  /// One full run: draft a post and persist it at the head of the feed.
  pub async fn run<R>(&self, rng: &mut R) -> Result<RunReport, PipelineError>
  where
    R: RandomSource + Send + ?Sized,
  {
    let mut report = self.draft(rng).await?;

    tracing::info!("[4-6] loading feed, prepending post, saving");
    let len = match self.store.prepend(report.post.clone()).await {
      Ok(len) => len,
      Err(e) => {
        tracing::error!(
          error = %e,
          post_id = report.post.id(),
          "failed to save feed; post was not persisted"
        );
        return Err(e.into());
      }
    };
    tracing::info!(existing = len.saturating_sub(1), total = len, "feed updated");

    report.feed_len = Some(len);
    Ok(report)
  }
}
