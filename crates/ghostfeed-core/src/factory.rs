//! [`PostFactory`] turns a topic and a persona into a finished record.

use chrono::{DateTime, Utc};

use crate::{
  persona::Persona,
  post::{PostRecord, generate_post_id},
  random::RandomSource,
  source::{ContentGenerator, Generated},
  topic::Topic,
};

/// Share of posts labelled as replies.
pub const DEFAULT_REPLY_PROBABILITY: f64 = 0.3;

/// A freshly built post plus how its text was obtained.
#[derive(Debug, Clone)]
pub struct Draft {
  pub post:          PostRecord,
  pub text_fallback: bool,
}

pub struct PostFactory<G> {
  generator:         G,
  reply_probability: f64,
}

impl<G: ContentGenerator> PostFactory<G> {
  pub fn new(generator: G) -> Self {
    Self { generator, reply_probability: DEFAULT_REPLY_PROBABILITY }
  }

  /// Override the reply share. Clamped to `[0, 1]`; a non-finite value
  /// keeps [`DEFAULT_REPLY_PROBABILITY`].
  pub fn with_reply_probability(mut self, p: f64) -> Self {
    self.reply_probability =
      if p.is_finite() { p.clamp(0.0, 1.0) } else { DEFAULT_REPLY_PROBABILITY };
    self
  }

  pub fn reply_probability(&self) -> f64 { self.reply_probability }

  pub fn generator(&self) -> &G { &self.generator }

  /// Build a post stamped with the current time.
  pub async fn create_post<R>(
    &self,
    topic: &Topic,
    persona: &Persona,
    rng: &mut R,
  ) -> Draft
  where
    R: RandomSource + Send + ?Sized,
  {
    self.create_post_at(topic, persona, rng, Utc::now()).await
  }

  /// Build a post stamped with `now`.
  ///
  /// Draw order from `rng`: generator (fallback template only), eight id
  /// characters, then the reply coin.
  pub async fn create_post_at<R>(
    &self,
    topic: &Topic,
    persona: &Persona,
    rng: &mut R,
    now: DateTime<Utc>,
  ) -> Draft
  where
    R: RandomSource + Send + ?Sized,
  {
    let generated: Generated = self.generator.generate(topic, persona, rng).await;
    let text_fallback = generated.is_fallback();

    let id = generate_post_id(rng);
    let is_reply = rng.chance(self.reply_probability);

    Draft {
      post: PostRecord::new(id, persona, now, generated.into_text(), is_reply),
      text_fallback,
    }
  }
}
