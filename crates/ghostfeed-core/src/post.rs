//! Post records and the feed that holds them.
//!
//! The JSON shape of [`PostRecord`] is the contract the renderer reads:
//! `id`, `user_id`, `user_name`, `user_color`, `timestamp`, `text`,
//! `is_reply`, in that order. Do not rename fields.

use chrono::{DateTime, SubsecRound as _, Utc};
use serde::{Deserialize, Serialize};

use crate::{persona::Persona, random::RandomSource};

pub const POST_ID_LEN: usize = 8;

const ID_ALPHABET: &[u8] =
  b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A fresh random post id: [`POST_ID_LEN`] characters from `[A-Za-z0-9]`.
///
/// Not checked against existing ids.
pub fn generate_post_id<R: RandomSource + ?Sized>(rng: &mut R) -> String {
  (0..POST_ID_LEN)
    .map(|_| ID_ALPHABET[rng.below(ID_ALPHABET.len())] as char)
    .collect()
}

// ─── Post record ─────────────────────────────────────────────────────────────

/// One synthetic post. Immutable once built.
///
/// Persona fields are copied at creation time, so later catalog edits never
/// alter stored posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
  id:                   String,
  #[serde(rename = "user_id")]
  persona_identity:     String,
  #[serde(rename = "user_name")]
  persona_display_name: String,
  #[serde(rename = "user_color")]
  persona_color_tag:    String,
  #[serde(rename = "timestamp", with = "iso_z")]
  created_at:           DateTime<Utc>,
  text:                 String,
  is_reply:             bool,
}

impl PostRecord {
  /// Assemble a record. `created_at` is truncated to microseconds, the
  /// resolution of the stored timestamp.
  pub fn new(
    id: impl Into<String>,
    persona: &Persona,
    created_at: DateTime<Utc>,
    text: impl Into<String>,
    is_reply: bool,
  ) -> Self {
    Self {
      id: id.into(),
      persona_identity: persona.identity.to_string(),
      persona_display_name: persona.display_name.to_string(),
      persona_color_tag: persona.color_tag.to_string(),
      created_at: created_at.trunc_subsecs(6),
      text: text.into(),
      is_reply,
    }
  }

  pub fn id(&self) -> &str { &self.id }

  pub fn persona_identity(&self) -> &str { &self.persona_identity }

  pub fn persona_display_name(&self) -> &str { &self.persona_display_name }

  pub fn persona_color_tag(&self) -> &str { &self.persona_color_tag }

  pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

  pub fn text(&self) -> &str { &self.text }

  pub fn is_reply(&self) -> bool { self.is_reply }
}

/// ISO-8601 with a trailing `Z`, microsecond precision.
mod iso_z {
  use chrono::{DateTime, SecondsFormat, Utc};
  use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

  pub fn serialize<S: Serializer>(
    dt: &DateTime<Utc>,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Micros, true))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
      .map(|dt| dt.with_timezone(&Utc))
      .map_err(D::Error::custom)
  }
}

// ─── Feed ────────────────────────────────────────────────────────────────────

/// The ordered post collection, newest first.
///
/// The only way to add a post is [`Feed::prepend`], so index 0 is always the
/// most recently inserted record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feed(Vec<PostRecord>);

impl Feed {
  pub fn new() -> Self { Self::default() }

  /// Insert `post` at the head.
  pub fn prepend(&mut self, post: PostRecord) { self.0.insert(0, post); }

  pub fn newest(&self) -> Option<&PostRecord> { self.0.first() }

  pub fn posts(&self) -> &[PostRecord] { &self.0 }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn iter(&self) -> std::slice::Iter<'_, PostRecord> { self.0.iter() }
}

impl From<Vec<PostRecord>> for Feed {
  /// Wrap records that are already newest-first.
  fn from(posts: Vec<PostRecord>) -> Self { Self(posts) }
}

impl<'a> IntoIterator for &'a Feed {
  type IntoIter = std::slice::Iter<'a, PostRecord>;
  type Item = &'a PostRecord;

  fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use chrono::TimeZone;
  use rand::{SeedableRng, rngs::StdRng};

  use super::*;
  use crate::{
    persona,
    random::{RngSource, SequenceRandom},
  };

  fn observer() -> &'static Persona { persona::find("@observer_01").unwrap() }

  fn sample(id: &str, text: &str, secs: i64) -> PostRecord {
    let ts = Utc.timestamp_opt(secs, 0).unwrap();
    PostRecord::new(id, observer(), ts, text, false)
  }

  // ── Ids ──────────────────────────────────────────────────────────────────

  #[test]
  fn ids_are_alphanumeric_and_fixed_length() {
    let mut rng = RngSource(StdRng::seed_from_u64(7));
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
      let id = generate_post_id(&mut rng);
      assert_eq!(id.len(), POST_ID_LEN);
      assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
      seen.insert(id);
    }
    assert_eq!(seen.len(), 10_000);
  }

  #[test]
  fn id_follows_scripted_draws() {
    let mut rng = SequenceRandom::new().picks([0, 25, 26, 51, 52, 61, 0, 1]);
    assert_eq!(generate_post_id(&mut rng), "azAZ09ab");
  }

  // ── Serialisation ────────────────────────────────────────────────────────

  #[test]
  fn wire_format_field_names_and_order() {
    let post = sample("abcd1234", "人類がまた騒いでいる。", 1_700_000_000);
    let json = serde_json::to_string(&post).unwrap();
    assert_eq!(
      json,
      concat!(
        r#"{"id":"abcd1234","user_id":"@observer_01","user_name":"System Watcher","#,
        r#""user_color":"bg-blue-600","timestamp":"2023-11-14T22:13:20.000000Z","#,
        r#""text":"人類がまた騒いでいる。","is_reply":false}"#
      )
    );
  }

  #[test]
  fn parses_timestamps_without_fraction() {
    let json = r#"{"id":"x","user_id":"@void_echo","user_name":"Void Echo",
      "user_color":"bg-gray-600","timestamp":"2025-01-02T03:04:05Z",
      "text":"無意味。","is_reply":true}"#;
    let post: PostRecord = serde_json::from_str(json).unwrap();
    assert_eq!(post.created_at(), Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap());
    assert!(post.is_reply());
  }

  #[test]
  fn nanoseconds_are_truncated_so_round_trip_is_lossless() {
    let ts = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
    let post = PostRecord::new("id", observer(), ts, "t", false);
    let back: PostRecord =
      serde_json::from_str(&serde_json::to_string(&post).unwrap()).unwrap();
    assert_eq!(back, post);
    assert_eq!(post.created_at().timestamp_subsec_nanos(), 123_456_000);
  }

  // ── Feed ─────────────────────────────────────────────────────────────────

  #[test]
  fn prepend_keeps_newest_first() {
    let mut feed = Feed::new();
    feed.prepend(sample("a", "first", 1));
    feed.prepend(sample("b", "second", 2));
    feed.prepend(sample("c", "third", 3));
    let ids: Vec<_> = feed.iter().map(PostRecord::id).collect();
    assert_eq!(ids, ["c", "b", "a"]);
    assert_eq!(feed.newest().map(PostRecord::id), Some("c"));
  }

  #[test]
  fn feed_serialises_as_bare_array() {
    let feed = Feed::from(vec![sample("a", "x", 1)]);
    let value = serde_json::to_value(&feed).unwrap();
    assert!(value.is_array());
    assert_eq!(value.as_array().unwrap().len(), 1);
  }
}
