//! Trending-topic source for ghostfeed.
//!
//! Reads an RSS 2.0 or Atom document over HTTP and takes the first few entry
//! titles in document order. Any failure is converted into the fixed fallback
//! topic list; callers never see a transport error.

mod error;
mod rss;

pub use error::{Error, Result};
pub use rss::parse_titles;

use std::time::Duration;

use ghostfeed_core::{
  source::{TopicFetch, TrendSource},
  topic::Topic,
};
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_TRENDS_URL: &str =
  "https://trends.google.com/trends/trendingsearches/daily/rss?geo=JP";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Settings for [`RssTrendSource`], deserialised from the `[trends]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrendsConfig {
  pub url:          String,
  /// Maximum number of titles taken from the feed.
  pub limit:        usize,
  pub timeout_secs: u64,
}

impl Default for TrendsConfig {
  fn default() -> Self {
    Self { url: DEFAULT_TRENDS_URL.to_string(), limit: 5, timeout_secs: 10 }
  }
}

// ─── Source ──────────────────────────────────────────────────────────────────

/// A [`TrendSource`] backed by a syndication feed.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct RssTrendSource {
  client: Client,
  config: TrendsConfig,
}

impl RssTrendSource {
  pub fn new(config: TrendsConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(Error::Client)?;
    Ok(Self { client, config })
  }

  /// Fetch and parse the feed, surfacing every failure.
  pub async fn try_fetch(&self) -> Result<Vec<Topic>> {
    let resp = self.client.get(&self.config.url).send().await?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Status(status.as_u16()));
    }

    let body = resp.bytes().await?;
    let titles = parse_titles(&body, self.config.limit)?;
    if titles.is_empty() {
      return Err(Error::NoEntries);
    }
    Ok(titles.into_iter().map(Topic::from).collect())
  }
}

impl TrendSource for RssTrendSource {
  async fn fetch_topics(&self) -> TopicFetch {
    match self.try_fetch().await {
      Ok(topics) => {
        tracing::info!(count = topics.len(), "fetched trends");
        TopicFetch::Live(topics)
      }
      Err(e) => {
        tracing::warn!(
          error = %e,
          url = %self.config.url,
          "trend fetch failed, using fallback topics"
        );
        TopicFetch::fallback(e.to_string())
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use httpmock::prelude::*;

  use super::*;

  const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>Daily Search Trends</title>
<item><title>猫動画</title></item>
<item><title>AI規制</title></item>
</channel></rss>"#;

  fn source(url: String) -> RssTrendSource {
    RssTrendSource::new(TrendsConfig { url, limit: 5, timeout_secs: 2 }).unwrap()
  }

  #[tokio::test]
  async fn live_topics_in_feed_order() {
    let server = MockServer::start_async().await;
    server
      .mock_async(|when, then| {
        when.method(GET).path("/rss");
        then.status(200).header("content-type", "application/rss+xml").body(RSS);
      })
      .await;

    let fetch = source(server.url("/rss")).fetch_topics().await;
    assert_eq!(
      fetch,
      TopicFetch::Live(vec![Topic::from("猫動画"), Topic::from("AI規制")])
    );
  }

  #[tokio::test]
  async fn http_error_falls_back() {
    let server = MockServer::start_async().await;
    server
      .mock_async(|when, then| {
        when.method(GET).path("/rss");
        then.status(503);
      })
      .await;

    let fetch = source(server.url("/rss")).fetch_topics().await;
    assert!(fetch.is_fallback());
    assert_eq!(fetch.topics()[0].as_str(), "AI");
  }

  #[tokio::test]
  async fn garbage_body_falls_back() {
    let server = MockServer::start_async().await;
    server
      .mock_async(|when, then| {
        when.method(GET).path("/rss");
        then.status(200).body("<rss><channel><item><title>broken");
      })
      .await;

    let fetch = source(server.url("/rss")).fetch_topics().await;
    assert!(fetch.is_fallback());
    assert_eq!(fetch.topics().len(), 5);
  }

  #[tokio::test]
  async fn unreachable_host_falls_back() {
    let fetch = source("http://127.0.0.1:9/rss".into()).fetch_topics().await;
    let TopicFetch::Fallback { topics, reason } = fetch else {
      panic!("expected fallback")
    };
    assert_eq!(topics.len(), 5);
    assert!(!reason.is_empty());
  }
}
