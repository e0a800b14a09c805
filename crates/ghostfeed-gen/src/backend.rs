//! The remote text-completion backend.
//!
//! [`TextBackend`] isolates the network call so the generator's fallback
//! handling can be exercised without one. [`GeminiBackend`] speaks the
//! Gemini `generateContent` REST API.

use std::{future::Future, time::Duration};

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
  GenerationConfig,
  error::{Error, Result},
};

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
  pub max_output_tokens: u32,
  pub temperature:       f32,
}

/// A prompt-in, text-out completion service.
pub trait TextBackend: Send + Sync {
  /// Complete `prompt`. Returns the raw text as produced by the backend.
  fn complete<'a>(
    &'a self,
    api_key: &'a str,
    prompt: &'a str,
    params: GenerationParams,
  ) -> impl Future<Output = Result<String>> + Send + 'a;
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
  contents:          [RequestContent<'a>; 1],
  generation_config: RequestConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
  role:  &'static str,
  parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
  text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestConfig {
  max_output_tokens: u32,
  temperature:       f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
  content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
  #[serde(default)]
  parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
  text: Option<String>,
}

/// Concatenate the text parts of the first candidate.
pub fn extract_text(body: &str) -> Result<String> {
  let resp: GenerateResponse =
    serde_json::from_str(body).map_err(|e| Error::Malformed(e.to_string()))?;

  let content = resp
    .candidates
    .into_iter()
    .next()
    .and_then(|c| c.content)
    .ok_or_else(|| Error::Malformed("no candidates in response".into()))?;

  let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
  if text.trim().is_empty() {
    return Err(Error::Empty);
  }
  Ok(text)
}

/// Longest response excerpt carried in [`Error::Status`].
const MAX_ERROR_BODY_CHARS: usize = 200;

fn truncate_body(body: &str) -> String {
  let body = body.trim();
  match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
    Some((cut, _)) => format!("{}…", &body[..cut]),
    None => body.to_string(),
  }
}

// ─── Gemini ──────────────────────────────────────────────────────────────────

/// HTTP client for the Gemini API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct GeminiBackend {
  client:   Client,
  endpoint: String,
  model:    String,
}

impl GeminiBackend {
  pub fn new(config: &GenerationConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(Error::Client)?;
    Ok(Self {
      client,
      endpoint: config.endpoint.trim_end_matches('/').to_string(),
      model: config.model.clone(),
    })
  }

  fn url(&self) -> String {
    format!("{}/models/{}:generateContent", self.endpoint, self.model)
  }
}

impl TextBackend for GeminiBackend {
  async fn complete<'a>(
    &'a self,
    api_key: &'a str,
    prompt: &'a str,
    params: GenerationParams,
  ) -> Result<String> {
    let request = GenerateRequest {
      contents:          [RequestContent { role: "user", parts: [RequestPart { text: prompt }] }],
      generation_config: RequestConfig {
        max_output_tokens: params.max_output_tokens,
        temperature:       params.temperature,
      },
    };

    let resp = self
      .client
      .post(self.url())
      .header("x-goog-api-key", api_key)
      .json(&request)
      .send()
      .await?;

    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
      return Err(Error::Status { status: status.as_u16(), body: truncate_body(&body) });
    }
    extract_text(&body)
  }
}

#[cfg(test)]
mod tests {
  use httpmock::prelude::*;

  use super::*;

  const PARAMS: GenerationParams =
    GenerationParams { max_output_tokens: 100, temperature: 0.9 };

  fn backend(endpoint: String, timeout_secs: u64) -> GeminiBackend {
    GeminiBackend::new(&GenerationConfig {
      endpoint,
      model: "test-model".into(),
      timeout_secs,
      ..GenerationConfig::default()
    })
    .unwrap()
  }

  #[test]
  fn request_body_shape() {
    let request = GenerateRequest {
      contents:          [RequestContent { role: "user", parts: [RequestPart { text: "hi" }] }],
      generation_config: RequestConfig { max_output_tokens: 100, temperature: 0.5 },
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
    assert_eq!(value["generationConfig"]["maxOutputTokens"], 100);
    assert_eq!(value["generationConfig"]["temperature"], 0.5);
  }

  #[test]
  fn extract_joins_parts() {
    let body = r#"{"candidates":[{"content":{"parts":[{"text":"人類は"},{"text":"愚かだ。"}]}}]}"#;
    assert_eq!(extract_text(body).unwrap(), "人類は愚かだ。");
  }

  #[test]
  fn extract_rejects_missing_candidates() {
    assert!(matches!(extract_text(r#"{"candidates":[]}"#), Err(Error::Malformed(_))));
    assert!(matches!(extract_text(r#"{}"#), Err(Error::Malformed(_))));
    assert!(matches!(extract_text("<html>"), Err(Error::Malformed(_))));
  }

  #[test]
  fn extract_rejects_blank_text() {
    let body = r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#;
    assert!(matches!(extract_text(body), Err(Error::Empty)));
  }

  #[tokio::test]
  async fn posts_prompt_with_key() {
    let server = MockServer::start_async().await;
    let mock = server
      .mock_async(|when, then| {
        when
          .method(POST)
          .path("/models/test-model:generateContent")
          .header("x-goog-api-key", "secret");
        then
          .status(200)
          .header("content-type", "application/json")
          .body(r#"{"candidates":[{"content":{"parts":[{"text":"監視対象に追加。"}]}}]}"#);
      })
      .await;

    let text = backend(server.base_url(), 5)
      .complete("secret", "prompt", PARAMS)
      .await
      .unwrap();
    assert_eq!(text, "監視対象に追加。");
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn non_success_status_is_an_error() {
    let server = MockServer::start_async().await;
    server
      .mock_async(|when, then| {
        when.method(POST);
        then.status(403).body("forbidden");
      })
      .await;

    let err = backend(server.base_url(), 5)
      .complete("bad", "prompt", PARAMS)
      .await
      .unwrap_err();
    assert!(matches!(err, Error::Status { status: 403, .. }));
  }

  #[test]
  fn short_bodies_are_kept() {
    assert_eq!(truncate_body("  forbidden \n"), "forbidden");
  }

  #[tokio::test]
  async fn long_error_bodies_are_truncated() {
    let page = "エラー".repeat(1_000);
    let server = MockServer::start_async().await;
    server
      .mock_async(|when, then| {
        when.method(POST);
        then.status(500).body(page.as_str());
      })
      .await;

    let err = backend(server.base_url(), 5)
      .complete("k", "prompt", PARAMS)
      .await
      .unwrap_err();
    let Error::Status { status, body } = err else { panic!("expected status error") };
    assert_eq!(status, 500);
    assert_eq!(body.chars().count(), MAX_ERROR_BODY_CHARS + 1);
    assert!(body.ends_with('…'));
  }

  #[tokio::test]
  async fn slow_backend_times_out() {
    let server = MockServer::start_async().await;
    server
      .mock_async(|when, then| {
        when.method(POST);
        then.status(200).delay(Duration::from_secs(3)).body("{}");
      })
      .await;

    let err = backend(server.base_url(), 1)
      .complete("k", "prompt", PARAMS)
      .await
      .unwrap_err();
    assert!(matches!(err, Error::Http(ref e) if e.is_timeout()));
  }
}
