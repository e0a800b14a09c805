//! Persona-voiced text generation for ghostfeed.
//!
//! [`PersonaWriter`] implements [`ContentGenerator`]: it resolves a credential,
//! prompts a [`TextBackend`] and cleans the reply. It never fails outward. A
//! missing credential yields a fixed message; any backend problem yields one
//! of a few canned sentences about the topic.

mod backend;
mod credential;
mod error;
mod prompt;

pub use backend::{GeminiBackend, GenerationParams, TextBackend, extract_text};
pub use credential::{CredentialSource, EnvCredential, StaticCredential};
pub use error::{Error, Result};
pub use prompt::{
  build_prompt, clean_text, fallback_message, fallback_messages,
  missing_credential_message,
};

use ghostfeed_core::{
  error::GenerationFailure,
  persona::Persona,
  random::RandomSource,
  source::{ContentGenerator, Generated},
  topic::Topic,
};
use serde::Deserialize;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Settings for the generator, deserialised from the `[generation]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
  pub model:             String,
  /// Base URL up to and including the API version segment.
  pub endpoint:          String,
  /// Environment variable holding the API key.
  pub api_key_var:       String,
  pub max_output_tokens: u32,
  pub temperature:       f32,
  pub timeout_secs:      u64,
}

impl Default for GenerationConfig {
  fn default() -> Self {
    Self {
      model:             "gemini-2.0-flash-exp".to_string(),
      endpoint:          "https://generativelanguage.googleapis.com/v1beta".to_string(),
      api_key_var:       "GEMINI_API_KEY".to_string(),
      max_output_tokens: 100,
      temperature:       0.9,
      timeout_secs:      10,
    }
  }
}

impl GenerationConfig {
  pub fn params(&self) -> GenerationParams {
    GenerationParams {
      max_output_tokens: self.max_output_tokens,
      temperature:       self.temperature,
    }
  }
}

// ─── Generator ───────────────────────────────────────────────────────────────

/// The production [`ContentGenerator`].
pub struct PersonaWriter<B, C> {
  backend:    B,
  credential: C,
  params:     GenerationParams,
}

impl PersonaWriter<GeminiBackend, EnvCredential> {
  /// A writer backed by Gemini, reading the key from `config.api_key_var`.
  pub fn gemini(config: &GenerationConfig) -> Result<Self> {
    Ok(Self::new(
      GeminiBackend::new(config)?,
      EnvCredential::new(&config.api_key_var),
      config.params(),
    ))
  }
}

impl<B: TextBackend, C: CredentialSource> PersonaWriter<B, C> {
  pub fn new(backend: B, credential: C, params: GenerationParams) -> Self {
    Self { backend, credential, params }
  }

  async fn try_generate(&self, api_key: &str, prompt: &str) -> Result<String> {
    let raw = self.backend.complete(api_key, prompt, self.params).await?;
    let text = clean_text(&raw);
    if text.is_empty() {
      return Err(Error::Empty);
    }
    Ok(text)
  }
}

impl<B: TextBackend, C: CredentialSource> ContentGenerator for PersonaWriter<B, C> {
  async fn generate<'a, R>(
    &'a self,
    topic: &'a Topic,
    persona: &'a Persona,
    rng: &'a mut R,
  ) -> Generated
  where
    R: RandomSource + Send + ?Sized,
  {
    let Some(api_key) = self.credential.credential() else {
      tracing::warn!(credential = self.credential.name(), "credential not found");
      return Generated::Fallback {
        text:  missing_credential_message(topic),
        cause: GenerationFailure::MissingCredential {
          var: self.credential.name().to_string(),
        },
      };
    };

    let prompt = build_prompt(persona, topic);
    match self.try_generate(&api_key, &prompt).await {
      Ok(text) => {
        tracing::info!(persona = persona.display_name, "generated post");
        Generated::Live(text)
      }
      Err(e) => {
        tracing::warn!(
          error = %e,
          persona = persona.display_name,
          "generation failed, using fallback text"
        );
        Generated::Fallback {
          text:  fallback_message(topic, rng),
          cause: GenerationFailure::Backend(e.to_string()),
        }
      }
    }
  }
}
