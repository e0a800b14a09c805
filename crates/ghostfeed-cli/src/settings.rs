//! Layered runtime configuration.
//!
//! Sources, later ones winning: built-in defaults, an optional TOML file,
//! then `GHOSTFEED_*` environment variables (`__` separates nested keys, e.g.
//! `GHOSTFEED_TRENDS__URL`).

use std::path::{Path, PathBuf};

use ghostfeed_core::factory::DEFAULT_REPLY_PROBABILITY;
use ghostfeed_gen::GenerationConfig;
use ghostfeed_trends::TrendsConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// The JSON feed read by the renderer.
  pub feed_path:         PathBuf,
  pub reply_probability: f64,
  pub trends:            TrendsConfig,
  pub generation:        GenerationConfig,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      feed_path:         PathBuf::from("docs/data.json"),
      reply_probability: DEFAULT_REPLY_PROBABILITY,
      trends:            TrendsConfig::default(),
      generation:        GenerationConfig::default(),
    }
  }
}

impl Settings {
  /// Build settings from `file` (if it exists) and the environment.
  pub fn load(file: &Path) -> Result<Self, ::config::ConfigError> {
    ::config::Config::builder()
      .add_source(::config::File::from(file).required(false))
      .add_source(
        ::config::Environment::with_prefix("GHOSTFEED")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?
      .try_deserialize()
  }
}
