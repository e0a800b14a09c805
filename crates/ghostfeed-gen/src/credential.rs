//! Where the backend credential comes from.
//!
//! The credential is looked up on every generation call and is never cached,
//! so a missing key is a per-call condition rather than a start-up failure.

/// A source for the generation backend's API key.
pub trait CredentialSource: Send + Sync {
  /// Human-readable name of the credential, for diagnostics.
  fn name(&self) -> &str;

  /// The key, or `None` when unset or blank.
  fn credential(&self) -> Option<String>;
}

/// Reads the key from a process environment variable.
#[derive(Debug, Clone)]
pub struct EnvCredential {
  var: String,
}

impl EnvCredential {
  pub fn new(var: impl Into<String>) -> Self { Self { var: var.into() } }
}

impl CredentialSource for EnvCredential {
  fn name(&self) -> &str { &self.var }

  fn credential(&self) -> Option<String> {
    std::env::var(&self.var).ok().filter(|v| !v.trim().is_empty())
  }
}

/// A fixed key (or its absence). Useful when the key is injected by the
/// embedding program rather than the environment.
#[derive(Debug, Clone)]
pub struct StaticCredential(pub Option<String>);

impl CredentialSource for StaticCredential {
  fn name(&self) -> &str { "static credential" }

  fn credential(&self) -> Option<String> {
    self.0.clone().filter(|v| !v.trim().is_empty())
  }
}
