//! The single seam through which all randomness flows.
//!
//! Topic choice, persona choice, post id characters, the reply flag and the
//! fallback template are all drawn from a [`RandomSource`]. Production code
//! uses [`RngSource`] over the OS generator; tests substitute
//! [`SequenceRandom`] to pin every draw.

use std::collections::VecDeque;

use rand::Rng as _;
use rand_core::{OsRng, RngCore};

pub trait RandomSource {
  /// A uniformly distributed index in `0..n`. `n` must be non-zero.
  fn below(&mut self, n: usize) -> usize;

  /// `true` with probability `p` (clamped to `[0, 1]`). A non-finite `p`
  /// never fires.
  fn chance(&mut self, p: f64) -> bool;
}

// ─── RNG-backed source ───────────────────────────────────────────────────────

/// Adapts any [`RngCore`] into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<OsRng> {
  /// Draw from the operating system's entropy source.
  pub fn os() -> Self { Self(OsRng) }
}

impl<R: RngCore> RandomSource for RngSource<R> {
  fn below(&mut self, n: usize) -> usize { self.0.gen_range(0..n) }

  fn chance(&mut self, p: f64) -> bool {
    p.is_finite() && self.0.gen_bool(p.clamp(0.0, 1.0))
  }
}

// ─── Scripted source ─────────────────────────────────────────────────────────

/// A deterministic source that replays queued answers.
///
/// `below(n)` pops the next queued index (reduced modulo `n`), `chance(_)`
/// pops the next queued coin. An exhausted queue yields `0` and `false`.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandom {
  picks: VecDeque<usize>,
  coins: VecDeque<bool>,
}

impl SequenceRandom {
  pub fn new() -> Self { Self::default() }

  /// Queue indices for successive `below` calls.
  pub fn picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
    self.picks.extend(picks);
    self
  }

  /// Queue outcomes for successive `chance` calls.
  pub fn coins(mut self, coins: impl IntoIterator<Item = bool>) -> Self {
    self.coins.extend(coins);
    self
  }

  /// Number of queued `below` answers not yet consumed.
  pub fn remaining_picks(&self) -> usize { self.picks.len() }
}

impl RandomSource for SequenceRandom {
  fn below(&mut self, n: usize) -> usize {
    self.picks.pop_front().unwrap_or(0) % n
  }

  fn chance(&mut self, _p: f64) -> bool { self.coins.pop_front().unwrap_or(false) }
}
