//! Random sources for turn order, stances and the machine's card choice.
//!
//! The duel never touches a global RNG: every decision goes through a
//! [`DuelRng`], so a seeded or scripted source makes a whole duel replayable.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::VecDeque;
use std::fmt::Debug;

pub trait DuelRng: Send + Debug {
    /// Fair coin. Used for turn ownership (`true` = player) and stances
    /// (`true` = offense).
    fn coin_flip(&mut self) -> bool;

    /// Uniform index in `0..len`. `len` is always at least 1.
    fn pick(&mut self, len: usize) -> usize;
}

#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: ChaCha20Rng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl DuelRng for SeededRng {
    fn coin_flip(&mut self) -> bool {
        self.inner.random_bool(0.5)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.inner.random_range(0..len.max(1))
    }
}

/// Replays queued coin flips and picks, then falls back to a seeded source.
///
/// ```
/// use duelist_engine::rng::{DuelRng, ScriptedRng};
///
/// let mut rng = ScriptedRng::new().flips([true, false]).picks([2]);
/// assert!(rng.coin_flip());
/// assert!(!rng.coin_flip());
/// assert_eq!(rng.pick(3), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    flips: VecDeque<bool>,
    picks: VecDeque<usize>,
    fallback: SeededRng,
}

impl Default for ScriptedRng {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self {
            flips: VecDeque::new(),
            picks: VecDeque::new(),
            fallback: SeededRng::new(0),
        }
    }

    pub fn flips(mut self, flips: impl IntoIterator<Item = bool>) -> Self {
        self.flips.extend(flips);
        self
    }

    pub fn picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }
}

impl DuelRng for ScriptedRng {
    fn coin_flip(&mut self) -> bool {
        match self.flips.pop_front() {
            Some(v) => v,
            None => self.fallback.coin_flip(),
        }
    }

    fn pick(&mut self, len: usize) -> usize {
        let len = len.max(1);
        match self.picks.pop_front() {
            // out-of-range script entries wrap rather than panic
            Some(v) => v % len,
            None => self.fallback.pick(len),
        }
    }
}
