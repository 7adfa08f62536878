use std::thread;
use std::time::Duration;

use duelist_engine::cards::Card;
use duelist_engine::rng::{DuelRng, SeededRng};
use tracing::{debug, info, warn};

use crate::errors::{CatalogError, FetchError};
use crate::fallback::random_fallback;
use crate::source::{Fetched, RemoteCatalog};

/// How persistently a single card is requested before giving up.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Pause between consecutive attempts; none after the last one.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff: Duration::from_millis(800),
        }
    }
}

impl RetryPolicy {
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: Duration::ZERO,
        }
    }
}

/// Turns an unreliable [`RemoteCatalog`] into a steady supply of playable
/// cards, falling back to the curated table when the catalog misbehaves.
pub struct CardFetcher<S> {
    source: S,
    policy: RetryPolicy,
    rng: Box<dyn DuelRng>,
}

impl<S: RemoteCatalog> CardFetcher<S> {
    pub fn new(source: S, policy: RetryPolicy) -> Self {
        Self::with_rng(source, policy, SeededRng::new(rand::random()))
    }

    pub fn with_seed(source: S, policy: RetryPolicy, seed: u64) -> Self {
        Self::with_rng(source, policy, SeededRng::new(seed))
    }

    pub fn with_rng(source: S, policy: RetryPolicy, rng: impl DuelRng + 'static) -> Self {
        Self {
            source,
            policy,
            rng: Box::new(rng),
        }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// One playable card.
    ///
    /// Discarded payloads and failed requests each use up an attempt. When
    /// attempts run out the card comes from the fallback table, unless every
    /// attempt failed to reach the catalog at all.
    pub fn fetch_random_monster(&mut self) -> Result<Card, CatalogError> {
        let max = self.policy.max_attempts.max(1);
        let mut unreachable = 0;
        let mut last_error: Option<FetchError> = None;

        for attempt in 1..=max {
            match self.source.fetch_random() {
                Ok(Fetched::Monster(card)) if card.is_valid_monster() => {
                    info!(attempt, card = %card.compact(), "card fetched from catalog");
                    return Ok(card);
                }
                Ok(Fetched::Monster(card)) => {
                    debug!(attempt, card = card.name(), "discarded unusable monster");
                }
                Ok(Fetched::Discarded { name, category }) => {
                    debug!(attempt, card = %name, category = %category, "discarded non-monster");
                }
                Err(e) => {
                    warn!(attempt, max, error = %e, "catalog request failed");
                    if e.is_connectivity() {
                        unreachable += 1;
                    }
                    last_error = Some(e);
                }
            }
            if attempt < max && !self.policy.backoff.is_zero() {
                thread::sleep(self.policy.backoff);
            }
        }

        if unreachable == max {
            let last = last_error.map(|e| e.to_string()).unwrap_or_default();
            return Err(CatalogError::SourceUnavailable {
                attempts: max,
                last,
            });
        }
        Ok(self.fallback())
    }

    /// Exactly `count` playable cards. Never fails: after `3 * count`
    /// single-card attempts the shortfall is filled from the fallback table.
    pub fn fetch_many(&mut self, count: usize) -> Vec<Card> {
        let mut cards = Vec::with_capacity(count);
        let budget = count.saturating_mul(3);
        let mut attempts = 0;
        while cards.len() < count && attempts < budget {
            match self.fetch_random_monster() {
                Ok(card) => {
                    cards.push(card);
                    debug!(have = cards.len(), want = count, "card collected");
                }
                Err(e) => warn!(error = %e, "could not fetch card {}", cards.len() + 1),
            }
            attempts += 1;
        }
        while cards.len() < count {
            cards.push(self.fallback());
        }
        cards
    }

    /// `count` cards straight from the fallback table, without touching the
    /// catalog.
    pub fn fallback_many(&mut self, count: usize) -> Vec<Card> {
        (0..count).map(|_| self.fallback()).collect()
    }

    pub fn probe(&mut self) -> bool {
        self.source.probe()
    }

    fn fallback(&mut self) -> Card {
        let card = random_fallback(self.rng.as_mut());
        info!(card = %card.compact(), "using fallback card");
        card
    }
}
