use std::collections::VecDeque;

use duelist_catalog::client::{CardFetcher, RetryPolicy};
use duelist_catalog::errors::{CatalogError, FetchError};
use duelist_catalog::fallback::FALLBACK_MONSTERS;
use duelist_catalog::source::{Fetched, RemoteCatalog};
use duelist_engine::cards::Card;

/// Replays queued responses, then keeps answering with `tail`.
struct FakeCatalog {
    script: VecDeque<Result<Fetched, FetchError>>,
    tail: Result<Fetched, FetchError>,
    calls: usize,
}

impl FakeCatalog {
    fn new(
        script: impl IntoIterator<Item = Result<Fetched, FetchError>>,
        tail: Result<Fetched, FetchError>,
    ) -> Self {
        Self {
            script: script.into_iter().collect(),
            tail,
            calls: 0,
        }
    }
}

impl RemoteCatalog for FakeCatalog {
    fn fetch_random(&mut self) -> Result<Fetched, FetchError> {
        self.calls += 1;
        self.script.pop_front().unwrap_or_else(|| self.tail.clone())
    }

    fn probe(&mut self) -> bool {
        true
    }
}

fn monster(name: &str) -> Result<Fetched, FetchError> {
    Ok(Fetched::Monster(Card::new(
        name,
        1500,
        1200,
        "https://img/x.jpg",
        "Effect Monster",
    )))
}

fn spell() -> Result<Fetched, FetchError> {
    Ok(Fetched::Discarded {
        name: "Pot of Greed".into(),
        category: "Spell Card".into(),
    })
}

fn timeout() -> Result<Fetched, FetchError> {
    Err(FetchError::Timeout("read timed out".into()))
}

fn is_fallback(card: &Card) -> bool {
    FALLBACK_MONSTERS.iter().any(|e| e.name == card.name())
}

#[test]
fn first_valid_monster_is_returned() {
    let source = FakeCatalog::new([spell(), monster("Sangan")], spell());
    let mut fetcher = CardFetcher::with_seed(source, RetryPolicy::immediate(5), 1);
    let card = fetcher.fetch_random_monster().unwrap();
    assert_eq!(card.name(), "Sangan");
    assert_eq!(fetcher.source_mut().calls, 2);
}

#[test]
fn discards_exhaust_attempts_then_fall_back() {
    let source = FakeCatalog::new([], spell());
    let mut fetcher = CardFetcher::with_seed(source, RetryPolicy::immediate(5), 1);
    let card = fetcher.fetch_random_monster().unwrap();
    assert!(is_fallback(&card));
    assert!(card.has_artwork());
    assert_eq!(fetcher.source_mut().calls, 5);
}

#[test]
fn unnamed_monster_payload_is_not_accepted() {
    let unnamed = Ok(Fetched::Monster(Card::new("", 100, 100, "", "Normal Monster")));
    let source = FakeCatalog::new([unnamed], monster("Sangan"));
    let mut fetcher = CardFetcher::with_seed(source, RetryPolicy::immediate(5), 1);
    assert_eq!(fetcher.fetch_random_monster().unwrap().name(), "Sangan");
}

#[test]
fn all_connectivity_failures_surface_source_unavailable() {
    let source = FakeCatalog::new([], timeout());
    let mut fetcher = CardFetcher::with_seed(source, RetryPolicy::immediate(4), 1);
    let err = fetcher.fetch_random_monster().unwrap_err();
    assert!(matches!(err, CatalogError::SourceUnavailable { attempts: 4, .. }));
    assert_eq!(fetcher.source_mut().calls, 4);
}

#[test]
fn mixed_failures_fall_back() {
    // one non-network failure is enough to prefer the fallback table
    let source = FakeCatalog::new(
        [timeout(), Err(FetchError::Http { status: 502 }), timeout()],
        timeout(),
    );
    let mut fetcher = CardFetcher::with_seed(source, RetryPolicy::immediate(3), 1);
    assert!(is_fallback(&fetcher.fetch_random_monster().unwrap()));
}

#[test]
fn fetch_many_pads_with_fallback_when_unreachable() {
    let source = FakeCatalog::new([], timeout());
    let mut fetcher = CardFetcher::with_seed(source, RetryPolicy::immediate(2), 3);
    let cards = fetcher.fetch_many(3);
    assert_eq!(cards.len(), 3);
    assert!(cards.iter().all(is_fallback));
    // 3n single-card attempts of 2 requests each
    assert_eq!(fetcher.source_mut().calls, 18);
}

#[test]
fn fetch_many_prefers_remote_cards() {
    let source = FakeCatalog::new(
        [monster("A"), spell(), monster("B"), monster("C")],
        spell(),
    );
    let mut fetcher = CardFetcher::with_seed(source, RetryPolicy::immediate(5), 3);
    let names: Vec<String> = fetcher
        .fetch_many(3)
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(names, ["A", "B", "C"]);
}

#[test]
fn fetch_many_zero_is_empty() {
    let source = FakeCatalog::new([], monster("A"));
    let mut fetcher = CardFetcher::with_seed(source, RetryPolicy::immediate(5), 3);
    assert!(fetcher.fetch_many(0).is_empty());
    assert_eq!(fetcher.source_mut().calls, 0);
}

#[test]
fn fallback_many_is_deterministic_per_seed() {
    let draw = |seed| {
        let source = FakeCatalog::new([], timeout());
        let mut fetcher = CardFetcher::with_seed(source, RetryPolicy::immediate(1), seed);
        fetcher.fallback_many(6)
    };
    assert_eq!(draw(42), draw(42));
    assert!(draw(42).iter().all(|c| c.is_valid_monster()));
}
