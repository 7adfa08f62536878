//! # duelist-catalog: Card Sourcing
//!
//! Supplies validated monster cards for a duel from a remote random-card
//! catalog, retrying a bounded number of times and substituting curated
//! fallback cards when the catalog keeps failing.
//!
//! ```rust
//! use duelist_catalog::client::{CardFetcher, RetryPolicy};
//! use duelist_catalog::errors::FetchError;
//! use duelist_catalog::source::{Fetched, RemoteCatalog};
//!
//! struct Down;
//! impl RemoteCatalog for Down {
//!     fn fetch_random(&mut self) -> Result<Fetched, FetchError> {
//!         Err(FetchError::Http { status: 503 })
//!     }
//!     fn probe(&mut self) -> bool {
//!         false
//!     }
//! }
//!
//! let mut fetcher = CardFetcher::with_seed(Down, RetryPolicy::immediate(2), 9);
//! let hand = fetcher.fetch_many(3);
//! assert_eq!(hand.len(), 3);
//! assert!(hand.iter().all(|c| c.is_valid_monster()));
//! ```

pub mod client;
pub mod errors;
pub mod fallback;
pub mod source;
