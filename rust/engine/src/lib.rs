//! # duelist-engine: Card Duel Engine Core
//!
//! A best-of-three card duel between a caller-driven player and an automated
//! machine opponent. Each round both sides reveal one creature card in a
//! random offense or defense stance and a fixed rule table decides the round.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card entity, stances and the valid-monster predicate
//! - [`side`] - Per-side card pools, scores and in-flight selections
//! - [`rules`] - Round resolution and duel end conditions
//! - [`duel`] - The duel state machine
//! - [`events`] - Lifecycle notifications and observers
//! - [`rng`] - Injectable random sources (seeded and scripted)
//! - [`logger`] - Duel records and JSONL serialization
//! - [`errors`] - Error types for duel operations
//!
//! ## Quick Start
//!
//! ```rust
//! use duelist_engine::cards::Card;
//! use duelist_engine::duel::Duel;
//! use duelist_engine::events::{DuelEvent, EventLog};
//! use duelist_engine::side::Side;
//!
//! let hand = || vec![
//!     Card::monster("Blue-Eyes White Dragon", 3000, 2500),
//!     Card::monster("Mystical Elf", 800, 2000),
//!     Card::monster("Battle Ox", 1700, 1000),
//! ];
//!
//! let log = EventLog::new();
//! let mut duel = Duel::with_seed(7);
//! duel.set_observer(log.clone());
//! duel.assign_cards(Side::Player, hand()).unwrap();
//! duel.assign_cards(Side::Machine, hand()).unwrap();
//! duel.start().unwrap();
//!
//! assert!(log.events().contains(&DuelEvent::CardsReady));
//! assert!(duel.is_waiting_for(Side::Player));
//! ```
//!
//! ## Deterministic Gameplay
//!
//! Turn order, stances and the machine's choices all come from one
//! [`rng::DuelRng`]. The same seed replays the same duel:
//!
//! ```rust
//! use duelist_engine::duel::Duel;
//!
//! let a = Duel::with_seed(42);
//! let b = Duel::with_seed(42);
//! // a and b will make identical random decisions
//! ```

pub mod cards;
pub mod duel;
pub mod errors;
pub mod events;
pub mod logger;
pub mod rng;
pub mod rules;
pub mod side;
