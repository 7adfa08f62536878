use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::cards::Stance;
use crate::errors::ErrorKind;
use crate::rules::RoundReport;
use crate::side::Side;

/// Lifecycle notifications emitted by a [`crate::duel::Duel`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DuelEvent {
    /// Both sides now hold a full set of cards.
    CardsReady,
    DuelStarted {
        first: Side,
        round: u8,
    },
    RoundStarted {
        round: u8,
        player_score: u8,
        machine_score: u8,
    },
    TurnStarted {
        side: Side,
        is_human: bool,
    },
    /// `index` is withheld (`None`) for the machine's choice.
    CardSelected {
        side: Side,
        card_name: String,
        index: Option<usize>,
    },
    StanceSet {
        side: Side,
        stance: Stance,
    },
    RoundResult {
        report: RoundReport,
        explanation: String,
    },
    ScoreChanged {
        player_score: u8,
        machine_score: u8,
    },
    /// `winner` is `None` for a drawn duel.
    DuelEnded {
        winner: Option<Side>,
    },
    Status {
        message: String,
    },
    DuelReset,
    Error {
        message: String,
        kind: ErrorKind,
    },
}

impl DuelEvent {
    /// Snake-case tag, matching the serialized `type` field.
    pub fn name(&self) -> &'static str {
        match self {
            DuelEvent::CardsReady => "cards_ready",
            DuelEvent::DuelStarted { .. } => "duel_started",
            DuelEvent::RoundStarted { .. } => "round_started",
            DuelEvent::TurnStarted { .. } => "turn_started",
            DuelEvent::CardSelected { .. } => "card_selected",
            DuelEvent::StanceSet { .. } => "stance_set",
            DuelEvent::RoundResult { .. } => "round_result",
            DuelEvent::ScoreChanged { .. } => "score_changed",
            DuelEvent::DuelEnded { .. } => "duel_ended",
            DuelEvent::Status { .. } => "status",
            DuelEvent::DuelReset => "duel_reset",
            DuelEvent::Error { .. } => "error",
        }
    }
}

/// Receiver of duel notifications.
///
/// Delivery is synchronous and happens on the caller's thread, inside the
/// operation that produced the event. Closures taking `&DuelEvent` implement
/// this trait directly.
pub trait DuelObserver: Send {
    fn on_event(&mut self, event: &DuelEvent);
}

impl<F> DuelObserver for F
where
    F: FnMut(&DuelEvent) + Send,
{
    fn on_event(&mut self, event: &DuelEvent) {
        self(event)
    }
}

/// Shared, append-only record of events. Clones observe the same log, so one
/// handle can be given to the duel while another is inspected.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    inner: Arc<Mutex<Vec<DuelEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<DuelEvent>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn events(&self) -> Vec<DuelEvent> {
        self.lock().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.lock().iter().map(DuelEvent::name).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.lock().iter().filter(|e| e.name() == name).count()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<DuelEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl DuelObserver for EventLog {
    fn on_event(&mut self, event: &DuelEvent) {
        self.lock().push(event.clone());
    }
}
