use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use crate::cards::{Card, Stance};
use crate::errors::DuelError;
use crate::events::{DuelEvent, DuelObserver};
use crate::rng::{DuelRng, SeededRng};
use crate::rules::{self, RoundOutcome, RoundReport, HAND_SIZE};
use crate::side::{Side, SideState, Sides};

/// Where a duel stands from the caller's point of view.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DuelPhase {
    NotStarted,
    /// Waiting for `awaiting` to reveal a card in `round`.
    InRound { round: u8, awaiting: Side },
    DuelEnded { winner: Option<Side> },
}

/// Final standing of a concluded duel.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DuelResult {
    pub winner: Option<Side>,
    pub player_score: u8,
    pub machine_score: u8,
    pub rounds_played: u8,
}

/// Best-of-three duel between the caller-driven player and the machine.
///
/// Every operation runs to completion on the caller's thread. When the turn
/// passes to the machine, its move is made inside the same call, and a round
/// is resolved as soon as the second card is revealed, so control only
/// returns once the player has to act or the duel is over.
///
/// # Examples
///
/// ```
/// use duelist_engine::cards::Card;
/// use duelist_engine::duel::{Duel, DuelPhase};
/// use duelist_engine::side::Side;
///
/// let cards = || vec![
///     Card::monster("Dark Magician", 2500, 2100),
///     Card::monster("Celtic Guardian", 1400, 1200),
///     Card::monster("Kuriboh", 300, 200),
/// ];
///
/// let mut duel = Duel::with_seed(42);
/// duel.assign_cards(Side::Player, cards()).unwrap();
/// duel.assign_cards(Side::Machine, cards()).unwrap();
/// duel.start().unwrap();
///
/// while let DuelPhase::InRound { .. } = duel.phase() {
///     let index = duel.available_indices(Side::Player)[0];
///     duel.select_card(Side::Player, index).unwrap();
/// }
/// assert!(matches!(duel.phase(), DuelPhase::DuelEnded { .. }));
/// ```
pub struct Duel {
    sides: Sides,
    round: u8,
    turn_owner: Side,
    started: bool,
    result: Option<DuelResult>,
    history: Vec<RoundReport>,
    rng: Box<dyn DuelRng>,
    observer: Option<Box<dyn DuelObserver>>,
}

impl fmt::Debug for Duel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Duel")
            .field("sides", &self.sides)
            .field("round", &self.round)
            .field("turn_owner", &self.turn_owner)
            .field("started", &self.started)
            .field("result", &self.result)
            .field("history", &self.history)
            .field("rng", &self.rng)
            .finish_non_exhaustive()
    }
}

impl Default for Duel {
    fn default() -> Self {
        Self::new()
    }
}

impl Duel {
    /// Duel driven by a randomly seeded source.
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SeededRng::new(seed))
    }

    pub fn with_rng(rng: impl DuelRng + 'static) -> Self {
        Self {
            sides: Sides::default(),
            round: 1,
            turn_owner: Side::Player,
            started: false,
            result: None,
            history: Vec::new(),
            rng: Box::new(rng),
            observer: None,
        }
    }

    /// Register the single receiver of notifications, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl DuelObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    // ---- queries ----

    pub fn phase(&self) -> DuelPhase {
        if let Some(result) = self.result {
            DuelPhase::DuelEnded {
                winner: result.winner,
            }
        } else if self.started {
            DuelPhase::InRound {
                round: self.round,
                awaiting: self.turn_owner,
            }
        } else {
            DuelPhase::NotStarted
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn round(&self) -> u8 {
        self.round
    }

    pub fn turn_owner(&self) -> Side {
        self.turn_owner
    }

    pub fn score(&self, side: Side) -> u8 {
        self.sides.get(side).score()
    }

    pub fn has_selected(&self, side: Side) -> bool {
        self.sides.get(side).has_selected()
    }

    pub fn side(&self, side: Side) -> &SideState {
        self.sides.get(side)
    }

    pub fn cards(&self, side: Side) -> &[Card] {
        self.sides.get(side).cards()
    }

    pub fn available(&self, side: Side) -> Vec<&Card> {
        self.sides.get(side).available()
    }

    pub fn used(&self, side: Side) -> Vec<&Card> {
        self.sides.get(side).used()
    }

    pub fn available_indices(&self, side: Side) -> &[usize] {
        self.sides.get(side).available_indices()
    }

    /// True while the duel is blocked on `side` revealing a card.
    pub fn is_waiting_for(&self, side: Side) -> bool {
        self.started && self.turn_owner == side && !self.has_selected(side)
    }

    /// Set once the duel has concluded; cleared by `start` and `reset`.
    pub fn result(&self) -> Option<&DuelResult> {
        self.result.as_ref()
    }

    /// Winner of the concluded duel; `None` while running or after a draw.
    pub fn winner(&self) -> Option<Side> {
        self.result.and_then(|r| r.winner)
    }

    pub fn history(&self) -> &[RoundReport] {
        &self.history
    }

    // ---- intents ----

    /// Give `side` exactly [`HAND_SIZE`] valid monsters.
    ///
    /// A rejected set leaves the side's previous assignment untouched.
    /// Emits `cards_ready` once both sides hold a full set. Refused while a
    /// duel is running; assign between duels or after `reset`.
    pub fn assign_cards(&mut self, side: Side, cards: Vec<Card>) -> Result<(), DuelError> {
        if self.started {
            return self.fail(DuelError::InvalidCardSet {
                side,
                reason: "cannot reassign cards while a duel is running".to_string(),
            });
        }
        if cards.len() != HAND_SIZE {
            return self.fail(DuelError::InvalidCardSet {
                side,
                reason: format!("expected exactly {} cards, got {}", HAND_SIZE, cards.len()),
            });
        }
        if let Some(bad) = cards.iter().find(|c| !c.is_valid_monster()) {
            let reason = format!("'{}' is not a valid monster", bad.name());
            return self.fail(DuelError::InvalidCardSet { side, reason });
        }

        debug!(side = %side, cards = ?cards.iter().map(Card::name).collect::<Vec<_>>(), "cards assigned");
        self.sides.get_mut(side).assign(cards);

        if self.cards(Side::Player).len() == HAND_SIZE && self.cards(Side::Machine).len() == HAND_SIZE
        {
            self.emit(DuelEvent::CardsReady);
        }
        Ok(())
    }

    /// Begin a fresh duel with the assigned cards.
    ///
    /// Scores, selections and card pools are reset and the first side is
    /// drawn at random. When the machine goes first its move is made before
    /// this returns.
    pub fn start(&mut self) -> Result<(), DuelError> {
        for side in [Side::Player, Side::Machine] {
            if self.cards(side).len() != HAND_SIZE {
                return self.fail(DuelError::InvalidCardSet {
                    side,
                    reason: "no cards assigned".to_string(),
                });
            }
        }

        for s in self.sides.iter_mut() {
            s.clear_round_state();
            s.restore_pool();
        }
        self.round = 1;
        self.result = None;
        self.history.clear();
        self.started = true;
        self.turn_owner = self.draw_turn_owner();

        info!(first = %self.turn_owner, "duel started");
        self.emit(DuelEvent::DuelStarted {
            first: self.turn_owner,
            round: self.round,
        });
        self.announce_round();
        Ok(())
    }

    /// Reveal the card at `index` (into the side's assigned cards) for this round.
    ///
    /// The stance is drawn at random. If the opponent already revealed, the
    /// round resolves within this call; if the turn passes to the machine, it
    /// plays within this call as well.
    pub fn select_card(&mut self, side: Side, index: usize) -> Result<(), DuelError> {
        if !self.started {
            return self.fail(DuelError::NotStarted);
        }
        if side != self.turn_owner || self.has_selected(side) {
            return self.fail(DuelError::WrongTurn { side });
        }
        let len = self.cards(side).len();
        if index >= len {
            return self.fail(DuelError::InvalidIndex { index, len });
        }
        if !self.sides.get(side).is_available(index) {
            return self.fail(DuelError::CardAlreadyUsed { side, index });
        }

        let shown_index = side.is_human().then_some(index);
        self.reveal(side, index, shown_index);
        Ok(())
    }

    /// Return to `NotStarted` with every assigned card available again.
    pub fn reset(&mut self) {
        for s in self.sides.iter_mut() {
            s.clear_round_state();
            s.restore_pool();
        }
        self.round = 1;
        self.started = false;
        self.result = None;
        self.history.clear();
        debug!("duel reset");
        self.emit(DuelEvent::DuelReset);
    }

    // ---- internals ----

    fn emit(&mut self, event: DuelEvent) {
        if let Some(obs) = self.observer.as_mut() {
            obs.on_event(&event);
        }
    }

    fn fail(&mut self, err: DuelError) -> Result<(), DuelError> {
        debug!(error = %err, "duel operation rejected");
        self.emit(DuelEvent::Error {
            message: err.to_string(),
            kind: err.kind(),
        });
        Err(err)
    }

    fn draw_turn_owner(&mut self) -> Side {
        if self.rng.coin_flip() {
            Side::Player
        } else {
            Side::Machine
        }
    }

    /// Emit the round/turn openers and let the machine move if it owns the turn.
    fn announce_round(&mut self) {
        self.emit(DuelEvent::RoundStarted {
            round: self.round,
            player_score: self.score(Side::Player),
            machine_score: self.score(Side::Machine),
        });
        self.emit(DuelEvent::TurnStarted {
            side: self.turn_owner,
            is_human: self.turn_owner.is_human(),
        });
        if self.turn_owner == Side::Machine {
            self.machine_turn();
        }
    }

    fn machine_turn(&mut self) {
        if !self.is_waiting_for(Side::Machine) {
            return;
        }
        let available = self.available_indices(Side::Machine).to_vec();
        if available.is_empty() {
            warn!(round = self.round, "machine has no cards left");
            return;
        }
        let index = available[self.rng.pick(available.len())];
        self.reveal(Side::Machine, index, None);
    }

    fn reveal(&mut self, side: Side, index: usize, shown_index: Option<usize>) {
        let stance = Stance::from_offense(self.rng.coin_flip());
        let card_name = self
            .sides
            .get_mut(side)
            .consume(index, stance)
            .card
            .name()
            .to_string();

        debug!(round = self.round, side = %side, card = %card_name, stance = %stance, "card revealed");
        self.emit(DuelEvent::CardSelected {
            side,
            card_name: card_name.clone(),
            index: shown_index,
        });
        self.emit(DuelEvent::StanceSet { side, stance });
        if side == Side::Machine {
            self.emit(DuelEvent::Status {
                message: format!("Machine selected: {}", card_name),
            });
        }

        let next = side.other();
        self.turn_owner = next;
        if self.has_selected(next) {
            self.resolve();
        } else if next == Side::Machine {
            self.machine_turn();
        } else {
            self.emit(DuelEvent::TurnStarted {
                side: next,
                is_human: true,
            });
        }
    }

    fn resolve(&mut self) {
        let (Some(player), Some(machine)) = (
            self.sides.get(Side::Player).selection(),
            self.sides.get(Side::Machine).selection(),
        ) else {
            return;
        };
        let report = rules::resolve_round(self.round, player, machine);

        if let RoundOutcome::Won(side) = report.outcome {
            self.sides.get_mut(side).add_point();
        }
        let (ps, ms) = (self.score(Side::Player), self.score(Side::Machine));
        info!(round = self.round, outcome = ?report.outcome, player_score = ps, machine_score = ms, "round resolved");

        self.history.push(report.clone());
        let explanation = report.explanation().to_string();
        self.emit(DuelEvent::RoundResult {
            report,
            explanation,
        });
        self.emit(DuelEvent::ScoreChanged {
            player_score: ps,
            machine_score: ms,
        });

        if rules::duel_is_over(ps, ms, self.round) {
            self.finish(ps, ms);
        } else {
            self.next_round();
        }
    }

    fn finish(&mut self, player_score: u8, machine_score: u8) {
        let winner = rules::leader(player_score, machine_score);
        self.started = false;
        self.result = Some(DuelResult {
            winner,
            player_score,
            machine_score,
            rounds_played: self.round,
        });
        info!(winner = ?winner, "duel ended");
        self.emit(DuelEvent::DuelEnded { winner });
    }

    fn next_round(&mut self) {
        self.round += 1;
        for s in self.sides.iter_mut() {
            s.clear_selection();
        }
        self.turn_owner = self.draw_turn_owner();
        debug!(round = self.round, turn = %self.turn_owner, "next round");
        self.announce_round();
    }
}
