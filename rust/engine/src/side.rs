use crate::cards::{Card, Stance};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two seats at the duel.
/// `Player` is driven by the caller, `Machine` by the engine's own policy.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Machine,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Machine,
            Side::Machine => Side::Player,
        }
    }

    pub fn is_human(self) -> bool {
        matches!(self, Side::Player)
    }

    fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Machine => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Machine => write!(f, "Machine"),
        }
    }
}

/// A card revealed for the current round together with its stance.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Play {
    pub card: Card,
    /// Index into the side's assigned cards
    pub index: usize,
    pub stance: Stance,
}

impl Play {
    pub fn power(&self) -> u32 {
        self.card.power(self.stance)
    }
}

/// Card pool, score and in-flight selection of one side.
///
/// `available` and `used` hold indices into `cards`; together they always
/// partition the assigned set.
#[derive(Debug, Clone, Default)]
pub struct SideState {
    cards: Vec<Card>,
    available: Vec<usize>,
    used: Vec<usize>,
    score: u8,
    selection: Option<Play>,
}

impl SideState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn available_indices(&self) -> &[usize] {
        &self.available
    }

    pub fn used_indices(&self) -> &[usize] {
        &self.used
    }

    pub fn available(&self) -> Vec<&Card> {
        self.available.iter().map(|&i| &self.cards[i]).collect()
    }

    pub fn used(&self) -> Vec<&Card> {
        self.used.iter().map(|&i| &self.cards[i]).collect()
    }

    pub fn is_available(&self, index: usize) -> bool {
        self.available.contains(&index)
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn selection(&self) -> Option<&Play> {
        self.selection.as_ref()
    }

    pub fn has_selected(&self) -> bool {
        self.selection.is_some()
    }

    /// Replace the whole pool; every card becomes available again.
    pub fn assign(&mut self, cards: Vec<Card>) {
        self.available = (0..cards.len()).collect();
        self.used.clear();
        self.cards = cards;
    }

    /// Move `index` from available to used and record it as this round's play.
    /// Callers check availability first.
    pub fn consume(&mut self, index: usize, stance: Stance) -> &Play {
        self.available.retain(|&i| i != index);
        self.used.push(index);
        let card = self.cards[index].clone();
        self.selection.insert(Play {
            card,
            index,
            stance,
        })
    }

    pub fn add_point(&mut self) {
        self.score = self.score.saturating_add(1);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Zero the score and forget the selection; the pool is untouched.
    pub fn clear_round_state(&mut self) {
        self.score = 0;
        self.selection = None;
    }

    /// Return every used card to the available pool.
    pub fn restore_pool(&mut self) {
        self.available = (0..self.cards.len()).collect();
        self.used.clear();
    }
}

/// Two [`SideState`]s addressed by [`Side`].
#[derive(Debug, Clone, Default)]
pub struct Sides([SideState; 2]);

impl Sides {
    pub fn get(&self, side: Side) -> &SideState {
        &self.0[side.index()]
    }

    pub fn get_mut(&mut self, side: Side) -> &mut SideState {
        &mut self.0[side.index()]
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SideState> {
        self.0.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> Vec<Card> {
        vec![
            Card::monster("A", 1, 1),
            Card::monster("B", 2, 2),
            Card::monster("C", 3, 3),
        ]
    }

    #[test]
    fn consume_moves_index_to_used() {
        let mut s = SideState::new();
        s.assign(three());
        let play = s.consume(1, Stance::Offense).clone();
        assert_eq!(play.card.name(), "B");
        assert_eq!(s.available_indices(), &[0, 2]);
        assert_eq!(s.used_indices(), &[1]);
        assert!(!s.is_available(1));
        assert_eq!(s.available().len() + s.used().len(), 3);
    }

    #[test]
    fn assign_resets_pool() {
        let mut s = SideState::new();
        s.assign(three());
        s.consume(0, Stance::Defense);
        s.assign(three());
        assert_eq!(s.available_indices(), &[0, 1, 2]);
        assert!(s.used_indices().is_empty());
    }

    #[test]
    fn other_side_flips() {
        assert_eq!(Side::Player.other(), Side::Machine);
        assert_eq!(Side::Machine.other(), Side::Player);
        assert!(Side::Player.is_human());
    }
}
