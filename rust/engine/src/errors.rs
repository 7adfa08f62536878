use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::side::Side;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DuelError {
    #[error("Invalid card set for {side}: {reason}")]
    InvalidCardSet { side: Side, reason: String },
    #[error("The duel has not started")]
    NotStarted,
    #[error("It's not {side}'s turn")]
    WrongTurn { side: Side },
    #[error("Invalid card index {index} (expected 0..{len})")]
    InvalidIndex { index: usize, len: usize },
    #[error("Card {index} of {side} was already used in this duel")]
    CardAlreadyUsed { side: Side, index: usize },
}

impl DuelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DuelError::InvalidCardSet { .. } => ErrorKind::InvalidCardSet,
            DuelError::NotStarted => ErrorKind::NotStarted,
            DuelError::WrongTurn { .. } => ErrorKind::WrongTurn,
            DuelError::InvalidIndex { .. } => ErrorKind::InvalidIndex,
            DuelError::CardAlreadyUsed { .. } => ErrorKind::CardAlreadyUsed,
        }
    }
}

/// Stable classification carried by error notifications.
/// `SourceUnavailable` is raised by the card catalog, never by the duel itself.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidCardSet,
    NotStarted,
    WrongTurn,
    InvalidIndex,
    CardAlreadyUsed,
    SourceUnavailable,
}
