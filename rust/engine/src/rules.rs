use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::Stance;
use crate::side::{Play, Side};

/// Cards each side holds for one duel.
pub const HAND_SIZE: usize = 3;

/// Points needed to take the duel.
pub const WINNING_SCORE: u8 = 2;

/// Rounds in a duel.
pub const MAX_ROUNDS: u8 = 3;

/// Result of a single round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(tag = "result", content = "side", rename_all = "snake_case")]
pub enum RoundOutcome {
    Won(Side),
    Draw,
}

impl RoundOutcome {
    pub fn winner(self) -> Option<Side> {
        match self {
            RoundOutcome::Won(side) => Some(side),
            RoundOutcome::Draw => None,
        }
    }
}

/// Which stance pairing decided the round, named from the player's side.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Matchup {
    OffenseVsOffense,
    OffenseVsDefense,
    DefenseVsOffense,
    DefenseVsDefense,
}

impl Matchup {
    pub fn of(player: Stance, machine: Stance) -> Self {
        match (player, machine) {
            (Stance::Offense, Stance::Offense) => Matchup::OffenseVsOffense,
            (Stance::Offense, Stance::Defense) => Matchup::OffenseVsDefense,
            (Stance::Defense, Stance::Offense) => Matchup::DefenseVsOffense,
            (Stance::Defense, Stance::Defense) => Matchup::DefenseVsDefense,
        }
    }

    /// Human-readable statement of the rule applied.
    pub fn explanation(self) -> &'static str {
        match self {
            Matchup::OffenseVsOffense => "Both in offense: higher offense wins",
            Matchup::OffenseVsDefense => "Offense vs defense: attacker wins if offense > defense",
            Matchup::DefenseVsOffense => "Defense vs offense: attacker wins if offense > defense",
            Matchup::DefenseVsDefense => "Both in defense: automatic draw",
        }
    }
}

/// Outcome of one round with everything a view needs to explain it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u8,
    pub player: Play,
    pub player_power: u32,
    pub machine: Play,
    pub machine_power: u32,
    pub outcome: RoundOutcome,
    pub matchup: Matchup,
}

impl RoundReport {
    pub fn explanation(&self) -> &'static str {
        self.matchup.explanation()
    }
}

impl fmt::Display for RoundReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            RoundOutcome::Won(side) => writeln!(f, "{} WINS!", side.to_string().to_uppercase())?,
            RoundOutcome::Draw => writeln!(f, "DRAW!")?,
        }
        writeln!(
            f,
            "{} ({}: {}) vs {} ({}: {})",
            self.player.card.name(),
            self.player.stance.label(),
            self.player_power,
            self.machine.card.name(),
            self.machine.stance.label(),
            self.machine_power
        )?;
        write!(f, "Rule: {}", self.explanation())
    }
}

/// Decide a round from both sides' plays.
///
/// Offense against offense goes to the higher power. An attacker beats a
/// defender only with strictly greater offense than the defender's defense;
/// a defender never scores. Two defenders always draw.
///
/// # Examples
///
/// ```
/// use duelist_engine::cards::{Card, Stance};
/// use duelist_engine::rules::{resolve_round, RoundOutcome};
/// use duelist_engine::side::{Play, Side};
///
/// let dragon = Play { card: Card::monster("Dragon", 3000, 2500), index: 0, stance: Stance::Offense };
/// let elf = Play { card: Card::monster("Elf", 800, 2000), index: 0, stance: Stance::Defense };
///
/// let report = resolve_round(1, &dragon, &elf);
/// assert_eq!(report.outcome, RoundOutcome::Won(Side::Player));
/// ```
pub fn resolve_round(round: u8, player: &Play, machine: &Play) -> RoundReport {
    let player_power = player.power();
    let machine_power = machine.power();
    let matchup = Matchup::of(player.stance, machine.stance);

    let outcome = match matchup {
        Matchup::OffenseVsOffense => {
            if player_power > machine_power {
                RoundOutcome::Won(Side::Player)
            } else if machine_power > player_power {
                RoundOutcome::Won(Side::Machine)
            } else {
                RoundOutcome::Draw
            }
        }
        Matchup::OffenseVsDefense => attack(Side::Player, player_power, machine_power),
        Matchup::DefenseVsOffense => attack(Side::Machine, machine_power, player_power),
        Matchup::DefenseVsDefense => RoundOutcome::Draw,
    };

    RoundReport {
        round,
        player: player.clone(),
        player_power,
        machine: machine.clone(),
        machine_power,
        outcome,
        matchup,
    }
}

fn attack(attacker: Side, offense: u32, defense: u32) -> RoundOutcome {
    if offense > defense {
        RoundOutcome::Won(attacker)
    } else {
        RoundOutcome::Draw
    }
}

/// A duel is over once either side reaches [`WINNING_SCORE`] or the
/// [`MAX_ROUNDS`]th round has been resolved, even if the scores are tied.
pub fn duel_is_over(player_score: u8, machine_score: u8, round: u8) -> bool {
    player_score >= WINNING_SCORE || machine_score >= WINNING_SCORE || round >= MAX_ROUNDS
}

/// Side with the higher score, or `None` on a tie.
pub fn leader(player_score: u8, machine_score: u8) -> Option<Side> {
    match player_score.cmp(&machine_score) {
        std::cmp::Ordering::Greater => Some(Side::Player),
        std::cmp::Ordering::Less => Some(Side::Machine),
        std::cmp::Ordering::Equal => None,
    }
}
