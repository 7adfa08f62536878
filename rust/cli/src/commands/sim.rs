//! Simulation command: automated duels on both sides.
//!
//! The player side picks uniformly among its available cards, so the run
//! measures the rules and the random stances rather than any strategy. Hands
//! always come from the fallback table, which keeps runs offline and
//! reproducible from the seed.
//!
//! # Environment Variables
//!
//! - `DUELIST_SIM_BREAK_AFTER`: stop after N duels as if interrupted

use std::io::Write;

use duelist_catalog::fallback::random_fallback;
use duelist_engine::cards::Card;
use duelist_engine::duel::Duel;
use duelist_engine::logger::DuelRecord;
use duelist_engine::rng::{DuelRng, SeededRng};
use duelist_engine::rules::HAND_SIZE;
use duelist_engine::side::Side;
use tracing::debug;

use crate::error::CliError;
use crate::io_utils::open_duel_log;
use crate::validation::validate_positive;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimTally {
    pub player_wins: u32,
    pub machine_wins: u32,
    pub draws: u32,
}

impl SimTally {
    fn record(&mut self, winner: Option<Side>) {
        match winner {
            Some(Side::Player) => self.player_wins += 1,
            Some(Side::Machine) => self.machine_wins += 1,
            None => self.draws += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.player_wins + self.machine_wins + self.draws
    }
}

/// Play one fully automated duel. Each duel gets its own seed so any of them
/// can be replayed alone.
pub fn simulate_duel(seed: u64) -> Result<Duel, CliError> {
    let mut rng = SeededRng::new(seed);
    let hand = |rng: &mut SeededRng| -> Vec<Card> {
        (0..HAND_SIZE).map(|_| random_fallback(&mut *rng)).collect()
    };

    let mut duel = Duel::with_seed(seed);
    duel.assign_cards(Side::Player, hand(&mut rng))?;
    duel.assign_cards(Side::Machine, hand(&mut rng))?;
    duel.start()?;
    while duel.is_started() {
        let available = duel.available_indices(Side::Player);
        let index = available[rng.pick(available.len())];
        duel.select_card(Side::Player, index)?;
    }
    Ok(duel)
}

pub fn handle_sim_command(
    duels: u32,
    seed: Option<u64>,
    output: Option<String>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let total = validate_positive("duels", duels).map_err(CliError::InvalidInput)?;
    let break_after = std::env::var("DUELIST_SIM_BREAK_AFTER")
        .ok()
        .and_then(|v| v.parse::<u32>().ok());

    let base_seed = seed.unwrap_or_else(rand::random);
    let mut logger = open_duel_log(output.as_deref())?;
    let mut tally = SimTally::default();

    for i in 0..total {
        let duel_seed = base_seed.wrapping_add(i as u64);
        let duel = simulate_duel(duel_seed)?;
        tally.record(duel.winner());
        debug!(duel = i + 1, seed = duel_seed, winner = ?duel.winner(), "duel simulated");

        if let Some(logger) = logger.as_mut() {
            let id = logger.next_id();
            if let Some(record) = DuelRecord::from_duel(id, Some(duel_seed), &duel) {
                logger.write(&record)?;
            }
        }

        let completed = i + 1;
        if let Some(b) = break_after
            && completed == b
            && completed < total
        {
            writeln!(out, "Interrupted: simulated {}/{}", completed, total)?;
            return Err(CliError::Interrupted(format!(
                "simulated {}/{}",
                completed, total
            )));
        }
    }

    writeln!(out, "Simulated: {} duels (seed={})", tally.total(), base_seed)?;
    writeln!(out, "Player wins: {}", tally.player_wins)?;
    writeln!(out, "Machine wins: {}", tally.machine_wins)?;
    writeln!(out, "Draws: {}", tally.draws)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_duel_always_concludes() {
        for seed in 0..20 {
            let duel = simulate_duel(seed).unwrap();
            let result = duel.result().copied().unwrap();
            assert!(!duel.is_started());
            assert!((2..=3).contains(&result.rounds_played));
        }
    }

    #[test]
    fn same_seed_same_history() {
        let a = simulate_duel(99).unwrap();
        let b = simulate_duel(99).unwrap();
        assert_eq!(a.history(), b.history());
        assert_eq!(a.cards(Side::Player), b.cards(Side::Player));
    }

    #[test]
    fn tally_counts_every_duel() {
        let mut out = Vec::new();
        handle_sim_command(10, Some(5), None, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Simulated: 10 duels (seed=5)"));
        let count = |label: &str| -> u32 {
            text.lines()
                .find_map(|l| l.strip_prefix(label))
                .and_then(|n| n.trim().parse().ok())
                .unwrap()
        };
        assert_eq!(
            count("Player wins:") + count("Machine wins:") + count("Draws:"),
            10
        );
    }

    #[test]
    fn zero_duels_is_invalid() {
        let mut out = Vec::new();
        let result = handle_sim_command(0, None, None, &mut out);
        assert!(matches!(result, Err(CliError::InvalidInput(ref m)) if m == "duels must be >= 1"));
        assert!(out.is_empty());
    }
}
