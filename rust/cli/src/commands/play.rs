//! # Play Command
//!
//! Interactive duel against the machine.
//!
//! Cards are fetched from the catalog (or drawn from the fallback table when
//! offline), both hands are assigned and the duel starts. The player types a
//! card number each turn; the machine's replies are computed by the engine
//! inside the same call and rendered after an optional pacing delay. Typing
//! `q` or closing stdin abandons the duel.

use std::io::{BufRead, Write};
use std::time::Duration;

use duelist_catalog::client::CardFetcher;
use duelist_catalog::source::RemoteCatalog;
use duelist_engine::cards::Card;
use duelist_engine::duel::Duel;
use duelist_engine::events::EventLog;
use duelist_engine::logger::DuelRecord;
use duelist_engine::side::Side;
use tracing::info;

use crate::commands::http_fetcher;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_card_line, format_duel_result};
use crate::io_utils::{open_duel_log, read_stdin_line};
use crate::ui;
use crate::validation::{ParseResult, parse_card_choice};

/// Per-invocation overrides from the command line.
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    pub seed: Option<u64>,
    pub offline: bool,
    pub pace_ms: Option<u64>,
    pub log: Option<String>,
}

pub fn handle_play_command(
    opts: PlayOptions,
    cfg: &Config,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = opts.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let mut fetcher = http_fetcher(cfg, seed);
    let offline = opts.offline || cfg.offline;
    play_with_fetcher(&mut fetcher, offline, seed, &opts, cfg, stdin, out, err)
}

#[allow(clippy::too_many_arguments)]
fn play_with_fetcher<S: RemoteCatalog>(
    fetcher: &mut CardFetcher<S>,
    offline: bool,
    seed: u64,
    opts: &PlayOptions,
    cfg: &Config,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let pace = Duration::from_millis(opts.pace_ms.unwrap_or(cfg.pace_ms));
    let mut logger = open_duel_log(opts.log.as_deref())?;

    writeln!(out, "duel: seed={} offline={}", seed, offline)?;
    if !offline {
        writeln!(out, "Fetching cards from the catalog...")?;
    }
    let (player_cards, machine_cards) = deal_hands(fetcher, offline);

    let log = EventLog::new();
    let mut duel = Duel::with_seed(seed);
    duel.set_observer(log.clone());
    duel.assign_cards(Side::Player, player_cards)?;
    duel.assign_cards(Side::Machine, machine_cards)?;

    writeln!(out, "Your cards:")?;
    for (slot, card) in duel.cards(Side::Player).iter().enumerate() {
        writeln!(out, "{}", format_card_line(slot, card))?;
    }

    duel.start()?;
    ui::render_events(&log.drain(), pace, out, err)?;

    while duel.is_started() {
        show_available(&duel, out)?;
        ui::prompt(out, "Choose a card (1-3) or q to quit: ")?;
        let Some(input) = read_stdin_line(stdin) else {
            writeln!(out)?;
            return abandon(&duel, out);
        };
        match parse_card_choice(&input) {
            ParseResult::Card(index) => {
                // a rejected choice is reported through the error event
                let _ = duel.select_card(Side::Player, index);
                ui::render_events(&log.drain(), pace, out, err)?;
            }
            ParseResult::Quit => return abandon(&duel, out),
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
        }
    }

    if let Some(result) = duel.result() {
        writeln!(out, "{}", format_duel_result(result))?;
    }
    if let Some(logger) = logger.as_mut() {
        let id = logger.next_id();
        if let Some(record) = DuelRecord::from_duel(id, Some(seed), &duel) {
            logger.write(&record)?;
            info!(duel_id = %record.duel_id, "duel recorded");
        }
    }
    Ok(())
}

fn deal_hands<S: RemoteCatalog>(fetcher: &mut CardFetcher<S>, offline: bool) -> (Vec<Card>, Vec<Card>) {
    if offline {
        (fetcher.fallback_many(3), fetcher.fallback_many(3))
    } else {
        (fetcher.fetch_many(3), fetcher.fetch_many(3))
    }
}

fn show_available(duel: &Duel, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "Available:")?;
    let cards = duel.cards(Side::Player);
    for &slot in duel.available_indices(Side::Player) {
        writeln!(out, "{}", format_card_line(slot, &cards[slot]))?;
    }
    Ok(())
}

fn abandon(duel: &Duel, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(
        out,
        "Duel abandoned in round {} (Player {} - {} Machine).",
        duel.round(),
        duel.score(Side::Player),
        duel.score(Side::Machine)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use duelist_catalog::client::RetryPolicy;
    use duelist_catalog::errors::FetchError;
    use duelist_catalog::source::Fetched;
    use std::io::Cursor;

    struct Offline;

    impl RemoteCatalog for Offline {
        fn fetch_random(&mut self) -> Result<Fetched, FetchError> {
            Err(FetchError::Connect("offline".into()))
        }
        fn probe(&mut self) -> bool {
            false
        }
    }

    fn run(input: &str, offline: bool) -> (Result<(), CliError>, String, String) {
        let mut fetcher = CardFetcher::with_seed(Offline, RetryPolicy::immediate(1), 42);
        let opts = PlayOptions {
            pace_ms: Some(0),
            ..PlayOptions::default()
        };
        let mut stdin = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = play_with_fetcher(
            &mut fetcher,
            offline,
            42,
            &opts,
            &Config::default(),
            &mut stdin,
            &mut out,
            &mut err,
        );
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn quit_immediately() {
        let (result, out, _) = run("q\n", true);
        assert!(result.is_ok());
        assert!(out.contains("duel: seed=42 offline=true"));
        assert!(out.contains("Your cards:"));
        assert!(out.contains("Duel abandoned in round 1"));
    }

    #[test]
    fn full_duel_with_scripted_input() {
        // every slot once; later lines are never read
        let (result, out, _) = run("1\n2\n3\n", true);
        assert!(result.is_ok());
        assert!(out.contains("Duel over."));
        assert!(!out.contains("abandoned"));
    }

    #[test]
    fn reused_card_is_rejected_and_duel_continues() {
        let (result, out, err) = run("1\n1\n2\n3\n", true);
        assert!(result.is_ok());
        assert!(err.contains("already used"));
        assert!(out.contains("Duel over."));
    }

    #[test]
    fn garbage_input_is_reported() {
        let (result, _, err) = run("seven\nq\n", true);
        assert!(result.is_ok());
        assert!(err.contains("Unrecognized input"));
    }

    #[test]
    fn unreachable_catalog_still_deals_fallback_cards() {
        let (result, out, _) = run("q\n", false);
        assert!(result.is_ok());
        assert!(out.contains("Fetching cards from the catalog..."));
        assert!(out.contains("  1. "));
    }

    #[test]
    fn eof_abandons() {
        let (result, out, _) = run("", true);
        assert!(result.is_ok());
        assert!(out.contains("Duel abandoned"));
    }
}
