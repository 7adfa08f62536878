use std::io::Write;

use duelist_catalog::client::CardFetcher;
use duelist_catalog::source::RemoteCatalog;

use crate::commands::http_fetcher;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::format_card_detail;

/// List `count` playable cards, fetched or drawn from the fallback table.
pub fn handle_cards_command(
    count: u32,
    offline: bool,
    seed: Option<u64>,
    cfg: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let mut fetcher = http_fetcher(cfg, seed);
    list_cards(&mut fetcher, count as usize, offline || cfg.offline, out)
}

fn list_cards<S: RemoteCatalog>(
    fetcher: &mut CardFetcher<S>,
    count: usize,
    offline: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cards = if offline {
        fetcher.fallback_many(count)
    } else {
        fetcher.fetch_many(count)
    };
    for (i, card) in cards.iter().enumerate() {
        writeln!(out, "{:>2}. {}", i + 1, format_card_detail(card))?;
    }
    Ok(())
}
