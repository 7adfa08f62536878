//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "duelist",
    version,
    about = "Best-of-three card duels against the machine"
)]
pub struct DuelistCli {
    /// Log engine and catalog decisions to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Duel the machine interactively
    Play {
        #[arg(long)]
        seed: Option<u64>,
        /// Skip the remote catalog and use fallback cards
        #[arg(long)]
        offline: bool,
        /// Delay before showing the machine's move, in milliseconds
        #[arg(long)]
        pace_ms: Option<u64>,
        /// Write the finished duel to this JSONL file
        #[arg(long)]
        log: Option<String>,
    },
    /// Run automated duels and tally the results
    Sim {
        #[arg(long, default_value_t = 100)]
        duels: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Write one JSONL record per duel
        #[arg(long)]
        output: Option<String>,
    },
    /// Fetch and list cards
    Cards {
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..=60))]
        count: u32,
        #[arg(long)]
        offline: bool,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show how rounds are decided
    Rules,
    /// Show resolved configuration and where each value came from
    Cfg,
    /// Check that the card catalog is reachable
    Doctor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_subcommand() {
        let commands = vec![
            vec!["duelist", "play"],
            vec!["duelist", "play", "--seed", "7", "--offline", "--pace-ms", "0"],
            vec!["duelist", "sim", "--duels", "5"],
            vec!["duelist", "cards", "--count", "6", "--offline"],
            vec!["duelist", "rules"],
            vec!["duelist", "cfg"],
            vec!["duelist", "doctor"],
            vec!["duelist", "--verbose", "rules"],
        ];
        for args in commands {
            assert!(DuelistCli::try_parse_from(&args).is_ok(), "Failed to parse: {:?}", args);
        }
    }

    #[test]
    fn card_count_is_bounded() {
        assert!(DuelistCli::try_parse_from(["duelist", "cards", "--count", "0"]).is_err());
        assert!(DuelistCli::try_parse_from(["duelist", "cards", "--count", "61"]).is_err());
    }

    #[test]
    fn sim_defaults_to_one_hundred_duels() {
        let cli = DuelistCli::try_parse_from(["duelist", "sim"]).unwrap();
        match cli.cmd {
            Commands::Sim { duels, seed, output } => {
                assert_eq!(duels, 100);
                assert!(seed.is_none());
                assert!(output.is_none());
            }
            other => panic!("expected sim, got {:?}", other),
        }
    }
}
