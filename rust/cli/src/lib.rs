//! # Duelist CLI Library
//!
//! Terminal front end for the duel engine: interactive duels against the
//! machine, batch simulations, card listings and diagnostics.
//!
//! ## Main Entry Point
//!
//! [`run`] parses command-line arguments, dispatches to a subcommand handler
//! and returns the process exit code.
//!
//! ```
//! use std::io;
//! let args = vec!["duelist", "rules"];
//! let code = duelist_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Duel the machine, choosing cards from stdin
//! - `sim`: Run automated duels and print win/draw tallies
//! - `cards`: Fetch and list cards from the catalog
//! - `rules`: Print the round resolution table
//! - `cfg`: Display configuration settings and their sources
//! - `doctor`: Check catalog reachability and the fallback table

use clap::Parser;
use std::io::{BufRead, Write};

#[macro_use]
mod macros;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, DuelistCli};
use commands::{
    PlayOptions, handle_cards_command, handle_cfg_command, handle_doctor_command,
    handle_play_command, handle_rules_command, handle_sim_command,
};
use config::Config;

pub use commands::sim::{SimTally, simulate_duel};
pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "cards", "rules", "cfg", "doctor"];

/// Parse `args` and run the chosen subcommand, reading interactive input
/// from stdin.
///
/// Returns `0` on success, `2` on errors and `130` when interrupted.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// [`run`] with an explicit input stream for `play`.
///
/// ```
/// use std::io::{self, Cursor};
/// let mut input = Cursor::new("q\n");
/// let code = duelist_cli::run_with_input(
///     ["duelist", "play", "--offline", "--seed", "1", "--pace-ms", "0"],
///     &mut input,
///     &mut io::sink(),
///     &mut io::sink(),
/// );
/// assert_eq!(code, 0);
/// ```
pub fn run_with_input<I, S>(
    args: I,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match DuelistCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };
    logging::init_logging(cli.verbose);

    let result = dispatch(cli.cmd, stdin, out, err);
    if let Err(e) = &result
        && !matches!(e, CliError::Interrupted(_))
    {
        let _ = ui::write_error(err, &e.to_string());
    }
    exit_code::for_result(&result)
}

fn dispatch(
    cmd: Commands,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    match cmd {
        Commands::Play {
            seed,
            offline,
            pace_ms,
            log,
        } => {
            let cfg = config::load()?;
            let opts = PlayOptions {
                seed,
                offline,
                pace_ms,
                log,
            };
            handle_play_command(opts, &cfg, stdin, out, err)
        }
        Commands::Sim {
            duels,
            seed,
            output,
        } => {
            let seed = seed.or(config::load()?.seed);
            handle_sim_command(duels, seed, output, out)
        }
        Commands::Cards {
            count,
            offline,
            seed,
        } => {
            let cfg = config::load()?;
            handle_cards_command(count, offline, seed, &cfg, out)
        }
        Commands::Rules => handle_rules_command(out),
        Commands::Cfg => handle_cfg_command(out),
        Commands::Doctor => {
            let cfg: Config = config::load()?;
            handle_doctor_command(&cfg, out, err)
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }
    write_or_exit!(err, "{}", e);
    write_or_exit!(err, "Usage: duelist <command> [options]\n");
    write_or_exit!(err, "Commands:");
    for c in COMMANDS {
        write_or_exit!(err, "  {}", c);
    }
    write_or_exit!(err, "\nFor full help, run: duelist --help");
    exit_code::ERROR
}
