//! Error types for the CLI application.
//!
//! Command handlers return `Result<(), CliError>`; library errors from the
//! engine, the catalog and the config loader convert in through `From` so
//! handlers can use `?`.

use std::fmt;

use duelist_catalog::errors::CatalogError;
use duelist_engine::errors::DuelError;

use crate::config::ConfigError;

#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    Config(String),

    /// A duel operation was rejected
    Engine(DuelError),

    /// The card catalog could not supply cards
    Catalog(CatalogError),

    /// Operation was interrupted before completion
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "Duel error: {}", e),
            CliError::Catalog(e) => write!(f, "Catalog error: {}", e),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            CliError::Catalog(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<DuelError> for CliError {
    fn from(error: DuelError) -> Self {
        CliError::Engine(error)
    }
}

impl From<CatalogError> for CliError {
    fn from(error: CatalogError) -> Self {
        CliError::Catalog(error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duelist_engine::side::Side;

    #[test]
    fn engine_errors_keep_their_message() {
        let e: CliError = DuelError::WrongTurn {
            side: Side::Machine,
        }
        .into();
        assert_eq!(e.to_string(), "Duel error: It's not Machine's turn");
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn config_errors_become_config_variant() {
        let e: CliError = ConfigError::Invalid("Invalid seed".into()).into();
        assert!(matches!(e, CliError::Config(ref m) if m == "Invalid seed"));
    }
}
