//! Input parsing and validation for interactive commands.

use duelist_engine::rules::HAND_SIZE;

/// Outcome of parsing one line typed during a duel.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Zero-based card index into the player's hand.
    Card(usize),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse a card choice typed as its 1-based number.
///
/// Only the range is checked here; whether the card is still available is
/// the duel's decision.
///
/// ```rust
/// # use duelist_cli::validation::{parse_card_choice, ParseResult};
/// assert_eq!(parse_card_choice("2"), ParseResult::Card(1));
/// assert_eq!(parse_card_choice("Q"), ParseResult::Quit);
/// assert!(matches!(parse_card_choice("4"), ParseResult::Invalid(_)));
/// ```
pub fn parse_card_choice(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }
    if input == "q" || input == "quit" {
        return ParseResult::Quit;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=HAND_SIZE).contains(&n) => ParseResult::Card(n - 1),
        Ok(_) => ParseResult::Invalid(format!("Choose a card between 1 and {}", HAND_SIZE)),
        Err(_) => ParseResult::Invalid(format!("Unrecognized input: '{}'", input)),
    }
}

/// Guard for counts that must be at least one.
pub fn validate_positive(name: &str, value: u32) -> Result<u32, String> {
    if value == 0 {
        Err(format!("{} must be >= 1", name))
    } else {
        Ok(value)
    }
}
