//! Process exit codes.

use crate::error::CliError;

pub const SUCCESS: i32 = 0;

/// Any failure reported to the user.
pub const ERROR: i32 = 2;

/// The run stopped early on request (Ctrl+C convention).
pub const INTERRUPTED: i32 = 130;

pub fn for_result(result: &Result<(), CliError>) -> i32 {
    match result {
        Ok(()) => SUCCESS,
        Err(CliError::Interrupted(_)) => INTERRUPTED,
        Err(_) => ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_results_to_codes() {
        assert_eq!(for_result(&Ok(())), 0);
        assert_eq!(for_result(&Err(CliError::InvalidInput("x".into()))), 2);
        assert_eq!(for_result(&Err(CliError::Interrupted("x".into()))), 130);
    }
}
