//! Input helpers and duel-log file handling.

use std::io::BufRead;

use duelist_engine::logger::DuelLogger;

use crate::error::CliError;

/// Reads a line of input from a buffered reader, blocking until available.
///
/// Returns the trimmed line, or `None` on EOF or read errors.
///
/// ```rust
/// use std::io::Cursor;
/// # use duelist_cli::io_utils::read_stdin_line;
///
/// let mut input = Cursor::new("  2 \n");
/// assert_eq!(read_stdin_line(&mut input).as_deref(), Some("2"));
/// assert_eq!(read_stdin_line(&mut input), None);
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Open a JSONL duel log, creating parent directories as needed.
pub fn open_duel_log(path: Option<&str>) -> Result<Option<DuelLogger>, CliError> {
    match path {
        None => Ok(None),
        Some(p) if p.trim().is_empty() => {
            Err(CliError::InvalidInput("log path must not be empty".into()))
        }
        Some(p) => Ok(Some(DuelLogger::create(p)?)),
    }
}
