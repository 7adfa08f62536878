//! UI helper functions for terminal output.

use std::io::Write;
use std::thread;
use std::time::Duration;

use duelist_engine::events::DuelEvent;

use crate::formatters::format_event;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Write a prompt without a trailing newline.
pub fn prompt(out: &mut dyn Write, message: &str) -> std::io::Result<()> {
    write!(out, "{}", message)?;
    out.flush()
}

/// Render queued notifications in order.
///
/// The machine's move is already decided by the time it is rendered; `pace`
/// only delays its display so a human can follow along.
pub fn render_events(
    events: &[DuelEvent],
    pace: Duration,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> std::io::Result<()> {
    for event in events {
        if let DuelEvent::Error { message, .. } = event {
            write_error(err, message)?;
            continue;
        }
        if matches!(event, DuelEvent::Status { .. }) && !pace.is_zero() {
            out.flush()?;
            thread::sleep(pace);
        }
        if let Some(line) = format_event(event) {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}
