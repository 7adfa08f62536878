use crate::error::CliError;
use crate::formatters::format_rules;
use std::io::Write;

pub fn handle_rules_command(out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "{}", format_rules())?;
    Ok(())
}
