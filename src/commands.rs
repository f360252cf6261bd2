//! Runtime command lines, entered with a leading `!`.
//!
//! Each command is an explicit keyword-plus-argument parser returning a
//! tagged [`Command`]; the keyword is case-insensitive and the argument is
//! separated by `=` or whitespace.

use crate::error::CommandError;

pub const SENTINEL: char = '!';

/// A parsed runtime command. Clamping happens when the command is applied
/// to the session, since the token ceiling lives there.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetMaxTokens(i64),
    SetTemperature(f64),
    Reset,
    Exit,
}

/// Parse a command line, with or without the leading sentinel.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim().trim_start_matches(SENTINEL).trim();
    let (keyword, argument) = split_command(line);
    let argument = argument.trim();

    match keyword.to_ascii_lowercase().as_str() {
        "max" | "max_tokens" => argument
            .parse::<i64>()
            .map(Command::SetMaxTokens)
            .map_err(|_| CommandError::BadNumber {
                command: "max_tokens",
                value: argument.to_string(),
            }),
        "temp" | "temperature" => argument
            .parse::<f64>()
            .map(Command::SetTemperature)
            .map_err(|_| CommandError::BadNumber {
                command: "temperature",
                value: argument.to_string(),
            }),
        "reset" => Ok(Command::Reset),
        "exit" | "quit" => Ok(Command::Exit),
        _ => Err(CommandError::Unknown(line.to_string())),
    }
}

fn split_command(line: &str) -> (&str, &str) {
    match line.find(|c: char| c == '=' || c.is_whitespace()) {
        Some(pos) => {
            let (keyword, rest) = line.split_at(pos);
            let mut chars = rest.chars();
            chars.next();
            (keyword, chars.as_str())
        }
        None => (line, ""),
    }
}
