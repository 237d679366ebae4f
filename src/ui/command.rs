//! Line commands for the interactive client.

use thiserror::Error;

pub const HELP: &str = "\
Commands:
  inc | +            increment the counter
  dec | -            decrement the counter
  reset              reset the counter
  hello              fetch the greeting
  encode <text>      base64-encode <text> on the backend
  show               print the current state
  help               show this help
  quit | exit        leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Increment,
    Decrement,
    Reset,
    Hello,
    Encode(String),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Usage: encode <text>")]
    MissingText,

    #[error("Unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),
}

impl Command {
    /// True for commands that wait on the backend.
    pub fn is_remote(&self) -> bool {
        matches!(self, Command::Hello | Command::Encode(_))
    }

    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_start()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "inc" | "+" => Ok(Command::Increment),
            "dec" | "-" => Ok(Command::Decrement),
            "reset" => Ok(Command::Reset),
            "hello" => Ok(Command::Hello),
            "encode" if rest.is_empty() => Err(CommandError::MissingText),
            "encode" => Ok(Command::Encode(rest.to_string())),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}
