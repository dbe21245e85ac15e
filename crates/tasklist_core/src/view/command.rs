//! Line command parsing for the terminal screen.
//!
//! # Invariants
//! - Row numbers typed by the user are 1-based; parsed indices are 0-based.
//! - Parsing is pure; prompting for titles happens in the front-end.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// One screen gesture typed at the list prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Navigation-bar "add" button.
    Add,
    /// Row tap: open the edit prompt for this row.
    Edit(usize),
    /// Row swipe: delete this row.
    Delete(usize),
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    MissingRow(&'static str),
    InvalidRow(String),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "no command entered"),
            Self::Unknown(word) => write!(f, "unknown command `{word}`; type `help`"),
            Self::MissingRow(command) => write!(f, "`{command}` needs a row number"),
            Self::InvalidRow(value) => write!(f, "`{value}` is not a row number"),
        }
    }
}

impl Error for CommandError {}

/// Parses one input line.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(CommandError::Empty);
    };

    match head.to_ascii_lowercase().as_str() {
        "add" | "a" | "+" => Ok(Command::Add),
        "edit" | "e" => Ok(Command::Edit(parse_row(words.next(), "edit")?)),
        "delete" | "del" | "d" | "rm" => Ok(Command::Delete(parse_row(words.next(), "delete")?)),
        "list" | "ls" | "l" => Ok(Command::List),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// Outcome of the Save/Cancel prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAnswer {
    Save(String),
    Cancel,
}

/// Interprets the text entered in the Save/Cancel prompt.
///
/// `:cancel` cancels. Any other line saves its text with the trailing
/// newline removed; empty text still counts as Save and is dropped by the
/// reducer.
pub fn parse_prompt_answer(line: &str) -> PromptAnswer {
    let text = line.trim_end_matches(['\n', '\r']);
    if text.trim() == ":cancel" {
        return PromptAnswer::Cancel;
    }
    PromptAnswer::Save(text.to_string())
}

fn parse_row(value: Option<&str>, command: &'static str) -> Result<usize, CommandError> {
    let value = value.ok_or(CommandError::MissingRow(command))?;
    match value.parse::<usize>() {
        Ok(row) if row >= 1 => Ok(row - 1),
        _ => Err(CommandError::InvalidRow(value.to_string())),
    }
}
