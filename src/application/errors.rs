//! Application layer errors

use chrono::NaiveDate;
use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Horoscope error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Rejected user answers. Each one is recovered by re-prompting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("not a valid star sign: {0:?}")]
    InvalidSign(String),

    #[error("not a YYYY-MM-DD date: {0:?}")]
    InvalidFormat(String),

    #[error("date is in the future: {0}")]
    FutureDate(NaiveDate),

    #[error("date is more than a year ago: {0}")]
    TooOld(NaiveDate),
}

/// Longest slice of user input echoed back in an error reply
const ECHO_LIMIT: usize = 32;

fn echo(input: &str) -> String {
    match input.char_indices().nth(ECHO_LIMIT) {
        Some((end, _)) => format!("{}…", &input[..end]),
        None => input.to_string(),
    }
}

impl ValidationError {
    /// Text shown to the user
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::InvalidSign(input) => {
                format!("Sorry, \"{}\" is not a valid star sign.", echo(input))
            }
            ValidationError::InvalidFormat(_) => {
                "That doesn't look like a day I understand. Use TODAY, TOMORROW, YESTERDAY or a date in format YYYY-MM-DD.".to_string()
            }
            ValidationError::FutureDate(date) => {
                format!("{} is in the future. Pick a date up to today, or use TOMORROW.", date)
            }
            ValidationError::TooOld(date) => {
                format!("{} is more than a year ago. Pick a more recent date.", date)
            }
        }
    }
}

/// Horoscope API failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected status: {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Command not found: {0}")]
    NotFound(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Lock poisoned: {0}")]
    Poisoned(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Write error: {0}")]
    Write(String),
}
