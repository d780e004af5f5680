use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::application::errors::ValidationError;

/// How far back an explicit date may reach
pub const MAX_LOOKBACK_DAYS: i64 = 365;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The second lookup key: a relative keyword or a calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayToken {
    Today,
    Tomorrow,
    Yesterday,
    Date(NaiveDate),
}

impl DayToken {
    /// Value sent as the `day` query parameter
    pub fn as_query(&self) -> String {
        match self {
            DayToken::Today => "Today".to_string(),
            DayToken::Tomorrow => "Tomorrow".to_string(),
            DayToken::Yesterday => "Yesterday".to_string(),
            DayToken::Date(date) => date.format(DATE_FORMAT).to_string(),
        }
    }
}

impl fmt::Display for DayToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_query())
    }
}

/// Validate a day answer against `now`.
///
/// Keywords are accepted in any casing. Anything else must be a strict
/// `YYYY-MM-DD` date between `now - 365 days` and `now`, both inclusive,
/// compared on the UTC calendar date.
pub fn validate_day(input: &str, now: DateTime<Utc>) -> Result<DayToken, ValidationError> {
    let input = input.trim();

    match input.to_ascii_lowercase().as_str() {
        "today" => return Ok(DayToken::Today),
        "tomorrow" => return Ok(DayToken::Tomorrow),
        "yesterday" => return Ok(DayToken::Yesterday),
        _ => {}
    }

    let date = parse_strict(input).ok_or_else(|| ValidationError::InvalidFormat(input.to_string()))?;

    let today = now.date_naive();
    if date > today {
        return Err(ValidationError::FutureDate(date));
    }
    if date < today - Duration::days(MAX_LOOKBACK_DAYS) {
        return Err(ValidationError::TooOld(date));
    }

    Ok(DayToken::Date(date))
}

/// chrono accepts unpadded fields, so the shape is checked first
fn parse_strict(input: &str) -> Option<NaiveDate> {
    let bytes = input.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).ok()
}
