use chrono::{Datelike, Local, NaiveDate};

use crate::error::{FmdsError, Result};
use crate::model::Weekday;

/// Parses a meeting length into minutes: `15`, `15m`, `1h` or `1h30m`.
pub fn parse_duration(input: &str) -> Result<u32> {
    let input = input.trim().to_lowercase();
    let invalid = || FmdsError::Config(format!("Invalid duration: '{input}'"));
    if input.is_empty() {
        return Err(invalid());
    }

    if let Ok(minutes) = input.parse::<u32>() {
        return Ok(minutes);
    }

    let (hours, rest) = match input.split_once('h') {
        Some((h, rest)) => (h.parse::<u32>().map_err(|_| invalid())?, rest),
        None => (0, input.as_str()),
    };
    let minutes = match rest.strip_suffix('m') {
        Some(m) => m.parse::<u32>().map_err(|_| invalid())?,
        None if rest.is_empty() => 0,
        None => return Err(invalid()),
    };

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(invalid)
}

/// The working day a calendar date falls on. Friday and Saturday map to
/// the upcoming Sunday.
pub fn schedule_day(date: NaiveDate) -> Weekday {
    Weekday::from_chrono(date.weekday()).unwrap_or(Weekday::Sunday)
}

pub fn today() -> Weekday {
    schedule_day(Local::now().date_naive())
}
