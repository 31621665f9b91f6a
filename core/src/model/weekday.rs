use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FmdsError, Result};

/// The meeting week. Friday and Saturday are never scheduled.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
}

impl Weekday {
    /// Canonical order. Every per-day listing and tie-break follows it.
    pub const ALL: [Weekday; 5] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
        }
    }

    pub fn short(&self) -> &'static str {
        &self.name()[..3]
    }

    /// Maps a calendar weekday onto the meeting week.
    pub fn from_chrono(day: chrono::Weekday) -> Option<Self> {
        match day {
            chrono::Weekday::Sun => Some(Weekday::Sunday),
            chrono::Weekday::Mon => Some(Weekday::Monday),
            chrono::Weekday::Tue => Some(Weekday::Tuesday),
            chrono::Weekday::Wed => Some(Weekday::Wednesday),
            chrono::Weekday::Thu => Some(Weekday::Thursday),
            chrono::Weekday::Fri | chrono::Weekday::Sat => None,
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|d| d == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let idx = Self::ALL.iter().position(|d| d == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = FmdsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sun" | "sunday" => Ok(Weekday::Sunday),
            "mon" | "monday" => Ok(Weekday::Monday),
            "tue" | "tues" | "tuesday" => Ok(Weekday::Tuesday),
            "wed" | "wednesday" => Ok(Weekday::Wednesday),
            "thu" | "thur" | "thurs" | "thursday" => Ok(Weekday::Thursday),
            _ => Err(FmdsError::InvalidWeekday(s.to_string())),
        }
    }
}

/// Parses "sun,mon,wed" style lists. Order is kept as written.
pub fn parse_day_list(input: &str) -> Result<Vec<Weekday>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Weekday::from_str)
        .collect()
}
