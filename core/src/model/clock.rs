use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FmdsError, Result};

/// A wall-clock time of day at minute precision, written "HH:MM".
///
/// Parsing also accepts a single-digit hour ("7:10"). Display is always
/// zero padded, so the chronological order and the string order agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(NaiveTime::MIN);

    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(ClockTime)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Wraps past midnight.
    pub fn add_minutes(&self, minutes: u32) -> Self {
        let (time, _) = self
            .0
            .overflowing_add_signed(Duration::minutes(i64::from(minutes)));
        ClockTime(time)
    }

    /// Minutes from `self` forward to `later`, wrapping past midnight.
    pub fn minutes_until(&self, later: ClockTime) -> u32 {
        let from = self.minutes_since_midnight();
        let to = later.minutes_since_midnight();
        (to + 24 * 60 - from) % (24 * 60)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = FmdsError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || FmdsError::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if h.is_empty() || h.len() > 2 || m.len() != 2 || !digits(h) || !digits(m) {
            return Err(invalid());
        }
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        ClockTime::new(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = FmdsError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}
