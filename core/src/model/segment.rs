use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::error::{FmdsError, Result};
use crate::model::clock::ClockTime;
use crate::model::weekday::Weekday;

/// Longest allowed segment or override: one full day.
pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

/// A per-weekday exception to a segment's default start and duration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayOverride {
    pub day: Weekday,
    pub start_time: ClockTime,
    pub duration: u32,
}

impl DayOverride {
    pub fn new(day: Weekday, start_time: ClockTime, duration: u32) -> Self {
        Self { day, start_time, duration }
    }

    pub fn end_time(&self) -> ClockTime {
        self.start_time.add_minutes(self.duration)
    }
}

/// A recurring meeting activity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: Uuid,
    pub title: String,
    /// Default duration in minutes.
    pub duration: u32,
    pub days: Vec<Weekday>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub day_schedules: Vec<DayOverride>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Segment {
    pub fn new(input: NewSegment) -> Self {
        let now = Utc::now();
        // end time defaults to start + duration when the caller leaves it out
        let end_time = input
            .end_time
            .or_else(|| input.start_time.map(|s| s.add_minutes(input.duration)));
        Self {
            id: Uuid::new_v4(),
            title: input.title.trim().to_string(),
            duration: input.duration,
            days: input.days,
            start_time: input.start_time,
            end_time,
            day_schedules: input.day_schedules,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active_on(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    pub fn override_for(&self, day: Weekday) -> Option<&DayOverride> {
        self.day_schedules.iter().find(|o| o.day == day)
    }

    /// Checks the invariants the store promises to the schedule engine.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(FmdsError::EmptyTitle);
        }
        check_duration(self.duration)?;
        if self.days.is_empty() {
            return Err(FmdsError::NoDays);
        }
        let mut seen = HashSet::new();
        for day in &self.days {
            if !seen.insert(*day) {
                return Err(FmdsError::DuplicateDay(*day));
            }
        }
        let mut overridden = HashSet::new();
        for ov in &self.day_schedules {
            if !self.is_active_on(ov.day) {
                return Err(FmdsError::OverrideDayNotScheduled(ov.day));
            }
            if !overridden.insert(ov.day) {
                return Err(FmdsError::DuplicateOverride(ov.day));
            }
            check_duration(ov.duration)?;
        }
        Ok(())
    }

    /// Applies the fields present in `patch`. Overrides for days that are
    /// no longer scheduled are dropped.
    pub fn apply(&mut self, patch: SegmentPatch) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(days) = patch.days {
            self.days = days;
            let days = &self.days;
            self.day_schedules.retain(|o| days.contains(&o.day));
        }
        if let Some(start) = patch.start_time {
            self.start_time = start;
        }
        if let Some(end) = patch.end_time {
            self.end_time = end;
        }
        self.updated_at = Utc::now();
    }

    /// Inserts or replaces the override for `ov.day`.
    pub fn set_override(&mut self, ov: DayOverride) {
        match self.day_schedules.iter_mut().find(|o| o.day == ov.day) {
            Some(existing) => *existing = ov,
            None => self.day_schedules.push(ov),
        }
        self.updated_at = Utc::now();
    }

    pub fn clear_override(&mut self, day: Weekday) -> bool {
        let before = self.day_schedules.len();
        self.day_schedules.retain(|o| o.day != day);
        let removed = self.day_schedules.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }
}

/// Fields supplied when creating a segment. The store assigns id and timestamps.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewSegment {
    pub title: String,
    pub duration: u32,
    pub days: Vec<Weekday>,
    #[serde(default)]
    pub start_time: Option<ClockTime>,
    #[serde(default)]
    pub end_time: Option<ClockTime>,
    #[serde(default)]
    pub day_schedules: Vec<DayOverride>,
}

/// A partial update. `None` leaves the field untouched; for the optional
/// times `Some(None)` clears the stored value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentPatch {
    pub title: Option<String>,
    pub duration: Option<u32>,
    pub days: Option<Vec<Weekday>>,
    pub start_time: Option<Option<ClockTime>>,
    pub end_time: Option<Option<ClockTime>>,
}

impl SegmentPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.duration.is_none()
            && self.days.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
    }
}

fn check_duration(minutes: u32) -> Result<()> {
    match minutes {
        0 => Err(FmdsError::ZeroDuration),
        m if m > MAX_DURATION_MINUTES => Err(FmdsError::DurationTooLong(m)),
        _ => Ok(()),
    }
}

/// The stand-up agenda the application ships with.
pub fn sample_segments() -> Vec<NewSegment> {
    use Weekday::*;

    let seg = |title: &str, duration: u32, days: Vec<Weekday>, start: (u32, u32), end: (u32, u32)| NewSegment {
        title: title.to_string(),
        duration,
        days,
        start_time: ClockTime::new(start.0, start.1),
        end_time: ClockTime::new(end.0, end.1),
        day_schedules: Vec::new(),
    };

    vec![
        seg("Backlog Review", 10, vec![Sunday, Monday], (7, 10), (7, 20)),
        seg("Yesterday Problems", 10, Weekday::ALL.to_vec(), (7, 11), (7, 21)),
        seg("Unsafe Conditions", 15, vec![Wednesday], (7, 21), (7, 36)),
        seg("YT Prop Activities", 15, Weekday::ALL.to_vec(), (7, 36), (7, 50)),
    ]
}
