use serde::{Deserialize, Serialize};

use crate::model::{ClockTime, Segment, Weekday};

/// Start, duration and end of one segment on one weekday, after overrides.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveSchedule {
    pub start_time: Option<ClockTime>,
    pub duration: u32,
    pub end_time: Option<ClockTime>,
    /// True when a day override supplied the values.
    pub overridden: bool,
}

/// Resolves `segment` on `day`.
///
/// An override for the day wins, and its end time is recomputed from its
/// start and duration rather than read back from storage. Without one, the
/// segment's stored defaults are returned as they are. Callers filter on
/// `segment.days` first; for a day the segment does not run on the
/// defaults come back unchanged.
pub fn resolve(segment: &Segment, day: Weekday) -> EffectiveSchedule {
    match segment.override_for(day) {
        Some(ov) => EffectiveSchedule {
            start_time: Some(ov.start_time),
            duration: ov.duration,
            end_time: Some(ov.end_time()),
            overridden: true,
        },
        None => EffectiveSchedule {
            start_time: segment.start_time,
            duration: segment.duration,
            end_time: segment.end_time,
            overridden: false,
        },
    }
}

pub fn effective_duration(segment: &Segment, day: Weekday) -> u32 {
    resolve(segment, day).duration
}

/// Override-aware minutes the segment occupies across the week.
pub fn weekly_minutes(segment: &Segment) -> u32 {
    segment
        .days
        .iter()
        .map(|day| effective_duration(segment, *day))
        .fold(0, u32::saturating_add)
}
