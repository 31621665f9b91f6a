use serde::{Deserialize, Serialize};

use crate::model::{Segment, Weekday};
use crate::schedule::day_view::{build_day_view, DaySchedule};
use crate::schedule::resolve::weekly_minutes;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BusiestDay {
    pub day: Weekday,
    pub total_duration: u32,
    pub activity_count: usize,
}

impl Default for BusiestDay {
    fn default() -> Self {
        Self {
            day: Weekday::Sunday,
            total_duration: 0,
            activity_count: 0,
        }
    }
}

impl From<&DaySchedule> for BusiestDay {
    fn from(view: &DaySchedule) -> Self {
        Self {
            day: view.day,
            total_duration: view.total_duration,
            activity_count: view.activity_count,
        }
    }
}

/// Week-level summary consumed by the tables, the dashboard and the exports.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_activities: usize,
    /// Sum of each segment's default duration. Day overrides are not
    /// consulted here, unlike `total_weekly_minutes`.
    pub total_duration: u32,
    pub total_weekly_minutes: u32,
    pub average_duration: u32,
    pub active_days: usize,
    pub most_busy_day: BusiestDay,
    /// One view per weekday, canonical order.
    pub all_days_data: Vec<DaySchedule>,
}

impl Analytics {
    pub fn day(&self, day: Weekday) -> Option<&DaySchedule> {
        self.all_days_data.iter().find(|d| d.day == day)
    }
}

pub fn build_analytics(segments: &[Segment]) -> Analytics {
    let all_days_data: Vec<DaySchedule> = Weekday::ALL
        .iter()
        .map(|day| build_day_view(segments, *day))
        .collect();

    let total_activities = segments.len();
    let total_duration = segments.iter().map(|s| s.duration).fold(0, u32::saturating_add);
    let total_weekly_minutes = segments.iter().map(weekly_minutes).fold(0, u32::saturating_add);
    let average_duration = average(total_duration, total_activities);
    let active_days = all_days_data.iter().filter(|d| !d.is_empty()).count();

    // strict comparison keeps the earliest weekday on ties
    let most_busy_day = all_days_data
        .iter()
        .reduce(|best, d| if d.total_duration > best.total_duration { d } else { best })
        .map(BusiestDay::from)
        .unwrap_or_default();

    Analytics {
        total_activities,
        total_duration,
        total_weekly_minutes,
        average_duration,
        active_days,
        most_busy_day,
        all_days_data,
    }
}

/// Rounds half away from zero.
fn average(total: u32, count: usize) -> u32 {
    if count == 0 {
        return 0;
    }
    (f64::from(total) / count as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rounding() {
        assert_eq!(average(50, 4), 13);
        assert_eq!(average(10, 4), 3);
        assert_eq!(average(9, 4), 2);
        assert_eq!(average(0, 0), 0);
        assert_eq!(average(7, 2), 4);
    }

    #[test]
    fn test_busiest_default_is_sunday() {
        assert_eq!(BusiestDay::default().day, Weekday::Sunday);
    }
}
