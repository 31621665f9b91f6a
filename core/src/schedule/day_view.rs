use serde::{Deserialize, Serialize};

use crate::model::{ClockTime, Segment, Weekday};
use crate::schedule::resolve::{resolve, EffectiveSchedule};
use crate::schedule::round_one_decimal;

/// A segment as it runs on one particular day.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSegment {
    pub segment: Segment,
    pub effective: EffectiveSchedule,
}

impl ScheduledSegment {
    pub fn title(&self) -> &str {
        &self.segment.title
    }

    pub fn start_time(&self) -> Option<ClockTime> {
        self.effective.start_time
    }

    pub fn end_time(&self) -> Option<ClockTime> {
        self.effective.end_time
    }

    pub fn duration(&self) -> u32 {
        self.effective.duration
    }
}

/// Everything scheduled on one weekday, ordered by effective start time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub day: Weekday,
    pub segments: Vec<ScheduledSegment>,
    pub total_duration: u32,
    pub activity_count: usize,
}

impl DaySchedule {
    pub fn empty(day: Weekday) -> Self {
        Self {
            day,
            segments: Vec::new(),
            total_duration: 0,
            activity_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total rounded to one decimal hour.
    pub fn total_hours(&self) -> f64 {
        round_one_decimal(f64::from(self.total_duration) / 60.0)
    }

    pub fn first_start(&self) -> Option<ClockTime> {
        self.segments.iter().filter_map(|s| s.start_time()).min()
    }

    pub fn last_end(&self) -> Option<ClockTime> {
        self.segments.iter().filter_map(|s| s.end_time()).max()
    }
}

/// Builds the view for `day` from the full segment list.
///
/// Segments without a start time sort as if they started at midnight.
/// `sort_by_key` is stable, so equal start times keep input order.
pub fn build_day_view(segments: &[Segment], day: Weekday) -> DaySchedule {
    let mut scheduled: Vec<ScheduledSegment> = segments
        .iter()
        .filter(|s| s.is_active_on(day))
        .map(|s| ScheduledSegment {
            segment: s.clone(),
            effective: resolve(s, day),
        })
        .collect();

    scheduled.sort_by_key(|s| s.start_time().unwrap_or(ClockTime::MIDNIGHT));

    let total_duration = scheduled
        .iter()
        .map(ScheduledSegment::duration)
        .fold(0, u32::saturating_add);
    let activity_count = scheduled.len();

    DaySchedule {
        day,
        segments: scheduled,
        total_duration,
        activity_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DayOverride, NewSegment};

    fn seg(title: &str, duration: u32, days: &[Weekday], start: Option<&str>) -> Segment {
        Segment::new(NewSegment {
            title: title.to_string(),
            duration,
            days: days.to_vec(),
            start_time: start.map(|s| s.parse().unwrap()),
            end_time: None,
            day_schedules: Vec::new(),
        })
    }

    fn titles(view: &DaySchedule) -> Vec<&str> {
        view.segments.iter().map(|s| s.title()).collect()
    }

    #[test]
    fn test_filters_by_day_and_sums() {
        let segments = vec![
            seg("A", 10, &[Weekday::Monday], Some("07:10")),
            seg("B", 15, &[Weekday::Tuesday], Some("07:20")),
            seg("C", 5, &[Weekday::Monday, Weekday::Tuesday], Some("07:30")),
        ];
        let view = build_day_view(&segments, Weekday::Monday);
        assert_eq!(titles(&view), vec!["A", "C"]);
        assert_eq!(view.total_duration, 15);
        assert_eq!(view.activity_count, 2);
    }

    #[test]
    fn test_sorted_by_start_with_missing_first() {
        let segments = vec![
            seg("Late", 10, &[Weekday::Monday], Some("10:00")),
            seg("Early", 10, &[Weekday::Monday], Some("7:10")),
            seg("Untimed", 10, &[Weekday::Monday], None),
        ];
        let view = build_day_view(&segments, Weekday::Monday);
        assert_eq!(titles(&view), vec!["Untimed", "Early", "Late"]);
    }

    #[test]
    fn test_equal_start_times_keep_input_order() {
        let segments = vec![
            seg("First", 10, &[Weekday::Monday], Some("07:10")),
            seg("Earlier", 5, &[Weekday::Monday], Some("07:00")),
            seg("Second", 10, &[Weekday::Monday], Some("07:10")),
            seg("Third", 10, &[Weekday::Monday], Some("07:10")),
        ];
        let view = build_day_view(&segments, Weekday::Monday);
        assert_eq!(titles(&view), vec!["Earlier", "First", "Second", "Third"]);
    }

    #[test]
    fn test_override_moves_segment_in_order() {
        let mut moved = seg("Moved", 10, &[Weekday::Monday, Weekday::Tuesday], Some("07:00"));
        moved
            .day_schedules
            .push(DayOverride::new(Weekday::Tuesday, "08:00".parse().unwrap(), 25));
        let segments = vec![moved, seg("Fixed", 10, &[Weekday::Monday, Weekday::Tuesday], Some("07:30"))];

        let monday = build_day_view(&segments, Weekday::Monday);
        assert_eq!(titles(&monday), vec!["Moved", "Fixed"]);
        assert_eq!(monday.total_duration, 20);

        let tuesday = build_day_view(&segments, Weekday::Tuesday);
        assert_eq!(titles(&tuesday), vec!["Fixed", "Moved"]);
        assert_eq!(tuesday.total_duration, 35);
        assert_eq!(tuesday.segments[1].end_time(), "08:25".parse().ok());
        assert_eq!(tuesday.last_end(), "08:25".parse().ok());
        assert_eq!(tuesday.first_start(), "07:30".parse().ok());
    }

    #[test]
    fn test_empty_day() {
        let segments = vec![seg("A", 10, &[Weekday::Monday], Some("07:10"))];
        let view = build_day_view(&segments, Weekday::Thursday);
        assert!(view.is_empty());
        assert_eq!(view, DaySchedule::empty(Weekday::Thursday));
        assert_eq!(view.total_hours(), 0.0);
        assert_eq!(view.first_start(), None);
    }

    #[test]
    fn test_total_hours_rounds_to_one_decimal() {
        let segments = vec![seg("Long", 50, &[Weekday::Sunday], None)];
        let view = build_day_view(&segments, Weekday::Sunday);
        assert_eq!(view.total_hours(), 0.8);
    }
}
