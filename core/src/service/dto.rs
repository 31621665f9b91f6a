use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{ClockTime, Segment, Weekday};
use crate::schedule::weekly_minutes;

/// Flattened view of a segment for listings and `--json` output.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDto {
    pub id: Uuid,
    pub short_id: String,
    pub title: String,
    pub duration: u32,
    pub days: Vec<Weekday>,
    pub start_time: Option<ClockTime>,
    pub end_time: Option<ClockTime>,
    pub override_days: Vec<Weekday>,
    /// Override-aware minutes per week.
    pub weekly_minutes: u32,
}

impl SegmentDto {
    pub fn from_entity(segment: &Segment) -> Self {
        let id = segment.id.to_string();
        Self {
            id: segment.id,
            short_id: id[..8].to_string(),
            title: segment.title.clone(),
            duration: segment.duration,
            days: segment.days.clone(),
            start_time: segment.start_time,
            end_time: segment.end_time,
            override_days: segment.day_schedules.iter().map(|o| o.day).collect(),
            weekly_minutes: weekly_minutes(segment),
        }
    }

    /// "Sun Mon Wed"
    pub fn day_summary(&self) -> String {
        self.days.iter().map(|d| d.short()).collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DayOverride, NewSegment};

    #[test]
    fn test_from_entity() {
        let mut seg = Segment::new(NewSegment {
            title: "Backlog Review".to_string(),
            duration: 10,
            days: vec![Weekday::Sunday, Weekday::Monday],
            start_time: ClockTime::new(7, 10),
            ..Default::default()
        });
        seg.day_schedules
            .push(DayOverride::new(Weekday::Monday, ClockTime::new(8, 0).unwrap(), 25));

        let dto = SegmentDto::from_entity(&seg);
        assert_eq!(dto.short_id.len(), 8);
        assert!(seg.id.to_string().starts_with(&dto.short_id));
        assert_eq!(dto.end_time, ClockTime::new(7, 20));
        assert_eq!(dto.override_days, vec![Weekday::Monday]);
        assert_eq!(dto.weekly_minutes, 35);
        assert_eq!(dto.day_summary(), "Sun Mon");

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["startTime"], "07:10");
        assert_eq!(json["weeklyMinutes"], 35);
    }
}
