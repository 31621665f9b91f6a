//! Secondary figures shown in reports: coverage, utilisation against the
//! meeting window, per-segment profiles and benchmarked metrics.
//!
//! Everything here is derived from [`Analytics`] and the segment list; no
//! figure is recomputed from scratch.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{Segment, Weekday};
use crate::schedule::analytics::Analytics;
use crate::schedule::day_view::DaySchedule;
use crate::schedule::resolve::weekly_minutes;
use crate::schedule::{percent, round_one_decimal};

const WEEKDAY_COUNT: u32 = Weekday::ALL.len() as u32;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Quick,
    Standard,
    Extended,
}

impl Category {
    pub fn for_duration(minutes: u32) -> Self {
        match minutes {
            0..=10 => Category::Quick,
            11..=20 => Category::Standard,
            _ => Category::Extended,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Quick => "Quick",
            Category::Standard => "Standard",
            Category::Extended => "Extended",
        };
        f.write_str(s)
    }
}

/// How often a segment recurs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    High,
    Medium,
    Low,
}

impl Frequency {
    pub fn for_day_count(days: usize) -> Self {
        match days {
            d if d >= 4 => Frequency::High,
            d if d >= 2 => Frequency::Medium,
            _ => Frequency::Low,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::High => "High",
            Frequency::Medium => "Medium",
            Frequency::Low => "Low",
        };
        f.write_str(s)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SegmentProfile {
    pub title: String,
    pub days_per_week: usize,
    pub weekly_minutes: u32,
    pub category: Category,
    pub frequency: Frequency,
    pub efficiency_percent: u32,
}

impl SegmentProfile {
    pub fn new(segment: &Segment, window_minutes: u32) -> Self {
        let days = segment.days.len();
        let efficiency_percent = if segment.duration == 0 {
            0
        } else {
            let share = days as f64 / f64::from(WEEKDAY_COUNT);
            let fit = f64::from(window_minutes) / f64::from(segment.duration);
            (share * fit * 100.0).round() as u32
        };
        Self {
            title: segment.title.clone(),
            days_per_week: days,
            weekly_minutes: weekly_minutes(segment),
            category: Category::for_duration(segment.duration),
            frequency: Frequency::for_day_count(days),
            efficiency_percent,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayLoad {
    pub day: Weekday,
    pub hours: f64,
    pub utilization_percent: u32,
}

impl DayLoad {
    pub fn new(view: &DaySchedule, window_minutes: u32) -> Self {
        Self {
            day: view.day,
            hours: view.total_hours(),
            utilization_percent: percent(f64::from(view.total_duration), f64::from(window_minutes)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricStatus {
    Good,
    Low,
}

/// One benchmarked row of the performance table.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetric {
    pub name: &'static str,
    pub value: String,
    pub benchmark: &'static str,
    pub status: MetricStatus,
    pub recommendation: &'static str,
}

impl PerformanceMetric {
    fn rate(
        name: &'static str,
        value: String,
        benchmark: &'static str,
        ok: bool,
        advice: (&'static str, &'static str),
    ) -> Self {
        let (when_ok, when_low) = advice;
        Self {
            name,
            value,
            benchmark,
            status: if ok { MetricStatus::Good } else { MetricStatus::Low },
            recommendation: if ok { when_ok } else { when_low },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInsights {
    pub window_minutes: u32,
    pub daily_average: u32,
    pub coverage_percent: u32,
    pub activity_density: f64,
    pub optimization_percent: u32,
    pub shortest: Option<u32>,
    pub longest: Option<u32>,
    pub day_loads: Vec<DayLoad>,
    pub profiles: Vec<SegmentProfile>,
}

impl ScheduleInsights {
    pub fn new(segments: &[Segment], analytics: &Analytics, window_minutes: u32) -> Self {
        let active_days = analytics.active_days as f64;
        let activity_density = if analytics.active_days == 0 {
            0.0
        } else {
            round_one_decimal(analytics.total_activities as f64 / active_days)
        };
        let optimization_percent = percent(
            f64::from(analytics.total_duration),
            active_days * f64::from(window_minutes),
        );

        Self {
            window_minutes,
            daily_average: (f64::from(analytics.total_weekly_minutes) / f64::from(WEEKDAY_COUNT)).round()
                as u32,
            coverage_percent: percent(active_days, f64::from(WEEKDAY_COUNT)),
            activity_density,
            optimization_percent,
            shortest: segments.iter().map(|s| s.duration).min(),
            longest: segments.iter().map(|s| s.duration).max(),
            day_loads: analytics
                .all_days_data
                .iter()
                .map(|d| DayLoad::new(d, window_minutes))
                .collect(),
            profiles: segments
                .iter()
                .map(|s| SegmentProfile::new(s, window_minutes))
                .collect(),
        }
    }

    /// Longest minus shortest default duration.
    pub fn variance(&self) -> Option<u32> {
        Some(self.longest? - self.shortest?)
    }

    pub fn performance(&self, analytics: &Analytics) -> Vec<PerformanceMetric> {
        vec![
            PerformanceMetric::rate(
                "Weekly Time Investment",
                format!("{} minutes", analytics.total_weekly_minutes),
                "200-300 minutes",
                analytics.total_weekly_minutes >= 200,
                ("Optimal range", "Consider adding activities"),
            ),
            PerformanceMetric::rate(
                "Daily Average",
                format!("{} minutes", self.daily_average),
                "40-60 minutes",
                self.daily_average >= 40,
                ("Well balanced", "Increase daily commitment"),
            ),
            PerformanceMetric::rate(
                "Schedule Coverage",
                format!("{}%", self.coverage_percent),
                "80-100%",
                self.coverage_percent >= 80,
                ("Great coverage", "Add more active days"),
            ),
            PerformanceMetric::rate(
                "Activity Diversity",
                format!("{} types", analytics.total_activities),
                "4-8 types",
                analytics.total_activities >= 4,
                ("Good variety", "Consider more activity types"),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{sample_segments, Segment};
    use crate::schedule::build_analytics;

    fn samples() -> Vec<Segment> {
        sample_segments().into_iter().map(Segment::new).collect()
    }

    #[test]
    fn test_sample_insights() {
        let segments = samples();
        let analytics = build_analytics(&segments);
        let insights = ScheduleInsights::new(&segments, &analytics, 40);

        assert_eq!(insights.daily_average, 32); // 160 / 5
        assert_eq!(insights.coverage_percent, 100);
        assert_eq!(insights.activity_density, 0.8);
        assert_eq!(insights.optimization_percent, 25); // 50 / 200
        assert_eq!(insights.shortest, Some(10));
        assert_eq!(insights.longest, Some(15));
        assert_eq!(insights.variance(), Some(5));

        let wednesday = &insights.day_loads[3];
        assert_eq!(wednesday.day, Weekday::Wednesday);
        assert_eq!(wednesday.utilization_percent, 100);
        assert_eq!(wednesday.hours, 0.7);
    }

    #[test]
    fn test_profiles() {
        let segments = samples();
        let analytics = build_analytics(&segments);
        let insights = ScheduleInsights::new(&segments, &analytics, 40);

        let backlog = &insights.profiles[0];
        assert_eq!(backlog.category, Category::Quick);
        assert_eq!(backlog.frequency, Frequency::Medium);
        assert_eq!(backlog.weekly_minutes, 20);
        assert_eq!(backlog.efficiency_percent, 160); // 2/5 * 40/10

        let unsafe_conditions = &insights.profiles[2];
        assert_eq!(unsafe_conditions.category, Category::Standard);
        assert_eq!(unsafe_conditions.frequency, Frequency::Low);
    }

    #[test]
    fn test_empty_schedule_has_no_nan() {
        let analytics = build_analytics(&[]);
        let insights = ScheduleInsights::new(&[], &analytics, 40);
        assert_eq!(insights.activity_density, 0.0);
        assert_eq!(insights.optimization_percent, 0);
        assert_eq!(insights.coverage_percent, 0);
        assert_eq!(insights.variance(), None);
        assert_eq!(insights.day_loads.len(), 5);
    }

    #[test]
    fn test_performance_statuses() {
        let segments = samples();
        let analytics = build_analytics(&segments);
        let insights = ScheduleInsights::new(&segments, &analytics, 40);
        let metrics = insights.performance(&analytics);

        assert_eq!(metrics.len(), 4);
        assert_eq!(metrics[0].status, MetricStatus::Low); // 160 < 200
        assert_eq!(metrics[0].recommendation, "Consider adding activities");
        assert_eq!(metrics[1].status, MetricStatus::Low); // 32 < 40
        assert_eq!(metrics[2].status, MetricStatus::Good);
        assert_eq!(metrics[3].status, MetricStatus::Good);
    }

    #[test]
    fn test_category_bounds() {
        assert_eq!(Category::for_duration(10), Category::Quick);
        assert_eq!(Category::for_duration(11), Category::Standard);
        assert_eq!(Category::for_duration(20), Category::Standard);
        assert_eq!(Category::for_duration(21), Category::Extended);
    }
}
