//! The schedule engine: pure functions from a segment list to day views
//! and weekly analytics. Nothing in here reads or writes the store.

pub mod analytics;
pub mod day_view;
pub mod insights;
pub mod resolve;

#[cfg(test)]
mod analytics_test;

pub use analytics::{build_analytics, Analytics, BusiestDay};
pub use day_view::{build_day_view, DaySchedule, ScheduledSegment};
pub use insights::{Category, DayLoad, Frequency, MetricStatus, PerformanceMetric, ScheduleInsights, SegmentProfile};
pub use resolve::{effective_duration, resolve, weekly_minutes, EffectiveSchedule};

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part / whole` as a rounded percentage, 0 when `whole` is zero.
pub(crate) fn percent(part: f64, whole: f64) -> u32 {
    if whole <= 0.0 {
        return 0;
    }
    (part / whole * 100.0).round() as u32
}
