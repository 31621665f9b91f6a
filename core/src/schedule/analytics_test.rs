use crate::model::{ClockTime, DayOverride, NewSegment, Segment, Weekday};
use crate::schedule::{build_analytics, build_day_view, effective_duration, BusiestDay, DaySchedule};

fn seg(title: &str, duration: u32, days: &[Weekday], start: &str) -> Segment {
    Segment::new(NewSegment {
        title: title.to_string(),
        duration,
        days: days.to_vec(),
        start_time: start.parse().ok(),
        end_time: None,
        day_schedules: Vec::new(),
    })
}

fn standup_week() -> Vec<Segment> {
    use Weekday::*;
    vec![
        seg("Backlog Review", 10, &[Sunday, Monday], "07:10"),
        seg("Yesterday Problems", 10, &Weekday::ALL, "07:11"),
        seg("Unsafe Conditions", 15, &[Wednesday], "07:21"),
        seg("YT Prop Activities", 15, &Weekday::ALL, "07:36"),
    ]
}

#[test]
fn test_standup_week_totals() {
    let analytics = build_analytics(&standup_week());

    assert_eq!(analytics.total_activities, 4);
    assert_eq!(analytics.total_duration, 50);
    assert_eq!(analytics.total_weekly_minutes, 160);
    assert_eq!(analytics.average_duration, 13);
    assert_eq!(analytics.active_days, 5);
    assert_eq!(
        analytics.most_busy_day,
        BusiestDay {
            day: Weekday::Wednesday,
            total_duration: 40,
            activity_count: 3,
        }
    );

    let totals: Vec<u32> = analytics.all_days_data.iter().map(|d| d.total_duration).collect();
    assert_eq!(totals, vec![35, 35, 25, 40, 25]);
}

#[test]
fn test_empty_input_is_zeroed() {
    let analytics = build_analytics(&[]);

    assert_eq!(analytics.total_activities, 0);
    assert_eq!(analytics.total_duration, 0);
    assert_eq!(analytics.total_weekly_minutes, 0);
    assert_eq!(analytics.average_duration, 0);
    assert_eq!(analytics.active_days, 0);
    assert_eq!(analytics.most_busy_day.day, Weekday::Sunday);
    assert_eq!(analytics.most_busy_day.total_duration, 0);
    let expected: Vec<DaySchedule> = Weekday::ALL.iter().map(|d| DaySchedule::empty(*d)).collect();
    assert_eq!(analytics.all_days_data, expected);
}

#[test]
fn test_all_days_data_always_canonical() {
    for segments in [vec![], standup_week(), vec![seg("Only Thu", 5, &[Weekday::Thursday], "08:00")]] {
        let analytics = build_analytics(&segments);
        let days: Vec<Weekday> = analytics.all_days_data.iter().map(|d| d.day).collect();
        assert_eq!(days, Weekday::ALL.to_vec());
    }
}

#[test]
fn test_busiest_tie_goes_to_earlier_day() {
    use Weekday::*;
    let segments = vec![
        seg("Thu block", 30, &[Thursday], "07:00"),
        seg("Tue block", 30, &[Tuesday], "07:00"),
        seg("Mon short", 10, &[Monday], "07:00"),
    ];
    let analytics = build_analytics(&segments);
    assert_eq!(analytics.most_busy_day.day, Tuesday);
    assert_eq!(analytics.most_busy_day.total_duration, 30);
}

#[test]
fn test_override_changes_weekly_total_but_not_total_duration() {
    let mut segment = seg("Review", 10, &[Weekday::Monday, Weekday::Wednesday], "07:10");
    segment
        .day_schedules
        .push(DayOverride::new(Weekday::Wednesday, ClockTime::new(7, 30).unwrap(), 20));

    let analytics = build_analytics(&[segment]);
    assert_eq!(analytics.total_weekly_minutes, 30);
    assert_eq!(analytics.total_duration, 10);
    assert_eq!(analytics.day(Weekday::Wednesday).unwrap().total_duration, 20);
    assert_eq!(analytics.day(Weekday::Monday).unwrap().total_duration, 10);
    assert_eq!(analytics.most_busy_day.day, Weekday::Wednesday);
}

#[test]
fn test_day_totals_match_effective_durations() {
    let mut segments = standup_week();
    segments[1]
        .day_schedules
        .push(DayOverride::new(Weekday::Tuesday, ClockTime::new(7, 45).unwrap(), 25));

    for day in Weekday::ALL {
        let expected: u32 = segments
            .iter()
            .filter(|s| s.days.contains(&day))
            .map(|s| effective_duration(s, day))
            .sum();
        assert_eq!(build_day_view(&segments, day).total_duration, expected, "{day}");
    }
}

#[test]
fn test_same_start_keeps_input_order_on_monday() {
    use Weekday::*;
    let segments = vec![
        seg("Alpha", 10, &[Monday], "07:10"),
        seg("Bravo", 10, &[Monday], "07:10"),
    ];
    let view = build_day_view(&segments, Monday);
    assert_eq!(view.segments[0].title(), "Alpha");
    assert_eq!(view.segments[1].title(), "Bravo");
}

#[test]
fn test_segment_without_days_counts_only_as_activity() {
    let mut idle = seg("Parked", 30, &[Weekday::Monday], "07:00");
    idle.days.clear();
    let analytics = build_analytics(&[idle]);
    assert_eq!(analytics.total_activities, 1);
    assert_eq!(analytics.total_duration, 30);
    assert_eq!(analytics.total_weekly_minutes, 0);
    assert_eq!(analytics.active_days, 0);
}

#[test]
fn test_oversized_durations_saturate_totals() {
    let a = seg("Marathon A", 3_000_000_000, &[Weekday::Monday, Weekday::Wednesday], "07:00");
    let b = seg("Marathon B", 3_000_000_000, &[Weekday::Tuesday], "07:00");
    let analytics = build_analytics(&[a, b]);
    assert_eq!(analytics.total_duration, u32::MAX);
    assert_eq!(analytics.total_weekly_minutes, u32::MAX);
    assert_eq!(analytics.most_busy_day.day, Weekday::Monday);
    assert_eq!(analytics.most_busy_day.total_duration, 3_000_000_000);

    let monday = [
        seg("Marathon C", 3_000_000_000, &[Weekday::Monday], "07:00"),
        seg("Marathon D", 3_000_000_000, &[Weekday::Monday], "08:00"),
    ];
    let view = build_day_view(&monday, Weekday::Monday);
    assert_eq!(view.total_duration, u32::MAX);
    assert_eq!(view.activity_count, 2);
}

#[test]
fn test_calls_are_repeatable() {
    let segments = standup_week();
    assert_eq!(build_analytics(&segments), build_analytics(&segments));
    assert_eq!(
        build_day_view(&segments, Weekday::Monday),
        build_day_view(&segments, Weekday::Monday)
    );
}
