use crate::report::{day_names, time_or_na, ReportData};
use crate::schedule::{round_one_decimal, MetricStatus};

type Row = Vec<String>;

macro_rules! row {
    ($($cell:expr),* $(,)?) => {
        vec![$($cell.to_string()),*]
    };
}

pub fn render(data: &ReportData) -> String {
    let mut rows: Vec<Row> = Vec::new();
    summary(data, &mut rows);
    rows.push(row![""]);
    activities(data, &mut rows);
    rows.push(row![""]);
    overrides(data, &mut rows);
    daily(data, &mut rows);
    rows.push(row![""]);
    performance(data, &mut rows);
    rows.push(row![""]);
    recommendations(&mut rows);
    rows.push(row![""]);
    metadata(data, &mut rows);

    let mut out = rows
        .iter()
        .map(|r| r.iter().map(|c| escape(c)).collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

/// Quotes a cell when it holds a comma, quote or line break.
pub fn escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn summary(data: &ReportData, rows: &mut Vec<Row>) {
    let a = &data.analytics;
    rows.push(row!["EXECUTIVE SUMMARY"]);
    rows.push(row!["Metric", "Value", "Analysis"]);
    rows.push(row!["Total Activities", a.total_activities, "Number of scheduled activities"]);
    rows.push(row![
        "Total Duration",
        format!("{} minutes", a.total_duration),
        "Combined default duration of all activities"
    ]);
    rows.push(row![
        "Total Hours",
        format!("{} hours", round_one_decimal(f64::from(a.total_duration) / 60.0)),
        "Total time commitment"
    ]);
    rows.push(row![
        "Average Duration",
        format!("{} minutes", a.average_duration),
        "Average time per activity"
    ]);
    rows.push(row![
        "Active Days",
        format!("{}/5 weekdays", a.active_days),
        "Days with scheduled activities"
    ]);
    rows.push(row![
        "Weekly Commitment",
        format!("{} minutes", a.total_weekly_minutes),
        "Total weekly time investment"
    ]);
    rows.push(row![
        "Busiest Day",
        format!("{} ({} minutes)", a.most_busy_day.day, a.most_busy_day.total_duration),
        "Day with the highest total duration"
    ]);
}

fn activities(data: &ReportData, rows: &mut Vec<Row>) {
    rows.push(row!["DETAILED ACTIVITY BREAKDOWN"]);
    rows.push(row![
        "Activity ID",
        "Activity Name",
        "Duration (Min)",
        "Start Time",
        "End Time",
        "Scheduled Days",
        "Days/Week",
        "Weekly Minutes",
        "Category",
        "Frequency",
        "Overrides",
        "Efficiency Score",
    ]);
    for (index, (segment, profile)) in data.segments.iter().zip(&data.insights.profiles).enumerate() {
        rows.push(row![
            format!("ACT-{:03}", index + 1),
            segment.title,
            segment.duration,
            time_or_na(segment.start_time),
            time_or_na(segment.end_time),
            day_names(segment),
            profile.days_per_week,
            profile.weekly_minutes,
            profile.category,
            profile.frequency,
            segment.day_schedules.len(),
            format!("{}%", profile.efficiency_percent),
        ]);
    }
}

/// Only emitted when at least one segment has a day override.
fn overrides(data: &ReportData, rows: &mut Vec<Row>) {
    let entries: Vec<Row> = data
        .segments
        .iter()
        .flat_map(|s| {
            s.day_schedules.iter().map(move |ov| {
                row![s.title, ov.day, ov.start_time, ov.end_time(), ov.duration]
            })
        })
        .collect();
    if entries.is_empty() {
        return;
    }
    rows.push(row!["DAY OVERRIDES"]);
    rows.push(row!["Activity Name", "Day", "Start Time", "End Time", "Duration (Min)"]);
    rows.extend(entries);
    rows.push(row![""]);
}

fn daily(data: &ReportData, rows: &mut Vec<Row>) {
    rows.push(row!["DAILY SCHEDULE BREAKDOWN"]);
    rows.push(row![
        "Day",
        "Activities Count",
        "Total Duration (Min)",
        "Total Hours",
        "Activity Names",
        "Time Range",
        "Utilization %",
    ]);
    for (view, load) in data.analytics.all_days_data.iter().zip(&data.insights.day_loads) {
        let names = if view.is_empty() {
            "No activities".to_string()
        } else {
            view.segments.iter().map(|s| s.title()).collect::<Vec<_>>().join(" | ")
        };
        let range = if view.is_empty() {
            "N/A".to_string()
        } else {
            format!("{} - {}", time_or_na(view.first_start()), time_or_na(view.last_end()))
        };
        rows.push(row![
            view.day,
            view.activity_count,
            view.total_duration,
            load.hours,
            names,
            range,
            format!("{}%", load.utilization_percent),
        ]);
    }
}

fn performance(data: &ReportData, rows: &mut Vec<Row>) {
    rows.push(row!["PERFORMANCE METRICS"]);
    rows.push(row!["Metric", "Value", "Benchmark", "Status", "Recommendation"]);
    for metric in data.insights.performance(&data.analytics) {
        let status = match metric.status {
            MetricStatus::Good => "Good",
            MetricStatus::Low => "Needs Improvement",
        };
        rows.push(row![metric.name, metric.value, metric.benchmark, status, metric.recommendation]);
    }
}

const RECOMMENDATIONS: [[&str; 5]; 3] = [
    ["High", "Standardize meeting times across all days", "High efficiency gain", "Low", "1 week"],
    ["Medium", "Add buffer time between activities", "Reduced stress", "Medium", "2 weeks"],
    ["Low", "Consider rotating activity order", "Improved engagement", "Low", "1 month"],
];

fn recommendations(rows: &mut Vec<Row>) {
    rows.push(row!["OPTIMIZATION RECOMMENDATIONS"]);
    rows.push(row!["Priority", "Recommendation", "Impact", "Effort", "Timeline"]);
    rows.extend(RECOMMENDATIONS.iter().map(|r| r.iter().map(|c| c.to_string()).collect::<Row>()));
}

fn metadata(data: &ReportData, rows: &mut Vec<Row>) {
    rows.push(row!["REPORT METADATA"]);
    rows.push(row!["Field", "Value"]);
    rows.push(row!["Report Title", data.title]);
    rows.push(row!["Organization", data.organization]);
    rows.push(row!["Generated", data.generated_at.format("%Y-%m-%d %H:%M")]);
    rows.push(row!["Meeting Window", data.window_label]);
    rows.push(row!["Export Format", "CSV"]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::{sample_segments, ClockTime, DayOverride, Segment, Weekday};
    use chrono::{Local, TimeZone};

    fn report(segments: Vec<Segment>) -> String {
        let generated = Local.with_ymd_and_hms(2026, 10, 15, 9, 30, 0).unwrap();
        ReportData::new(segments, &Config::default(), generated)
            .render(crate::report::ReportFormat::Csv)
            .unwrap()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("Sunday, Monday"), "\"Sunday, Monday\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_sample_report_sections() {
        let segments: Vec<Segment> = sample_segments().into_iter().map(Segment::new).collect();
        let csv = report(segments);

        assert!(csv.starts_with("EXECUTIVE SUMMARY\n"));
        assert!(csv.contains("Total Activities,4,"));
        assert!(csv.contains("Weekly Commitment,160 minutes,"));
        assert!(csv.contains("Busiest Day,Wednesday (40 minutes),"));
        assert!(csv.contains("ACT-001,Backlog Review,10,07:10,07:20,\"Sunday, Monday\",2,20,Quick,Medium,0,160%"));
        assert!(csv.contains(
            "Wednesday,3,40,0.7,Yesterday Problems | Unsafe Conditions | YT Prop Activities,07:11 - 07:50,100%"
        ));
        assert!(csv.contains("Schedule Coverage,100%,80-100%,Good,Great coverage"));
        assert!(csv.contains("Generated,2026-10-15 09:30"));
        assert!(!csv.contains("DAY OVERRIDES"));
        assert!(csv.ends_with("Export Format,CSV\n"));
    }

    #[test]
    fn test_recommendations_precede_metadata() {
        let csv = report(Vec::new());
        let recommendations = csv.find("OPTIMIZATION RECOMMENDATIONS\n").unwrap();
        let performance = csv.find("PERFORMANCE METRICS\n").unwrap();
        let metadata = csv.find("REPORT METADATA\n").unwrap();
        assert!(performance < recommendations && recommendations < metadata);

        let section = &csv[recommendations..metadata];
        assert!(section.contains("Priority,Recommendation,Impact,Effort,Timeline\n"));
        assert!(section.contains("High,Standardize meeting times across all days,High efficiency gain,Low,1 week\n"));
        assert!(section.contains("Low,Consider rotating activity order,Improved engagement,Low,1 month\n"));
        assert_eq!(section.lines().count(), 6);
    }

    #[test]
    fn test_overrides_section_and_empty_days() {
        let mut seg = Segment::new(crate::model::NewSegment {
            title: "Review, weekly".to_string(),
            duration: 10,
            days: vec![Weekday::Monday],
            start_time: ClockTime::new(7, 10),
            ..Default::default()
        });
        seg.day_schedules.push(DayOverride::new(Weekday::Monday, ClockTime::new(8, 0).unwrap(), 20));
        let csv = report(vec![seg]);

        assert!(csv.contains("DAY OVERRIDES\n"));
        assert!(csv.contains("\"Review, weekly\",Monday,08:00,08:20,20"));
        assert!(csv.contains("Sunday,0,0,0,No activities,N/A,0%"));
        assert!(csv.contains("Monday,1,20,0.3,\"Review, weekly\",08:00 - 08:20,50%"));
    }
}
