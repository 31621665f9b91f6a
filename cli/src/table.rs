use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

use fmds_core::schedule::ScheduleInsights;
use fmds_core::{Analytics, DaySchedule, SegmentDto};

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}

#[derive(Tabled)]
struct SegmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Min")]
    duration: u32,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Days")]
    days: String,
    #[tabled(rename = "Overrides")]
    overrides: String,
    #[tabled(rename = "Min/Week")]
    weekly: u32,
}

pub fn segment_table(segments: &[SegmentDto]) -> String {
    let rows = segments.iter().map(|s| SegmentRow {
        id: s.short_id.clone(),
        title: s.title.clone(),
        duration: s.duration,
        start: or_dash(s.start_time),
        end: or_dash(s.end_time),
        days: s.day_summary(),
        overrides: if s.override_days.is_empty() {
            "-".to_string()
        } else {
            s.override_days.iter().map(|d| d.short()).collect::<Vec<_>>().join(" ")
        },
        weekly: s.weekly_minutes,
    });
    styled(Table::new(rows))
}

#[derive(Tabled)]
struct AgendaRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Min")]
    duration: u32,
    #[tabled(rename = "Title")]
    title: String,
}

pub fn day_table(view: &DaySchedule) -> String {
    let rows = view.segments.iter().enumerate().map(|(i, item)| AgendaRow {
        index: i + 1,
        start: or_dash(item.start_time()),
        end: or_dash(item.end_time()),
        duration: item.duration(),
        title: if item.effective.overridden {
            format!("{} *", item.title())
        } else {
            item.title().to_string()
        },
    });
    styled(Table::new(rows))
}

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Activities")]
    count: usize,
    #[tabled(rename = "Minutes")]
    minutes: u32,
    #[tabled(rename = "Hours")]
    hours: f64,
    #[tabled(rename = "Window")]
    utilization: String,
}

pub fn week_table(analytics: &Analytics, insights: &ScheduleInsights) -> String {
    let rows = analytics
        .all_days_data
        .iter()
        .zip(&insights.day_loads)
        .map(|(view, load)| DayRow {
            day: view.day.to_string(),
            count: view.activity_count,
            minutes: view.total_duration,
            hours: load.hours,
            utilization: format!("{}%", load.utilization_percent),
        });
    styled(Table::new(rows))
}
