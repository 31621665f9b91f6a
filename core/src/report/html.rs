use std::fmt::Write;

use crate::report::{time_or_na, ReportData};
use crate::schedule::DaySchedule;

const STYLE: &str = r#"
  * { margin: 0; padding: 0; box-sizing: border-box; }
  body { font-family: -apple-system, 'Segoe UI', sans-serif; color: #1a202c; padding: 24px; }
  header { text-align: center; padding: 32px 0; border-bottom: 4px solid #3498db; margin-bottom: 32px; }
  header h1 { font-size: 2.4em; }
  header p { color: #64748b; }
  .stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 16px; margin-bottom: 40px; }
  .stat { background: #f8fafc; border-left: 6px solid #3498db; border-radius: 12px; padding: 20px; text-align: center; }
  .stat .number { font-size: 2.2em; font-weight: 800; }
  .stat .label { color: #64748b; text-transform: uppercase; letter-spacing: 1px; font-size: 0.8em; }
  h2 { margin: 32px 0 16px; color: #2c3e50; }
  table { width: 100%; border-collapse: collapse; margin-bottom: 24px; }
  th { background: #2c3e50; color: white; text-align: left; padding: 12px; }
  td { padding: 10px 12px; border-bottom: 1px solid #e2e8f0; }
  tr.total td { background: #e8f5e9; font-weight: bold; }
  .override { color: #e67e22; font-size: 0.85em; }
  .empty { padding: 16px; background: #fff5f5; border-radius: 8px; color: #c0392b; margin-bottom: 24px; }
  .cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); gap: 16px; }
  .card { background: #f8fafc; border-radius: 12px; padding: 20px; }
  .card p { margin: 6px 0; }
  footer { margin-top: 40px; text-align: center; color: #64748b; font-size: 0.85em; }
  @media print { body { padding: 0; } .stat, .card { break-inside: avoid; } }
"#;

/// Escapes the characters that matter inside element content and attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render(data: &ReportData) -> std::result::Result<String, std::fmt::Error> {
    let mut html = String::new();
    write_document(&mut html, data)?;
    Ok(html)
}

fn write_document(out: &mut String, data: &ReportData) -> std::fmt::Result {
    let title = escape(&data.title);
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>")?;
    writeln!(out, "<header>\n<h1>{title}</h1>")?;
    writeln!(
        out,
        "<p>Meeting window {} &middot; generated {}</p>\n</header>",
        escape(&data.window_label),
        data.generated_at.format("%A, %B %-d, %Y %H:%M")
    )?;

    write_stats(out, data)?;
    write_activity_table(out, data)?;
    for view in &data.analytics.all_days_data {
        write_day(out, view)?;
    }
    write_analysis(out, data)?;

    writeln!(
        out,
        "<footer>{} &middot; {}</footer>\n</body>\n</html>",
        escape(&data.organization),
        title
    )
}

fn write_stats(out: &mut String, data: &ReportData) -> std::fmt::Result {
    let a = &data.analytics;
    let cards = [
        (a.total_activities.to_string(), "Total Activities"),
        (a.total_duration.to_string(), "Total Minutes"),
        (a.total_weekly_minutes.to_string(), "Weekly Minutes"),
        (a.average_duration.to_string(), "Avg Duration"),
        (a.active_days.to_string(), "Active Days"),
        (a.most_busy_day.total_duration.to_string(), "Peak Day Minutes"),
    ];
    writeln!(out, "<section class=\"stats\">")?;
    for (number, label) in cards {
        writeln!(
            out,
            "<div class=\"stat\"><div class=\"number\">{number}</div><div class=\"label\">{label}</div></div>"
        )?;
    }
    writeln!(out, "</section>")
}

fn write_activity_table(out: &mut String, data: &ReportData) -> std::fmt::Result {
    writeln!(out, "<h2>Complete Activity Schedule</h2>")?;
    writeln!(
        out,
        "<table>\n<thead><tr><th>Activity</th><th>Duration</th><th>Time Range</th><th>Scheduled Days</th><th>Frequency</th></tr></thead>\n<tbody>"
    )?;
    for segment in &data.segments {
        let days = segment.days.iter().map(|d| d.name()).collect::<Vec<_>>().join(" ");
        writeln!(
            out,
            "<tr><td>{}</td><td>{} min</td><td>{} - {}</td><td>{}</td><td>{}/week</td></tr>",
            escape(&segment.title),
            segment.duration,
            time_or_na(segment.start_time),
            time_or_na(segment.end_time),
            days,
            segment.days.len()
        )?;
    }
    writeln!(out, "</tbody>\n</table>")
}

fn write_day(out: &mut String, view: &DaySchedule) -> std::fmt::Result {
    writeln!(out, "<h2>{} Schedule</h2>", view.day)?;
    if view.is_empty() {
        return writeln!(out, "<div class=\"empty\">No meetings scheduled for {}</div>", view.day);
    }
    writeln!(
        out,
        "<table>\n<thead><tr><th>Activity</th><th>Duration</th><th>Time</th></tr></thead>\n<tbody>"
    )?;
    for item in &view.segments {
        let marker = if item.effective.overridden {
            " <span class=\"override\">(day override)</span>"
        } else {
            ""
        };
        writeln!(
            out,
            "<tr><td>{}{marker}</td><td>{} min</td><td>{} - {}</td></tr>",
            escape(item.title()),
            item.duration(),
            time_or_na(item.start_time()),
            time_or_na(item.end_time())
        )?;
    }
    writeln!(
        out,
        "<tr class=\"total\"><td>{} Total</td><td>{} min</td><td>{}h total</td></tr>",
        view.day,
        view.total_duration,
        view.total_hours()
    )?;
    writeln!(out, "</tbody>\n</table>")
}

fn write_analysis(out: &mut String, data: &ReportData) -> std::fmt::Result {
    let a = &data.analytics;
    let i = &data.insights;
    let minutes = |v: Option<u32>| v.map(|m| format!("{m} minutes")).unwrap_or_else(|| "N/A".to_string());

    writeln!(out, "<h2>Analytics</h2>\n<section class=\"cards\">")?;

    writeln!(out, "<div class=\"card\"><h3>Activity Distribution</h3>")?;
    writeln!(
        out,
        "<p><strong>Most Active Day:</strong> {} ({} minutes)</p>",
        a.most_busy_day.day, a.most_busy_day.total_duration
    )?;
    writeln!(out, "<p><strong>Total Weekly Commitment:</strong> {} minutes</p>", a.total_weekly_minutes)?;
    writeln!(out, "<p><strong>Daily Average:</strong> {} minutes</p>", i.daily_average)?;
    writeln!(out, "<p><strong>Efficiency Score:</strong> {}%</p>", i.coverage_percent)?;
    writeln!(out, "<p><strong>Coverage Rate:</strong> {}% of weekdays</p>\n</div>", i.coverage_percent)?;

    writeln!(out, "<div class=\"card\"><h3>Time Analysis</h3>")?;
    writeln!(out, "<p><strong>Shortest Activity:</strong> {}</p>", minutes(i.shortest))?;
    writeln!(out, "<p><strong>Longest Activity:</strong> {}</p>", minutes(i.longest))?;
    writeln!(out, "<p><strong>Time Variance:</strong> {}</p>", minutes(i.variance()))?;
    writeln!(
        out,
        "<p><strong>Meeting Window:</strong> {} ({} minutes)</p>\n</div>",
        escape(&data.window_label),
        i.window_minutes
    )?;

    writeln!(out, "<div class=\"card\"><h3>Schedule Optimization</h3>")?;
    writeln!(out, "<p><strong>Activity Density:</strong> {} per active day</p>", i.activity_density)?;
    writeln!(
        out,
        "<p><strong>Peak Utilization:</strong> {} ({} activities)</p>",
        a.most_busy_day.day, a.most_busy_day.activity_count
    )?;
    writeln!(out, "<p><strong>Optimization Score:</strong> {}%</p>\n</div>", i.optimization_percent)?;

    writeln!(out, "</section>")
}
