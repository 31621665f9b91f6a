//! CSV and printable HTML exports. Both render from one [`ReportData`],
//! built from a single engine run.

pub mod csv;
pub mod html;

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::Config;
use crate::error::{FmdsError, Result};
use crate::model::{ClockTime, Segment};
use crate::schedule::{build_analytics, Analytics, ScheduleInsights};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Html,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Html => "html",
        }
    }

    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("FMDS_Schedule_Report_{}.{}", date.format("%Y-%m-%d"), self.extension())
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ReportFormat {
    type Err = FmdsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" | "excel" => Ok(ReportFormat::Csv),
            "html" | "pdf" | "print" => Ok(ReportFormat::Html),
            other => Err(FmdsError::Config(format!("Unknown report format: {other}"))),
        }
    }
}

/// Everything a renderer needs.
#[derive(Debug, Clone)]
pub struct ReportData {
    pub title: String,
    pub organization: String,
    pub window_label: String,
    pub generated_at: DateTime<Local>,
    pub segments: Vec<Segment>,
    pub analytics: Analytics,
    pub insights: ScheduleInsights,
}

impl ReportData {
    pub fn new(segments: Vec<Segment>, config: &Config, generated_at: DateTime<Local>) -> Self {
        let analytics = build_analytics(&segments);
        let insights = ScheduleInsights::new(&segments, &analytics, config.meeting.window_minutes());
        Self {
            title: config.report.title.clone(),
            organization: config.report.organization.clone(),
            window_label: config.meeting.window_label(),
            generated_at,
            segments,
            analytics,
            insights,
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Csv => Ok(csv::render(self)),
            ReportFormat::Html => Ok(html::render(self)?),
        }
    }
}

pub(crate) fn time_or_na(time: Option<ClockTime>) -> String {
    time.map(|t| t.to_string()).unwrap_or_else(|| "N/A".to_string())
}

pub(crate) fn day_names(segment: &Segment) -> String {
    segment
        .days
        .iter()
        .map(|d| d.name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        assert_eq!(ReportFormat::Csv.file_name(date), "FMDS_Schedule_Report_2026-10-15.csv");
        assert_eq!(ReportFormat::Html.file_name(date), "FMDS_Schedule_Report_2026-10-15.html");
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("CSV".parse::<ReportFormat>().unwrap(), ReportFormat::Csv);
        assert_eq!("pdf".parse::<ReportFormat>().unwrap(), ReportFormat::Html);
        assert!("xlsx".parse::<ReportFormat>().is_err());
    }
}
