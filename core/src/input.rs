use std::collections::HashMap;

use crate::error::{FmdsError, Result};
use crate::model::{parse_day_list, ClockTime, NewSegment, SegmentPatch};
use crate::time::parse_duration;

pub const SEGMENT_KEYS: [&str; 4] = ["duration", "days", "start", "end"];

/// Free words plus `key:value` pairs, as typed after `add` or `edit`.
#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub title: String,
    pub fields: HashMap<String, String>,
}

pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut title_parts = Vec::new();
    let mut fields = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            // "7:10" is a time, not a field
            if !key.is_empty() && !key.chars().all(|c| c.is_ascii_digit()) {
                fields.insert(key.to_lowercase(), value.to_string());
                continue;
            }
        }
        title_parts.push(arg.as_str());
    }

    ParsedInput {
        title: title_parts.join(" "),
        fields,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.as_slice() {
        [only] => Ok(only.to_string()),
        [] => Err(FmdsError::Config(format!("Unknown key: '{key}'"))),
        _ => Err(FmdsError::Config(format!("Ambiguous key: '{key}' matches {matches:?}"))),
    }
}

impl ParsedInput {
    /// Field values keyed by their full names.
    fn expanded(&self) -> Result<HashMap<String, &str>> {
        self.fields
            .iter()
            .map(|(k, v)| Ok((expand_key(k, &SEGMENT_KEYS)?, v.as_str())))
            .collect()
    }

    pub fn to_new_segment(&self) -> Result<NewSegment> {
        let fields = self.expanded()?;
        let duration = match fields.get("duration") {
            Some(v) => parse_duration(v)?,
            None => return Err(FmdsError::Config("duration:<minutes> is required".to_string())),
        };
        Ok(NewSegment {
            title: self.title.clone(),
            duration,
            days: fields.get("days").map(|v| parse_day_list(v)).transpose()?.unwrap_or_default(),
            start_time: optional_time(fields.get("start"))?.flatten(),
            end_time: optional_time(fields.get("end"))?.flatten(),
            day_schedules: Vec::new(),
        })
    }

    /// An empty value (`start:`) clears an optional time.
    pub fn to_patch(&self) -> Result<SegmentPatch> {
        let fields = self.expanded()?;
        Ok(SegmentPatch {
            title: (!self.title.is_empty()).then(|| self.title.clone()),
            duration: fields.get("duration").map(|v| parse_duration(v)).transpose()?,
            days: fields.get("days").map(|v| parse_day_list(v)).transpose()?,
            start_time: optional_time(fields.get("start"))?,
            end_time: optional_time(fields.get("end"))?,
        })
    }
}

fn optional_time(value: Option<&&str>) -> Result<Option<Option<ClockTime>>> {
    match value {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => Ok(Some(None)),
        Some(v) => Ok(Some(Some(v.parse()?))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Weekday;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_simple() {
        let parsed = parse_args(&args(&["Backlog", "Review", "dur:10", "days:sun,mon", "start:7:10"]));
        assert_eq!(parsed.title, "Backlog Review");
        assert_eq!(parsed.fields.get("dur"), Some(&"10".to_string()));
        assert_eq!(parsed.fields.get("days"), Some(&"sun,mon".to_string()));
        assert_eq!(parsed.fields.get("start"), Some(&"7:10".to_string()));
    }

    #[test]
    fn test_bare_time_stays_in_title() {
        let parsed = parse_args(&args(&["Huddle", "7:10"]));
        assert_eq!(parsed.title, "Huddle 7:10");
        assert!(parsed.fields.is_empty());
    }

    #[test]
    fn test_expand_key() {
        assert_eq!(expand_key("du", &SEGMENT_KEYS).unwrap(), "duration");
        assert_eq!(expand_key("da", &SEGMENT_KEYS).unwrap(), "days");
        assert_eq!(expand_key("s", &SEGMENT_KEYS).unwrap(), "start");
        assert_eq!(expand_key("end", &SEGMENT_KEYS).unwrap(), "end");

        // Ambiguous
        assert!(expand_key("d", &SEGMENT_KEYS).is_err());
        // Unknown
        assert!(expand_key("x", &SEGMENT_KEYS).is_err());
    }

    #[test]
    fn test_to_new_segment() {
        let parsed = parse_args(&args(&["Safety", "du:15m", "da:wed", "s:07:21"]));
        let input = parsed.to_new_segment().unwrap();
        assert_eq!(input.title, "Safety");
        assert_eq!(input.duration, 15);
        assert_eq!(input.days, vec![Weekday::Wednesday]);
        assert_eq!(input.start_time, ClockTime::new(7, 21));
        assert_eq!(input.end_time, None);

        let missing = parse_args(&args(&["Safety", "days:wed"]));
        assert!(matches!(missing.to_new_segment(), Err(FmdsError::Config(_))));

        let bad_time = parse_args(&args(&["Safety", "du:5", "start:25:00"]));
        assert!(matches!(bad_time.to_new_segment(), Err(FmdsError::InvalidTime(_))));
    }

    #[test]
    fn test_to_patch() {
        let patch = parse_args(&args(&["end:", "du:20"])).to_patch().unwrap();
        assert_eq!(patch.title, None);
        assert_eq!(patch.duration, Some(20));
        assert_eq!(patch.end_time, Some(None));
        assert_eq!(patch.start_time, None);
        assert_eq!(patch.days, None);

        assert!(parse_args(&args(&[])).to_patch().unwrap().is_empty());
    }
}
