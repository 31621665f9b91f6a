use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

use crate::model::weekday::Weekday;

/// Errors raised by the segment store, validation and configuration.
///
/// The schedule engine itself never fails; everything here belongs to the
/// layers around it.
#[derive(Error, Debug)]
pub enum FmdsError {
    #[error("Segment title must not be empty")]
    EmptyTitle,

    #[error("Duration must be greater than zero minutes")]
    ZeroDuration,

    #[error("Duration {0} exceeds the {max} minute limit", max = crate::model::MAX_DURATION_MINUTES)]
    DurationTooLong(u32),

    #[error("A segment needs at least one scheduled day")]
    NoDays,

    #[error("Day {0} is listed more than once")]
    DuplicateDay(Weekday),

    #[error("Override for {0} but the segment is not scheduled on that day")]
    OverrideDayNotScheduled(Weekday),

    #[error("More than one override for {0}")]
    DuplicateOverride(Weekday),

    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid weekday '{0}', expected one of Sunday..Thursday")]
    InvalidWeekday(String),

    #[error("Segment {0} not found")]
    SegmentNotFound(Uuid),

    #[error("No segment matches id '{0}'")]
    UnknownId(String),

    #[error("Id prefix '{0}' matches more than one segment")]
    AmbiguousId(String),

    /// The backing store could not be read or written.
    #[error("Store unavailable at {path}: {source}")]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to render report: {0}")]
    Render(#[from] std::fmt::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, FmdsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_store() {
        let err = FmdsError::Store {
            path: PathBuf::from("/data/segments.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Store unavailable"));
        assert!(msg.contains("/data/segments.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_error_display_override_day() {
        let err = FmdsError::OverrideDayNotScheduled(Weekday::Tuesday);
        assert_eq!(
            err.to_string(),
            "Override for Tuesday but the segment is not scheduled on that day"
        );
    }

    #[test]
    fn test_error_display_duration_too_long() {
        let err = FmdsError::DurationTooLong(5000);
        assert_eq!(err.to_string(), "Duration 5000 exceeds the 1440 minute limit");
    }

    #[test]
    fn test_error_from_fmt_error() {
        let err: FmdsError = std::fmt::Error.into();
        assert!(matches!(err, FmdsError::Render(_)));
        assert!(err.to_string().starts_with("Failed to render report"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops}").unwrap_err();
        let err: FmdsError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }
}
