pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod report;
pub mod repository;
pub mod schedule;
pub mod service;
pub mod time;
pub mod timer;
pub mod usecase;

pub use config::Config;
pub use error::{FmdsError, Result};
pub use input::{expand_key, parse_args, ParsedInput};
pub use model::{ClockTime, DayOverride, NewSegment, Segment, SegmentPatch, Weekday};
pub use report::{ReportData, ReportFormat};
pub use repository::{FileSegmentRepository, MemorySegmentRepository, SegmentRepository};
pub use schedule::{build_analytics, build_day_view, resolve, Analytics, DaySchedule, ScheduleInsights};
pub use service::{SegmentDto, SegmentService};
pub use time::{parse_duration, schedule_day};
pub use timer::{CountdownTimer, TimerEvent, TimerStatus};
pub use usecase::ExportUseCase;
