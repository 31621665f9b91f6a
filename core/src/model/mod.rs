pub mod clock;
pub mod segment;
pub mod weekday;

pub use clock::ClockTime;
pub use segment::{sample_segments, MAX_DURATION_MINUTES, DayOverride, NewSegment, Segment, SegmentPatch};
pub use weekday::{parse_day_list, Weekday};
