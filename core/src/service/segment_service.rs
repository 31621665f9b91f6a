use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{FmdsError, Result};
use crate::model::segment::{sample_segments, DayOverride, NewSegment, Segment, SegmentPatch};
use crate::model::weekday::Weekday;
use crate::repository::SegmentRepository;
use crate::schedule::{build_analytics, build_day_view, Analytics, DaySchedule};

/// Store-facing operations. Validation happens here so the schedule
/// engine only ever sees well-formed segments.
pub struct SegmentService<R: SegmentRepository> {
    repo: R,
}

impl<R: SegmentRepository> SegmentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn list_segments(&self) -> Result<Vec<Segment>> {
        self.repo.list()
    }

    pub fn get_segment(&self, id: &Uuid) -> Result<Segment> {
        self.repo.get(id)
    }

    pub fn create_segment(&self, input: NewSegment) -> Result<Segment> {
        let segment = Segment::new(input);
        checked(&segment)?;
        let created = self.repo.create(segment)?;
        info!(id = %created.id, title = %created.title, "segment created");
        Ok(created)
    }

    pub fn update_segment(&self, id: &Uuid, patch: SegmentPatch) -> Result<Segment> {
        let mut segment = self.repo.get(id)?;
        if patch.is_empty() {
            return Ok(segment);
        }
        segment.apply(patch);
        checked(&segment)?;
        let updated = self.repo.update(&segment)?;
        info!(id = %updated.id, "segment updated");
        Ok(updated)
    }

    pub fn set_override(&self, id: &Uuid, ov: DayOverride) -> Result<Segment> {
        let mut segment = self.repo.get(id)?;
        segment.set_override(ov);
        checked(&segment)?;
        let updated = self.repo.update(&segment)?;
        info!(id = %updated.id, "day override saved");
        Ok(updated)
    }

    /// Returns false when there was no override for `day`.
    pub fn clear_override(&self, id: &Uuid, day: Weekday) -> Result<bool> {
        let mut segment = self.repo.get(id)?;
        if !segment.clear_override(day) {
            return Ok(false);
        }
        self.repo.update(&segment)?;
        info!(id = %segment.id, %day, "day override cleared");
        Ok(true)
    }

    pub fn delete_segment(&self, id: &Uuid) -> Result<()> {
        self.repo.delete(id)?;
        info!(%id, "segment deleted");
        Ok(())
    }

    /// Accepts a full id or any unique prefix of one, as shown in listings.
    pub fn resolve_id(&self, needle: &str) -> Result<Uuid> {
        let needle = needle.trim().to_lowercase();
        if let Ok(id) = Uuid::parse_str(&needle) {
            return Ok(id);
        }
        if needle.is_empty() {
            return Err(FmdsError::UnknownId(needle));
        }
        let matches: Vec<Uuid> = self
            .repo
            .list()?
            .into_iter()
            .map(|s| s.id)
            .filter(|id| id.to_string().starts_with(&needle))
            .collect();
        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(FmdsError::UnknownId(needle)),
            _ => Err(FmdsError::AmbiguousId(needle)),
        }
    }

    /// Fills an empty store with the default stand-up agenda. Returns how
    /// many segments were created.
    pub fn seed_defaults(&self) -> Result<usize> {
        if !self.repo.list()?.is_empty() {
            return Ok(0);
        }
        let samples = sample_segments();
        let count = samples.len();
        for input in samples {
            self.create_segment(input)?;
        }
        Ok(count)
    }

    pub fn day_view(&self, day: Weekday) -> Result<DaySchedule> {
        Ok(build_day_view(&self.repo.list()?, day))
    }

    pub fn analytics(&self) -> Result<Analytics> {
        Ok(build_analytics(&self.repo.list()?))
    }
}

fn checked(segment: &Segment) -> Result<()> {
    segment.validate().inspect_err(|e| warn!(title = %segment.title, "rejected segment: {e}"))
}
