use std::sync::{PoisonError, RwLock};

use anyhow::anyhow;
use uuid::Uuid;

use crate::error::{FmdsError, Result};
use crate::model::segment::Segment;
use crate::repository::traits::SegmentRepository;

/// Process-local store, used by tests and by callers embedding the core.
#[derive(Debug, Default)]
pub struct MemorySegmentRepository {
    segments: RwLock<Vec<Segment>>,
}

fn poisoned<T>(_: PoisonError<T>) -> FmdsError {
    FmdsError::Other(anyhow!("segment store lock poisoned"))
}

impl MemorySegmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_segments(segments: Vec<Segment>) -> Self {
        Self {
            segments: RwLock::new(segments),
        }
    }
}

impl SegmentRepository for MemorySegmentRepository {
    fn list(&self) -> Result<Vec<Segment>> {
        let mut segments = self.segments.read().map_err(poisoned)?.clone();
        segments.sort_by_key(|s| s.created_at);
        Ok(segments)
    }

    fn get(&self, id: &Uuid) -> Result<Segment> {
        self.segments
            .read()
            .map_err(poisoned)?
            .iter()
            .find(|s| s.id == *id)
            .cloned()
            .ok_or(FmdsError::SegmentNotFound(*id))
    }

    fn create(&self, segment: Segment) -> Result<Segment> {
        self.segments.write().map_err(poisoned)?.push(segment.clone());
        Ok(segment)
    }

    fn update(&self, segment: &Segment) -> Result<Segment> {
        let mut segments = self.segments.write().map_err(poisoned)?;
        let slot = segments
            .iter_mut()
            .find(|s| s.id == segment.id)
            .ok_or(FmdsError::SegmentNotFound(segment.id))?;
        *slot = segment.clone();
        Ok(segment.clone())
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        let mut segments = self.segments.write().map_err(poisoned)?;
        let before = segments.len();
        segments.retain(|s| s.id != *id);
        if segments.len() == before {
            return Err(FmdsError::SegmentNotFound(*id));
        }
        Ok(())
    }
}
