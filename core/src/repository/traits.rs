use uuid::Uuid;

use crate::error::Result;
use crate::model::segment::Segment;

/// Backing store for segments.
///
/// `list` returns segments in creation order. Every method may fail with a
/// store error; none of them validate, that is the service's job.
pub trait SegmentRepository {
    fn list(&self) -> Result<Vec<Segment>>;
    fn get(&self, id: &Uuid) -> Result<Segment>;
    fn create(&self, segment: Segment) -> Result<Segment>;
    fn update(&self, segment: &Segment) -> Result<Segment>;
    fn delete(&self, id: &Uuid) -> Result<()>;
}
