pub mod dto;
pub mod segment_service;

pub use dto::SegmentDto;
pub use segment_service::SegmentService;
