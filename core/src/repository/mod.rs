pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileSegmentRepository;
pub use memory::MemorySegmentRepository;
pub use traits::SegmentRepository;
