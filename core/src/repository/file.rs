use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::default_data_dir;
use crate::error::{FmdsError, Result};
use crate::model::segment::Segment;
use crate::repository::traits::SegmentRepository;

const DEFAULT_FILE_NAME: &str = "segments.json";

/// Keeps all segments in one pretty-printed JSON array.
#[derive(Clone, Debug)]
pub struct FileSegmentRepository {
    file_path: PathBuf,
}

impl FileSegmentRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&path).map_err(|source| FmdsError::Store {
            path: path.clone(),
            source,
        })?;
        path.push(DEFAULT_FILE_NAME);

        let repo = FileSegmentRepository { file_path: path };
        if !repo.file_path.exists() {
            info!(path = %repo.file_path.display(), "initialising segment store");
            repo.write_segments(&[])?;
        }
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn store_err(&self, source: std::io::Error) -> FmdsError {
        FmdsError::Store {
            path: self.file_path.clone(),
            source,
        }
    }

    fn read_segments(&self) -> Result<Vec<Segment>> {
        let file = File::open(&self.file_path).map_err(|e| self.store_err(e))?;
        let reader = BufReader::new(file);
        let segments: Vec<Segment> = serde_json::from_reader(reader)?;
        debug!(count = segments.len(), "read segments");
        Ok(segments)
    }

    fn write_segments(&self, segments: &[Segment]) -> Result<()> {
        let file = File::create(&self.file_path).map_err(|e| self.store_err(e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, segments)?;
        writer.flush().map_err(|e| self.store_err(e))?;
        debug!(count = segments.len(), "wrote segments");
        Ok(())
    }
}

impl SegmentRepository for FileSegmentRepository {
    fn list(&self) -> Result<Vec<Segment>> {
        let mut segments = self.read_segments()?;
        segments.sort_by_key(|s| s.created_at);
        Ok(segments)
    }

    fn get(&self, id: &Uuid) -> Result<Segment> {
        self.read_segments()?
            .into_iter()
            .find(|s| s.id == *id)
            .ok_or(FmdsError::SegmentNotFound(*id))
    }

    fn create(&self, segment: Segment) -> Result<Segment> {
        let mut segments = self.read_segments()?;
        segments.push(segment.clone());
        self.write_segments(&segments)?;
        Ok(segment)
    }

    fn update(&self, segment: &Segment) -> Result<Segment> {
        let mut segments = self.read_segments()?;
        let pos = segments
            .iter()
            .position(|s| s.id == segment.id)
            .ok_or(FmdsError::SegmentNotFound(segment.id))?;
        segments[pos] = segment.clone();
        self.write_segments(&segments)?;
        Ok(segment.clone())
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        let mut segments = self.read_segments()?;
        let initial_len = segments.len();
        segments.retain(|s| s.id != *id);

        if segments.len() == initial_len {
            return Err(FmdsError::SegmentNotFound(*id));
        }

        self.write_segments(&segments)
    }
}
