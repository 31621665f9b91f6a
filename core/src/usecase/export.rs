use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Config;
use crate::error::{FmdsError, Result};
use crate::report::{ReportData, ReportFormat};
use crate::repository::SegmentRepository;

/// Renders the current store into a dated report file.
pub struct ExportUseCase<'a, R: SegmentRepository> {
    repo: &'a R,
    config: &'a Config,
}

impl<'a, R: SegmentRepository> ExportUseCase<'a, R> {
    pub fn new(repo: &'a R, config: &'a Config) -> Self {
        Self { repo, config }
    }

    pub fn build(&self, generated_at: DateTime<Local>) -> Result<ReportData> {
        let segments = self.repo.list()?;
        Ok(ReportData::new(segments, self.config, generated_at))
    }

    /// Writes `FMDS_Schedule_Report_<date>.<ext>` into `out_dir` (or the
    /// configured output directory, or the working directory) and returns
    /// the file's path.
    pub fn export(&self, format: ReportFormat, out_dir: Option<&Path>) -> Result<PathBuf> {
        self.export_at(format, out_dir, Local::now())
    }

    pub fn export_at(
        &self,
        format: ReportFormat,
        out_dir: Option<&Path>,
        generated_at: DateTime<Local>,
    ) -> Result<PathBuf> {
        let dir = out_dir
            .map(Path::to_path_buf)
            .or_else(|| self.config.report.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&dir).map_err(|source| FmdsError::Store {
            path: dir.clone(),
            source,
        })?;

        let data = self.build(generated_at)?;
        let path = dir.join(format.file_name(generated_at.date_naive()));
        let rendered = data.render(format)?;
        fs::write(&path, rendered).map_err(|source| FmdsError::Store {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), %format, segments = data.segments.len(), "report exported");
        Ok(path)
    }
}
