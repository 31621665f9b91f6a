use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fmds_core::{Config, FileSegmentRepository};

/// Installs the global subscriber. An explicit `--log-level` wins over
/// `RUST_LOG`; with neither only warnings are shown. Output goes to stderr
/// so report and JSON output on stdout stay clean.
pub fn setup_logging(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::try_new(level.to_lowercase()).unwrap_or_else(|_| EnvFilter::new("warn")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(filter).with(layer).init();
}

/// Loads the config file (explicit path or `~/.fmds/config.toml`) and
/// applies the `--data-dir` override.
pub fn load_config(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> anyhow::Result<Config> {
    let mut config = match config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if data_dir.is_some() {
        config.storage.data_dir = data_dir;
    }
    Ok(config)
}

pub fn open_store(config: &Config) -> anyhow::Result<FileSegmentRepository> {
    Ok(FileSegmentRepository::new(Some(config.data_dir()?))?)
}
