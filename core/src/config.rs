use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{FmdsError, Result};
use crate::model::ClockTime;

const APP_DIR: &str = ".fmds";
const CONFIG_FILE: &str = "config.toml";

/// `~/.fmds`, where the segment store and config live by default.
pub fn default_data_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| FmdsError::Config("Could not determine home directory".to_string()))?;
    Ok(home.join(APP_DIR))
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub meeting: MeetingConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides `~/.fmds` for `segments.json`.
    pub data_dir: Option<PathBuf>,
}

/// The daily meeting slot all utilisation figures are measured against.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MeetingConfig {
    pub window_start: ClockTime,
    pub window_end: ClockTime,
}

impl Default for MeetingConfig {
    fn default() -> Self {
        Self {
            window_start: ClockTime::new(7, 10).unwrap_or(ClockTime::MIDNIGHT),
            window_end: ClockTime::new(7, 50).unwrap_or(ClockTime::MIDNIGHT),
        }
    }
}

impl MeetingConfig {
    pub fn window_minutes(&self) -> u32 {
        self.window_start.minutes_until(self.window_end)
    }

    pub fn window_label(&self) -> String {
        format!("{} - {}", self.window_start, self.window_end)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
    pub organization: String,
    pub output_dir: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "FMDS Meeting Schedule Report".to_string(),
            organization: "FMDS Administration".to_string(),
            output_dir: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        Ok(default_data_dir()?.join(CONFIG_FILE))
    }

    /// Loads `path`, or the defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| FmdsError::Config(format!("Failed to serialize config: {e}")))?;
        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.meeting.window_minutes() == 0 {
            return Err(FmdsError::Config(
                "meeting.window_start and meeting.window_end must differ".to_string(),
            ));
        }
        Ok(())
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().expect("tempdir");
        let config = Config::load_from(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.meeting.window_minutes(), 40);
        assert_eq!(config.meeting.window_label(), "07:10 - 07:50");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            "[meeting]\nwindow_start = \"8:00\"\nwindow_end = \"08:30\"\n\n[report]\ntitle = \"Plant 3 Stand-up\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.meeting.window_minutes(), 30);
        assert_eq!(config.report.title, "Plant 3 Stand-up");
        assert_eq!(config.report.organization, "FMDS Administration");
        assert_eq!(config.storage.data_dir, None);
    }

    #[test]
    fn test_save_and_reload() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("sub").join("config.toml");
        let mut config = Config::default();
        config.storage.data_dir = Some(tmp.path().join("data"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.data_dir().unwrap(), tmp.path().join("data"));
    }

    #[test]
    fn test_rejects_empty_window_and_bad_toml() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("config.toml");

        fs::write(&path, "[meeting]\nwindow_start = \"07:10\"\nwindow_end = \"07:10\"\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(FmdsError::Config(_))));

        fs::write(&path, "[meeting\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(FmdsError::ConfigParse(_))));

        fs::write(&path, "[meeting]\nwindow_start = \"25:00\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
