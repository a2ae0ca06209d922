use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::bank::OPTIONS_PER_QUESTION;

/// 150 minutes.
pub const DEFAULT_DURATION_SECS: u32 = 150 * 60;
/// Below this many seconds the countdown is shown as a warning.
pub const DEFAULT_LOW_TIME_WARNING_SECS: u32 = 10 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("exam duration must be at least one second")]
    ZeroDuration,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExamConfig {
    pub duration_secs: u32,
    pub low_time_warning_secs: u32,
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            low_time_warning_secs: DEFAULT_LOW_TIME_WARNING_SECS,
        }
    }
}

impl ExamConfig {
    pub fn with_duration_mins(mut self, mins: u32) -> Self {
        self.duration_secs = mins.saturating_mul(60);
        self
    }

    pub fn options_per_question(&self) -> usize {
        OPTIONS_PER_QUESTION
    }

    pub fn duration_mins(&self) -> u32 {
        self.duration_secs / 60
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(())
    }
}

pub trait ConfigStore {
    fn load(&self) -> ExamConfig;
    fn save(&self, cfg: &ExamConfig) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "examsim") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("examsim_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> ExamConfig {
        let Ok(bytes) = fs::read(&self.path) else {
            return ExamConfig::default();
        };
        match serde_json::from_slice::<ExamConfig>(&bytes) {
            Ok(cfg) if cfg.validate().is_ok() => cfg,
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "ignoring invalid config file");
                ExamConfig::default()
            }
        }
    }

    fn save(&self, cfg: &ExamConfig) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = ExamConfig::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = ExamConfig::default().with_duration_mins(45);
        store.save(&cfg).unwrap();
        assert_eq!(store.load().duration_secs, 45 * 60);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), ExamConfig::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"duration_secs": 600}"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.duration_secs, 600);
        assert_eq!(cfg.low_time_warning_secs, DEFAULT_LOW_TIME_WARNING_SECS);
    }

    #[test]
    fn invalid_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"duration_secs": 0}"#).unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), ExamConfig::default());

        fs::write(&path, "garbage").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), ExamConfig::default());
    }

    #[test]
    fn default_exam_is_150_minutes_with_five_options() {
        let cfg = ExamConfig::default();
        assert_eq!(cfg.duration_secs, 9000);
        assert_eq!(cfg.duration_mins(), 150);
        assert_eq!(cfg.options_per_question(), 5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_duration_rejected() {
        let cfg = ExamConfig::default().with_duration_mins(0);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroDuration));
    }
}
