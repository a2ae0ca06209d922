//! File-backed tracing. The terminal belongs to the TUI, so log lines go to
//! a file and only when `EXAMSIM_LOG` asks for them.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::app_dirs::AppDirs;

pub const LOG_ENV: &str = "EXAMSIM_LOG";

/// Installs the global subscriber if `EXAMSIM_LOG` is set, e.g.
/// `EXAMSIM_LOG=examsim=debug`. Returns the log file path when enabled.
pub fn init() -> io::Result<Option<PathBuf>> {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return Ok(None);
    };
    let Some(path) = AppDirs::log_path() else {
        return Ok(None);
    };
    init_with(filter, &path)?;
    Ok(Some(path))
}

pub fn init_with(filter: EnvFilter, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    // a second init (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
