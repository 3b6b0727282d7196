use std::fs::{self, OpenOptions};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{self, LoggingSettings};

/// Send `tracing` output to the log file. The terminal belongs to the UI,
/// so nothing is ever written to stdout or stderr from here on.
///
/// Returns the file in use, or `None` when logging is disabled.
pub fn init_logging(settings: &LoggingSettings) -> Result<Option<PathBuf>, Box<dyn Error + Send + Sync>> {
    if !settings.enabled {
        return Ok(None);
    }
    let Some(path) = settings.file.clone().or_else(config::default_log_path) else {
        return Ok(None);
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    // RUST_LOG wins over the configured level.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()?;

    Ok(Some(path))
}
