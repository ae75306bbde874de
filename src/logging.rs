//! Log file setup
//!
//! The terminal belongs to the UI, so log output goes to a file.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

/// File name used inside the cache directory
pub const LOG_FILE_NAME: &str = "dinecache.log";

/// Opens `path` for appending, creating parent directories as needed
pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs a global subscriber writing to `path`
///
/// Logging is best-effort: returns `false` if the file cannot be opened or
/// a subscriber is already installed.
pub fn init(path: &Path, level: Level) -> bool {
    let file = match open_log_file(path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok()
}
