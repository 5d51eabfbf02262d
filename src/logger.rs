use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

lazy_static::lazy_static! {
    static ref LOGGER: Mutex<Option<File>> = Mutex::new(None);
}

fn sink() -> MutexGuard<'static, Option<File>> {
    LOGGER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Opens the log file in append mode. The terminal is owned by the UI, so
/// nothing is ever written to stdout or stderr.
pub fn init(path: &Path) {
    let mut logger = sink();
    if logger.is_none()
        && let Ok(file) = OpenOptions::new().create(true).append(true).open(path)
    {
        *logger = Some(file);
    }
}

pub fn log(message: &str) {
    if let Some(logger) = sink().as_mut() {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let _ = writeln!(logger, "[{}] {}", timestamp, message);
    }
}
