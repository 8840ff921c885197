//! Simple file-based logging for debugging
//!
//! Nothing is written until [`init`] has been called; the widgets log freely
//! and the host decides whether anyone is listening. Browser builds have no
//! file system and mirror messages to the devtools console instead.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

static LOG_FILE: Mutex<Option<File>> = parking_lot::const_mutex(None);

#[cfg(feature = "web")]
static CONSOLE: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Default log location: next to the executable, or the working directory
pub fn default_log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vitrine.log")
}

/// Initialize logging to the given file (truncated on open)
pub fn init(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    *LOG_FILE.lock() = Some(file);
    log("=== Vitrine Log Started ===");
    Ok(())
}

/// Initialize logging at [`default_log_path`], returning where it went
pub fn init_default() -> std::io::Result<PathBuf> {
    let path = default_log_path();
    init(&path)?;
    Ok(path)
}

/// Send every message to the browser console
#[cfg(feature = "web")]
pub fn init_console() {
    CONSOLE.store(true, std::sync::atomic::Ordering::Relaxed);
    log("=== Vitrine Log Started ===");
}

/// Stop logging and close the file
pub fn shutdown() {
    *LOG_FILE.lock() = None;
    #[cfg(feature = "web")]
    CONSOLE.store(false, std::sync::atomic::Ordering::Relaxed);
}

/// Whether a log file is currently open
pub fn is_enabled() -> bool {
    LOG_FILE.lock().is_some()
}

fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S%.3f").to_string()
}

/// Log a message to the file
pub fn log(msg: &str) {
    #[cfg(feature = "web")]
    if CONSOLE.load(std::sync::atomic::Ordering::Relaxed) {
        web_sys::console::log_1(&format!("[vitrine] {}", msg).into());
    }

    let mut guard = LOG_FILE.lock();
    if let Some(ref mut file) = *guard {
        let _ = writeln!(file, "[{}] {}", timestamp(), msg);
        let _ = file.flush();
    }
}

/// Log a formatted message
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::log::log(&format!($($arg)*))
    };
}

/// Log with function context
#[macro_export]
macro_rules! log_fn {
    ($fn_name:expr) => {
        $crate::log::log(&format!("-> {}", $fn_name))
    };
    ($fn_name:expr, $($arg:tt)*) => {
        $crate::log::log(&format!("-> {}: {}", $fn_name, format!($($arg)*)))
    };
}
