use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use once_cell::sync::Lazy;
use chrono::Local;

use crate::query::QueryParams;

static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

/// Initialize logging to a file
pub fn init() -> std::io::Result<PathBuf> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let log_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rmselect")
        .join("logs");

    std::fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join(format!("rmselect_{}.log", timestamp));

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)?;

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(file);
    }

    log("=== rmselect started ===");

    Ok(log_path)
}

/// Log a message with timestamp. No-op until `init` succeeds.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
    }
}

/// Log an outgoing GET request
pub fn log_request(path: &str, query: &QueryParams) {
    let pairs: Vec<String> = query
        .pairs()
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    log(&format!("--> GET {}?{}", path, pairs.join("&")));
}

/// Log a response body (truncated for readability)
pub fn log_response(path: &str, body: &str) {
    let display = if body.len() > 500 {
        let mut end = 500;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... ({} bytes total)", &body[..end], body.len())
    } else {
        body.to_string()
    };
    log(&format!("<-- {} {}", path, display));
}

/// Log an event
pub fn log_event(event: &str) {
    log(&format!("[EVENT] {}", event));
}

/// Route panics into the log file before the default hook runs.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log(&format!("[PANIC] {}", info));
        default_hook(info);
    }));
}
