//! Logger module
//!
//! Logging utilities for the HomeDock server:
//! - one classified line per completed request
//! - suppression of noisy static-asset paths
//! - server lifecycle and error logging
//! - optional file targets for the access and error streams

mod record;
pub mod writer;

pub use record::{RequestLogRecord, Severity};

use crate::config::Config;
use std::net::SocketAddr;

/// Request paths ending in these extensions are suppressed from the
/// access log to keep asset-heavy page loads readable.
const QUIET_EXTENSIONS: &[&str] = &[".css", ".js", ".ico", ".png", ".jpg", ".svg"];

/// Initialize the logger with configuration.
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to the access stream
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to the error stream
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Whether a request path is suppressed from the access log
pub fn is_quiet_path(path: &str) -> bool {
    QUIET_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Log one completed request.
///
/// Error-severity outcomes go to the error stream; everything else to
/// the access stream. Quiet asset paths are skipped entirely.
pub fn log_request(record: &RequestLogRecord) {
    if is_quiet_path(&record.path) {
        return;
    }
    let line = record.format_line();
    match record.severity {
        Severity::Error => write_error(&line),
        _ => write_access(&line),
    }
}

pub fn log_info(message: &str) {
    write_access(message);
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

/// Log the compression outcome of a gzip-encoded asset
pub fn log_compression(path: &str, original: usize, compressed: usize, saved_percent: f64) {
    write_access(&format!(
        "[gzip] {path}: {original} -> {compressed} bytes ({saved_percent:.1}% smaller)"
    ));
}

/// Log the wallpaper entry chosen for a redirect
pub fn log_wallpaper_selected(title: &str) {
    write_access(&format!("[wallpaper] Selected: {title}"));
}

pub fn log_server_start(addr: &SocketAddr, tls: bool, config: &Config) {
    let protocol = if tls { "https" } else { "http" };
    write_access("======================================");
    write_access("HomeDock server started successfully");
    write_access(&format!("Listening on: {protocol}://{addr}"));
    write_access(&format!("Serving files from: {}", config.static_files.root));
    write_access(&format!("Config store: {}", config.store.data_dir));
    if let Some(workers) = config.server.workers {
        write_access(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_access(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_access(&format!("Error log: {path}"));
    }
    write_access("======================================\n");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}
