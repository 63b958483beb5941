//! Request log record module
//!
//! One record per completed request, classified by outcome severity.

use chrono::{DateTime, Local};
use std::fmt;

/// Log severity derived from the response status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
    Debug,
}

impl Severity {
    /// Classify a status code: successful outcomes (including redirects
    /// and cache hits) are INFO, missing resources WARN, server-side
    /// failures ERROR, everything else DEBUG.
    pub const fn from_status(status: u16) -> Self {
        match status {
            200 | 302 | 304 => Self::Info,
            404 => Self::Warn,
            500..=599 => Self::Error,
            _ => Self::Debug,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Debug => "DEBUG",
        };
        f.write_str(label)
    }
}

/// A completed request, timestamped at creation
#[derive(Debug, Clone)]
pub struct RequestLogRecord {
    pub timestamp: DateTime<Local>,
    pub method: String,
    pub path: String,
    pub status: u16,
    pub severity: Severity,
    pub extra: String,
}

impl RequestLogRecord {
    /// Create a record for a handled request; `extra` carries
    /// handler-specific detail such as the body size.
    pub fn new(method: String, path: String, status: u16, extra: String) -> Self {
        Self {
            timestamp: Local::now(),
            severity: Severity::from_status(status),
            method,
            path,
            status,
            extra,
        }
    }

    /// Format as a single log line:
    /// `[<timestamp>] <SEVERITY> <METHOD> <path> <status> <extra>`
    pub fn format_line(&self) -> String {
        format!(
            "[{}] {} {} {} {} {}",
            self.timestamp.format("%Y-%m-%dT%H:%M:%S"),
            self.severity,
            self.method,
            self.path,
            self.status,
            self.extra,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        assert_eq!(Severity::from_status(200), Severity::Info);
        assert_eq!(Severity::from_status(302), Severity::Info);
        assert_eq!(Severity::from_status(304), Severity::Info);
        assert_eq!(Severity::from_status(404), Severity::Warn);
        assert_eq!(Severity::from_status(500), Severity::Error);
        assert_eq!(Severity::from_status(503), Severity::Error);
        assert_eq!(Severity::from_status(206), Severity::Debug);
        assert_eq!(Severity::from_status(301), Severity::Debug);
    }

    #[test]
    fn test_format_line() {
        let record = RequestLogRecord::new(
            "GET".to_string(),
            "/api/config".to_string(),
            200,
            "312 bytes".to_string(),
        );
        let line = record.format_line();
        assert!(line.starts_with('['));
        assert!(line.contains("INFO GET /api/config 200 312 bytes"));
    }

    #[test]
    fn test_error_line() {
        let record = RequestLogRecord::new(
            "GET".to_string(),
            "/bing-wallpaper".to_string(),
            500,
            "-".to_string(),
        );
        assert_eq!(record.severity, Severity::Error);
        assert!(record.format_line().contains("ERROR GET /bing-wallpaper 500"));
    }
}
