//! Access log format module
//!
//! Supports three layouts:
//! - `simple` (fixed-width `METHOD PATH DURATION` columns)
//! - `common` (Common Log Format - CLF)
//! - `json` (JSON structured logging)

use crate::config::AccessLogFormat;
use chrono::Local;
use std::net::SocketAddr;
use std::time::Duration;

/// Access log entry containing all request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client address, when the connection layer recorded one
    pub remote_addr: Option<SocketAddr>,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request URI path
    pub path: String,
    /// HTTP version as sent on the request line (`HTTP/1.1`)
    pub version: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes, if known up front
    pub body_bytes: Option<u64>,
    /// Time spent in the inner handler
    pub duration: Duration,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(method: String, path: String) -> Self {
        Self {
            remote_addr: None,
            time: Local::now(),
            method,
            path,
            version: "HTTP/1.1".to_string(),
            status: 200,
            body_bytes: None,
            duration: Duration::ZERO,
        }
    }

    /// Format the log entry according to the configured layout
    pub fn format(&self, format: AccessLogFormat) -> String {
        match format {
            AccessLogFormat::Simple => self.format_simple(),
            AccessLogFormat::Common => self.format_common(),
            AccessLogFormat::Json => self.format_json(),
        }
    }

    fn format_simple(&self) -> String {
        format!("{:<6} {:<20} {:?}", self.method, self.path, self.duration)
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} {}\" {} {}",
            self.remote_ip(),
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.path,
            self.version,
            self.status,
            self.body_bytes
                .map_or_else(|| "-".to_string(), |b| b.to_string()),
        )
    }

    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr.map(|a| a.ip().to_string()),
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "http_version": self.version,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "duration_us": u64::try_from(self.duration.as_micros()).unwrap_or(u64::MAX),
        })
        .to_string()
    }

    fn remote_ip(&self) -> String {
        self.remote_addr
            .map_or_else(|| "-".to_string(), |a| a.ip().to_string())
    }
}
