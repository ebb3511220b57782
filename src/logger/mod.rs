//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support
//!
//! A [`Logger`] is built once at startup and handed to whatever needs it;
//! there is no global logger.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::{AccessLogFormat, Config, LogLevel, LoggingConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use writer::LogWriter;

/// Cloneable logging handle
#[derive(Clone)]
pub struct Logger {
    writer: Arc<LogWriter>,
    level: LogLevel,
    access_format: AccessLogFormat,
    access_log: bool,
}

impl Logger {
    /// Build a logger from the logging section, opening any configured files
    pub fn from_config(config: &LoggingConfig) -> std::io::Result<Self> {
        let writer = LogWriter::new(
            config.access_log_file.as_deref(),
            config.error_log_file.as_deref(),
        )?;
        Ok(Self {
            writer: Arc::new(writer),
            level: config.level,
            access_format: config.access_log_format,
            access_log: config.access_log,
        })
    }

    /// Logger recording into memory, returning the shared line buffer
    #[cfg(test)]
    pub fn capture() -> (Self, Arc<std::sync::Mutex<Vec<String>>>) {
        let lines = Arc::new(std::sync::Mutex::new(Vec::new()));
        let logger = Self {
            writer: Arc::new(LogWriter::memory(Arc::clone(&lines))),
            level: LogLevel::Info,
            access_format: AccessLogFormat::Simple,
            access_log: true,
        };
        (logger, lines)
    }

    #[cfg(test)]
    pub fn with_access_format(mut self, format: AccessLogFormat) -> Self {
        self.access_format = format;
        self
    }

    #[cfg(test)]
    pub fn with_access_log(mut self, enabled: bool) -> Self {
        self.access_log = enabled;
        self
    }

    #[cfg(test)]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn info(&self, message: &str) {
        if self.level >= LogLevel::Info {
            self.writer.write_access(message);
        }
    }

    pub fn warn(&self, message: &str) {
        if self.level >= LogLevel::Warn {
            self.writer.write_error(&format!("[WARN] {message}"));
        }
    }

    pub fn error(&self, message: &str) {
        self.writer.write_error(&format!("[ERROR] {message}"));
    }

    /// Unrecoverable startup failure; the caller exits afterwards
    pub fn fatal(&self, message: &str) {
        self.writer.write_error(&format!("[FATAL] {message}"));
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.access_log
    }

    /// Write formatted access log entry
    pub fn access(&self, entry: &AccessLogEntry) {
        if self.access_log {
            self.writer.write_access(&entry.format(self.access_format));
        }
    }

    pub fn log_server_start(&self, addr: &SocketAddr, config: &Config) {
        let port = addr.port();
        self.info("======================================");
        self.info(&format!("Latency server starting on {addr}"));
        self.info("Endpoints:");
        self.info(&format!("   - http://localhost:{port}/              (Web UI)"));
        self.info(&format!("   - http://localhost:{port}/ping-latency  (API)"));
        self.info(&format!("   - http://localhost:{port}/health        (Health Check)"));
        self.info(&format!("Log level: {}", config.logging.level));
        self.info(&format!("Index file: {}", config.static_page.index_file));
        if let Some(location) = config.server_location() {
            self.info(&format!("Server location: {location}"));
        }
        if let Some(workers) = config.server.workers {
            self.info(&format!("Worker threads: {workers}"));
        }
        if let Some(ref path) = config.logging.access_log_file {
            self.info(&format!("Access log: {path}"));
        }
        if let Some(ref path) = config.logging.error_log_file {
            self.info(&format!("Error log: {path}"));
        }
        self.info("======================================");
    }

    pub fn log_connection_error(&self, err: &impl std::fmt::Debug) {
        self.error(&format!("Failed to serve connection: {err:?}"));
    }

    pub fn log_bind_failed(&self, addr: &SocketAddr, err: &std::io::Error) {
        self.fatal(&format!("Server failed to start on {addr}: {err}"));
    }

    pub fn log_shutdown(&self) {
        self.info("Shutdown signal received, no longer accepting connections");
    }
}
