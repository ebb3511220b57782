// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub static_page: StaticPageConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    pub keep_alive: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub access_log: bool,
    /// Access log format (simple, common or json)
    pub access_log_format: AccessLogFormat,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Minimum severity written to the logs
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
        })
    }
}

/// Access log line layout
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccessLogFormat {
    /// `METHOD PATH DURATION` in fixed-width columns
    Simple,
    /// Common Log Format (CLF)
    Common,
    /// One JSON object per line
    Json,
}

/// Index page configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StaticPageConfig {
    /// File served at `/`, resolved against the working directory
    pub index_file: String,
}

/// Latency probe configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProbeConfig {
    /// Reported as `server_location`; omitted from responses when unset or empty
    #[serde(default)]
    pub server_location: Option<String>,
}
