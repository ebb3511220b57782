// Configuration module entry point
// Layers defaults, an optional TOML file and LATENCY_* environment variables

mod types;

use std::net::SocketAddr;

// Re-export public types
pub use types::{
    AccessLogFormat, Config, LogLevel, LoggingConfig, ProbeConfig, ServerConfig, StaticPageConfig,
};

/// Config file looked up when no path is given (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from the given file path (extension optional)
    ///
    /// A missing file is not an error; defaults and environment variables still apply.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_env(config_path, None)
    }

    /// Load configuration, reading `LATENCY_*` variables from `env`
    ///
    /// `None` reads the process environment.
    pub fn load_with_env(
        config_path: &str,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        Self::builder()?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("LATENCY")
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }

    /// Configuration made of the built-in defaults only
    pub fn defaults() -> Result<Self, config::ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError>
    {
        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.keep_alive", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "simple")?
            .set_default("static_page.index_file", "index.html")
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Configured server location, with empty strings treated as unset
    pub fn server_location(&self) -> Option<String> {
        self.probe
            .server_location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
    }
}
