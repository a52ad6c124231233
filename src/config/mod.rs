// Configuration module entry point
// Loads the immutable process configuration and the state shared with handlers

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::StartupError;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, Overrides, PerformanceConfig, ServerConfig, StorageConfig,
};

/// Prefix for environment overrides, e.g. `WADO_SERVER__PORT=6000`
const ENV_PREFIX: &str = "WADO";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Missing file is fine: defaults, environment and overrides still apply
    pub fn load_from(config_path: &str, overrides: &Overrides) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("storage.root_dir", "/microscopy")?
            .set_default("storage.reject_traversal", false)?
            .set_default("http.content_type", "text/html")?
            .set_default("http.server_name", "wado-server")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.header_read_timeout", 30)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("server.host", overrides.host.clone())?
            .set_override_option("server.port", overrides.port.map(i64::from))?
            .set_override_option("storage.root_dir", overrides.root_dir.clone())?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, StartupError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| StartupError::InvalidAddress { addr, source })
    }
}
