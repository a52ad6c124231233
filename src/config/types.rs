// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Listen address
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where resources are read from
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Root directory every request path is appended to
    pub root_dir: PathBuf,
    /// Answer 404 for any path containing a `..` segment
    #[serde(default)]
    pub reject_traversal: bool,
}

/// Response headers
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Content-Type sent with every successful response
    pub content_type: String,
    pub server_name: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
    /// Log file path (optional, stdout if not set)
    #[serde(default)]
    pub log_file: Option<String>,
}

/// Connection handling limits
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Time allowed for a client to send a complete request head, in seconds
    pub header_read_timeout: u64,
    #[serde(default)]
    pub max_connections: Option<u64>,
}

/// Values supplied on the command line, applied over file and environment
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub root_dir: Option<String>,
}
