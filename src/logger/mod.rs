//! Logger module
//!
//! Thin facade over `tracing` so call sites stay one line:
//! - Server lifecycle logging
//! - Per-request and not-found logging
//! - Access logging with multiple formats
//! - Error and warning logging

mod format;
mod writer;

pub use format::AccessLogEntry;

use crate::config::{Config, LoggingConfig};
use crate::error::{ResourceError, StartupError};
use hyper::Uri;
use std::net::SocketAddr;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber
///
/// `RUST_LOG` takes precedence over `logging.level`. Calling this again once
/// a subscriber is installed is an error.
pub fn init(config: &LoggingConfig) -> Result<(), StartupError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| StartupError::Logger(format!("invalid level '{}': {e}", config.level)))?;

    let (make_writer, ansi) = writer::make_writer(config.log_file.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(make_writer)
        .try_init()
        .map_err(|e| StartupError::Logger(e.to_string()))
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("======================================");
    tracing::info!("Server is running on http://{addr}");
    tracing::info!("Serving files from: {}", config.storage.root_dir.display());
    tracing::info!("Log level: {}", config.logging.level);
    if let Some(ref path) = config.logging.log_file {
        tracing::info!("Log file: {path}");
    }
    if let Some(max) = config.performance.max_connections {
        tracing::info!("Max connections: {max}");
    }
    if config.storage.reject_traversal {
        tracing::info!("Paths with '..' segments are rejected");
    }
    tracing::info!("======================================");
}

pub fn log_server_stopped() {
    tracing::info!("Server stopped accepting connections");
}

pub fn log_request(uri: &Uri, accept: Option<&str>) {
    tracing::info!(
        target: "wado_server::request",
        "Request url is {uri} for accept {}",
        accept.unwrap_or("-")
    );
}

pub fn log_resource_served(path: &Path, size: usize) {
    tracing::debug!("Served {} ({size} bytes)", path.display());
}

pub fn log_not_found(path: &str, err: &ResourceError) {
    tracing::warn!("File not found {path}: {err}");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: "wado_server::access", "{}", entry.format(format));
}
