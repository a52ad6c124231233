//! Error types
//!
//! `ResourceError` describes why a single request could not be served. Every
//! variant ends up as a 404 for the client; the variant is only kept so the
//! reason can be logged. `StartupError` covers everything that can stop the
//! process before the accept loop runs.

use std::io;
use std::net::{AddrParseError, SocketAddr};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to load a resource from the root directory
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("no such file: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("not a regular file: {}", path.display())]
    NotAFile { path: PathBuf },

    #[error("parent directory segment rejected: {}", path.display())]
    Traversal { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ResourceError {
    /// Classify an I/O error raised while touching `path`
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            io::ErrorKind::IsADirectory => Self::NotAFile { path },
            _ => Self::Io { path, source: err },
        }
    }

    /// Candidate path the failure refers to
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::PermissionDenied { path }
            | Self::NotAFile { path }
            | Self::Traversal { path }
            | Self::Io { path, .. } => path,
        }
    }
}

/// Fatal errors raised while starting the server
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("failed to initialize logging: {0}")]
    Logger(String),
}
