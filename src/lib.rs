//! Static file server for DICOMweb study trees.
//!
//! Every request path is appended to a root directory and the file found
//! there is returned verbatim; anything that cannot be read is a 404.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use config::{AppState, Config, Overrides};
pub use error::{ResourceError, StartupError};
pub use handler::StaticFileResponder;
