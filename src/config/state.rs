// Application state module
// Everything handlers share; built once at startup and never mutated

use std::sync::atomic::AtomicUsize;

use super::types::Config;
use crate::handler::StaticFileResponder;

/// Application state
pub struct AppState {
    pub config: Config,
    pub responder: StaticFileResponder,
    /// Connections currently being served
    pub active_connections: AtomicUsize,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let responder = StaticFileResponder::new(&config.storage, &config.http);
        Self {
            config,
            responder,
            active_connections: AtomicUsize::new(0),
        }
    }
}
