// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

#[cfg(unix)]
use std::future::Future;
#[cfg(unix)]
use std::io;
use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Start signal handlers (Unix only)
///
/// Spawns a background task that notifies `shutdown` once on SIGTERM or
/// SIGINT. If SIGTERM cannot be registered the failure is logged and SIGINT
/// alone triggers shutdown.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => Some(s),
            Err(e) => {
                logger::log_error(&format!("Failed to register SIGTERM handler: {e}"));
                None
            }
        };

        let terminate = sigterm.as_mut().map(|s| s.recv());
        if let Some(name) = wait_for_signal(terminate, tokio::signal::ctrl_c()).await {
            tracing::info!("[SIGNAL] {name} received, shutting down");
            shutdown.notify_one();
        }
    });
}

/// Wait for the first of SIGTERM and SIGINT and return its name.
///
/// A missing SIGTERM stream never completes. `None` means listening for
/// SIGINT failed.
#[cfg(unix)]
async fn wait_for_signal<T, I>(terminate: Option<T>, interrupt: I) -> Option<&'static str>
where
    T: Future<Output = Option<()>>,
    I: Future<Output = io::Result<()>>,
{
    let terminate = async {
        match terminate {
            Some(recv) => recv.await,
            None => std::future::pending().await,
        }
    };

    tokio::select! {
        _ = terminate => Some("SIGTERM"),
        result = interrupt => match result {
            Ok(()) => Some("SIGINT"),
            Err(e) => {
                logger::log_error(&format!("Failed to listen for SIGINT: {e}"));
                None
            }
        },
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            tracing::info!("[SIGNAL] Ctrl+C received, shutting down");
            shutdown.notify_one();
        }
    });
}
