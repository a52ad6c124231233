use std::sync::Arc;

use clap::Parser;
use tokio::sync::Notify;

use wado_server::{logger, server, AppState, Config, Overrides, StartupError};

/// Serve a DICOMweb study tree from a local directory
#[derive(Debug, Parser)]
#[command(name = "wado-server", version, about)]
struct Cli {
    /// Configuration file, without extension
    #[arg(short, long, default_value = "config")]
    config: String,

    /// Listen host
    #[arg(long)]
    host: Option<String>,

    /// Listen port
    #[arg(short = 'p', long = "port", alias = "httpPort")]
    port: Option<u16>,

    /// Directory request paths are resolved against
    #[arg(short, long)]
    root: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let overrides = Overrides {
        host: cli.host,
        port: cli.port,
        root_dir: cli.root,
    };
    let cfg = Config::load_from(&cli.config, &overrides).map_err(StartupError::Config)?;

    logger::init(&cfg.logging)?;

    // One thread accepts and serves; tokio::fs moves disk reads off it
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_listener(addr)?;

    logger::log_server_start(&addr, &cfg);
    if !cfg.storage.root_dir.is_dir() {
        logger::log_warning(&format!(
            "Root directory {} is not accessible, every request will be answered with 404",
            cfg.storage.root_dir.display()
        ));
    }

    let state = Arc::new(AppState::new(cfg));
    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));

    let local = tokio::task::LocalSet::new();
    local.run_until(server::run(listener, state, shutdown)).await;
    Ok(())
}
