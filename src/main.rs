//! segmux server.
//!
//! ```text
//!   config.toml ──▶ loader/validation ──▶ startup::build_mux ──▶ ServeMux (ArcSwap root)
//!                                                                   │
//!   Client ──▶ TcpListener ──▶ Axum (trace, timeout) ──▶ dispatch ──┘──▶ Endpoint / 404
//! ```
//!
//! Any configuration or route registration fault stops the process before the
//! listener is bound.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use segmux::config::{load_config, MuxConfig};
use segmux::http::HttpServer;
use segmux::lifecycle::{build_mux, shutdown, Shutdown};
use segmux::observability::init_logging;

#[derive(Parser)]
#[command(name = "segmux")]
#[command(about = "Serve a segment-trie route table", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => MuxConfig::default(),
    };

    init_logging(&config.observability);
    tracing::info!("segmux v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let mux = Arc::new(build_mux(&config)?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown::trigger_on_ctrl_c(shutdown.clone()));

    let server = HttpServer::new(config, mux);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
