//! UP/DOWN monitor service.
//!
//! ```text
//!  client ──▶ /api/graphite ──▶ Graphite helper (POST render request)
//!  client ──▶ /api/status   ──▶ datapoint API (GET) ──▶ classifier ──▶ UP | DOWN
//!  client ──▶ /health
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use updown_monitor::config::{load_config, MonitorConfig};
use updown_monitor::lifecycle::signals::forward_signals;
use updown_monitor::observability::{logging, metrics};
use updown_monitor::{MonitorServer, Shutdown};

#[derive(Parser)]
#[command(name = "updown-monitor")]
#[command(about = "Serve UP/DOWN status and proxy Graphite renders", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => MonitorConfig::default(),
    };

    logging::init_logging(&config.observability);

    tracing::info!("updown-monitor v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = ?args.config,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    tokio::spawn(forward_signals(shutdown.clone()));

    let server = MonitorServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
