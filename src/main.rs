use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use gateway_router::config::{load_config, GatewayConfig};
use gateway_router::lifecycle::{signals, Shutdown};
use gateway_router::observability::{logging, metrics};
use gateway_router::GatewayRouter;

#[derive(Parser)]
#[command(name = "gateway-router")]
#[command(about = "Prefix-routing HTTP reverse proxy", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in routes are used when omitted.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address, a literal `ip:port` (e.g. 127.0.0.1:3000).
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gateway-router starting");
    tracing::info!(
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let bind_address = config.listener.bind_address.clone();
    let gateway = GatewayRouter::new(config)?;

    let listener = TcpListener::bind(&bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    gateway.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
