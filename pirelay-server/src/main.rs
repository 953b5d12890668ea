//! Pi Payment Relay Server
//!
//! Lets a Pi app frontend cancel or complete payments without ever
//! holding the Pi API secret.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::{ConfigLoader, get_api_key};
use pirelay_core::RelayConfig;
use pirelay_core::config::API_KEY_ENV;
use pirelay_sdk::client::PiClient;
use server::{build_router, run_server};
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Pi Payment Relay - server-side proxy for Pi payment cancel/complete
#[derive(Parser, Debug)]
#[command(name = "pirelay-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (optional; defaults apply if absent)
    #[arg(short, long, default_value = "./pirelay-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long, env = "PIRELAY_LISTEN")]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    tracing::info!("Starting pirelay-server v{}", env!("CARGO_PKG_VERSION"));

    let loaded_config = ConfigLoader::new(&args.config, args.listen)
        .load()
        .map_err(|e| {
            tracing::error!("Failed to load configuration: {}", e);
            e
        })?;

    let relay_config = RelayConfig::new(get_api_key());
    if relay_config.api_key.is_none() {
        // Not fatal: every relay call answers 500 until the key is provisioned.
        tracing::warn!("{} is not set, payment actions will be rejected", API_KEY_ENV);
    }

    let mut http = reqwest::Client::builder();
    if let Some(timeout) = loaded_config.upstream.timeout {
        http = http.timeout(timeout);
    }
    let http = http.build().map_err(|e| {
        tracing::error!("Failed to build HTTP client: {}", e);
        e
    })?;

    tracing::info!(
        base_url = %loaded_config.upstream.base_url,
        timeout = ?loaded_config.upstream.timeout,
        "Pi API client configured"
    );
    let client = PiClient::new(loaded_config.upstream.base_url).with_http_client(http);

    let router = build_router(AppState::new(relay_config, client));

    let listen_addr = loaded_config.server.listen;
    tracing::info!("Starting HTTP server on {}", listen_addr);
    run_server(router, listen_addr).await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
