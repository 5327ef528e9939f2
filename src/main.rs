//! Courtside interaction webhook service.
//!
//! Main entry point: initializes tracing, loads configuration, wires the
//! roster cache and forwarder, and serves the HTTP API until shutdown.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use courtside_api::{verify::parse_public_key, AppState, Config, Forwarder};
use courtside_core::RealClock;
use courtside_roster::{RosterCache, SportsClient};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("Starting Courtside interaction service");

    let config = Config::load()?;
    info!(
        host = %config.host,
        port = config.port,
        sports_api = %config.sports_api_base_url,
        sports_api_key = %config.sports_api_key_masked(),
        roster_ttl_hours = config.roster_ttl_hours,
        "Configuration loaded"
    );

    let verifying_key = if config.public_key.is_empty() {
        warn!("PUBLIC_KEY not configured; every interaction request will be rejected");
        None
    } else {
        Some(parse_public_key(&config.public_key).context("Invalid PUBLIC_KEY")?)
    };

    if config.forward_url.is_empty() {
        warn!("FORWARD_URL not configured; command payloads will be acknowledged and dropped");
    }

    let client =
        SportsClient::new(config.to_client_config()).context("Failed to build sports client")?;
    let roster = Arc::new(RosterCache::new(client, Arc::new(RealClock::new()), config.roster_ttl()));

    let forwarder =
        Arc::new(Forwarder::new(config.to_forward_config()).context("Failed to build forwarder")?);

    let state = AppState { verifying_key, roster, forwarder };

    let addr = config.parse_server_addr()?;
    info!(addr = %addr, "Courtside is ready to receive interactions");

    courtside_api::start_server(state, addr, Duration::from_secs(config.request_timeout))
        .await
        .context("Server failed")?;

    info!("Courtside shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,courtside=debug,tower_http=debug"))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
