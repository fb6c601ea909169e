//! Filter diagnostics HTTP server binary
//!
//! This is the main entry point for the REST API server.
//! It loads the configuration, initializes the ephemeris, sets up the HTTP
//! router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin ndfilter-server
//! ```
//!
//! # Environment Variables
//!
//! - `NDFILTER_CONFIG`: Path to the TOML config (default: search for `ndfilter.toml`)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ndfilter_diag::config::AppConfig;
use ndfilter_diag::ephemeris;
use ndfilter_diag::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting ND filter diagnostics server");

    let config = AppConfig::from_default_location()?.with_env_overrides()?;

    // Initialize the global ephemeris once and reuse it across the app
    ephemeris::init_ephemeris(config.atmosphere.model())?;
    let ephemeris = Arc::clone(ephemeris::get_ephemeris()?);
    info!("Ephemeris initialized ({:?})", config.atmosphere.model());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Create application state and router
    let state = AppState::new(ephemeris, config);
    let app = create_router(state);

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
