//! Instrumented Call-Chain Demo Service
//!
//! A small Axum service used to teach observability instrumentation.
//!
//! # Architecture Overview
//!
//! ```text
//!     GET /store
//!     ───────────▶ http::server (record count + latency)
//!                      │
//!                      ▼
//!                  chain::engine   foo ─▶ goo ─▶ zoo
//!                      │            │      │      │
//!                      │            └──────┴──────┴─▶ nested trace spans
//!                      │                              log records
//!                      │                              call-count gauge
//!                      ▼
//!     200 JSON ◀── { stores, operation }
//!
//!     Cross-cutting:
//!       observability::logging  → stdout + logs/<file> + OTLP span export
//!       observability::metrics  → Prometheus recorder, rendered at /metrics
//! ```
//!
//! Every 5th invocation of the middle operation fails deterministically;
//! the failure is absorbed inside the chain and surfaced only as a
//! descriptive result string, never as an HTTP error.

use std::path::Path;

use tokio::net::TcpListener;
use tokio::sync::broadcast;

use sre_demo::config::{load_config, AppConfig};
use sre_demo::http::HttpServer;
use sre_demo::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration (defaults unless APP_CONFIG points at a file)
    let config = match std::env::var("APP_CONFIG") {
        Ok(path) => load_config(Path::new(&path))?,
        Err(_) => AppConfig::default(),
    };

    // Initialize logging + trace export; the guard must outlive the server
    // or buffered file logs are lost.
    let telemetry = logging::init_telemetry(&config)?;

    tracing::info!(
        bind_address = %config.server.bind_address,
        failure_modulus = config.chain.failure_modulus,
        max_delay_secs = config.chain.max_delay_secs,
        otlp_enabled = config.telemetry.enabled,
        "Configuration loaded"
    );

    // Install the Prometheus recorder; the handle renders /metrics.
    let metrics_handle = metrics::install_recorder()?;

    // Bind TCP listener
    let listener = TcpListener::bind(&config.server.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // The sender stays alive for the process lifetime; the server also
    // honors Ctrl+C directly.
    let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let server = HttpServer::new(config, metrics_handle);
    server.run(listener, shutdown_rx).await?;

    telemetry.shutdown();
    tracing::info!("Shutdown complete");
    Ok(())
}
