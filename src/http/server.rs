//! HTTP server setup and request handlers.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (request tracing, panic recovery)
//! - Record request count and latency metrics around the call chain
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::chain::ChainEngine;
use crate::config::AppConfig;
use crate::http::store::{catalog, Store};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ChainEngine>,
    pub stores: Arc<Vec<Store>>,
    pub metrics: PrometheusHandle,
}

/// Payload returned by the monitored endpoint.
#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub stores: Vec<Store>,
    pub operation: String,
}

/// HTTP server for the demo service.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig, metrics_handle: PrometheusHandle) -> Self {
        let state = AppState {
            engine: Arc::new(ChainEngine::new(config.chain.clone())),
            stores: Arc::new(catalog()),
            metrics: metrics_handle,
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(hello_handler))
            .route("/store", get(store_handler))
            .route("/metrics", get(metrics_handler))
            .with_state(state)
            // A panicking handler answers 500 instead of killing the server.
            .layer(CatchPanicLayer::new())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Static greeting.
async fn hello_handler() -> &'static str {
    "Hello, World!"
}

/// Monitored endpoint: runs the full call chain per request.
async fn store_handler(State(state): State<AppState>) -> Json<StoreResponse> {
    let start = Instant::now();
    metrics::increment_requests("GET", "/store");

    let operation = state.engine.foo().await;

    metrics::observe_request_latency("GET", "/store", start);

    Json(StoreResponse {
        stores: state.stores.as_ref().clone(),
        operation,
    })
}

/// Prometheus scrape endpoint.
async fn metrics_handler(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
        .into_response()
}

/// Wait for Ctrl+C or the shutdown broadcast.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
        _ = shutdown.recv() => {
            tracing::info!("Shutdown broadcast received");
        }
    }
}
