//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! chain + http produce:
//!     → logging.rs (tracing subscriber: stdout, file, OTLP bridge)
//!     → metrics.rs (counter, histogram, gauge)
//!     → tracing.rs (OTLP tracer provider, batch export)
//!
//! Consumers:
//!     → Log file + stdout
//!     → Metrics endpoint (Prometheus scrape of /metrics)
//!     → OTLP collector (spans with log events attached)
//! ```
//!
//! # Design Decisions
//! - Metrics are cheap (recorder handles atomic updates)
//! - Span export is batched and best-effort; an unreachable collector
//!   degrades silently and never touches the request path
//! - Log records ride the span pipeline as events, which keeps them
//!   correlated with the active span

pub mod logging;
pub mod metrics;
pub mod tracing;

use thiserror::Error;

pub use logging::{init_telemetry, TelemetryGuard};

/// Errors raised while bringing up the telemetry stack.
#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("failed to build OTLP span exporter: {0}")]
    Exporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("failed to initialize tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}
