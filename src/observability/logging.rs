//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber stack
//! - Mirror log records to stdout and an append-only file
//! - Bridge spans to the OTLP exporter when telemetry is enabled
//!
//! # Design Decisions
//! - File writer is non-blocking; the returned guard must live for the
//!   process lifetime or buffered records are lost
//! - A failed telemetry init downgrades to local-only logging with a
//!   warning instead of aborting startup

use std::fs;
use std::path::Path;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AppConfig;
use crate::observability::tracing::init_tracer_provider;
use crate::observability::ObservabilityError;

/// Handles that must be held for the lifetime of the process.
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
    _file_guard: WorkerGuard,
}

impl TelemetryGuard {
    /// Flush and shut down the span exporter (best effort).
    pub fn shutdown(&self) {
        if let Some(provider) = &self.provider {
            if let Err(e) = provider.shutdown() {
                eprintln!("tracer provider shutdown failed: {e}");
            }
        }
    }
}

/// Initialize the full logging + trace export stack.
pub fn init_telemetry(config: &AppConfig) -> Result<TelemetryGuard, ObservabilityError> {
    ensure_log_dir(&config.logging.dir);

    let file_appender =
        tracing_appender::rolling::never(&config.logging.dir, &config.logging.file);
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    let stdout_layer = tracing_subscriber::fmt::layer().compact();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let mut provider = None;
    let otel_layer = if config.telemetry.enabled {
        match init_tracer_provider(&config.telemetry) {
            Ok(p) => {
                let tracer = p.tracer(config.telemetry.service_name.clone());
                provider = Some(p);
                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            }
            Err(e) => {
                // Subscriber not up yet, so this goes straight to stderr.
                eprintln!("telemetry init failed, continuing with local logging only: {e}");
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .with(otel_layer)
        .try_init()?;

    Ok(TelemetryGuard {
        provider,
        _file_guard: file_guard,
    })
}

/// Create the log directory if it does not exist yet.
fn ensure_log_dir(dir: &str) {
    let path = Path::new(dir);
    if !path.exists() {
        if let Err(e) = fs::create_dir_all(path) {
            eprintln!("failed to create log directory {dir}: {e}");
        }
    }
}
