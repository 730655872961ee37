//! OTLP trace export.
//!
//! # Responsibilities
//! - Build the OTLP gRPC span exporter and batch processor
//! - Attach the service resource attributes
//! - Register the provider globally for the tracing bridge

use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;

use crate::config::TelemetryConfig;
use crate::observability::ObservabilityError;

/// Build and globally register an OTLP tracer provider.
///
/// The exporter connects lazily; an unreachable collector surfaces as
/// dropped batches, never as an error on the request path.
pub fn init_tracer_provider(
    config: &TelemetryConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Standard env var wins over the config file.
    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| config.otlp_endpoint.clone());

    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let resource = Resource::builder()
        .with_attribute(KeyValue::new("service.name", config.service_name.clone()))
        .with_attribute(KeyValue::new("service.version", env!("CARGO_PKG_VERSION")))
        .build();

    let provider = SdkTracerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());
    Ok(provider)
}
