//! Metrics collection and exposition.
//!
//! # Metrics
//! - `http_requests_total` (counter): inbound requests by method, endpoint
//! - `http_request_duration_seconds` (histogram): latency distribution
//! - `goo_function_calls_total` (gauge): middle-operation invocations
//!
//! The recorder is installed once at startup; the handler behind
//! `/metrics` renders the handle in Prometheus text exposition format.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
pub const GOO_CALLS_TOTAL: &str = "goo_function_calls_total";

/// Install the in-process Prometheus recorder and describe the metrics.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(HTTP_REQUESTS_TOTAL, "Total HTTP Requests");
    describe_histogram!(HTTP_REQUEST_DURATION_SECONDS, "HTTP Request Latency");
    describe_gauge!(GOO_CALLS_TOTAL, "Total calls to the goo function");

    Ok(handle)
}

/// Count one inbound request for (method, endpoint).
pub fn increment_requests(method: &str, endpoint: &str) {
    counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string()
    )
    .increment(1);
}

/// Observe elapsed wall-clock seconds for (method, endpoint).
pub fn observe_request_latency(method: &str, endpoint: &str, start: Instant) {
    histogram!(
        HTTP_REQUEST_DURATION_SECONDS,
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Set the call gauge to the latest invocation-counter value.
pub fn set_goo_calls(total: u64) {
    gauge!(GOO_CALLS_TOTAL).set(total as f64);
}
