//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the demo
//! service. All types derive Serde traits for deserialization from config
//! files, and every section has a usable default.

use serde::{Deserialize, Serialize};

/// Root configuration for the demo service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings (bind address).
    pub server: ServerConfig,

    /// Call-chain engine settings.
    pub chain: ChainConfig,

    /// Local logging settings (stdout + file).
    pub logging: LoggingConfig,

    /// Trace export settings (OTLP collector).
    pub telemetry: TelemetryConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Call-chain engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Every Nth middle-operation call fails. Must be >= 1.
    pub failure_modulus: u64,

    /// Upper bound for the inner operation's random delay, in seconds.
    pub max_delay_secs: f64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            failure_modulus: 5,
            max_delay_secs: 5.0,
        }
    }
}

/// Local logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error).
    /// Overridden by RUST_LOG when set.
    pub level: String,

    /// Directory for the log file, created at startup.
    pub dir: String,

    /// Log file name inside `dir`.
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            dir: "logs".to_string(),
            file: "sre-demo.log".to_string(),
        }
    }
}

/// Trace export configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Enable OTLP span export. Logging still works when disabled.
    pub enabled: bool,

    /// OTLP gRPC collector endpoint.
    /// Overridden by OTEL_EXPORTER_OTLP_ENDPOINT when set.
    pub otlp_endpoint: String,

    /// Value of the `service.name` resource attribute.
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            otlp_endpoint: "http://127.0.0.1:4317".to_string(),
            service_name: "sre-demo-app".to_string(),
        }
    }
}
