//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → semantic checks (loader::validate)
//!     → AppConfig (immutable for the process lifetime)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the service runs with no config file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::{AppConfig, ChainConfig, LoggingConfig, ServerConfig, TelemetryConfig};
