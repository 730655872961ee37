//! Instrumented Call-Chain Demo Service Library

pub mod chain;
pub mod config;
pub mod http;
pub mod observability;

pub use chain::{ChainEngine, ChainOutcome};
pub use config::AppConfig;
pub use http::HttpServer;
