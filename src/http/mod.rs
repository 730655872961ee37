//! HTTP endpoint layer.
//!
//! # Data Flow
//! ```text
//! GET /        → static greeting
//! GET /store   → count request → run call chain → observe latency
//!                → 200 { stores, operation }
//! GET /metrics → Prometheus text exposition of the recorder
//! ```

pub mod server;
pub mod store;

pub use server::{AppState, HttpServer};
pub use store::{Item, Store};
