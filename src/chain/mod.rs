//! Instrumented call-chain subsystem.
//!
//! # Data Flow
//! ```text
//! foo (outer span)
//!     → goo (child span, counter + failure injection)
//!         → zoo (child span, random delay)
//!
//! Every level emits:
//!     → one span, closed on every exit path
//!     → log records correlated with that span
//! goo additionally:
//!     → sets the call gauge under the counter lock
//!     → absorbs its injected failure into a tagged outcome
//! ```

pub mod engine;
pub mod outcome;

pub use engine::{ChainEngine, ChainError};
pub use outcome::ChainOutcome;
