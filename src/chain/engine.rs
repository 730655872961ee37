//! The three-level instrumented call chain.
//!
//! # Responsibilities
//! - `foo` (outer): wrap the chain in its own span
//! - `goo` (middle): count invocations, inject a failure on every Nth
//!   call, absorb it into a tagged outcome
//! - `zoo` (inner): sleep a random delay, the chain's only suspension
//!   point
//!
//! # Design Decisions
//! - The invocation counter lives on the engine, not in a global; the
//!   increment and the gauge update happen under one lock so the cadence
//!   and the gauge stay consistent under concurrent requests
//! - Parent spans are passed explicitly; child spans never rely on an
//!   ambient "current span"

use std::sync::Mutex;
use std::time::Duration;

use rand::Rng;
use thiserror::Error;
use tracing::{field, Instrument, Span};

use crate::chain::outcome::ChainOutcome;
use crate::config::ChainConfig;
use crate::observability::metrics;

/// Failure injected by the middle operation on every Nth call.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Exception raised in goo on call {call}")]
    InjectedFailure { call: u64 },
}

/// The instrumented call-chain engine.
pub struct ChainEngine {
    config: ChainConfig,
    /// Middle-operation invocation count. Lock covers the increment and
    /// the gauge update as one step.
    calls: Mutex<u64>,
}

impl ChainEngine {
    pub fn new(config: ChainConfig) -> Self {
        Self {
            config,
            calls: Mutex::new(0),
        }
    }

    /// Total middle-operation invocations since construction.
    pub fn calls(&self) -> u64 {
        *self.calls.lock().expect("call counter lock poisoned")
    }

    /// Outer operation. Always succeeds: the middle operation never
    /// raises past its boundary.
    pub async fn foo(&self) -> String {
        let span = tracing::info_span!("foo");
        let parent = span.clone();
        async move {
            let outcome = self.goo(&parent).await;
            match &outcome {
                ChainOutcome::Success(_) => tracing::info!("foo successfully called goo"),
                ChainOutcome::Failure(_) => tracing::warn!("foo observed an absorbed goo failure"),
            }
            format!("foo called -> {}", outcome.message())
        }
        .instrument(span)
        .await
    }

    /// Middle operation: counter bookkeeping and failure injection.
    async fn goo(&self, parent: &Span) -> ChainOutcome {
        let n = {
            let mut calls = self.calls.lock().expect("call counter lock poisoned");
            *calls += 1;
            metrics::set_goo_calls(*calls);
            *calls
        };

        let span = tracing::info_span!(
            parent: parent,
            "goo",
            call = n,
            otel.status_code = field::Empty,
            otel.status_message = field::Empty,
        );
        let zoo_parent = span.clone();
        async move {
            if n % self.config.failure_modulus == 0 {
                let err = ChainError::InjectedFailure { call: n };
                let message = err.to_string();
                let span = Span::current();
                span.record("otel.status_code", "ERROR");
                span.record("otel.status_message", message.as_str());
                tracing::error!(error = %err, "goo encountered an error");
                return ChainOutcome::Failure(format!("goo encountered an error: {message}"));
            }

            let inner = self.zoo(&zoo_parent).await;
            tracing::info!("goo successfully called zoo");
            ChainOutcome::Success(format!("goo called -> {inner}"))
        }
        .instrument(span)
        .await
    }

    /// Inner operation: random delay, then a descriptive result. The
    /// sleep suspends only the serving task.
    async fn zoo(&self, parent: &Span) -> String {
        let delay = rand::thread_rng().gen_range(0.0..=self.config.max_delay_secs);
        let span = tracing::info_span!(parent: parent, "zoo", delay);
        async move {
            tokio::time::sleep(Duration::from_secs_f64(delay)).await;
            tracing::info!(delay_secs = delay, "zoo executed");
            format!("zoo executed in {delay:.2} seconds")
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn instant_config() -> ChainConfig {
        ChainConfig {
            failure_modulus: 5,
            max_delay_secs: 0.0,
        }
    }

    #[tokio::test]
    async fn every_fifth_call_fails() {
        let engine = ChainEngine::new(instant_config());
        for call in 1..=10u64 {
            let result = engine.foo().await;
            if call % 5 == 0 {
                assert_eq!(
                    result,
                    format!(
                        "foo called -> goo encountered an error: \
                         Exception raised in goo on call {call}"
                    )
                );
            } else {
                assert_eq!(
                    result,
                    "foo called -> goo called -> zoo executed in 0.00 seconds"
                );
            }
        }
        assert_eq!(engine.calls(), 10);
    }

    #[tokio::test]
    async fn middle_outcome_is_tagged() {
        // Modulus 1 makes every call take the failure branch.
        let engine = ChainEngine::new(ChainConfig {
            failure_modulus: 1,
            max_delay_secs: 0.0,
        });
        let span = tracing::info_span!("test");
        let outcome = engine.goo(&span).await;
        assert!(outcome.is_failure());
        assert_eq!(
            outcome.message(),
            "goo encountered an error: Exception raised in goo on call 1"
        );
    }

    #[tokio::test]
    async fn counter_survives_concurrent_invocations() {
        let engine = Arc::new(ChainEngine::new(instant_config()));
        let mut handles = Vec::new();
        for _ in 0..32 {
            let engine = engine.clone();
            handles.push(tokio::spawn(async move { engine.foo().await }));
        }
        for handle in handles {
            handle.await.expect("chain task panicked");
        }
        assert_eq!(engine.calls(), 32, "no lost counter updates");
    }

    #[tokio::test]
    async fn failure_count_matches_cadence_under_concurrency() {
        let engine = Arc::new(ChainEngine::new(instant_config()));
        let mut handles = Vec::new();
        for _ in 0..20 {
            let engine = engine.clone();
            handles.push(tokio::spawn(async move { engine.foo().await }));
        }
        let mut failures = 0;
        for handle in handles {
            if handle.await.unwrap().contains("encountered an error") {
                failures += 1;
            }
        }
        // Cadence is a property of the counter, not of wall-clock order:
        // exactly 20 / 5 invocations hit a multiple of the modulus.
        assert_eq!(failures, 4);
    }

    #[tokio::test]
    async fn inner_delay_is_bounded() {
        let engine = ChainEngine::new(ChainConfig {
            failure_modulus: 5,
            max_delay_secs: 0.2,
        });
        let span = tracing::info_span!("test");
        for _ in 0..8 {
            let result = engine.zoo(&span).await;
            let secs: f64 = result
                .trim_start_matches("zoo executed in ")
                .trim_end_matches(" seconds")
                .parse()
                .expect("result string carries the delay");
            assert!((0.0..=0.21).contains(&secs), "delay out of bounds: {secs}");
        }
    }
}
