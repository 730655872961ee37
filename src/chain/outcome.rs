//! Tagged result for the middle operation.

/// Outcome of the middle operation.
///
/// The middle operation absorbs its own injected failure and never raises
/// past its boundary; both variants carry the human-readable result string
/// that propagates up the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainOutcome {
    Success(String),
    Failure(String),
}

impl ChainOutcome {
    /// The result string, whichever branch produced it.
    pub fn message(&self) -> &str {
        match self {
            ChainOutcome::Success(message) | ChainOutcome::Failure(message) => message,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ChainOutcome::Failure(_))
    }
}
