//! Simulation error types.
//!
//! Every failure in this crate is an invalid-argument condition raised
//! synchronously at construction or call time — nothing is retried and
//! nothing is silently clamped.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised by simulation primitives and schedulers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A clock was asked to move backwards.
    #[error("clock delta must be non-negative, got {0}")]
    NegativeDelta(i64),
    /// A context-switch delay (configured or override) was negative.
    #[error("context-switch delay must be non-negative, got {0}")]
    NegativeContextSwitch(i64),
    /// An execution record had a negative endpoint or ended before it started.
    #[error("invalid execution interval for '{name}': [{start}, {end}]")]
    InvalidInterval {
        /// Task the record was logged for.
        name: String,
        /// Requested slice start.
        start: i64,
        /// Requested slice end.
        end: i64,
    },
    /// A round-robin quantum that can never make progress.
    #[error("round-robin quantum must be positive, got {0}")]
    InvalidQuantum(i64),
    /// An aging interval that would divide by zero.
    #[error("aging interval must be positive, got {0}")]
    InvalidAgingInterval(i64),
    /// The task set failed structural validation.
    #[error("invalid task set: {}", join_messages(.0))]
    InvalidTasks(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
