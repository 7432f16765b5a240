//! Solver error taxonomy
//!
//! Three business-level failure kinds, plus an internal kind for unexpected
//! faults. Provider failures are never conflated with infeasibility: a
//! `Provider` error is safe to retry as-is, `NoFeasibleRoute` is not.

use thiserror::Error;

use crate::services::routing::MatrixProviderError;

/// Top-level error returned by a solve call
#[derive(Debug, Error)]
pub enum SolveError {
    /// The caller supplied a malformed problem (dimension mismatch, empty
    /// input, invalid window). Not retryable; the input must be fixed.
    #[error("invalid model: {reason}")]
    InvalidModel { reason: String },

    /// The travel-time matrix source failed or timed out. Transient;
    /// the whole solve may be retried.
    #[error(transparent)]
    Provider(#[from] MatrixProviderError),

    /// Construction search proved that no visiting order satisfies every
    /// stop's time window. Retrying with the same input is pointless;
    /// a stop must be dropped or a window widened first.
    #[error("no feasible route: {reason}")]
    NoFeasibleRoute { reason: String },

    /// Unexpected internal fault. Kept distinct so a solver bug never
    /// masquerades as "your input is impossible".
    #[error("internal solver fault: {reason}")]
    Internal { reason: String },
}

impl SolveError {
    pub fn invalid_model(reason: impl Into<String>) -> Self {
        Self::InvalidModel {
            reason: reason.into(),
        }
    }

    pub fn no_feasible_route(reason: impl Into<String>) -> Self {
        Self::NoFeasibleRoute {
            reason: reason.into(),
        }
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }
}
