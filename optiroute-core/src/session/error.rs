use thiserror::Error;

use super::state::{Operation, SessionState};
use crate::{GeocodeError, SolveError, TravelTimeError};

/// Errors surfaced by [`Session`](super::Session).
///
/// Failures never leave partial state behind: a rejected or failed call
/// leaves the points, matrix and previous result as they were.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The address could not be resolved.
    #[error("failed to geocode {address:?}: {source}")]
    Geocode {
        /// Address as submitted.
        address: String,
        /// Underlying geocoder failure.
        source: GeocodeError,
    },

    /// Travel times to or from the new point could not be computed.
    #[error("failed to compute travel times: {0}")]
    TravelTime(#[from] TravelTimeError),

    /// The operation is not permitted in the current state.
    #[error("cannot {operation} while the session is {state}")]
    InvalidOperation {
        /// Operation that was attempted.
        operation: Operation,
        /// State the session was in.
        state: SessionState,
    },

    /// Solving was requested with no points.
    #[error("cannot solve a trip with no points")]
    EmptyInput,

    /// The configured point limit has been reached.
    #[error("session already holds the maximum of {max} points")]
    CapacityExceeded {
        /// Configured maximum.
        max: usize,
    },

    /// The solver failed.
    #[error("solver failed: {0}")]
    Solve(SolveError),

    /// A background worker could not be started.
    #[error("failed to start worker thread: {message}")]
    Worker {
        /// Description of the spawn failure.
        message: String,
    },
}

impl From<SolveError> for SessionError {
    fn from(err: SolveError) -> Self {
        match err {
            SolveError::EmptyInput => Self::EmptyInput,
            other => Self::Solve(other),
        }
    }
}
