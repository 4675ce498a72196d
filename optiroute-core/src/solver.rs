//! Tour-solving seam: the [`TourSolver`] trait and its [`SolveError`] type.

use thiserror::Error;

use crate::{DistanceMatrix, SolveResult, TripMode};

/// Errors returned by [`TourSolver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The matrix covers no points.
    #[error("cannot solve a trip with no points")]
    EmptyInput,

    /// The matrix shape does not match the number of points.
    #[error("distance matrix has {found} rows but {expected} points were supplied")]
    DimensionMismatch {
        /// Number of points expected.
        expected: usize,
        /// Number of matrix rows found.
        found: usize,
    },

    /// A solver produced an order that is not a valid tour.
    #[error("invalid tour: {reason}")]
    InvalidTour {
        /// What was wrong with the order.
        reason: String,
    },
}

/// Turn a travel-time matrix into a visiting order.
///
/// Implementations must be deterministic: the same matrix and mode always
/// yield the same tour. They must return [`SolveError::EmptyInput`] for an
/// empty matrix rather than a degenerate tour, and must never modify the
/// matrix. Solvers are `Send + Sync` so a session can run them on a worker
/// thread.
///
/// # Examples
/// ```rust
/// use optiroute_core::{
///     DistanceMatrix, PointId, SolveError, SolveResult, Tour, TourSolver, TripMode,
/// };
///
/// /// Visit points in insertion order.
/// struct InOrder;
///
/// impl TourSolver for InOrder {
///     fn solve(&self, matrix: &DistanceMatrix, mode: TripMode) -> Result<SolveResult, SolveError> {
///         let n = matrix.dimension();
///         let mut stops: Vec<_> = (0..n).map(PointId::new).collect();
///         if mode == TripMode::RoundTrip {
///             stops.push(PointId::DEPOT);
///         }
///         let total_duration = matrix.path_duration(&stops).unwrap_or_default();
///         let tour = Tour::new(stops, mode, n)?;
///         Ok(SolveResult { tour, total_duration })
///     }
/// }
///
/// let matrix = DistanceMatrix::from_seconds(vec![vec![0, 4], vec![6, 0]]).expect("square");
/// let result = InOrder.solve(&matrix, TripMode::RoundTrip)?;
/// assert_eq!(result.total_duration_secs(), 10);
/// # Ok::<(), SolveError>(())
/// ```
pub trait TourSolver: Send + Sync {
    /// Solve `matrix` for a trip of shape `mode`.
    fn solve(&self, matrix: &DistanceMatrix, mode: TripMode) -> Result<SolveResult, SolveError>;
}

impl<S: TourSolver + ?Sized> TourSolver for &S {
    fn solve(&self, matrix: &DistanceMatrix, mode: TripMode) -> Result<SolveResult, SolveError> {
        (**self).solve(matrix, mode)
    }
}

impl<S: TourSolver + ?Sized> TourSolver for Box<S> {
    fn solve(&self, matrix: &DistanceMatrix, mode: TripMode) -> Result<SolveResult, SolveError> {
        (**self).solve(matrix, mode)
    }
}
