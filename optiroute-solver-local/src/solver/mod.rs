//! `LocalSearchSolver` implementation.

use std::time::Instant;

use optiroute_core::{
    DistanceMatrix, PointId, SolveError, SolveResult, Tour, TourSolver, TripMode,
};

use crate::construction::nearest_neighbour;
use crate::cost::Costs;
use crate::two_opt::{improve, orient};

/// Configuration for [`LocalSearchSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalSearchConfig {
    /// Upper bound on 2-opt passes; each pass applies one move.
    pub max_passes: usize,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self { max_passes: 1000 }
    }
}

impl LocalSearchConfig {
    /// Set the 2-opt pass budget.
    #[must_use]
    pub const fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }
}

/// Nearest-neighbour construction followed by 2-opt improvement.
///
/// # Examples
/// ```rust
/// use optiroute_core::{DistanceMatrix, TourSolver, TripMode};
/// use optiroute_solver_local::LocalSearchSolver;
///
/// let matrix = DistanceMatrix::from_seconds(vec![
///     vec![0, 10, 14, 10],
///     vec![10, 0, 10, 14],
///     vec![14, 10, 0, 10],
///     vec![10, 14, 10, 0],
/// ])?;
/// let result = LocalSearchSolver::default().solve(&matrix, TripMode::RoundTrip)?;
/// assert_eq!(result.tour.to_string(), "0 1 2 3 0");
/// assert_eq!(result.total_duration_secs(), 40);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalSearchSolver {
    config: LocalSearchConfig,
}

impl LocalSearchSolver {
    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: LocalSearchConfig) -> Self {
        Self { config }
    }

    /// The solver's configuration.
    #[must_use]
    pub const fn config(&self) -> &LocalSearchConfig {
        &self.config
    }
}

impl TourSolver for LocalSearchSolver {
    fn solve(&self, matrix: &DistanceMatrix, mode: TripMode) -> Result<SolveResult, SolveError> {
        let n = matrix.dimension();
        if n == 0 {
            return Err(SolveError::EmptyInput);
        }
        let started_at = Instant::now();
        let costs = Costs::new(matrix);

        let mut order = nearest_neighbour(&costs, mode);
        let constructed = costs.path(&order);
        let improvement = improve(&costs, &mut order, mode, self.config.max_passes);
        if mode == TripMode::RoundTrip {
            orient(&costs, &mut order);
        }

        let stops: Vec<PointId> = order.into_iter().map(PointId::new).collect();
        let total_duration = matrix
            .path_duration(&stops)
            .ok_or(SolveError::DimensionMismatch {
                expected: n,
                found: matrix.dimension(),
            })?;
        log::debug!(
            "solved {n} points ({mode}): {} 2-opt moves, converged {}, {}ns -> {}ns in {:?}",
            improvement.moves,
            improvement.converged,
            constructed,
            total_duration.as_nanos(),
            started_at.elapsed()
        );
        let tour = Tour::new(stops, mode, n)?;
        Ok(SolveResult {
            tour,
            total_duration,
        })
    }
}
