//! Test-only utilities for `optiroute-solver-local`.
//!
//! The helpers in this module are available to unit tests and behavioural
//! tests. They are gated behind the `test-support` feature (and `cfg(test)`).

use std::time::Duration;

use optiroute_core::{DistanceMatrix, Point, PointId, TravelTimeError, TravelTimeProvider};

/// A [`TravelTimeProvider`] answering from a fixed, pre-defined matrix.
///
/// Legs are looked up by point identifier, so the provider reproduces the
/// matrix exactly when points are added in order. Identifiers outside the
/// matrix produce [`TravelTimeError::DimensionMismatch`].
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use geo::Coord;
/// use optiroute_core::{Point, PointId, TravelTimeProvider};
/// use optiroute_solver_local::test_support::FixedMatrixTravelTimeProvider;
///
/// let provider = FixedMatrixTravelTimeProvider::from_seconds(vec![
///     vec![0, 30],
///     vec![45, 0],
/// ])?;
/// let a = Point::new(PointId::new(0), "a", Coord { x: 0.0, y: 0.0 });
/// let b = Point::new(PointId::new(1), "b", Coord { x: 1.0, y: 0.0 });
/// assert_eq!(provider.travel_time(&b, &a)?, Duration::from_secs(45));
/// # Ok::<(), optiroute_core::TravelTimeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FixedMatrixTravelTimeProvider {
    matrix: DistanceMatrix,
}

impl FixedMatrixTravelTimeProvider {
    /// Construct a provider from a pre-built matrix.
    #[must_use]
    pub const fn new(matrix: DistanceMatrix) -> Self {
        Self { matrix }
    }

    /// Build from integer seconds for convenience in test fixtures.
    ///
    /// # Errors
    ///
    /// Returns [`TravelTimeError::DimensionMismatch`] for non-square input.
    pub fn from_seconds(seconds: Vec<Vec<u64>>) -> Result<Self, TravelTimeError> {
        DistanceMatrix::from_seconds(seconds).map(Self::new)
    }

    /// The underlying matrix.
    #[must_use]
    pub const fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }
}

impl TravelTimeProvider for FixedMatrixTravelTimeProvider {
    fn travel_time(&self, from: &Point, to: &Point) -> Result<Duration, TravelTimeError> {
        self.matrix
            .get(from.id(), to.id())
            .ok_or(TravelTimeError::DimensionMismatch {
                expected: self.matrix.dimension(),
                found: from.id().index().max(to.id().index()).saturating_add(1),
            })
    }
}

/// Every point index in `tour` between its endpoints, sorted.
///
/// Useful for asserting a tour is a permutation without caring about order.
#[must_use]
pub fn sorted_interior(tour: &[PointId]) -> Vec<usize> {
    let mut interior: Vec<usize> = tour
        .iter()
        .skip(1)
        .take(tour.len().saturating_sub(2))
        .map(|id| id.index())
        .collect();
    interior.sort_unstable();
    interior
}
