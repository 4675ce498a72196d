//! Incrementally grown travel-time matrix.
//!
//! The matrix is derived from the [`PointStore`](crate::PointStore) and kept
//! in lock step with it: appending a point computes one new row and one new
//! column and leaves every existing entry untouched. Rows are indexed by
//! [`PointId`], which never changes once assigned.

use std::time::Duration;

use crate::{Point, PointId, PointLegs, TravelTimeError, TravelTimeProvider};

/// Square matrix of travel times, `get(i, j)` being the time from `i` to `j`.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use optiroute_core::{DistanceMatrix, PointId};
///
/// let matrix = DistanceMatrix::from_seconds(vec![vec![0, 30], vec![45, 0]])?;
/// assert_eq!(matrix.dimension(), 2);
/// assert_eq!(matrix.get(PointId::new(1), PointId::new(0)), Some(Duration::from_secs(45)));
/// # Ok::<(), optiroute_core::TravelTimeError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistanceMatrix {
    rows: Vec<Vec<Duration>>,
}

impl DistanceMatrix {
    /// Create an empty matrix.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Build a matrix from complete rows.
    ///
    /// # Errors
    ///
    /// Returns [`TravelTimeError::DimensionMismatch`] if any row length
    /// differs from the number of rows.
    pub fn from_rows(rows: Vec<Vec<Duration>>) -> Result<Self, TravelTimeError> {
        let expected = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != expected) {
            return Err(TravelTimeError::DimensionMismatch {
                expected,
                found: row.len(),
            });
        }
        Ok(Self { rows })
    }

    /// Build a matrix from whole seconds, convenient for fixtures.
    ///
    /// # Errors
    ///
    /// Returns [`TravelTimeError::DimensionMismatch`] for non-square input.
    pub fn from_seconds(seconds: Vec<Vec<u64>>) -> Result<Self, TravelTimeError> {
        Self::from_rows(
            seconds
                .into_iter()
                .map(|row| row.into_iter().map(Duration::from_secs).collect())
                .collect(),
        )
    }

    /// Number of points covered.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.rows.len()
    }

    /// Whether the matrix covers no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Travel time from `from` to `to`, if both are covered.
    #[must_use]
    pub fn get(&self, from: PointId, to: PointId) -> Option<Duration> {
        self.rows
            .get(from.index())
            .and_then(|row| row.get(to.index()))
            .copied()
    }

    /// Outbound travel times from `from`.
    #[must_use]
    pub fn row(&self, from: PointId) -> Option<&[Duration]> {
        self.rows.get(from.index()).map(Vec::as_slice)
    }

    /// Rows in point order.
    pub fn rows(&self) -> impl Iterator<Item = &[Duration]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Grow the matrix by one point.
    ///
    /// `existing` must be the points already covered, in order. The provider
    /// is asked only for the legs touching `point`, so each extension costs
    /// `O(existing.len())` lookups. The point's own entry is zero.
    ///
    /// This is [`TravelTimeProvider::legs`] followed by
    /// [`push_legs`](Self::push_legs). [`Session`](crate::Session) makes the
    /// two calls itself so no lock is held while the provider is queried.
    ///
    /// # Errors
    ///
    /// Returns [`TravelTimeError::DimensionMismatch`] when `existing` does not
    /// match the matrix or the provider returns the wrong number of legs, and
    /// the provider's error otherwise. The matrix is unchanged on error.
    pub fn extend<T>(
        &mut self,
        point: &Point,
        existing: &[Point],
        provider: &T,
    ) -> Result<(), TravelTimeError>
    where
        T: TravelTimeProvider + ?Sized,
    {
        let size = self.dimension();
        if existing.len() != size {
            return Err(TravelTimeError::DimensionMismatch {
                expected: size,
                found: existing.len(),
            });
        }
        let legs = provider.legs(point, existing)?;
        self.push_legs(legs)
    }

    /// Append a point whose legs were fetched ahead of time.
    ///
    /// # Errors
    ///
    /// Returns [`TravelTimeError::DimensionMismatch`] unless both leg vectors
    /// cover every existing point. The matrix is unchanged on error.
    pub fn push_legs(&mut self, legs: PointLegs) -> Result<(), TravelTimeError> {
        let size = self.dimension();
        legs.ensure_len(size)?;

        for (row, inbound) in self.rows.iter_mut().zip(legs.inbound) {
            row.push(inbound);
        }
        let mut new_row = legs.outbound;
        new_row.push(Duration::ZERO);
        self.rows.push(new_row);
        log::debug!("distance matrix extended to {}x{}", size + 1, size + 1);
        Ok(())
    }

    /// Sum of consecutive legs along `stops`.
    ///
    /// Returns `None` if any stop is outside the matrix. Unreachable legs are
    /// stored as [`Duration::MAX`], so the sum saturates.
    #[must_use]
    pub fn path_duration(&self, stops: &[PointId]) -> Option<Duration> {
        stops.windows(2).try_fold(Duration::ZERO, |total, pair| {
            let (from, to) = match pair {
                [from, to] => (*from, *to),
                _ => return None,
            };
            self.get(from, to).map(|leg| total.saturating_add(leg))
        })
    }

    pub(crate) fn clear(&mut self) {
        self.rows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::rstest;

    use crate::test_support::{AsymmetricTravelTimeProvider, UnitTravelTimeProvider};

    fn points(count: usize) -> Vec<Point> {
        (0..count)
            .map(|i| {
                let offset = f64::from(u32::try_from(i).unwrap_or(u32::MAX));
                Point::new(PointId::new(i), format!("p{i}"), Coord { x: offset, y: 0.0 })
            })
            .collect()
    }

    fn grown(provider: &dyn TravelTimeProvider, count: usize) -> DistanceMatrix {
        let all = points(count);
        let mut matrix = DistanceMatrix::new();
        for (i, point) in all.iter().enumerate() {
            matrix
                .extend(point, &all[..i], provider)
                .expect("extension succeeds");
        }
        matrix
    }

    #[rstest]
    fn first_point_yields_zero_matrix() {
        let matrix = grown(&UnitTravelTimeProvider, 1);
        assert_eq!(matrix.dimension(), 1);
        assert_eq!(matrix.get(PointId::DEPOT, PointId::DEPOT), Some(Duration::ZERO));
    }

    #[rstest]
    fn extension_preserves_existing_entries() {
        let provider = AsymmetricTravelTimeProvider;
        let before = grown(&provider, 3);
        let after = grown(&provider, 4);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(
                    before.get(PointId::new(i), PointId::new(j)),
                    after.get(PointId::new(i), PointId::new(j))
                );
            }
        }
        assert_eq!(after.dimension(), 4);
    }

    #[rstest]
    fn extension_keeps_direction() {
        let matrix = grown(&AsymmetricTravelTimeProvider, 2);
        assert_ne!(
            matrix.get(PointId::new(0), PointId::new(1)),
            matrix.get(PointId::new(1), PointId::new(0))
        );
    }

    #[rstest]
    fn rejects_stale_existing_slice() {
        let all = points(3);
        let mut matrix = grown(&UnitTravelTimeProvider, 2);
        let err = matrix
            .extend(&all[2], &all[..1], &UnitTravelTimeProvider)
            .expect_err("existing slice is one short");
        assert_eq!(
            err,
            TravelTimeError::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
        assert_eq!(matrix.dimension(), 2);
    }

    struct ShortLegs;

    impl TravelTimeProvider for ShortLegs {
        fn travel_time(&self, _from: &Point, _to: &Point) -> Result<Duration, TravelTimeError> {
            Ok(Duration::ZERO)
        }

        fn legs(&self, _point: &Point, _existing: &[Point]) -> Result<PointLegs, TravelTimeError> {
            Ok(PointLegs::default())
        }
    }

    #[rstest]
    fn rejects_provider_with_missing_legs() {
        let all = points(2);
        let mut matrix = grown(&UnitTravelTimeProvider, 1);
        let err = matrix
            .extend(&all[1], &all[..1], &ShortLegs)
            .expect_err("provider returned no legs");
        assert!(matches!(err, TravelTimeError::DimensionMismatch { .. }));
        assert_eq!(matrix.dimension(), 1);
    }

    #[rstest]
    fn from_rows_rejects_jagged_input() {
        let err = DistanceMatrix::from_seconds(vec![vec![0, 1], vec![1]])
            .expect_err("jagged matrix");
        assert_eq!(
            err,
            TravelTimeError::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[rstest]
    fn path_duration_sums_legs() {
        let matrix = DistanceMatrix::from_seconds(vec![
            vec![0, 5, 3],
            vec![11, 0, 7],
            vec![13, 17, 0],
        ])
        .expect("square");
        let stops = [0, 1, 2, 0].map(PointId::new);
        assert_eq!(matrix.path_duration(&stops), Some(Duration::from_secs(25)));
        assert_eq!(matrix.path_duration(&[PointId::new(5)]), Some(Duration::ZERO));
        assert_eq!(matrix.path_duration(&[PointId::DEPOT, PointId::new(5)]), None);
    }

    #[rstest]
    fn path_duration_saturates_on_unreachable_leg() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![Duration::ZERO, Duration::MAX],
            vec![Duration::from_secs(1), Duration::ZERO],
        ])
        .expect("square");
        let stops = [0, 1, 0].map(PointId::new);
        assert_eq!(matrix.path_duration(&stops), Some(Duration::MAX));
    }
}
