//! Integer view of a travel-time matrix.

use optiroute_core::{DistanceMatrix, PointId};

/// Leg costs in nanoseconds, compared exactly.
///
/// Missing entries cost `u128::MAX`; sums saturate, so an unreachable leg
/// never looks like an improvement.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Costs<'a> {
    matrix: &'a DistanceMatrix,
}

impl<'a> Costs<'a> {
    pub(crate) const fn new(matrix: &'a DistanceMatrix) -> Self {
        Self { matrix }
    }

    pub(crate) const fn len(&self) -> usize {
        self.matrix.dimension()
    }

    pub(crate) fn leg(&self, from: usize, to: usize) -> u128 {
        self.matrix
            .get(PointId::new(from), PointId::new(to))
            .map_or(u128::MAX, |duration| duration.as_nanos())
    }

    pub(crate) fn path(&self, order: &[usize]) -> u128 {
        order
            .windows(2)
            .filter_map(|pair| match pair {
                [from, to] => Some(self.leg(*from, *to)),
                _ => None,
            })
            .fold(0, u128::saturating_add)
    }
}
