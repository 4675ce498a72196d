//! Travel-time provider trait and the per-point leg bundle it returns.

use std::time::Duration;

use crate::Point;

use super::error::TravelTimeError;

/// Travel times between one point and every existing point.
///
/// `inbound[i]` is the time from `existing[i]` to the point and
/// `outbound[i]` the time from the point to `existing[i]`. Road travel times
/// need not be symmetric, so both directions are carried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointLegs {
    /// Legs arriving at the point, one per existing point.
    pub inbound: Vec<Duration>,
    /// Legs leaving the point, one per existing point.
    pub outbound: Vec<Duration>,
}

impl PointLegs {
    /// Check both leg vectors hold `expected` entries.
    ///
    /// # Errors
    ///
    /// Returns [`TravelTimeError::DimensionMismatch`] naming the first vector
    /// with the wrong length.
    pub fn ensure_len(&self, expected: usize) -> Result<(), TravelTimeError> {
        for found in [self.inbound.len(), self.outbound.len()] {
            if found != expected {
                return Err(TravelTimeError::DimensionMismatch { expected, found });
            }
        }
        Ok(())
    }
}

/// Estimate travel times between points.
///
/// Costs must be non-negative and additive along a path. Implementers only
/// need [`travel_time`](Self::travel_time); services that can batch requests
/// should also override [`legs`](Self::legs).
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use geo::Coord;
/// use optiroute_core::{Point, PointId, TravelTimeError, TravelTimeProvider};
///
/// struct OneMinute;
///
/// impl TravelTimeProvider for OneMinute {
///     fn travel_time(&self, from: &Point, to: &Point) -> Result<Duration, TravelTimeError> {
///         Ok(if from.id() == to.id() { Duration::ZERO } else { Duration::from_secs(60) })
///     }
/// }
///
/// let depot = Point::new(PointId::new(0), "a", Coord { x: 0.0, y: 0.0 });
/// let next = Point::new(PointId::new(1), "b", Coord { x: 1.0, y: 1.0 });
/// let legs = OneMinute.legs(&next, &[depot])?;
/// assert_eq!(legs.inbound, vec![Duration::from_secs(60)]);
/// # Ok::<(), TravelTimeError>(())
/// ```
pub trait TravelTimeProvider {
    /// Travel time from `from` to `to`.
    fn travel_time(&self, from: &Point, to: &Point) -> Result<Duration, TravelTimeError>;

    /// Legs between `point` and each of `existing`, in both directions.
    ///
    /// The default issues two [`travel_time`](Self::travel_time) calls per
    /// existing point.
    fn legs(&self, point: &Point, existing: &[Point]) -> Result<PointLegs, TravelTimeError> {
        let mut legs = PointLegs {
            inbound: Vec::with_capacity(existing.len()),
            outbound: Vec::with_capacity(existing.len()),
        };
        for other in existing {
            legs.inbound.push(self.travel_time(other, point)?);
            legs.outbound.push(self.travel_time(point, other)?);
        }
        Ok(legs)
    }
}

impl<T: TravelTimeProvider + ?Sized> TravelTimeProvider for &T {
    fn travel_time(&self, from: &Point, to: &Point) -> Result<Duration, TravelTimeError> {
        (**self).travel_time(from, to)
    }

    fn legs(&self, point: &Point, existing: &[Point]) -> Result<PointLegs, TravelTimeError> {
        (**self).legs(point, existing)
    }
}

impl<T: TravelTimeProvider + ?Sized> TravelTimeProvider for Box<T> {
    fn travel_time(&self, from: &Point, to: &Point) -> Result<Duration, TravelTimeError> {
        (**self).travel_time(from, to)
    }

    fn legs(&self, point: &Point, existing: &[Point]) -> Result<PointLegs, TravelTimeError> {
        (**self).legs(point, existing)
    }
}
