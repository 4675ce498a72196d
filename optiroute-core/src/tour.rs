//! Solved visiting orders.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::{PointId, SolveError};

/// Shape of the trip to plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TripMode {
    /// Closed tour starting and ending at the depot.
    #[default]
    RoundTrip,
    /// Open path from the depot to the most recently added point.
    AToZ,
}

impl TripMode {
    /// Stable kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RoundTrip => "round-trip",
            Self::AToZ => "a-to-z",
        }
    }

    /// Number of stops in a tour over `points` points.
    #[must_use]
    pub const fn stop_count(self, points: usize) -> usize {
        match self {
            Self::RoundTrip => points.saturating_add(1),
            Self::AToZ => points,
        }
    }
}

impl fmt::Display for TripMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`TripMode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown trip mode {0:?} (expected round-trip or a-to-z)")]
pub struct ParseTripModeError(pub String);

impl FromStr for TripMode {
    type Err = ParseTripModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "round-trip" | "roundtrip" | "round" => Ok(Self::RoundTrip),
            "a-to-z" | "atoz" | "path" => Ok(Self::AToZ),
            other => Err(ParseTripModeError(other.to_owned())),
        }
    }
}

/// A validated visiting order.
///
/// Round trips start and end at the depot and visit every other point once,
/// giving `n + 1` stops. A-to-Z paths start at the depot, end at the last
/// point and visit every point once, giving `n` stops.
///
/// # Examples
/// ```
/// use optiroute_core::{PointId, Tour, TripMode};
///
/// let stops = [0, 2, 1, 0].map(PointId::new).to_vec();
/// let tour = Tour::new(stops, TripMode::RoundTrip, 3)?;
/// assert_eq!(tour.to_string(), "0 2 1 0");
/// # Ok::<(), optiroute_core::SolveError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tour {
    stops: Vec<PointId>,
    mode: TripMode,
}

impl Tour {
    /// Validate `stops` as a tour over `points` points.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::EmptyInput`] when `points` is zero and
    /// [`SolveError::InvalidTour`] when the stops do not form a tour of the
    /// requested shape.
    pub fn new(stops: Vec<PointId>, mode: TripMode, points: usize) -> Result<Self, SolveError> {
        if points == 0 {
            return Err(SolveError::EmptyInput);
        }
        let expected = mode.stop_count(points);
        if stops.len() != expected {
            return Err(invalid(format!(
                "expected {expected} stops but found {}",
                stops.len()
            )));
        }
        if stops.first() != Some(&PointId::DEPOT) {
            return Err(invalid("tour must start at the depot".to_owned()));
        }
        let end = match mode {
            TripMode::RoundTrip => PointId::DEPOT,
            TripMode::AToZ => PointId::new(points.saturating_sub(1)),
        };
        if stops.last() != Some(&end) {
            return Err(invalid(format!("tour must end at point {end}")));
        }

        let visited = match mode {
            TripMode::RoundTrip => stops.get(..points).unwrap_or_default(),
            TripMode::AToZ => stops.as_slice(),
        };
        let mut seen = vec![false; points];
        for stop in visited {
            match seen.get_mut(stop.index()) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => return Err(invalid(format!("point {stop} is visited twice"))),
                None => return Err(invalid(format!("point {stop} does not exist"))),
            }
        }
        Ok(Self { stops, mode })
    }

    /// Stops in visiting order.
    #[must_use]
    pub fn stops(&self) -> &[PointId] {
        &self.stops
    }

    /// Stops as plain indices.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        self.stops.iter().map(|stop| stop.index()).collect()
    }

    /// Shape of this tour.
    #[must_use]
    pub const fn mode(&self) -> TripMode {
        self.mode
    }
}

fn invalid(reason: String) -> SolveError {
    SolveError::InvalidTour { reason }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stops = self.stops.iter();
        if let Some(first) = stops.next() {
            write!(f, "{first}")?;
        }
        for stop in stops {
            write!(f, " {stop}")?;
        }
        Ok(())
    }
}

/// A solved tour and its total travel time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResult {
    /// The visiting order.
    pub tour: Tour,
    /// Sum of consecutive leg durations along the tour.
    pub total_duration: Duration,
}

impl SolveResult {
    /// Total travel time in whole seconds.
    #[must_use]
    pub const fn total_duration_secs(&self) -> u64 {
        self.total_duration.as_secs()
    }
}
