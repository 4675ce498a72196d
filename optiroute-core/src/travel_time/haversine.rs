//! Offline travel-time estimate from great-circle distance.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use geo::{Distance, Haversine};
use thiserror::Error;

use crate::Point;

use super::error::TravelTimeError;
use super::provider::TravelTimeProvider;

/// How the traveller moves between points.
///
/// Selects default speed and circuity for [`HaversineTravelTime`] and the
/// routing profile for network-backed providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TravelMode {
    /// Travel by car.
    #[default]
    Driving,
    /// Travel on foot.
    Walking,
    /// Travel by bicycle.
    Cycling,
}

impl TravelMode {
    /// Stable lowercase name, also used as the routing profile.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
        }
    }

    /// Average door-to-door speed in km/h.
    #[must_use]
    pub const fn default_speed_kmh(self) -> f64 {
        match self {
            Self::Driving => 36.0,
            Self::Walking => 5.0,
            Self::Cycling => 15.0,
        }
    }

    /// Ratio of network distance to great-circle distance.
    #[must_use]
    pub const fn default_circuity(self) -> f64 {
        match self {
            Self::Driving => 1.5,
            Self::Walking => 1.3,
            Self::Cycling => 1.4,
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`TravelMode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown travel mode {0:?} (expected driving, walking or cycling)")]
pub struct ParseTravelModeError(pub String);

impl FromStr for TravelMode {
    type Err = ParseTravelModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driving" | "car" => Ok(Self::Driving),
            "walking" | "foot" => Ok(Self::Walking),
            "cycling" | "bike" => Ok(Self::Cycling),
            other => Err(ParseTravelModeError(other.to_owned())),
        }
    }
}

/// Travel time estimated from haversine distance.
///
/// `seconds = round(distance_m * circuity / (speed_kmh / 3.6))`. Durations are
/// whole seconds so that tours over the same points compare exactly.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use optiroute_core::{HaversineTravelTime, Point, PointId, TravelMode, TravelTimeProvider};
///
/// let provider = HaversineTravelTime::for_mode(TravelMode::Driving);
/// let a = Point::new(PointId::new(0), "a", Coord { x: -122.16, y: 37.44 });
/// let b = Point::new(PointId::new(1), "b", Coord { x: -122.16, y: 37.44 });
/// assert_eq!(provider.travel_time(&a, &b)?, Duration::ZERO);
/// # Ok::<(), optiroute_core::TravelTimeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaversineTravelTime {
    speed_kmh: f64,
    circuity: f64,
}

impl Default for HaversineTravelTime {
    fn default() -> Self {
        Self::for_mode(TravelMode::default())
    }
}

impl HaversineTravelTime {
    /// Use the default speed and circuity of `mode`.
    #[must_use]
    pub const fn for_mode(mode: TravelMode) -> Self {
        Self {
            speed_kmh: mode.default_speed_kmh(),
            circuity: mode.default_circuity(),
        }
    }

    /// Use an explicit average speed and circuity factor.
    ///
    /// # Errors
    ///
    /// Returns [`TravelTimeError::InvalidConfiguration`] unless the speed is
    /// positive and finite and the circuity is finite and at least `1.0`.
    pub fn new(speed_kmh: f64, circuity: f64) -> Result<Self, TravelTimeError> {
        if !(speed_kmh.is_finite() && speed_kmh > 0.0) {
            return Err(TravelTimeError::InvalidConfiguration {
                message: format!("speed must be positive, got {speed_kmh} km/h"),
            });
        }
        if !(circuity.is_finite() && circuity >= 1.0) {
            return Err(TravelTimeError::InvalidConfiguration {
                message: format!("circuity must be at least 1.0, got {circuity}"),
            });
        }
        Ok(Self {
            speed_kmh,
            circuity,
        })
    }

    /// Average speed in km/h.
    #[must_use]
    pub const fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    /// Circuity factor applied to great-circle distance.
    #[must_use]
    pub const fn circuity(&self) -> f64 {
        self.circuity
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "duration estimate scales a floating-point distance"
    )]
    fn seconds_for(&self, metres: f64) -> f64 {
        let metres_per_second = self.speed_kmh / 3.6;
        (metres * self.circuity / metres_per_second).round()
    }
}

/// Check `point` holds a finite WGS84 coordinate.
///
/// # Errors
///
/// Returns [`TravelTimeError::InvalidCoordinate`] for NaN, infinite or
/// out-of-range latitude and longitude.
pub fn checked_location(point: &Point) -> Result<geo::Point<f64>, TravelTimeError> {
    let location = point.location();
    let valid = location.y.is_finite()
        && location.x.is_finite()
        && (-90.0..=90.0).contains(&location.y)
        && (-180.0..=180.0).contains(&location.x);
    if valid {
        Ok(geo::Point::from(location))
    } else {
        Err(TravelTimeError::InvalidCoordinate {
            index: point.id().index(),
            lat: location.y.to_string(),
            lng: location.x.to_string(),
        })
    }
}

impl TravelTimeProvider for HaversineTravelTime {
    fn travel_time(&self, from: &Point, to: &Point) -> Result<Duration, TravelTimeError> {
        let origin = checked_location(from)?;
        let destination = checked_location(to)?;
        let metres = Haversine.distance(origin, destination);
        let seconds = self.seconds_for(metres);
        Duration::try_from_secs_f64(seconds).map_err(|err| TravelTimeError::InvalidConfiguration {
            message: format!("travel time of {seconds}s is not representable: {err}"),
        })
    }
}
