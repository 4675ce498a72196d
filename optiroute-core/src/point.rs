//! Geocoded points and their stable identifiers.

use std::fmt;

use geo::Coord;

/// Stable identifier of a point within a session.
///
/// Identifiers are zero-based insertion indices. Index `0` is always the
/// depot: the start (and, for round trips, the end) of every tour.
///
/// # Examples
/// ```
/// use optiroute_core::PointId;
///
/// assert!(PointId::DEPOT.is_depot());
/// assert_eq!(PointId::new(3).index(), 3);
/// assert_eq!(PointId::new(3).to_string(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PointId(usize);

impl PointId {
    /// Identifier of the depot.
    pub const DEPOT: Self = Self(0);

    /// Wrap an insertion index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The zero-based insertion index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Whether this identifier names the depot.
    #[must_use]
    pub const fn is_depot(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PointId> for usize {
    fn from(id: PointId) -> Self {
        id.0
    }
}

/// A location that must be visited.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Points are
/// immutable once created: the store hands out shared references only.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use optiroute_core::{Point, PointId};
///
/// let point = Point::new(
///     PointId::DEPOT,
///     "301 University Ave, Palo Alto",
///     Coord { x: -122.1612, y: 37.4466 },
/// );
/// assert!(point.id().is_depot());
/// assert_eq!(point.address(), "301 University Ave, Palo Alto");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    id: PointId,
    address: String,
    location: Coord<f64>,
}

impl Point {
    /// Construct a point from its identifier, source address and location.
    pub fn new(id: PointId, address: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id,
            address: address.into(),
            location,
        }
    }

    /// Identifier assigned when the point was appended.
    #[must_use]
    pub const fn id(&self) -> PointId {
        self.id
    }

    /// The address string the point was resolved from.
    ///
    /// Points added from raw coordinates carry a `(lat, lng)` label instead.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Resolved WGS84 coordinate.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        self.location
    }
}

/// Render a coordinate as the `(lat, lng)` label used for unnamed points.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use optiroute_core::point::coordinate_label;
///
/// assert_eq!(coordinate_label(Coord { x: -122.5, y: 37.25 }), "(37.25, -122.5)");
/// ```
#[must_use]
pub fn coordinate_label(location: Coord<f64>) -> String {
    format!("({}, {})", location.y, location.x)
}
