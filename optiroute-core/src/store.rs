//! Append-only store of points to visit.
//!
//! The store is the source of truth for what a tour must visit. Points are
//! appended in submission order and never removed, so a [`PointId`] stays
//! valid for the lifetime of the store.

use geo::Coord;

use crate::point::coordinate_label;
use crate::{GeocodeError, Geocoder, Point, PointId};

/// Ordered, append-only collection of geocoded points.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use optiroute_core::{PointId, PointStore};
///
/// let mut store = PointStore::new();
/// let depot = store.add_location(Coord { x: -122.16, y: 37.44 }, None);
/// assert_eq!(depot, PointId::DEPOT);
/// assert_eq!(store.count(), 1);
/// assert_eq!(store.points()[0].address(), "(37.44, -122.16)");
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PointStore {
    points: Vec<Point>,
}

impl PointStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Identifier the next appended point will receive.
    #[must_use]
    pub const fn next_id(&self) -> PointId {
        PointId::new(self.points.len())
    }

    /// Geocode `address` and append the result.
    ///
    /// Equivalent to [`resolve`](Self::resolve) followed by
    /// [`append`](Self::append). [`Session`](crate::Session) uses the split
    /// form so the geocoder runs without the store locked.
    ///
    /// # Errors
    ///
    /// Returns the geocoder's error unchanged; nothing is appended.
    pub fn add_point<G>(&mut self, geocoder: &G, address: &str) -> Result<PointId, GeocodeError>
    where
        G: Geocoder + ?Sized,
    {
        let point = self.resolve(geocoder, address)?;
        Ok(self.append(point))
    }

    /// Append a point from raw coordinates, labelled `label` or `(lat, lng)`.
    ///
    /// Equivalent to [`locate`](Self::locate) followed by
    /// [`append`](Self::append).
    pub fn add_location(&mut self, location: Coord<f64>, label: Option<&str>) -> PointId {
        let point = self.locate(location, label);
        self.append(point)
    }

    /// Geocode `address` into the point that would be appended next without
    /// modifying the store.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::EmptyAddress`] for blank input and otherwise
    /// the geocoder's error unchanged.
    pub fn resolve<G>(&self, geocoder: &G, address: &str) -> Result<Point, GeocodeError>
    where
        G: Geocoder + ?Sized,
    {
        let trimmed = clean_address(address)?;
        let location = geocoder.resolve(trimmed)?;
        Ok(Point::new(self.next_id(), trimmed, location))
    }

    /// Build the point that would be appended next from raw coordinates.
    #[must_use]
    pub fn locate(&self, location: Coord<f64>, label: Option<&str>) -> Point {
        let address = label
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map_or_else(|| coordinate_label(location), str::to_owned);
        Point::new(self.next_id(), address, location)
    }

    /// Append a point previously built by [`resolve`](Self::resolve) or
    /// [`locate`](Self::locate).
    ///
    /// The point is re-numbered if it was built against an older store size,
    /// keeping identifiers equal to insertion indices.
    pub fn append(&mut self, point: Point) -> PointId {
        let id = self.next_id();
        if point.id() == id {
            self.points.push(point);
        } else {
            log::warn!(
                "point built as {} appended as {id}; renumbering",
                point.id()
            );
            self.points
                .push(Point::new(id, point.address(), point.location()));
        }
        id
    }

    /// Points in insertion order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Look up a point by identifier.
    #[must_use]
    pub fn get(&self, id: PointId) -> Option<&Point> {
        self.points.get(id.index())
    }

    /// Number of stored points.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.points.len()
    }

    /// Whether the store holds no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Source addresses in insertion order.
    pub fn addresses(&self) -> impl Iterator<Item = &str> + '_ {
        self.points.iter().map(Point::address)
    }

    pub(crate) fn clear(&mut self) {
        self.points.clear();
    }
}

/// Trim `address`, rejecting blank input.
pub(crate) fn clean_address(address: &str) -> Result<&str, GeocodeError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        Err(GeocodeError::EmptyAddress)
    } else {
        Ok(trimmed)
    }
}
