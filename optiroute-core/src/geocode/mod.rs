//! Resolve address strings into coordinates.
//!
//! The [`Geocoder`] trait is the engine's only view of an address resolver.
//! Implementations may suspend on network I/O internally; the trait itself
//! is synchronous so the core stays embeddable in synchronous callers.

mod error;

use geo::Coord;

pub use error::GeocodeError;

/// Resolve a textual address to a WGS84 coordinate (`x = lng`, `y = lat`).
///
/// Implementations must return [`GeocodeError::NotFound`] for addresses
/// that cannot be resolved and [`GeocodeError::EmptyAddress`] for blank
/// input, rather than inventing a location.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use optiroute_core::{GeocodeError, Geocoder};
///
/// struct Origin;
///
/// impl Geocoder for Origin {
///     fn resolve(&self, address: &str) -> Result<Coord<f64>, GeocodeError> {
///         if address.trim().is_empty() {
///             return Err(GeocodeError::EmptyAddress);
///         }
///         Ok(Coord { x: 0.0, y: 0.0 })
///     }
/// }
///
/// assert!(Origin.resolve("anywhere").is_ok());
/// assert_eq!(Origin.resolve("  "), Err(GeocodeError::EmptyAddress));
/// ```
pub trait Geocoder {
    /// Resolve `address` to a coordinate.
    fn resolve(&self, address: &str) -> Result<Coord<f64>, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn resolve(&self, address: &str) -> Result<Coord<f64>, GeocodeError> {
        (**self).resolve(address)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn resolve(&self, address: &str) -> Result<Coord<f64>, GeocodeError> {
        (**self).resolve(address)
    }
}
