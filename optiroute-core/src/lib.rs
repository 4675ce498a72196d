//! Core domain types for the Optiroute trip-planning engine.
//!
//! The crate models an interactive session in which addresses are geocoded
//! one at a time into an append-only [`PointStore`], a [`DistanceMatrix`] is
//! grown incrementally alongside it, and a [`TourSolver`] turns the matrix
//! into a [`Tour`]. [`Session`] ties the pieces together behind a small state
//! machine that pollers query through [`Session::is_ready`] and
//! [`Session::is_done`].
//!
//! Geocoding, travel-time estimation and tour construction are seams
//! ([`Geocoder`], [`TravelTimeProvider`], [`TourSolver`]) so that network
//! backed and offline implementations can be swapped freely.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod geocode;
pub mod matrix;
pub mod point;
pub mod session;
pub mod solver;
pub mod store;
pub mod tour;
pub mod travel_time;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use geocode::{GeocodeError, Geocoder};
pub use matrix::DistanceMatrix;
pub use point::{Point, PointId};
pub use session::{Operation, Session, SessionConfig, SessionError, SessionState};
pub use solver::{SolveError, TourSolver};
pub use store::PointStore;
pub use tour::{ParseTripModeError, SolveResult, Tour, TripMode};
pub use travel_time::{
    HaversineTravelTime, ParseTravelModeError, PointLegs, TravelMode, TravelTimeError,
    TravelTimeProvider, checked_location,
};
