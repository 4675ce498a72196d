//! Compute travel times between points.
//!
//! The [`TravelTimeProvider`] trait abstracts the cost function behind the
//! [`DistanceMatrix`](crate::DistanceMatrix). Callers ask for the legs
//! between one new point and every existing point so that matrix growth stays
//! linear in the number of points already stored.
//!
//! [`HaversineTravelTime`] is the built-in offline estimate: great-circle
//! distance scaled by a circuity factor and divided by an average speed.

mod error;
mod haversine;
mod provider;

pub use error::TravelTimeError;
pub use haversine::{HaversineTravelTime, ParseTravelModeError, TravelMode, checked_location};
pub use provider::{PointLegs, TravelTimeProvider};
