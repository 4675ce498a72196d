//! Facade crate for the Optiroute trip planning engine.
//!
//! This crate re-exports the core session and domain types and exposes the
//! local-search solver and the network-backed collaborators behind feature
//! flags.

#![forbid(unsafe_code)]

pub use optiroute_core::{
    DistanceMatrix, GeocodeError, Geocoder, HaversineTravelTime, Point, PointId, Session,
    SessionConfig, SessionError, SessionState, SolveError, SolveResult, Tour, TourSolver,
    TravelMode, TravelTimeError, TravelTimeProvider, TripMode,
};

#[cfg(feature = "solver-local")]
pub use optiroute_solver_local::{LocalSearchConfig, LocalSearchSolver};

#[cfg(feature = "data")]
pub use optiroute_data::{
    GazetteerGeocoder, NominatimConfig, NominatimGeocoder, OsrmConfig, OsrmTravelTimeProvider,
};
