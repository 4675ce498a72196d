//! Network-backed and file-backed collaborators for the Optiroute engine.
//!
//! - [`routing::OsrmTravelTimeProvider`] asks an OSRM Table service for the
//!   legs between a new point and every existing point.
//! - [`geocode::NominatimGeocoder`] resolves addresses through a Nominatim
//!   search endpoint.
//! - [`geocode::GazetteerGeocoder`] resolves addresses offline from a JSON
//!   list of known locations.
//!
//! The core traits are synchronous; the HTTP collaborators block on an owned
//! Tokio runtime (or the caller's multi-threaded runtime) internally.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod geocode;
mod http;
pub mod routing;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use geocode::{
    GazetteerEntry, GazetteerError, GazetteerGeocoder, NominatimConfig, NominatimGeocoder,
};
pub use http::ClientBuildError;
pub use routing::{OsrmConfig, OsrmTravelTimeProvider};
