//! Address resolution for sessions.
//!
//! [`NominatimGeocoder`] queries a Nominatim search endpoint over HTTP.
//! [`GazetteerGeocoder`] answers from a fixed list of known addresses and
//! needs no network, which makes it the choice for tests and for replaying
//! saved trips.

mod gazetteer;
mod nominatim;

pub use gazetteer::{GazetteerEntry, GazetteerError, GazetteerGeocoder};
pub use nominatim::{DEFAULT_NOMINATIM_URL, NominatimConfig, NominatimGeocoder};
