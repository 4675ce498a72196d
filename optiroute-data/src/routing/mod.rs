//! Road-network travel times from an OSRM routing service.
//!
//! [`OsrmTravelTimeProvider`] implements [`optiroute_core::TravelTimeProvider`]
//! on top of the OSRM Table API. When a point is appended to a session it
//! issues two requests, one for the legs arriving at the new point and one
//! for the legs leaving it, so each addition costs work proportional to the
//! number of points already stored.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use geo::Coord;
//! use optiroute_core::{Point, PointId, TravelMode, TravelTimeProvider};
//! use optiroute_data::routing::{OsrmConfig, OsrmTravelTimeProvider};
//!
//! let config = OsrmConfig::new("http://localhost:5000")
//!     .with_travel_mode(TravelMode::Cycling)
//!     .with_timeout(Duration::from_secs(10));
//! let provider = OsrmTravelTimeProvider::with_config(config)?;
//!
//! let depot = Point::new(PointId::new(0), "depot", Coord { x: -122.16, y: 37.44 });
//! let stop = Point::new(PointId::new(1), "stop", Coord { x: -122.14, y: 37.43 });
//! let legs = provider.legs(&stop, &[depot])?;
//! println!("to the stop: {:?}", legs.inbound);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod osrm;
mod provider;

pub use provider::{DEFAULT_OSRM_URL, DEFAULT_USER_AGENT, OsrmConfig, OsrmTravelTimeProvider};
