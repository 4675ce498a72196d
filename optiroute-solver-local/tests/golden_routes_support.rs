//! Shared utilities for golden route tests.
//!
//! The Palo Alto fixture pairs each address with gazetteer coordinates and
//! records the driving time between every pair. Tests feed the first `n`
//! addresses through a full session (static geocoder, recorded travel times,
//! local-search solver) exactly as an interactive caller would, then compare
//! the tour against the recorded expectations.

use std::fs;
use std::path::PathBuf;

use geo::Coord;
use optiroute_core::test_support::StaticGeocoder;
use optiroute_core::{Session, SessionError, SolveResult};
use optiroute_solver_local::LocalSearchSolver;
use optiroute_solver_local::test_support::FixedMatrixTravelTimeProvider;
use serde::Deserialize;

/// Session type used by every golden route test.
pub type GoldenSession =
    Session<StaticGeocoder, FixedMatrixTravelTimeProvider, LocalSearchSolver>;

/// Deserialised golden route fixture.
#[derive(Debug, Deserialize, Clone)]
#[expect(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    reason = "fields are used by some test binaries but not others"
)]
pub struct GoldenFixture {
    /// Name of the fixture (used in error messages).
    #[allow(dead_code)]
    pub name: String,
    /// Human-readable description of the fixture.
    #[allow(dead_code)]
    pub description: String,
    /// Addresses in submission order.
    pub points: Vec<PointSpec>,
    /// Recorded driving time in seconds from row to column.
    pub durations_seconds: Vec<Vec<u64>>,
    /// Expected results per prefix length.
    pub cases: Vec<GoldenCase>,
}

/// One address and its coordinates.
#[derive(Debug, Deserialize, Clone)]
pub struct PointSpec {
    /// Address as submitted.
    pub address: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Expected outcome for the first `points` addresses.
#[derive(Debug, Deserialize, Clone)]
#[expect(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    reason = "fields are used by some test binaries but not others"
)]
pub struct GoldenCase {
    /// Number of addresses to submit.
    pub points: usize,
    /// Expected tour, as space-separated indices.
    pub tour: String,
    /// Expected total duration in seconds.
    #[allow(dead_code)]
    pub total_seconds: u64,
    /// Exclusive bounds on the total duration in seconds.
    #[allow(dead_code)]
    pub within_seconds: Option<(u64, u64)>,
}

/// Load the Palo Alto fixture.
pub fn load_fixture() -> GoldenFixture {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/palo_alto.json");
    let content = fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "failed to read golden route file at {}: {}",
            path.display(),
            e
        )
    });
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse golden route JSON: {e}"))
}

impl GoldenFixture {
    /// Find the case for `points` addresses.
    pub fn case(&self, points: usize) -> &GoldenCase {
        self.cases
            .iter()
            .find(|case| case.points == points)
            .unwrap_or_else(|| panic!("no golden case for {points} points"))
    }

    /// A session whose geocoder knows every fixture address.
    pub fn session(&self) -> GoldenSession {
        let geocoder = StaticGeocoder::new(
            self.points
                .iter()
                .map(|p| (p.address.clone(), Coord { x: p.lng, y: p.lat })),
        );
        let travel_times = FixedMatrixTravelTimeProvider::from_seconds(
            self.durations_seconds.clone(),
        )
        .unwrap_or_else(|e| panic!("recorded durations must be square: {e}"));
        Session::new(geocoder, travel_times, LocalSearchSolver::default())
    }

    /// Submit the first `count` addresses to `session`.
    pub fn add_points(&self, session: &GoldenSession, count: usize) -> Result<(), SessionError> {
        for spec in self.points.iter().take(count) {
            session.add_point(&spec.address)?;
        }
        Ok(())
    }

    /// Submit the first `count` addresses to a fresh session and solve it.
    pub fn solve_prefix(&self, count: usize) -> Result<SolveResult, SessionError> {
        let session = self.session();
        self.add_points(&session, count)?;
        session.solve()
    }
}

