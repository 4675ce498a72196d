//! Deterministic collaborators for unit and behaviour tests.

use std::collections::HashMap;
use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Duration;

use geo::Coord;

use crate::{
    DistanceMatrix, GeocodeError, Geocoder, Point, PointId, SolveError, SolveResult, Tour,
    TourSolver, TravelTimeError, TravelTimeProvider, TripMode,
};

/// Geocoder backed by a fixed address table.
///
/// Unknown addresses fail with [`GeocodeError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    entries: HashMap<String, Coord<f64>>,
}

impl StaticGeocoder {
    /// Build a geocoder from `(address, coordinate)` pairs.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Coord<f64>)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(address, location)| (address.into(), location))
                .collect(),
        }
    }
}

impl Geocoder for StaticGeocoder {
    fn resolve(&self, address: &str) -> Result<Coord<f64>, GeocodeError> {
        self.entries
            .get(address)
            .copied()
            .ok_or_else(|| GeocodeError::NotFound {
                address: address.to_owned(),
            })
    }
}

/// One-shot latch shared by the gated collaborators.
#[derive(Debug, Default)]
struct Gate {
    open: Mutex<bool>,
    signal: Condvar,
}

impl Gate {
    fn open(&self) {
        let mut open = self.open.lock().unwrap_or_else(PoisonError::into_inner);
        *open = true;
        self.signal.notify_all();
    }

    fn wait(&self) {
        let mut open = self.open.lock().unwrap_or_else(PoisonError::into_inner);
        while !*open {
            open = self
                .signal
                .wait(open)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

/// Geocoder that blocks every lookup until [`open`](Self::open) is called.
///
/// Lets tests observe a session while a geocode is in flight.
#[derive(Debug, Default)]
pub struct GatedGeocoder {
    inner: StaticGeocoder,
    gate: Gate,
}

impl GatedGeocoder {
    /// Wrap `inner` behind a closed gate.
    pub fn new(inner: StaticGeocoder) -> Self {
        Self {
            inner,
            gate: Gate::default(),
        }
    }

    /// Release all current and future lookups.
    pub fn open(&self) {
        self.gate.open();
    }
}

impl Geocoder for GatedGeocoder {
    fn resolve(&self, address: &str) -> Result<Coord<f64>, GeocodeError> {
        self.gate.wait();
        self.inner.resolve(address)
    }
}

/// Solver that blocks every solve until [`open`](Self::open) is called.
///
/// Lets tests observe a session while it is `Solving`. Once released it
/// behaves like [`InsertionOrderSolver`].
#[derive(Debug, Default)]
pub struct GatedSolver {
    gate: Gate,
}

impl GatedSolver {
    /// Create a solver behind a closed gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Release all current and future solves.
    pub fn open(&self) {
        self.gate.open();
    }
}

impl TourSolver for GatedSolver {
    fn solve(&self, matrix: &DistanceMatrix, mode: TripMode) -> Result<SolveResult, SolveError> {
        self.gate.wait();
        InsertionOrderSolver.solve(matrix, mode)
    }
}

/// Deterministic `TravelTimeProvider` returning one-second edges.
#[derive(Default, Debug, Copy, Clone)]
pub struct UnitTravelTimeProvider;

impl TravelTimeProvider for UnitTravelTimeProvider {
    fn travel_time(&self, from: &Point, to: &Point) -> Result<Duration, TravelTimeError> {
        if from.id() == to.id() {
            Ok(Duration::ZERO)
        } else {
            Ok(Duration::from_secs(1))
        }
    }
}

/// Provider whose legs differ by direction.
///
/// The time from `i` to `j` is `i + 2j + 1` seconds, and zero when `i == j`.
#[derive(Default, Debug, Copy, Clone)]
pub struct AsymmetricTravelTimeProvider;

impl TravelTimeProvider for AsymmetricTravelTimeProvider {
    fn travel_time(&self, from: &Point, to: &Point) -> Result<Duration, TravelTimeError> {
        let (i, j) = (from.id().index(), to.id().index());
        if i == j {
            return Ok(Duration::ZERO);
        }
        let seconds = i
            .saturating_add(j.saturating_mul(2))
            .saturating_add(1);
        Ok(Duration::from_secs(u64::try_from(seconds).unwrap_or(u64::MAX)))
    }
}

/// Provider that always fails with a network error.
#[derive(Default, Debug, Copy, Clone)]
pub struct FailingTravelTimeProvider;

impl TravelTimeProvider for FailingTravelTimeProvider {
    fn travel_time(&self, _from: &Point, _to: &Point) -> Result<Duration, TravelTimeError> {
        Err(TravelTimeError::NetworkError {
            url: "http://routing.invalid".to_owned(),
            message: "unreachable".to_owned(),
        })
    }
}

/// Solver that visits points in insertion order.
#[derive(Default, Debug, Copy, Clone)]
pub struct InsertionOrderSolver;

impl TourSolver for InsertionOrderSolver {
    fn solve(&self, matrix: &DistanceMatrix, mode: TripMode) -> Result<SolveResult, SolveError> {
        let n = matrix.dimension();
        if n == 0 {
            return Err(SolveError::EmptyInput);
        }
        let mut stops: Vec<PointId> = (0..n).map(PointId::new).collect();
        if mode == TripMode::RoundTrip {
            stops.push(PointId::DEPOT);
        }
        let total_duration = matrix
            .path_duration(&stops)
            .ok_or(SolveError::DimensionMismatch {
                expected: n,
                found: matrix.dimension(),
            })?;
        let tour = Tour::new(stops, mode, n)?;
        Ok(SolveResult {
            tour,
            total_duration,
        })
    }
}
