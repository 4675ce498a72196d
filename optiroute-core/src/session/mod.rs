//! Interactive planning session.
//!
//! A [`Session`] owns one point store, its distance matrix and the latest
//! solve result. Callers add points one at a time, poll
//! [`is_ready`](Session::is_ready), trigger a solve and poll
//! [`is_done`](Session::is_done). The state enum doubles as the writer lock:
//! only one add or solve may be in flight, while any number of threads may
//! read the state concurrently.

mod error;
mod state;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use geo::Coord;

use crate::store::clean_address;
use crate::{
    DistanceMatrix, Geocoder, Point, PointId, PointStore, SolveResult, TourSolver,
    TravelTimeProvider, TripMode,
};

pub use error::SessionError;
pub use state::{Operation, SessionState};

/// Session behaviour settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Shape of the trip produced by [`Session::solve`].
    pub trip_mode: TripMode,
    /// Upper bound on the number of points, if any.
    pub max_points: Option<usize>,
}

impl SessionConfig {
    /// Set the trip shape.
    #[must_use]
    pub const fn with_trip_mode(mut self, trip_mode: TripMode) -> Self {
        self.trip_mode = trip_mode;
        self
    }

    /// Cap the number of points the session accepts.
    #[must_use]
    pub const fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = Some(max_points);
        self
    }
}

#[derive(Debug, Default)]
struct Status {
    state: SessionState,
    points: usize,
    result: Option<SolveResult>,
    last_error: Option<SessionError>,
}

#[derive(Debug, Default)]
struct Workspace {
    store: PointStore,
    matrix: DistanceMatrix,
}

/// A single-writer trip-planning session.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use optiroute_core::test_support::{InsertionOrderSolver, StaticGeocoder};
/// use optiroute_core::{HaversineTravelTime, Session};
///
/// let geocoder = StaticGeocoder::new([
///     ("depot", Coord { x: -122.1612, y: 37.4466 }),
///     ("shop", Coord { x: -122.1725, y: 37.4445 }),
/// ]);
/// let session = Session::new(geocoder, HaversineTravelTime::default(), InsertionOrderSolver);
///
/// session.add_point("depot")?;
/// session.add_point("shop")?;
/// assert!(session.is_ready());
///
/// let result = session.solve()?;
/// assert!(session.is_done());
/// assert_eq!(result.tour.to_string(), "0 1 0");
/// assert_eq!(session.total_duration()?, result.total_duration);
/// # Ok::<(), optiroute_core::SessionError>(())
/// ```
#[derive(Debug)]
pub struct Session<G, T, S> {
    geocoder: G,
    travel_time: T,
    solver: S,
    config: SessionConfig,
    status: RwLock<Status>,
    workspace: Mutex<Workspace>,
}

impl<G, T, S> Session<G, T, S>
where
    G: Geocoder,
    T: TravelTimeProvider,
    S: TourSolver,
{
    /// Create an idle session with the default configuration.
    pub fn new(geocoder: G, travel_time: T, solver: S) -> Self {
        Self::with_config(geocoder, travel_time, solver, SessionConfig::default())
    }

    /// Create an idle session with `config`.
    pub fn with_config(geocoder: G, travel_time: T, solver: S, config: SessionConfig) -> Self {
        Self {
            geocoder,
            travel_time,
            solver,
            config,
            status: RwLock::new(Status::default()),
            workspace: Mutex::new(Workspace::default()),
        }
    }

    /// Settings the session was created with.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The geocoder used by [`add_point`](Self::add_point).
    #[must_use]
    pub const fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// The provider used to extend the travel-time matrix.
    #[must_use]
    pub const fn travel_time(&self) -> &T {
        &self.travel_time
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.read_status().state
    }

    /// Whether the latest point was added and the session can be solved.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state() == SessionState::Ready
    }

    /// Whether a tour has been solved for the current points.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state() == SessionState::Done
    }

    /// Failure of the most recent add or solve, cleared when the next one
    /// starts.
    #[must_use]
    pub fn last_error(&self) -> Option<SessionError> {
        self.read_status().last_error.clone()
    }

    /// Number of points added so far.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.read_status().points
    }

    /// Geocode `address` and append it to the session.
    ///
    /// The session is `AwaitingGeocode` for the duration of the call and
    /// `Ready` once the point and its travel times are stored.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidOperation`] while another add or solve
    /// is in flight and [`SessionError::CapacityExceeded`] once the point
    /// limit is reached. Geocoding and travel-time failures revert the
    /// session to its previous state.
    pub fn add_point(&self, address: &str) -> Result<PointId, SessionError> {
        let previous = self.begin_add()?;
        let outcome = self.geocode_and_append(address);
        self.finish_add(previous, outcome)
    }

    /// Append a point from raw coordinates, bypassing the geocoder.
    ///
    /// `label` defaults to `(lat, lng)`.
    ///
    /// # Errors
    ///
    /// As for [`add_point`](Self::add_point), without geocoding failures.
    pub fn add_location(
        &self,
        location: Coord<f64>,
        label: Option<&str>,
    ) -> Result<PointId, SessionError> {
        let previous = self.begin_add()?;
        let outcome = self.append(|store| Ok(store.locate(location, label)));
        self.finish_add(previous, outcome)
    }

    /// Solve the current points and store the result.
    ///
    /// Solving again from `Done` recomputes the same tour.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyInput`] when no points were added,
    /// [`SessionError::InvalidOperation`] while another operation is in
    /// flight and [`SessionError::Solve`] when the solver fails.
    pub fn solve(&self) -> Result<SolveResult, SessionError> {
        let previous = self.begin_solve()?;
        let outcome = self.run_solver();
        self.finish_solve(previous, outcome)
    }

    /// The solved tour and its duration.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidOperation`] unless the session is
    /// `Done`.
    pub fn result(&self) -> Result<SolveResult, SessionError> {
        let status = self.read_status();
        match (&status.result, status.state) {
            (Some(result), SessionState::Done) => Ok(result.clone()),
            _ => Err(SessionError::InvalidOperation {
                operation: Operation::Query,
                state: status.state,
            }),
        }
    }

    /// Total travel time of the solved tour.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidOperation`] unless the session is
    /// `Done`.
    pub fn total_duration(&self) -> Result<Duration, SessionError> {
        self.result().map(|result| result.total_duration)
    }

    /// Solved visiting order as point indices.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidOperation`] unless the session is
    /// `Done`.
    pub fn tour_order(&self) -> Result<Vec<usize>, SessionError> {
        self.result().map(|result| result.tour.indices())
    }

    /// Snapshot of the points in insertion order.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        self.lock_workspace().store.points().to_vec()
    }

    /// Source addresses in insertion order.
    #[must_use]
    pub fn addresses(&self) -> Vec<String> {
        self.lock_workspace()
            .store
            .addresses()
            .map(str::to_owned)
            .collect()
    }

    /// Snapshot of the travel-time matrix.
    #[must_use]
    pub fn durations(&self) -> DistanceMatrix {
        self.lock_workspace().matrix.clone()
    }

    /// Discard all points and results and return to `Idle`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidOperation`] while an add or solve is in
    /// flight.
    pub fn reset(&self) -> Result<(), SessionError> {
        let mut status = self.write_status();
        if status.state.is_busy() {
            return Err(SessionError::InvalidOperation {
                operation: Operation::Reset,
                state: status.state,
            });
        }
        {
            let mut workspace = self.lock_workspace();
            workspace.store.clear();
            workspace.matrix.clear();
        }
        *status = Status::default();
        log::info!("session reset");
        Ok(())
    }

    fn begin_add(&self) -> Result<SessionState, SessionError> {
        let mut status = self.write_status();
        let previous = status.state;
        if previous.is_busy() {
            return Err(SessionError::InvalidOperation {
                operation: Operation::AddPoint,
                state: previous,
            });
        }
        if let Some(max) = self.config.max_points
            && status.points >= max
        {
            return Err(SessionError::CapacityExceeded { max });
        }
        status.state = SessionState::AwaitingGeocode;
        status.last_error = None;
        Ok(previous)
    }

    fn begin_solve(&self) -> Result<SessionState, SessionError> {
        let mut status = self.write_status();
        let previous = status.state;
        match previous {
            SessionState::Ready | SessionState::Done => {}
            SessionState::Idle => return Err(SessionError::EmptyInput),
            SessionState::AwaitingGeocode | SessionState::Solving => {
                return Err(SessionError::InvalidOperation {
                    operation: Operation::Solve,
                    state: previous,
                });
            }
        }
        status.state = SessionState::Solving;
        status.last_error = None;
        Ok(previous)
    }

    fn geocode_and_append(&self, address: &str) -> Result<PointId, SessionError> {
        let geocode_error = |source| SessionError::Geocode {
            address: address.to_owned(),
            source,
        };
        let trimmed = clean_address(address).map_err(geocode_error)?;
        let location = self.geocoder.resolve(trimmed).map_err(geocode_error)?;
        self.append(|store| Ok(store.locate(location, Some(trimmed))))
    }

    /// Build the next point, fetch its legs and commit both.
    ///
    /// Network calls run without holding the workspace lock; the session
    /// state guarantees no other writer can interleave.
    fn append<F>(&self, build: F) -> Result<PointId, SessionError>
    where
        F: FnOnce(&PointStore) -> Result<Point, SessionError>,
    {
        let (point, existing) = {
            let workspace = self.lock_workspace();
            (build(&workspace.store)?, workspace.store.points().to_vec())
        };
        let legs = self.travel_time.legs(&point, &existing)?;

        let mut workspace = self.lock_workspace();
        workspace.matrix.push_legs(legs)?;
        Ok(workspace.store.append(point))
    }

    fn finish_add(
        &self,
        previous: SessionState,
        outcome: Result<PointId, SessionError>,
    ) -> Result<PointId, SessionError> {
        let mut status = self.write_status();
        match &outcome {
            Ok(id) => {
                status.state = SessionState::Ready;
                status.points = id.index().saturating_add(1);
                status.result = None;
                log::info!("point {id} added; {} points ready", status.points);
            }
            Err(err) => {
                status.state = previous;
                status.last_error = Some(err.clone());
                log::warn!("add point failed: {err}");
            }
        }
        outcome
    }

    fn run_solver(&self) -> Result<SolveResult, SessionError> {
        let matrix = self.durations();
        log::debug!(
            "solving {} points as {}",
            matrix.dimension(),
            self.config.trip_mode
        );
        Ok(self.solver.solve(&matrix, self.config.trip_mode)?)
    }

    fn finish_solve(
        &self,
        previous: SessionState,
        outcome: Result<SolveResult, SessionError>,
    ) -> Result<SolveResult, SessionError> {
        let mut status = self.write_status();
        match &outcome {
            Ok(result) => {
                status.state = SessionState::Done;
                status.result = Some(result.clone());
                log::info!(
                    "solved tour {} in {}s",
                    result.tour,
                    result.total_duration_secs()
                );
            }
            Err(err) => {
                status.state = previous;
                status.last_error = Some(err.clone());
                log::warn!("solve failed: {err}");
            }
        }
        outcome
    }

    fn abort(&self, previous: SessionState, err: &std::io::Error) -> SessionError {
        let error = SessionError::Worker {
            message: err.to_string(),
        };
        let mut status = self.write_status();
        status.state = previous;
        status.last_error = Some(error.clone());
        error
    }

    fn read_status(&self) -> RwLockReadGuard<'_, Status> {
        self.status.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_status(&self) -> RwLockWriteGuard<'_, Status> {
        self.status.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_workspace(&self) -> MutexGuard<'_, Workspace> {
        self.workspace.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<G, T, S> Session<G, T, S>
where
    G: Geocoder + Send + Sync + 'static,
    T: TravelTimeProvider + Send + Sync + 'static,
    S: TourSolver + Send + Sync + 'static,
{
    /// Start adding `address` on a worker thread.
    ///
    /// The session is `AwaitingGeocode` before this returns, so a poller
    /// never observes a stale `Ready`. The handle yields the outcome of
    /// [`add_point`](Self::add_point); failures are also kept in
    /// [`last_error`](Self::last_error).
    ///
    /// # Errors
    ///
    /// Returns the same rejections as [`add_point`](Self::add_point)
    /// synchronously, and [`SessionError::Worker`] if no thread could be
    /// started.
    pub fn spawn_add_point(
        self: &Arc<Self>,
        address: impl Into<String>,
    ) -> Result<JoinHandle<Result<PointId, SessionError>>, SessionError> {
        let previous = self.begin_add()?;
        let session = Arc::clone(self);
        let owned = address.into();
        thread::Builder::new()
            .name("optiroute-add-point".to_owned())
            .spawn(move || {
                let outcome = session.geocode_and_append(&owned);
                session.finish_add(previous, outcome)
            })
            .map_err(|err| self.abort(previous, &err))
    }

    /// Start solving on a worker thread.
    ///
    /// The session is `Solving` before this returns.
    ///
    /// # Errors
    ///
    /// Returns the same rejections as [`solve`](Self::solve) synchronously,
    /// and [`SessionError::Worker`] if no thread could be started.
    pub fn spawn_solve(
        self: &Arc<Self>,
    ) -> Result<JoinHandle<Result<SolveResult, SessionError>>, SessionError> {
        let previous = self.begin_solve()?;
        let session = Arc::clone(self);
        thread::Builder::new()
            .name("optiroute-solve".to_owned())
            .spawn(move || {
                let outcome = session.run_solver();
                session.finish_solve(previous, outcome)
            })
            .map_err(|err| self.abort(previous, &err))
    }
}
