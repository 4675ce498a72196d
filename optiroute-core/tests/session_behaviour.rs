#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for the planning session state machine.

use std::cell::RefCell;

use geo::Coord;
use optiroute_core::test_support::{InsertionOrderSolver, StaticGeocoder};
use optiroute_core::{
    GeocodeError, HaversineTravelTime, Operation, Session, SessionError, SessionState,
    SolveResult,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

type TestSession = Session<StaticGeocoder, HaversineTravelTime, InsertionOrderSolver>;

/// World state for session scenarios.
struct SessionWorld {
    session: TestSession,
    outcome: RefCell<Option<Result<(), SessionError>>>,
    result: RefCell<Option<SolveResult>>,
}

#[fixture]
fn world() -> SessionWorld {
    let geocoder = StaticGeocoder::new([
        ("depot", Coord { x: -122.1612, y: 37.4466 }),
        ("library", Coord { x: -122.1588, y: 37.4465 }),
        ("station", Coord { x: -122.1650, y: 37.4430 }),
    ]);
    SessionWorld {
        session: Session::new(geocoder, HaversineTravelTime::default(), InsertionOrderSolver),
        outcome: RefCell::new(None),
        result: RefCell::new(None),
    }
}

fn last_failure(world: &SessionWorld) -> SessionError {
    world
        .outcome
        .borrow()
        .clone()
        .expect("an operation should have run")
        .expect_err("the operation should have failed")
}

#[given("an idle session")]
fn given_idle(world: &SessionWorld) {
    assert_eq!(world.session.state(), SessionState::Idle);
}

#[when("I add the address {address}")]
fn when_add(world: &SessionWorld, address: String) {
    let outcome = world.session.add_point(address.trim_matches('"')).map(|_| ());
    world.outcome.replace(Some(outcome));
}

#[when("I solve the session")]
fn when_solve(world: &SessionWorld) {
    let outcome = world.session.solve().map(|result| {
        world.result.replace(Some(result));
    });
    world.outcome.replace(Some(outcome));
}

#[then("the session is ready")]
fn then_ready(world: &SessionWorld) {
    assert!(world.session.is_ready());
}

#[then("the session is not done")]
fn then_not_done(world: &SessionWorld) {
    assert!(!world.session.is_done());
}

#[then("the session is done")]
fn then_done(world: &SessionWorld) {
    assert!(world.session.is_done());
}

#[then("the session is idle")]
fn then_idle(world: &SessionWorld) {
    assert_eq!(world.session.state(), SessionState::Idle);
    assert_eq!(world.session.point_count(), 0);
}

#[then("the tour is {tour}")]
fn then_tour(world: &SessionWorld, tour: String) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("solve should succeed");
    assert_eq!(result.tour.to_string(), tour.trim_matches('"'));
    assert_eq!(
        world.session.total_duration().expect("session is done"),
        result.total_duration
    );
}

#[then("a geocode error is reported")]
fn then_geocode_error(world: &SessionWorld) {
    let err = last_failure(world);
    assert!(
        matches!(
            err,
            SessionError::Geocode {
                source: GeocodeError::NotFound { .. },
                ..
            }
        ),
        "unexpected error: {err}"
    );
    assert_eq!(world.session.last_error(), Some(err));
}

#[then("an empty input error is reported")]
fn then_empty_input(world: &SessionWorld) {
    assert_eq!(last_failure(world), SessionError::EmptyInput);
}

#[then("querying the total duration is rejected")]
fn then_query_rejected(world: &SessionWorld) {
    assert_eq!(
        world.session.total_duration(),
        Err(SessionError::InvalidOperation {
            operation: Operation::Query,
            state: SessionState::Ready,
        })
    );
}

#[scenario(path = "tests/features/session.feature", index = 0)]
fn ready_after_add(world: SessionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/session.feature", index = 1)]
fn solve_closed_tour(world: SessionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/session.feature", index = 2)]
fn unknown_address(world: SessionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/session.feature", index = 3)]
fn empty_solve(world: SessionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/session.feature", index = 4)]
fn query_before_done(world: SessionWorld) {
    let _ = world;
}
