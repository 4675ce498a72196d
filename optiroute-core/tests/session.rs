#![expect(
    clippy::expect_used,
    reason = "integration tests use expect for readable failures"
)]

//! Session integration tests against the haversine travel-time estimate.

use std::sync::Arc;
use std::thread;

use geo::Coord;
use optiroute_core::test_support::{GatedGeocoder, InsertionOrderSolver, StaticGeocoder};
use optiroute_core::{
    HaversineTravelTime, PointId, Session, SessionState, TravelMode, TravelTimeProvider,
};
use rstest::rstest;

fn downtown() -> StaticGeocoder {
    StaticGeocoder::new([
        ("301 UNIVERSITY AVE", Coord { x: -122.1612, y: 37.4466 }),
        ("400 HAMILTON AVE", Coord { x: -122.1588, y: 37.4465 }),
        ("420 COWPER ST", Coord { x: -122.1584, y: 37.4494 }),
        ("600 QUARRY RD", Coord { x: -122.1700, y: 37.4380 }),
    ])
}

#[rstest]
fn incremental_matrix_matches_pairwise_estimates() {
    let provider = HaversineTravelTime::for_mode(TravelMode::Driving);
    let session = Session::new(downtown(), provider, InsertionOrderSolver);
    for address in ["301 UNIVERSITY AVE", "400 HAMILTON AVE", "420 COWPER ST", "600 QUARRY RD"] {
        session.add_point(address).expect("known address");
    }

    let points = session.points();
    let matrix = session.durations();
    assert_eq!(matrix.dimension(), points.len());
    for from in &points {
        for to in &points {
            let expected = provider.travel_time(from, to).expect("valid coordinates");
            assert_eq!(matrix.get(from.id(), to.id()), Some(expected));
        }
    }
}

#[rstest]
fn pollers_observe_consistent_states() {
    let session = Arc::new(Session::new(
        GatedGeocoder::new(downtown()),
        HaversineTravelTime::default(),
        InsertionOrderSolver,
    ));
    let handle = session
        .spawn_add_point("301 UNIVERSITY AVE")
        .expect("idle session accepts points");

    let pollers: Vec<_> = (0..4)
        .map(|_| {
            let reader = Arc::clone(&session);
            thread::spawn(move || {
                assert!(matches!(
                    reader.state(),
                    SessionState::AwaitingGeocode | SessionState::Ready
                ));
            })
        })
        .collect();

    session.geocoder().open();
    assert_eq!(
        handle.join().expect("worker completes"),
        Ok(PointId::DEPOT)
    );
    for poller in pollers {
        poller.join().expect("poller completes");
    }
    assert!(session.is_ready());

    let solved = session
        .spawn_solve()
        .expect("ready session solves")
        .join()
        .expect("worker completes")
        .expect("single point is solvable");
    assert_eq!(solved.tour.indices(), vec![0, 0]);
    assert!(session.is_done());
}
