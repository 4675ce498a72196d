#![expect(
    clippy::expect_used,
    reason = "integration tests use expect for readable failures"
)]

//! A point store and distance matrix grown by hand, without a session.

use geo::Coord;
use optiroute_core::test_support::{
    AsymmetricTravelTimeProvider, InsertionOrderSolver, StaticGeocoder,
};
use optiroute_core::{DistanceMatrix, PointId, PointStore, Session, TravelTimeError};
use rstest::{fixture, rstest};

#[fixture]
fn geocoder() -> StaticGeocoder {
    StaticGeocoder::new([
        ("depot", Coord { x: 0.0, y: 0.0 }),
        ("north", Coord { x: 0.0, y: 1.0 }),
        ("east", Coord { x: 1.0, y: 0.0 }),
    ])
}

#[rstest]
fn store_and_matrix_grow_like_a_session(geocoder: StaticGeocoder) {
    let provider = AsymmetricTravelTimeProvider;
    let mut store = PointStore::new();
    let mut matrix = DistanceMatrix::new();

    for address in ["depot", "north"] {
        let before = store.points().to_vec();
        let id = store.add_point(&geocoder, address).expect("known address");
        let point = store.get(id).expect("just appended").clone();
        matrix
            .extend(&point, &before, &provider)
            .expect("legs fetched");
    }
    let before = store.points().to_vec();
    let id = store.add_location(Coord { x: 2.0, y: 2.0 }, Some("warehouse"));
    let point = store.get(id).expect("just appended").clone();
    matrix
        .extend(&point, &before, &provider)
        .expect("legs fetched");

    let session = Session::new(geocoder, provider, InsertionOrderSolver);
    session.add_point("depot").expect("known address");
    session.add_point("north").expect("known address");
    session
        .add_location(Coord { x: 2.0, y: 2.0 }, Some("warehouse"))
        .expect("idle enough to add");

    assert_eq!(store.count(), 3);
    assert_eq!(store.points(), session.points().as_slice());
    assert_eq!(matrix, session.durations());
    assert_eq!(
        matrix.get(PointId::new(1), PointId::new(2)).map(|leg| leg.as_secs()),
        Some(6)
    );
}

#[rstest]
fn extend_rejects_a_stale_existing_list(geocoder: StaticGeocoder) {
    let provider = AsymmetricTravelTimeProvider;
    let mut store = PointStore::new();
    let mut matrix = DistanceMatrix::new();
    let depot = store.add_point(&geocoder, "depot").expect("known address");
    let point = store.get(depot).expect("just appended").clone();

    let err = matrix
        .extend(&point, store.points(), &provider)
        .expect_err("matrix is still empty");

    assert_eq!(
        err,
        TravelTimeError::DimensionMismatch {
            expected: 0,
            found: 1,
        }
    );
    assert_eq!(matrix.dimension(), 0);
}
