//! Criterion benchmarks for the local-search solver.
//!
//! Measures solve time for the interactive sizes a session sees (up to 25
//! points) and a few larger instances to track how 2-opt scales.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package optiroute-solver-local
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use optiroute_core::{TourSolver, TripMode};
use optiroute_solver_local::LocalSearchSolver;


use bench_support::{BENCHMARK_SEED, all_points_valid, build_matrix, generate_clustered_points};

/// Problem sizes to benchmark.
const PROBLEM_SIZES: &[usize] = &[10, 25, 50, 100];

/// Benchmark solve times for both trip modes.
///
/// Inputs are generated outside the measured loop, so only construction and
/// improvement are timed.
fn bench_solve_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_time");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(5));

    let solver = LocalSearchSolver::default();
    for &size in PROBLEM_SIZES {
        let points = generate_clustered_points(size, BENCHMARK_SEED);
        assert!(all_points_valid(&points), "generated points must be valid");
        let matrix = build_matrix(&points);

        let throughput_size = u64::try_from(size).unwrap_or(u64::MAX);
        group.throughput(Throughput::Elements(throughput_size));
        for mode in [TripMode::RoundTrip, TripMode::AToZ] {
            group.bench_with_input(BenchmarkId::new(mode.as_str(), size), &size, |b, _| {
                b.iter(|| {
                    #[expect(
                        clippy::let_underscore_must_use,
                        reason = "Benchmarking solve performance, result is intentionally discarded"
                    )]
                    let _ = solver.solve(&matrix, mode);
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_solve_times);
criterion_main!(benches);
