//! Local-search tour solver for Optiroute.
//!
//! This crate provides [`LocalSearchSolver`], the default implementation of
//! the [`TourSolver`](optiroute_core::TourSolver) trait. It builds an initial
//! tour with the nearest-neighbour rule and improves it with best-improvement
//! 2-opt until no move helps or the pass budget runs out.
//!
//! Everything is deterministic: ties are broken by lowest point index during
//! construction and by first-found move during improvement, so a fixed matrix
//! always yields the same tour.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod construction;
mod cost;
mod solver;
mod two_opt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use solver::{LocalSearchConfig, LocalSearchSolver};
