//! Test helpers for composing stop lists, gazetteers and stub collaborators.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use optiroute_core::test_support::{AsymmetricTravelTimeProvider, StaticGeocoder};
use tempfile::TempDir;

use crate::plan::{BoxedGeocoder, BoxedTravelTime, CollaboratorBuilder, PlanConfig};
use super::*;

/// Four known places around downtown Palo Alto.
pub(super) const GAZETTEER_JSON: &str = r#"[
    { "address": "250 University Ave", "lat": 37.4477, "lng": -122.1601 },
    { "address": "Palo Alto Caltrain", "lat": 37.4436, "lng": -122.1651 },
    { "address": "Rinconada Library", "lat": 37.4443, "lng": -122.1467 },
    { "address": "Eleanor Pardee Park", "lat": 37.4535, "lng": -122.1461 }
]"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// A temporary directory holding the files a plan invocation reads.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Writes `lines` as a stop list and returns its path.
    pub(super) fn stops(&self, lines: &[&str]) -> Utf8PathBuf {
        let path = self.path("stops.txt");
        write_utf8(&path, lines.join("\n").as_bytes());
        path
    }

    /// Writes [`GAZETTEER_JSON`] and returns its path.
    pub(super) fn gazetteer(&self) -> Utf8PathBuf {
        let path = self.path("gazetteer.json");
        write_utf8(&path, GAZETTEER_JSON.as_bytes());
        path
    }
}

/// Collaborators that never touch the network: a fixed address table and
/// direction-dependent integer legs.
pub(super) struct StubCollaborators;

impl CollaboratorBuilder for StubCollaborators {
    fn geocoder(&self, _config: &PlanConfig) -> Result<BoxedGeocoder, CliError> {
        Ok(Box::new(StaticGeocoder::new([
            ("depot", Coord { x: 0.0, y: 0.0 }),
            ("north", Coord { x: 0.0, y: 1.0 }),
            ("east", Coord { x: 1.0, y: 0.0 }),
        ])))
    }

    fn travel_time(&self, _config: &PlanConfig) -> Result<BoxedTravelTime, CliError> {
        Ok(Box::new(AsymmetricTravelTimeProvider))
    }
}
