//! Error types emitted by the Optiroute CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use optiroute_core::{ParseTravelModeError, ParseTripModeError, SessionError};
use optiroute_data::{ClientBuildError, GazetteerError};
use thiserror::Error;

/// Errors emitted by the Optiroute CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the option.
        field: &'static str,
        /// Environment variable that also sets it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Name of the option holding the path.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Name of the option holding the path.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Name of the option holding the path.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Both geocoder sources were configured.
    #[error("set either --gazetteer or --nominatim-url, not both")]
    ConflictingGeocoders,
    /// The trip mode option is not recognised.
    #[error(transparent)]
    InvalidTripMode(#[from] ParseTripModeError),
    /// The travel mode option is not recognised.
    #[error(transparent)]
    InvalidTravelMode(#[from] ParseTravelModeError),
    /// Reading the stop list failed.
    #[error("failed to read stops from {path:?}: {source}")]
    ReadStops {
        /// Stop list path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The stop list holds no stops.
    #[error("stop list {path:?} contains no stops")]
    NoStops {
        /// Stop list path.
        path: Utf8PathBuf,
    },
    /// Loading the gazetteer failed.
    #[error("failed to load gazetteer: {0}")]
    LoadGazetteer(#[from] GazetteerError),
    /// Constructing an HTTP collaborator failed.
    #[error("failed to build {service} client for {base_url:?}: {source}")]
    BuildClient {
        /// Which collaborator was being built.
        service: &'static str,
        /// Base URL as configured.
        base_url: String,
        /// Underlying construction failure.
        #[source]
        source: ClientBuildError,
    },
    /// A stop could not be added to the session.
    #[error("stop on line {line} rejected: {source}")]
    AddStop {
        /// 1-based line in the stop list.
        line: usize,
        /// Session failure.
        #[source]
        source: Box<SessionError>,
    },
    /// The session could not solve the trip.
    #[error("failed to solve the trip: {0}")]
    Solve(#[source] Box<SessionError>),
    /// Serialising the trip report failed.
    #[error("failed to serialise trip report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing the trip report failed.
    #[error("failed to write trip report: {0}")]
    WriteReport(#[source] std::io::Error),
    /// Writing the durations CSV failed.
    #[error("failed to write durations to {path:?}: {source}")]
    WriteDurations {
        /// Destination path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
}
