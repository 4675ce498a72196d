//! Plan command implementation for the Optiroute CLI.

use std::io::Write;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use optiroute_core::{
    DistanceMatrix, Geocoder, HaversineTravelTime, Point, Session, SessionConfig, SolveResult,
    TravelMode, TravelTimeProvider, TripMode,
};
use optiroute_data::geocode::DEFAULT_NOMINATIM_URL;
use optiroute_data::{GazetteerGeocoder, NominatimGeocoder, OsrmConfig, OsrmTravelTimeProvider};
use optiroute_solver_local::LocalSearchSolver;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::format::format_duration;
use crate::input::{NumberedStop, Stop, parse_stops};
use crate::{
    ARG_AVOID_HIGHWAYS, ARG_DURATIONS_CSV, ARG_GAZETTEER, ARG_MAX_POINTS, ARG_NOMINATIM_URL,
    ARG_OSRM_BASE_URL, ARG_STOPS, ARG_TRAVEL_MODE, ARG_TRIP_MODE, CliError, ENV_STOPS,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan the fastest trip through a list of stops. Each line of \
                 the stop list is an address or a `lat, lng` pair; the first \
                 line is the starting point. Addresses are resolved through \
                 a gazetteer file or a Nominatim server and travel times come \
                 from an OSRM server or an offline haversine estimate.",
    about = "Plan the fastest trip through a list of stops"
)]
#[ortho_config(prefix = "OPTIROUTE")]
pub(crate) struct PlanArgs {
    /// Path to a text file with one stop per line.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) stops: Option<Utf8PathBuf>,
    /// Resolve addresses offline from a JSON gazetteer.
    #[arg(long = ARG_GAZETTEER, value_name = "path")]
    #[serde(default)]
    pub(crate) gazetteer: Option<Utf8PathBuf>,
    /// Base URL of a Nominatim server (used when no gazetteer is given).
    #[arg(long = ARG_NOMINATIM_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) nominatim_url: Option<String>,
    /// Base URL of an OSRM server; omit to use the haversine estimate.
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// `round-trip` (default) or `a-to-z`.
    #[arg(long = ARG_TRIP_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) trip_mode: Option<String>,
    /// `driving` (default), `walking` or `cycling`.
    #[arg(long = ARG_TRAVEL_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) travel_mode: Option<String>,
    /// Ask OSRM to route around motorways.
    #[arg(
        long = ARG_AVOID_HIGHWAYS,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) avoid_highways: Option<bool>,
    /// Reject stop lists longer than this.
    #[arg(long = ARG_MAX_POINTS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_points: Option<usize>,
    /// Also write the travel-time matrix as CSV seconds to this path.
    #[arg(long = ARG_DURATIONS_CSV, value_name = "path")]
    #[serde(default)]
    pub(crate) durations_csv: Option<Utf8PathBuf>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Where addresses are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GeocoderSource {
    Gazetteer(Utf8PathBuf),
    Nominatim(String),
}

/// Where travel times come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TravelTimeSource {
    Haversine,
    Osrm(String),
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the stop list.
    pub(crate) stops: Utf8PathBuf,
    pub(crate) geocoder: GeocoderSource,
    pub(crate) travel_time: TravelTimeSource,
    pub(crate) trip_mode: TripMode,
    /// Haversine speed profile, and the OSRM profile when routing remotely.
    pub(crate) travel_mode: TravelMode,
    /// Only honoured by OSRM routing.
    pub(crate) avoid_highways: bool,
    pub(crate) max_points: Option<usize>,
    /// Optional CSV destination for the travel-time matrix.
    pub(crate) durations_csv: Option<Utf8PathBuf>,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.stops, ARG_STOPS)?;
        if let GeocoderSource::Gazetteer(path) = &self.geocoder {
            Self::require_existing(path, ARG_GAZETTEER)?;
        }
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match optiroute_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn session_config(&self) -> SessionConfig {
        let config = SessionConfig::default().with_trip_mode(self.trip_mode);
        self.max_points
            .map_or(config, |max| config.with_max_points(max))
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let stops = args.stops.ok_or(CliError::MissingArgument {
            field: ARG_STOPS,
            env: ENV_STOPS,
        })?;

        let geocoder = match (args.gazetteer, args.nominatim_url) {
            (Some(_), Some(_)) => return Err(CliError::ConflictingGeocoders),
            (Some(path), None) => GeocoderSource::Gazetteer(path),
            (None, url) => GeocoderSource::Nominatim(
                url.unwrap_or_else(|| DEFAULT_NOMINATIM_URL.to_owned()),
            ),
        };
        let travel_time = args
            .osrm_base_url
            .map_or(TravelTimeSource::Haversine, TravelTimeSource::Osrm);

        let trip_mode = args
            .trip_mode
            .as_deref()
            .map(str::parse::<TripMode>)
            .transpose()?
            .unwrap_or_default();
        let travel_mode = args
            .travel_mode
            .as_deref()
            .map(str::parse::<TravelMode>)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            stops,
            geocoder,
            travel_time,
            trip_mode,
            travel_mode,
            avoid_highways: args.avoid_highways.unwrap_or_default(),
            max_points: args.max_points,
            durations_csv: args.durations_csv,
        })
    }
}

/// Geocoder handed to the planning session.
pub(crate) type BoxedGeocoder = Box<dyn Geocoder + Send + Sync>;
/// Travel-time provider handed to the planning session.
pub(crate) type BoxedTravelTime = Box<dyn TravelTimeProvider + Send + Sync>;

/// Builds the session collaborators for the current plan invocation.
pub(super) trait CollaboratorBuilder {
    fn geocoder(&self, config: &PlanConfig) -> Result<BoxedGeocoder, CliError>;
    fn travel_time(&self, config: &PlanConfig) -> Result<BoxedTravelTime, CliError>;
}

pub(super) struct DefaultCollaborators;

impl CollaboratorBuilder for DefaultCollaborators {
    fn geocoder(&self, config: &PlanConfig) -> Result<BoxedGeocoder, CliError> {
        match &config.geocoder {
            GeocoderSource::Gazetteer(path) => Ok(Box::new(GazetteerGeocoder::load(path)?)),
            GeocoderSource::Nominatim(base_url) => NominatimGeocoder::new(base_url.clone())
                .map(|geocoder| Box::new(geocoder) as BoxedGeocoder)
                .map_err(|source| CliError::BuildClient {
                    service: "geocoder",
                    base_url: base_url.clone(),
                    source,
                }),
        }
    }

    fn travel_time(&self, config: &PlanConfig) -> Result<BoxedTravelTime, CliError> {
        match &config.travel_time {
            TravelTimeSource::Haversine => {
                if config.avoid_highways {
                    log::warn!(
                        "--{ARG_AVOID_HIGHWAYS} has no effect without --{ARG_OSRM_BASE_URL}"
                    );
                }
                Ok(Box::new(HaversineTravelTime::for_mode(config.travel_mode)))
            }
            TravelTimeSource::Osrm(base_url) => {
                let osrm = OsrmConfig::new(base_url.clone())
                    .with_travel_mode(config.travel_mode)
                    .with_avoid_highways(config.avoid_highways);
                OsrmTravelTimeProvider::with_config(osrm)
                    .map(|provider| Box::new(provider) as BoxedTravelTime)
                    .map_err(|source| CliError::BuildClient {
                        service: "travel time",
                        base_url: base_url.clone(),
                        source,
                    })
            }
        }
    }
}

/// One stop in the trip report, in visiting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ReportStop {
    /// Position of the stop in the input list.
    pub(crate) index: usize,
    pub(crate) address: String,
    pub(crate) lat: f64,
    pub(crate) lng: f64,
}

/// JSON document printed by `plan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TripReport {
    pub(crate) trip_mode: TripMode,
    pub(crate) travel_mode: TravelMode,
    /// Visiting order as space-separated input indices.
    pub(crate) order: String,
    pub(crate) tour: Vec<usize>,
    pub(crate) total_seconds: u64,
    /// `total_seconds` in days, hours, minutes and seconds.
    pub(crate) total_duration: String,
    pub(crate) stops: Vec<ReportStop>,
}

impl TripReport {
    fn new(config: &PlanConfig, result: &SolveResult, points: &[Point]) -> Self {
        let stops = result
            .tour
            .stops()
            .iter()
            .filter_map(|id| points.get(id.index()))
            .map(|point| ReportStop {
                index: point.id().index(),
                address: point.address().to_owned(),
                lat: point.location().y,
                lng: point.location().x,
            })
            .collect();
        let total_seconds = result.total_duration_secs();
        Self {
            trip_mode: config.trip_mode,
            travel_mode: config.travel_mode,
            order: result.tour.to_string(),
            tour: result.tour.indices(),
            total_seconds,
            total_duration: format_duration(total_seconds),
            stops,
        }
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &DefaultCollaborators, &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn CollaboratorBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let stops = load_stops(&config.stops)?;
    let report = plan_trip(&config, &stops, builder)?;
    write_report(writer, &report)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Reads and parses the stop list at `path`.
pub(super) fn load_stops(path: &Utf8Path) -> Result<Vec<NumberedStop>, CliError> {
    let text = optiroute_fs::read_to_string(path).map_err(|source| CliError::ReadStops {
        path: path.to_path_buf(),
        source,
    })?;
    let stops = parse_stops(&text);
    if stops.is_empty() {
        return Err(CliError::NoStops {
            path: path.to_path_buf(),
        });
    }
    Ok(stops)
}

fn plan_trip(
    config: &PlanConfig,
    stops: &[NumberedStop],
    builder: &dyn CollaboratorBuilder,
) -> Result<TripReport, CliError> {
    let session = Session::with_config(
        builder.geocoder(config)?,
        builder.travel_time(config)?,
        LocalSearchSolver::default(),
        config.session_config(),
    );
    for numbered in stops {
        let added = match &numbered.stop {
            Stop::Address(address) => session.add_point(address),
            Stop::Location(location) => session.add_location(*location, None),
        };
        added.map_err(|source| CliError::AddStop {
            line: numbered.line,
            source: Box::new(source),
        })?;
    }

    let result = session
        .solve()
        .map_err(|source| CliError::Solve(Box::new(source)))?;
    log::info!(
        "planned {} stops ({}): {}",
        stops.len(),
        config.trip_mode,
        format_duration(result.total_duration_secs())
    );

    if let Some(path) = &config.durations_csv {
        write_durations(path, &session.durations())?;
    }
    Ok(TripReport::new(config, &result, &session.points()))
}

fn write_durations(path: &Utf8Path, matrix: &DistanceMatrix) -> Result<(), CliError> {
    optiroute_fs::write_file(path, durations_csv(matrix).as_bytes()).map_err(|source| {
        CliError::WriteDurations {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Renders the matrix as one `, `-separated row of whole seconds per line.
///
/// Unreachable legs are left empty.
pub(super) fn durations_csv(matrix: &DistanceMatrix) -> String {
    matrix.rows().fold(String::new(), |mut csv, row| {
        let cells: Vec<String> = row.iter().map(|leg| duration_cell(*leg)).collect();
        csv.push_str(&cells.join(", "));
        csv.push('\n');
        csv
    })
}

fn duration_cell(leg: Duration) -> String {
    if leg == Duration::MAX {
        String::new()
    } else {
        leg.as_secs().to_string()
    }
}

fn write_report(writer: &mut dyn Write, report: &TripReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteReport)?;
    writer.write_all(b"\n").map_err(CliError::WriteReport)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
