//! `TravelTimeProvider` backed by the OSRM Table API.

use std::time::Duration;

use optiroute_core::{
    Point, PointLegs, TravelMode, TravelTimeError, TravelTimeProvider, checked_location,
};
use url::Url;

use super::osrm::TableResponse;
use crate::http::{BlockingClient, ClientBuildError, RequestFailure, parse_base_url};

/// Default user agent for routing and geocoding requests.
pub const DEFAULT_USER_AGENT: &str = "optiroute/0.1";

/// Default base URL for a locally hosted OSRM instance.
pub const DEFAULT_OSRM_URL: &str = "http://localhost:5000";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`OsrmTravelTimeProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsrmConfig {
    /// Base URL for the OSRM service (e.g. `"http://localhost:5000"`).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Routing profile requested from the service.
    pub travel_mode: TravelMode,
    /// Route around motorways (`exclude=motorway`).
    pub avoid_highways: bool,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OSRM_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            travel_mode: TravelMode::default(),
            avoid_highways: false,
        }
    }
}

impl OsrmConfig {
    /// Create a configuration for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the routing profile.
    #[must_use]
    pub const fn with_travel_mode(mut self, travel_mode: TravelMode) -> Self {
        self.travel_mode = travel_mode;
        self
    }

    /// Ask the service to route around motorways.
    ///
    /// The OSRM profile must declare `motorway` as an excludable class;
    /// otherwise every table request fails with a service error.
    #[must_use]
    pub const fn with_avoid_highways(mut self, avoid_highways: bool) -> Self {
        self.avoid_highways = avoid_highways;
        self
    }
}

/// Travel times from an OSRM Table service.
///
/// Unreachable pairs (`null` in the response) and values that are not finite
/// and non-negative become [`Duration::MAX`], which tour costing saturates
/// on rather than failing.
#[derive(Debug)]
pub struct OsrmTravelTimeProvider {
    http: BlockingClient,
    base_url: String,
    travel_mode: TravelMode,
    avoid_highways: bool,
}

impl OsrmTravelTimeProvider {
    /// Create a provider for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(OsrmConfig::new(base_url))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn with_config(config: OsrmConfig) -> Result<Self, ClientBuildError> {
        let base_url = parse_base_url(&config.base_url)?;
        let http = BlockingClient::new(config.timeout, &config.user_agent)?;
        Ok(Self {
            http,
            base_url,
            travel_mode: config.travel_mode,
            avoid_highways: config.avoid_highways,
        })
    }

    /// Build a Table API URL restricted to the given sources and
    /// destinations.
    ///
    /// Format: `{base_url}/table/v1/{profile}/{lng,lat;...}?sources=..&destinations=..`,
    /// with `&exclude=motorway` appended when avoiding highways.
    fn table_url(
        &self,
        points: &[&Point],
        sources: &[usize],
        destinations: &[usize],
    ) -> Result<Url, TravelTimeError> {
        let coordinates = points
            .iter()
            .map(|point| checked_location(point).map(|loc| format!("{},{}", loc.x(), loc.y())))
            .collect::<Result<Vec<_>, _>>()?
            .join(";");
        let mut raw = format!(
            "{}/table/v1/{}/{}?sources={}&destinations={}&annotations=duration",
            self.base_url,
            self.travel_mode.as_str(),
            coordinates,
            join_indices(sources),
            join_indices(destinations),
        );
        if self.avoid_highways {
            raw.push_str("&exclude=motorway");
        }
        Url::parse(&raw).map_err(|err| TravelTimeError::InvalidConfiguration {
            message: format!("cannot build table URL {raw:?}: {err}"),
        })
    }

    fn fetch_table(
        &self,
        points: &[&Point],
        sources: &[usize],
        destinations: &[usize],
    ) -> Result<Vec<Vec<Duration>>, TravelTimeError> {
        let url = self.table_url(points, sources, destinations)?;
        let response: TableResponse = self
            .http
            .get_json(&url)
            .map_err(|failure| travel_time_error(failure, &url))?;
        convert_response(response, sources.len(), destinations.len())
    }
}

impl TravelTimeProvider for OsrmTravelTimeProvider {
    fn travel_time(&self, from: &Point, to: &Point) -> Result<Duration, TravelTimeError> {
        if from.id() == to.id() {
            return Ok(Duration::ZERO);
        }
        let table = self.fetch_table(&[from, to], &[0], &[1])?;
        Ok(table
            .into_iter()
            .flatten()
            .next()
            .unwrap_or(Duration::MAX))
    }

    /// Two table requests: every existing point to `point`, then `point` to
    /// every existing point.
    fn legs(&self, point: &Point, existing: &[Point]) -> Result<PointLegs, TravelTimeError> {
        if existing.is_empty() {
            return Ok(PointLegs::default());
        }
        let count = existing.len();
        let mut points: Vec<&Point> = existing.iter().collect();
        points.push(point);
        let others: Vec<usize> = (0..count).collect();

        let inbound = self
            .fetch_table(&points, &others, &[count])?
            .into_iter()
            .flatten()
            .collect();
        let outbound = self
            .fetch_table(&points, &[count], &others)?
            .into_iter()
            .flatten()
            .collect();
        let legs = PointLegs { inbound, outbound };
        legs.ensure_len(count)?;
        Ok(legs)
    }
}

fn join_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

fn travel_time_error(failure: RequestFailure, target: &Url) -> TravelTimeError {
    let url = target.to_string();
    match failure {
        RequestFailure::Timeout { timeout_secs } => TravelTimeError::Timeout { url, timeout_secs },
        RequestFailure::Status { status, message } => TravelTimeError::HttpError {
            url,
            status,
            message,
        },
        RequestFailure::Network { message } => TravelTimeError::NetworkError { url, message },
        RequestFailure::Parse { message } => TravelTimeError::ParseError { message },
    }
}

/// Convert a table response into a `rows x cols` duration grid.
fn convert_response(
    response: TableResponse,
    rows: usize,
    cols: usize,
) -> Result<Vec<Vec<Duration>>, TravelTimeError> {
    if !response.is_ok() {
        return Err(TravelTimeError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }
    let durations = response
        .durations
        .ok_or_else(|| TravelTimeError::ParseError {
            message: "OSRM response missing durations array".to_owned(),
        })?;
    if durations.len() != rows {
        return Err(TravelTimeError::DimensionMismatch {
            expected: rows,
            found: durations.len(),
        });
    }

    durations
        .into_iter()
        .map(|row| {
            if row.len() != cols {
                return Err(TravelTimeError::DimensionMismatch {
                    expected: cols,
                    found: row.len(),
                });
            }
            Ok(row.into_iter().map(to_duration).collect())
        })
        .collect()
}

fn to_duration(cell: Option<f64>) -> Duration {
    cell.and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
        .unwrap_or_else(|| {
            log::warn!("routing service reported an unreachable leg ({cell:?})");
            Duration::MAX
        })
}
