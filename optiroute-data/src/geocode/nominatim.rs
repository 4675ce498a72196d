//! `Geocoder` backed by the Nominatim search API.

use std::time::Duration;

use geo::Coord;
use optiroute_core::{GeocodeError, Geocoder};
use serde::Deserialize;
use url::Url;

use crate::http::{BlockingClient, ClientBuildError, RequestFailure, parse_base_url};
use crate::routing::DEFAULT_USER_AGENT;

/// Public Nominatim instance operated by OpenStreetMap.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`NominatimGeocoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NominatimConfig {
    /// Base URL of the Nominatim service.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string; Nominatim's usage policy requires one that
    /// identifies the application.
    pub user_agent: String,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NOMINATIM_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl NominatimConfig {
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
}

/// One search hit. Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// Resolves addresses with `GET {base_url}/search?q=..&format=jsonv2&limit=1`.
///
/// The first hit wins; an empty result list is [`GeocodeError::NotFound`].
#[derive(Debug)]
pub struct NominatimGeocoder {
    http: BlockingClient,
    base_url: String,
}

impl NominatimGeocoder {
    /// Create a geocoder for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(NominatimConfig::new(base_url))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn with_config(config: NominatimConfig) -> Result<Self, ClientBuildError> {
        let base_url = parse_base_url(&config.base_url)?;
        let http = BlockingClient::new(config.timeout, &config.user_agent)?;
        Ok(Self { http, base_url })
    }

    fn search_url(&self, address: &str) -> Result<Url, GeocodeError> {
        let endpoint = format!("{}/search", self.base_url);
        Url::parse_with_params(
            &endpoint,
            [("q", address), ("format", "jsonv2"), ("limit", "1")],
        )
        .map_err(|err| GeocodeError::Parse {
            message: format!("cannot build search URL from {endpoint:?}: {err}"),
        })
    }
}

impl Geocoder for NominatimGeocoder {
    fn resolve(&self, address: &str) -> Result<Coord<f64>, GeocodeError> {
        let query = address.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }
        let url = self.search_url(query)?;
        let hits: Vec<SearchHit> = self
            .http
            .get_json(&url)
            .map_err(|failure| geocode_error(failure, &url))?;
        let hit = hits.into_iter().next().ok_or_else(|| GeocodeError::NotFound {
            address: query.to_owned(),
        })?;
        parse_hit(&hit)
    }
}

fn parse_hit(hit: &SearchHit) -> Result<Coord<f64>, GeocodeError> {
    let parse = |value: &str, axis: &str| {
        value.trim().parse::<f64>().map_err(|err| GeocodeError::Parse {
            message: format!("invalid {axis} {value:?}: {err}"),
        })
    };
    Ok(Coord {
        x: parse(&hit.lon, "longitude")?,
        y: parse(&hit.lat, "latitude")?,
    })
}

fn geocode_error(failure: RequestFailure, target: &Url) -> GeocodeError {
    let url = target.to_string();
    match failure {
        RequestFailure::Timeout { timeout_secs } => GeocodeError::Timeout { url, timeout_secs },
        RequestFailure::Status { status, message } => GeocodeError::Http {
            url,
            status,
            message,
        },
        RequestFailure::Network { message } => GeocodeError::Network { url, message },
        RequestFailure::Parse { message } => GeocodeError::Parse { message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn search_url_encodes_the_query() {
        let geocoder = NominatimGeocoder::new("https://nominatim.example.org/")
            .expect("geocoder should build");

        let url = geocoder
            .search_url("1 Main St, Palo Alto & Co")
            .expect("valid URL");

        assert_eq!(
            url.as_str(),
            "https://nominatim.example.org/search\
             ?q=1+Main+St%2C+Palo+Alto+%26+Co&format=jsonv2&limit=1"
        );
    }

    #[rstest]
    fn blank_addresses_are_rejected_without_a_request() {
        let geocoder =
            NominatimGeocoder::new("http://127.0.0.1:9").expect("geocoder should build");

        assert_eq!(geocoder.resolve(" \t "), Err(GeocodeError::EmptyAddress));
    }

    #[rstest]
    fn hits_are_parsed_as_lng_lat() {
        let hits: Vec<SearchHit> =
            serde_json::from_str(r#"[{"lat": "37.4419", "lon": "-122.1430", "display_name": "x"}]"#)
                .expect("valid JSON");
        let hit = hits.first().expect("one hit");

        assert_eq!(
            parse_hit(hit),
            Ok(Coord {
                x: -122.143,
                y: 37.4419
            })
        );
    }

    #[rstest]
    fn malformed_coordinates_are_parse_errors() {
        let hit = SearchHit {
            lat: "north".to_owned(),
            lon: "0".to_owned(),
        };

        assert!(matches!(parse_hit(&hit), Err(GeocodeError::Parse { .. })));
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = NominatimConfig::new("http://geo.example.com")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("trip-planner/2.0");

        assert_eq!(config.base_url, "http://geo.example.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "trip-planner/2.0");
    }
}
