use thiserror::Error;

/// Errors from [`crate::travel_time::TravelTimeProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TravelTimeError {
    /// No points were provided.
    ///
    /// Providers that compute whole matrices require at least one point.
    #[error("at least one point is required")]
    EmptyInput,

    /// A coordinate was not a valid WGS84 position.
    #[error("invalid coordinate for point {index}: ({lat}, {lng})")]
    InvalidCoordinate {
        /// Index of the offending point.
        index: usize,
        /// Latitude as text, preserving NaN and infinities.
        lat: String,
        /// Longitude as text, preserving NaN and infinities.
        lng: String,
    },

    /// Provider parameters were rejected.
    #[error("invalid travel time configuration: {message}")]
    InvalidConfiguration {
        /// Description of the invalid setting.
        message: String,
    },

    /// A matrix or leg vector had the wrong size.
    #[error("expected {expected} entries but found {found}")]
    DimensionMismatch {
        /// Number of entries required.
        expected: usize,
        /// Number of entries supplied.
        found: usize,
    },

    /// A network error occurred while contacting the routing service.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// The URL that was requested.
        url: String,
        /// Description of the network failure.
        message: String,
    },

    /// The routing service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// The URL that was requested.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The request timed out.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// The URL that was requested.
        url: String,
        /// Timeout that elapsed.
        timeout_secs: u64,
    },

    /// The routing service reported an error in its response body.
    #[error("routing service error {code}: {message}")]
    ServiceError {
        /// Service-specific status code.
        code: String,
        /// Human-readable message from the service.
        message: String,
    },

    /// The service response could not be decoded.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Description of the parse failure.
        message: String,
    },
}
