use thiserror::Error;

/// Errors from [`crate::geocode::Geocoder::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The address was blank.
    #[error("address must not be empty")]
    EmptyAddress,

    /// No location matches the address.
    #[error("no location found for address {address:?}")]
    NotFound {
        /// The address that failed to resolve.
        address: String,
    },

    /// A network error occurred while contacting the geocoding service.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// The URL that was requested.
        url: String,
        /// Description of the network failure.
        message: String,
    },

    /// The geocoding service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
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

    /// The service response could not be decoded.
    #[error("failed to parse geocoding response: {message}")]
    Parse {
        /// Description of the parse failure.
        message: String,
    },
}
