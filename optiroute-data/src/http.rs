//! Blocking JSON-over-HTTP client shared by the routing and geocoding
//! collaborators.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

/// Error building an HTTP-backed collaborator.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The configured base URL is not a valid absolute URL.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        #[source]
        source: url::ParseError,
    },
}

/// Why a request failed, before it is mapped onto a domain error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RequestFailure {
    Timeout { timeout_secs: u64 },
    Status { status: u16, message: String },
    Network { message: String },
    Parse { message: String },
}

/// A `reqwest` client plus the runtime used to drive it synchronously.
pub(crate) struct BlockingClient {
    client: Client,
    runtime: Runtime,
    timeout: Duration,
}

impl std::fmt::Debug for BlockingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingClient")
            .field("client", &self.client)
            .field("timeout", &self.timeout)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl BlockingClient {
    pub(crate) fn new(timeout: Duration, user_agent: &str) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ClientBuildError::Runtime)?;
        Ok(Self {
            client,
            runtime,
            timeout,
        })
    }

    /// GET `url` and decode the JSON body.
    pub(crate) fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, RequestFailure> {
        log::debug!("GET {url}");
        self.block_on(self.fetch_json(url))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, RequestFailure> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.classify(&err))?
            .error_for_status()
            .map_err(|err| self.classify(&err))?;
        response.json().await.map_err(|err| RequestFailure::Parse {
            message: err.to_string(),
        })
    }

    fn classify(&self, error: &reqwest::Error) -> RequestFailure {
        if error.is_timeout() {
            return RequestFailure::Timeout {
                timeout_secs: self.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return RequestFailure::Status {
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        RequestFailure::Network {
            message: error.to_string(),
        }
    }

    /// Drive `future` to completion from synchronous code.
    ///
    /// Inside a multi-threaded Tokio runtime the caller's handle is used via
    /// `block_in_place`; otherwise (no runtime, or a `current_thread` one)
    /// the owned runtime runs the future.
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

/// Parse a configured base URL, dropping any trailing slash.
pub(crate) fn parse_base_url(base_url: &str) -> Result<String, ClientBuildError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    Url::parse(trimmed)
        .map(|_| trimmed.to_owned())
        .map_err(|source| ClientBuildError::InvalidBaseUrl {
            url: base_url.to_owned(),
            source,
        })
}
