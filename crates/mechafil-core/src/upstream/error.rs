//! Simulation service errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Service could not be reached at all
    #[error("UPSTREAM_UNAVAILABLE: could not connect to mechafil-server at {url}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request did not complete within its timeout
    #[error("UPSTREAM_TIMEOUT: request to {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Service answered with a non-success status
    #[error("UPSTREAM_HTTP_ERROR: HTTP {status} from {url}")]
    Status {
        url: String,
        status: u16,
        /// Response body, if it could be read
        body: Option<String>,
    },

    /// Response body is not JSON
    #[error("UPSTREAM_INVALID_RESPONSE: response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Any other transport failure
    #[error("UPSTREAM_REQUEST_FAILED: request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Base URL and endpoint do not form a valid URL
    #[error("UPSTREAM_INVALID_URL: {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: ::url::ParseError,
    },

    /// Simulation input rejected before sending
    #[error("INVALID_INPUT: {field}: {reason}")]
    InvalidRequest { field: String, reason: String },
}

impl UpstreamError {
    /// Classify a transport-level failure for `url`
    pub fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        if source.is_timeout() {
            UpstreamError::Timeout { url, source }
        } else if source.is_connect() {
            UpstreamError::Connect { url, source }
        } else {
            UpstreamError::Request { url, source }
        }
    }

    /// URL the failing request targeted, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            UpstreamError::Connect { url, .. }
            | UpstreamError::Timeout { url, .. }
            | UpstreamError::Status { url, .. }
            | UpstreamError::Decode { url, .. }
            | UpstreamError::Request { url, .. }
            | UpstreamError::InvalidUrl { url, .. } => Some(url),
            UpstreamError::InvalidRequest { .. } => None,
        }
    }
}
