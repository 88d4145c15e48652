//! HTTP client construction and the simulation service calls

use super::error::UpstreamError;
use super::model::SimulateRequest;
use super::url::endpoint_url;
use crate::config::UpstreamConfig;
use crate::config::consts::upstream::{HISTORICAL_DATA_PATH, SIMULATE_PATH, USER_AGENT};
use ::url::Url;
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::time::Duration;

/// Builds an HTTP client with the given timeout
///
/// # Errors
///
/// Returns error if client construction fails
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Calls into mechafil-server
///
/// Holds no connection state: every call builds its own blocking client with
/// the endpoint's timeout, so a client value can be created and dropped from
/// async code as long as the calls themselves run on a blocking thread.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    base: Url,
    config: UpstreamConfig,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> crate::Result<Self> {
        Ok(Self {
            base: config.base_url()?,
            config: config.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `GET /historical-data`
    pub fn historical_data(&self) -> Result<Value, UpstreamError> {
        let url = endpoint_url(&self.base, HISTORICAL_DATA_PATH)?;
        tracing::debug!("GET {}", url);
        let client = self.client(self.config.historical_timeout(), url.as_str())?;
        let response = client
            .get(url.as_str())
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| UpstreamError::from_reqwest(url.as_str(), e))?;
        read_json(url.as_str(), response)
    }

    /// `POST /simulate`
    ///
    /// The request is validated first; nothing is sent for invalid input.
    pub fn simulate(&self, request: &SimulateRequest) -> Result<Value, UpstreamError> {
        request.validate()?;
        let url = endpoint_url(&self.base, SIMULATE_PATH)?;
        tracing::debug!("POST {}", url);
        let client = self.client(self.config.simulate_timeout(), url.as_str())?;
        let response = client
            .post(url.as_str())
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .map_err(|e| UpstreamError::from_reqwest(url.as_str(), e))?;
        read_json(url.as_str(), response)
    }

    /// Touch the service so a scaled-to-zero deployment starts up
    ///
    /// Any HTTP answer counts as awake. Returns the status code.
    pub fn wake(&self) -> Result<u16, UpstreamError> {
        let url = endpoint_url(&self.base, &self.config.wake_path)?;
        tracing::debug!("GET {} (wake)", url);
        let client = self.client(self.config.wake_timeout(), url.as_str())?;
        let response = client
            .get(url.as_str())
            .send()
            .map_err(|e| UpstreamError::from_reqwest(url.as_str(), e))?;
        Ok(response.status().as_u16())
    }

    fn client(&self, timeout: Duration, url: &str) -> Result<Client, UpstreamError> {
        build_client(timeout).map_err(|e| UpstreamError::from_reqwest(url, e))
    }
}

/// Check the status and decode the body as JSON
fn read_json(url: &str, response: Response) -> Result<Value, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().ok().filter(|b| !b.is_empty());
        tracing::debug!("{} answered HTTP {}", url, status.as_u16());
        return Err(UpstreamError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    let text = response
        .text()
        .map_err(|e| UpstreamError::from_reqwest(url, e))?;
    serde_json::from_str(&text).map_err(|source| UpstreamError::Decode {
        url: url.to_string(),
        source,
    })
}
