//! Blocking client for the mechafil simulation service
//!
//! - `GET /historical-data`: smoothed metrics, historical arrays and offline data
//! - `POST /simulate`: forecast simulation; omitted inputs are derived upstream
//! - wake request: best-effort GET that spins up a cold service

pub mod client;
pub mod error;
pub mod model;
pub mod url;

pub use client::{UpstreamClient, build_client};
pub use error::UpstreamError;
pub use model::{RateInput, SimulateRequest};
pub use url::endpoint_url;
