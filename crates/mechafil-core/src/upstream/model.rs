//! Request payloads for `POST /simulate`

use super::error::UpstreamError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A constant value or a per-day series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RateInput {
    Constant(f64),
    Series(Vec<f64>),
}

impl RateInput {
    fn values(&self) -> &[f64] {
        match self {
            RateInput::Constant(v) => std::slice::from_ref(v),
            RateInput::Series(values) => values,
        }
    }
}

/// Simulation inputs; every field is optional and omitted when unset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SimulateRequest {
    /// Raw byte power onboarding (PIB/day), constant or array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rbp: Option<RateInput>,
    /// Renewal rate (0..1), constant or array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rr: Option<RateInput>,
    /// FIL+ rate (0..1), constant or array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fpr: Option<RateInput>,
    /// Target lock ratio (e.g. 0.3), constant or array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_target: Option<RateInput>,
    /// Forecast length in days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast_length_days: Option<u32>,
    /// Average sector duration in days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector_duration_days: Option<u32>,
}

impl SimulateRequest {
    /// Check ranges the service would otherwise fail on mid-simulation
    pub fn validate(&self) -> Result<(), UpstreamError> {
        check_rate("rbp", self.rbp.as_ref(), 0.0, f64::INFINITY)?;
        check_rate("rr", self.rr.as_ref(), 0.0, 1.0)?;
        check_rate("fpr", self.fpr.as_ref(), 0.0, 1.0)?;
        check_rate("lock_target", self.lock_target.as_ref(), 0.0, f64::INFINITY)?;
        check_days("forecast_length_days", self.forecast_length_days)?;
        check_days("sector_duration_days", self.sector_duration_days)?;
        Ok(())
    }
}

fn check_rate(
    field: &str,
    input: Option<&RateInput>,
    min: f64,
    max: f64,
) -> Result<(), UpstreamError> {
    let Some(input) = input else {
        return Ok(());
    };

    let values = input.values();
    if values.is_empty() {
        return Err(invalid(field, "array must not be empty"));
    }

    for (i, value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(invalid(field, format!("value at index {} is not finite", i)));
        }
        if *value < min || *value > max {
            let range = if max.is_finite() {
                format!("between {} and {}", min, max)
            } else {
                format!("at least {}", min)
            };
            return Err(invalid(
                field,
                format!("value {} at index {} must be {}", value, i, range),
            ));
        }
    }
    Ok(())
}

fn check_days(field: &str, days: Option<u32>) -> Result<(), UpstreamError> {
    match days {
        Some(0) => Err(invalid(field, "must be a positive number of days")),
        _ => Ok(()),
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> UpstreamError {
    UpstreamError::InvalidRequest {
        field: field.to_string(),
        reason: reason.into(),
    }
}
