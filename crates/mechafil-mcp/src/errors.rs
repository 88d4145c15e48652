use mechafil_core::error::MechafilError;
use mechafil_core::template::TemplateError;
use mechafil_core::upstream::UpstreamError;
use rmcp::ErrorData;
use serde_json::{Value, json};
use std::fmt::Display;

pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const TEMPLATE_NOT_FOUND: &str = "TEMPLATE_NOT_FOUND";
pub const TEMPLATE_READ_ERROR: &str = "TEMPLATE_READ_ERROR";
pub const INCLUDE_NOT_FOUND: &str = "INCLUDE_NOT_FOUND";
pub const INCLUDE_READ_ERROR: &str = "INCLUDE_READ_ERROR";
pub const INCOMPLETE_RENDER: &str = "INCOMPLETE_RENDER";
pub const UPSTREAM_UNAVAILABLE: &str = "UPSTREAM_UNAVAILABLE";
pub const UPSTREAM_TIMEOUT: &str = "UPSTREAM_TIMEOUT";
pub const UPSTREAM_HTTP_ERROR: &str = "UPSTREAM_HTTP_ERROR";
pub const UPSTREAM_INVALID_RESPONSE: &str = "UPSTREAM_INVALID_RESPONSE";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

const SERVER_HINT: &str = "Make sure mechafil-server is running";

pub fn internal_error(message: impl Into<String>) -> ErrorData {
    error_with_code(INTERNAL_ERROR, message)
}

pub fn invalid_input(message: impl Into<String>, data: Value) -> ErrorData {
    let mut payload = json!({ "code": INVALID_INPUT });
    if let Some(obj) = payload.as_object_mut() {
        obj.insert("details".to_string(), data);
    }
    ErrorData::invalid_params(message.into(), Some(payload))
}

pub fn error_with_code(code: &str, message: impl Into<String>) -> ErrorData {
    ErrorData::internal_error(
        message.into(),
        Some(json!({
            "code": code
        })),
    )
}

pub fn error_with_data(code: &str, message: impl Into<String>, data: Value) -> ErrorData {
    let mut payload = json!({
        "code": code
    });
    if let Some(obj) = payload.as_object_mut() {
        obj.insert("details".to_string(), data);
    }
    ErrorData::internal_error(message.into(), Some(payload))
}

/// The `data.code` carried by an error built here
pub fn code_of(error: &ErrorData) -> Option<&str> {
    error.data.as_ref()?.get("code")?.as_str()
}

pub fn from_template_error(error: TemplateError) -> ErrorData {
    let code = error.code();
    let details = match &error {
        TemplateError::TemplateNotFound { path } => json!({
            "path": path.display().to_string(),
        }),
        TemplateError::TemplateReadError { path, source } => json!({
            "path": path.display().to_string(),
            "cause": source.to_string(),
        }),
        TemplateError::IncludeNotFound {
            requested,
            resolved,
            fallback,
        } => json!({
            "requested": requested,
            "resolved": resolved.display().to_string(),
            "fallback": fallback.as_ref().map(|p| p.display().to_string()),
        }),
        TemplateError::IncludeReadError { path, source } => json!({
            "path": path.display().to_string(),
            "cause": source.to_string(),
        }),
        TemplateError::IncompleteRender { remaining } => json!({
            "remaining": remaining,
        }),
    };
    error_with_data(code, error.to_string(), details)
}

/// Map a request failure, naming the service by its configured `server_url`
pub fn from_upstream_error(error: UpstreamError, server_url: &str) -> ErrorData {
    match &error {
        UpstreamError::Connect { url, .. } => error_with_data(
            UPSTREAM_UNAVAILABLE,
            format!("Could not connect to mechafil-server at {}", server_url),
            json!({ "error": "Connection failed", "url": url, "suggestion": SERVER_HINT }),
        ),
        UpstreamError::Timeout { url, .. } => error_with_data(
            UPSTREAM_TIMEOUT,
            format!("Request to mechafil-server at {} timed out", server_url),
            json!({ "error": "Timeout", "url": url, "suggestion": SERVER_HINT }),
        ),
        UpstreamError::Status { url, status, body } => error_with_data(
            UPSTREAM_HTTP_ERROR,
            format!("HTTP {} from {}", status, url),
            json!({
                "error": format!("HTTP {}", status),
                "url": url,
                "status": status,
                "response": body,
            }),
        ),
        UpstreamError::Decode { url, source } => error_with_data(
            UPSTREAM_INVALID_RESPONSE,
            format!("mechafil-server returned invalid JSON: {}", source),
            json!({ "error": "Invalid response", "url": url }),
        ),
        UpstreamError::InvalidRequest { field, reason } => invalid_input(
            format!("Invalid {}: {}", field, reason),
            json!({ "field": field, "reason": reason }),
        ),
        UpstreamError::Request { url, source } => error_with_data(
            INTERNAL_ERROR,
            format!("Unexpected error: {}", source),
            json!({ "error": "Unexpected error", "url": url }),
        ),
        UpstreamError::InvalidUrl { url, source } => error_with_data(
            INTERNAL_ERROR,
            format!("Unexpected error: invalid URL {}: {}", url, source),
            json!({ "error": "Unexpected error", "url": url }),
        ),
    }
}

pub fn from_core_error(error: MechafilError, server_url: &str) -> ErrorData {
    match error {
        MechafilError::Template(e) => from_template_error(e),
        MechafilError::Upstream(e) => from_upstream_error(e, server_url),
        other => internal_error(other.to_string()),
    }
}

pub fn from_display(error: impl Display) -> ErrorData {
    internal_error(format!("{}", error))
}
