use std::path::PathBuf;
use thiserror::Error;

use crate::template::TemplateError;
use crate::upstream::UpstreamError;

#[derive(Error, Debug)]
pub enum MechafilError {
    // Config errors
    #[error("CONFIG_NOT_FOUND: config file '{}' does not exist", .path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // Prompt template errors
    #[error(transparent)]
    Template(#[from] TemplateError),

    // Simulation service errors
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl From<serde_json::Error> for MechafilError {
    fn from(err: serde_json::Error) -> Self {
        MechafilError::Generic(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, MechafilError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_error_keeps_its_code_prefix() {
        let err: MechafilError = TemplateError::TemplateNotFound {
            path: PathBuf::from("/srv/prompts/system_prompt.md"),
        }
        .into();
        assert!(err.to_string().starts_with("TEMPLATE_NOT_FOUND"));
    }

    #[test]
    fn test_config_invalid_value_message() {
        let err = MechafilError::ConfigInvalidValue {
            field: "upstream.url".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "CONFIG_INVALID_VALUE: upstream.url: relative URL without a base"
        );
    }
}
