//! Template error types

use std::path::PathBuf;
use thiserror::Error;

/// System prompt rendering errors
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Root template does not exist
    #[error(
        "TEMPLATE_NOT_FOUND: template '{}' does not exist (repository may be incomplete)",
        .path.display()
    )]
    TemplateNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Root template exists but could not be read
    #[error("TEMPLATE_READ_ERROR: failed to read template '{}': {source}", .path.display())]
    TemplateReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Neither the include target nor its `.md` fallback exists
    #[error(
        "INCLUDE_NOT_FOUND: include '{requested}' not found at '{}' ({})",
        .resolved.display(),
        describe_fallback(.fallback)
    )]
    IncludeNotFound {
        /// Path as written in the directive (trimmed)
        requested: String,
        /// Absolute path it resolved to
        resolved: PathBuf,
        /// `.md` candidate that was also checked, if the fallback applied
        fallback: Option<PathBuf>,
    },

    /// Include target exists but could not be read
    #[error("INCLUDE_READ_ERROR: failed to read include '{}': {source}", .path.display())]
    IncludeReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directive syntax is still present after substitution
    #[error(
        "INCOMPLETE_RENDER: {} include directive(s) left after substitution: {}",
        .remaining.len(),
        .remaining.join(", ")
    )]
    IncompleteRender {
        /// Raw directives found in the rendered text
        remaining: Vec<String>,
    },
}

impl TemplateError {
    /// Stable code used in error payloads
    pub fn code(&self) -> &'static str {
        match self {
            TemplateError::TemplateNotFound { .. } => "TEMPLATE_NOT_FOUND",
            TemplateError::TemplateReadError { .. } => "TEMPLATE_READ_ERROR",
            TemplateError::IncludeNotFound { .. } => "INCLUDE_NOT_FOUND",
            TemplateError::IncludeReadError { .. } => "INCLUDE_READ_ERROR",
            TemplateError::IncompleteRender { .. } => "INCOMPLETE_RENDER",
        }
    }

    /// Whether a `.md` fallback was checked before giving up
    pub fn fallback_attempted(&self) -> bool {
        matches!(
            self,
            TemplateError::IncludeNotFound {
                fallback: Some(_),
                ..
            }
        )
    }
}

fn describe_fallback(fallback: &Option<PathBuf>) -> String {
    match fallback {
        Some(path) => format!("markdown fallback '{}' also missing", path.display()),
        None => "no markdown fallback attempted".to_string(),
    }
}
