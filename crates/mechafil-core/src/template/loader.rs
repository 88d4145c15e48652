//! Root template loading

use super::error::TemplateError;
use std::io::ErrorKind;
use std::path::Path;

/// Read the root template at `path`
///
/// # Errors
///
/// - [`TemplateError::TemplateNotFound`] if `path` does not exist
/// - [`TemplateError::TemplateReadError`] for any other I/O failure, including
///   a permission error while checking whether `path` exists
pub fn load(path: &Path) -> Result<String, TemplateError> {
    match path.try_exists() {
        Ok(true) => {}
        Ok(false) => {
            return Err(TemplateError::TemplateNotFound {
                path: path.to_path_buf(),
            });
        }
        // Existence unknown, e.g. an unreadable parent directory
        Err(source) => {
            return Err(TemplateError::TemplateReadError {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        // Removed between the existence check and the read
        ErrorKind::NotFound => TemplateError::TemplateNotFound {
            path: path.to_path_buf(),
        },
        _ => TemplateError::TemplateReadError {
            path: path.to_path_buf(),
            source,
        },
    })
}
