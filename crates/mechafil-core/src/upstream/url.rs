//! Endpoint URL construction

use super::error::UpstreamError;
use url::Url;

/// Append `path` to `base`, keeping any path prefix the base already has
///
/// `http://host/api` + `simulate` → `http://host/api/simulate`
pub fn endpoint_url(base: &Url, path: &str) -> Result<Url, UpstreamError> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|source| UpstreamError::InvalidUrl {
        url: joined,
        source,
    })
}
