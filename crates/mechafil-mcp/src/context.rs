use mechafil_core::config::Config;
use mechafil_core::upstream::UpstreamClient;
use rmcp::ErrorData as McpError;

use crate::errors;

#[derive(Clone, Debug)]
pub struct McpContext {
    pub config: Config,
}

impl McpContext {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Client for the configured mechafil-server
    pub fn upstream(&self) -> Result<UpstreamClient, McpError> {
        UpstreamClient::new(&self.config.upstream)
            .map_err(|e| errors::from_core_error(e, self.server_url()))
    }

    /// Configured server location as shown in error messages
    pub fn server_url(&self) -> &str {
        self.config.upstream.url.trim_end_matches('/')
    }
}
