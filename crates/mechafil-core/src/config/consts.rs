//! Constants shared across the workspace

/// Simulation service connection defaults
pub mod upstream {
    /// Base URL used when nothing else is configured
    pub const DEFAULT_URL: &str = "http://localhost:8000";

    /// Environment variable overriding the base URL
    pub const URL_ENV: &str = "MECHAFIL_SERVER_URL";

    /// Historical data endpoint
    pub const HISTORICAL_DATA_PATH: &str = "historical-data";

    /// Forecast simulation endpoint
    pub const SIMULATE_PATH: &str = "simulate";

    /// Endpoint hit before rendering the system prompt to wake a cold service
    pub const DEFAULT_WAKE_PATH: &str = "/health";

    /// Timeout for `GET /historical-data` (seconds)
    pub const HISTORICAL_TIMEOUT_SECS: u64 = 30;

    /// Timeout for `POST /simulate` (seconds)
    pub const SIMULATE_TIMEOUT_SECS: u64 = 60;

    /// Timeout for the wake request (seconds)
    pub const WAKE_TIMEOUT_SECS: u64 = 5;

    /// User agent sent with every request
    pub const USER_AGENT: &str = "mechafil-mcp";
}

/// System prompt defaults
pub mod prompt {
    /// Environment variable overriding the root template path
    pub const TEMPLATE_ENV: &str = "MECHAFIL_PROMPT_TEMPLATE";

    /// Root template shipped with this crate, relative to the manifest dir
    pub const DEFAULT_TEMPLATE: &str = "prompts/system_prompt.md";
}

/// Config file lookup
pub mod file {
    /// Config file picked up from the working directory when present
    pub const CONFIG_FILE_NAME: &str = "mechafil.toml";

    /// Environment variable naming an explicit config file
    pub const CONFIG_ENV: &str = "MECHAFIL_CONFIG";
}

/// Log filtering
pub mod logging {
    /// `EnvFilter` directives for the binary's stderr logger
    pub const LOG_ENV: &str = "MECHAFIL_LOG";
}
