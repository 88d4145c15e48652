use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use super::consts;
use crate::error::{MechafilError, Result};

/// mechafil.toml schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_wake_path")]
    pub wake_path: String,
    #[serde(default = "default_historical_timeout")]
    pub historical_timeout_secs: u64,
    #[serde(default = "default_simulate_timeout")]
    pub simulate_timeout_secs: u64,
    #[serde(default = "default_wake_timeout")]
    pub wake_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            wake_path: default_wake_path(),
            historical_timeout_secs: default_historical_timeout(),
            simulate_timeout_secs: default_simulate_timeout(),
            wake_timeout_secs: default_wake_timeout(),
        }
    }
}

impl UpstreamConfig {
    /// Parsed base URL of the simulation service
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.url).map_err(|e| MechafilError::ConfigInvalidValue {
            field: "upstream.url".to_string(),
            reason: e.to_string(),
        })
    }

    pub fn historical_timeout(&self) -> Duration {
        Duration::from_secs(self.historical_timeout_secs)
    }

    pub fn simulate_timeout(&self) -> Duration {
        Duration::from_secs(self.simulate_timeout_secs)
    }

    pub fn wake_timeout(&self) -> Duration {
        Duration::from_secs(self.wake_timeout_secs)
    }
}

fn default_url() -> String {
    consts::upstream::DEFAULT_URL.to_string()
}

fn default_wake_path() -> String {
    consts::upstream::DEFAULT_WAKE_PATH.to_string()
}

fn default_historical_timeout() -> u64 {
    consts::upstream::HISTORICAL_TIMEOUT_SECS
}

fn default_simulate_timeout() -> u64 {
    consts::upstream::SIMULATE_TIMEOUT_SECS
}

fn default_wake_timeout() -> u64 {
    consts::upstream::WAKE_TIMEOUT_SECS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Root template; relative paths are taken from the config file's directory
    #[serde(default = "default_template")]
    pub template: PathBuf,
    /// Persist `.md` fallbacks as the requested `.txt` include
    #[serde(default = "default_write_back")]
    pub write_back: bool,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            write_back: default_write_back(),
        }
    }
}

/// Template bundled with mechafil-core
pub fn default_template() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(consts::prompt::DEFAULT_TEMPLATE)
}

fn default_write_back() -> bool {
    true
}

impl Config {
    /// Read a mechafil.toml file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MechafilError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| MechafilError::ConfigParseError(e.to_string()))?;

        let mut config: Config =
            toml::from_str(&content).map_err(|e| MechafilError::ConfigParseError(e.to_string()))?;

        if config.prompt.template.is_relative() {
            if let Some(dir) = path.parent() {
                config.prompt.template = dir.join(&config.prompt.template);
            }
        }

        Ok(config)
    }

    /// Write a mechafil.toml file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MechafilError::ConfigParseError(e.to_string()))?;

        std::fs::write(path.as_ref(), content).map_err(MechafilError::IoError)?;

        Ok(())
    }

    /// Resolve the effective configuration
    ///
    /// An explicit `path` must exist. Without one, `mechafil.toml` in `cwd` is
    /// used when present, otherwise built-in defaults. Environment overrides
    /// are applied last.
    ///
    /// The result is not validated: callers layer their own overrides on top
    /// and then call [`Config::validate`] once.
    pub fn load(path: Option<&Path>, cwd: &Path) -> Result<Self> {
        let mut config = match Self::locate(path, cwd) {
            Some(file) => Self::from_file(file)?,
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Config file `load` reads, if any
    pub fn locate(path: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
        match path {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let candidate = cwd.join(consts::file::CONFIG_FILE_NAME);
                candidate.is_file().then_some(candidate)
            }
        }
    }

    /// Apply `MECHAFIL_*` overrides using the given variable lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(consts::upstream::URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.upstream.url = url.trim().to_string();
        }
        if let Some(template) =
            lookup(consts::prompt::TEMPLATE_ENV).filter(|v| !v.trim().is_empty())
        {
            self.prompt.template = PathBuf::from(template.trim());
        }
    }

    /// Reject values that would only fail later at request time
    pub fn validate(&self) -> Result<()> {
        let url = self.upstream.base_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(MechafilError::ConfigInvalidValue {
                field: "upstream.url".to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        for (field, secs) in [
            (
                "upstream.historical_timeout_secs",
                self.upstream.historical_timeout_secs,
            ),
            (
                "upstream.simulate_timeout_secs",
                self.upstream.simulate_timeout_secs,
            ),
            ("upstream.wake_timeout_secs", self.upstream.wake_timeout_secs),
        ] {
            if secs == 0 {
                return Err(MechafilError::ConfigInvalidValue {
                    field: field.to_string(),
                    reason: "timeout must be at least one second".to_string(),
                });
            }
        }

        if !self.upstream.wake_path.starts_with('/') {
            return Err(MechafilError::ConfigInvalidValue {
                field: "upstream.wake_path".to_string(),
                reason: "must start with '/'".to_string(),
            });
        }

        Ok(())
    }
}
