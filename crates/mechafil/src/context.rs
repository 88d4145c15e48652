//! Global context for CLI commands

use crate::cli::GlobalArgs;
use anyhow::{Context as _, Result};
use mechafil_core::config::Config;
use std::env;
use std::path::PathBuf;

/// Effective configuration for a command
pub struct Context {
    pub config: Config,
    /// Config file that was read, if any
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Resolve the configuration: file, then environment, then CLI flags
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicit config file is missing or cannot be parsed
    /// - The resulting configuration is invalid
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read current directory")?;
        let config_path = Config::locate(args.config.as_deref(), &cwd);

        let mut config = Config::load(args.config.as_deref(), &cwd)?;
        if let Some(url) = &args.server_url {
            config.upstream.url = url.clone();
        }
        if let Some(template) = &args.template {
            config.prompt.template = cwd.join(template);
        }
        config.validate()?;

        tracing::debug!(
            "Using upstream {} and template {}",
            config.upstream.url,
            config.prompt.template.display()
        );

        Ok(Self {
            config,
            config_path,
        })
    }
}
