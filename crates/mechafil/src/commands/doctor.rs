//! Doctor command - configuration and connectivity health check

use crate::cli::GlobalArgs;
use crate::context::Context;
use crate::output::print_json;
use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use mechafil_core::config::Config;
use mechafil_core::template::{find_directives, render_prompt};
use mechafil_core::upstream::{UpstreamClient, UpstreamError, endpoint_url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Doctor command JSON output schema
#[derive(Debug, Serialize, Deserialize)]
struct DoctorOutput {
    schema_version: String,
    config: ConfigInfo,
    timestamp: String,
    checks: Vec<Check>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ConfigInfo {
    file: Option<String>,
    server_url: Option<String>,
    template: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Check {
    id: String,
    name: String,
    status: CheckStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<BTreeMap<String, Value>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl Check {
    fn new(id: &str, name: &str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status,
            message: message.into(),
            details: None,
        }
    }

    fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.into());
        self
    }
}

/// Run the health check
///
/// Always returns Ok(()) once output is written; problems are reported as
/// checks, never as the exit status.
pub fn run(args: &GlobalArgs, json: bool) -> Result<()> {
    let ctx_result = Context::new(args);

    let mut checks = Vec::new();
    let config_info = match &ctx_result {
        Ok(ctx) => {
            checks.push(Check::new(
                "config_valid",
                "Configuration",
                CheckStatus::Ok,
                match &ctx.config_path {
                    Some(path) => format!("{} is valid", path.display()),
                    None => "Using built-in defaults".to_string(),
                },
            ));
            ConfigInfo {
                file: ctx.config_path.as_ref().map(|p| p.display().to_string()),
                server_url: Some(ctx.config.upstream.url.clone()),
                template: Some(ctx.config.prompt.template.display().to_string()),
            }
        }
        Err(e) => {
            checks.push(Check::new(
                "config_valid",
                "Configuration",
                CheckStatus::Error,
                format!("Failed to load config: {:#}", e),
            ));
            ConfigInfo {
                file: args.config.as_ref().map(|p| p.display().to_string()),
                server_url: None,
                template: None,
            }
        }
    };

    // Remaining checks need a valid configuration
    if let Ok(ctx) = &ctx_result {
        checks.push(check_template(&ctx.config));
        checks.push(check_upstream(&ctx.config));
    }

    let output = DoctorOutput {
        schema_version: "1.0".to_string(),
        config: config_info,
        timestamp: Utc::now().to_rfc3339(),
        checks,
    };

    if json {
        print_json(&serde_json::to_string_pretty(&output)?)?;
    } else {
        print_human_readable(&output);
    }

    Ok(())
}

/// Render without write-back so the check leaves the prompt tree untouched
fn check_template(config: &Config) -> Check {
    let template = &config.prompt.template;
    match render_prompt(template, false) {
        Ok(rendered) => {
            let source = std::fs::read_to_string(template).unwrap_or_default();
            Check::new(
                "template_renders",
                "System prompt",
                CheckStatus::Ok,
                format!("Renders to {} characters", rendered.chars().count()),
            )
            .with_detail("path", template.display().to_string())
            .with_detail("includes", find_directives(&source).len())
        }
        Err(e) => Check::new(
            "template_renders",
            "System prompt",
            CheckStatus::Error,
            e.to_string(),
        )
        .with_detail("path", template.display().to_string())
        .with_detail("code", e.code()),
    }
}

/// Unreachable is only a warning: the prompt tool still works offline
fn check_upstream(config: &Config) -> Check {
    let client = match UpstreamClient::new(&config.upstream) {
        Ok(client) => client,
        Err(e) => {
            return Check::new(
                "upstream_reachable",
                "mechafil-server",
                CheckStatus::Error,
                e.to_string(),
            );
        }
    };

    let url = endpoint_url(client.base_url(), &config.upstream.wake_path)
        .map(|u| u.to_string())
        .unwrap_or_else(|e| e.to_string());
    match client.wake() {
        Ok(status) if status < 500 => Check::new(
            "upstream_reachable",
            "mechafil-server",
            CheckStatus::Ok,
            format!("Reachable (HTTP {})", status),
        )
        .with_detail("url", url),
        Ok(status) => Check::new(
            "upstream_reachable",
            "mechafil-server",
            CheckStatus::Warning,
            format!("Answered HTTP {}", status),
        )
        .with_detail("url", url),
        Err(e @ (UpstreamError::Connect { .. } | UpstreamError::Timeout { .. })) => Check::new(
            "upstream_reachable",
            "mechafil-server",
            CheckStatus::Warning,
            format!("{} (make sure mechafil-server is running)", e),
        )
        .with_detail("url", url),
        Err(e) => Check::new(
            "upstream_reachable",
            "mechafil-server",
            CheckStatus::Error,
            e.to_string(),
        )
        .with_detail("url", url),
    }
}

/// Print human-readable output
fn print_human_readable(output: &DoctorOutput) {
    println!("{}", "Environment Health Check".bold());
    println!();

    println!("{}", "Config:".bold());
    let unknown = || "-".to_string();
    println!("  File: {}", output.config.file.clone().unwrap_or_else(unknown));
    println!(
        "  Server: {}",
        output.config.server_url.clone().unwrap_or_else(unknown)
    );
    println!(
        "  Template: {}",
        output.config.template.clone().unwrap_or_else(unknown)
    );
    println!();

    println!("{}", "Checks:".bold());
    for check in &output.checks {
        let status_str = match check.status {
            CheckStatus::Ok => "✓".green(),
            CheckStatus::Warning => "⚠".yellow(),
            CheckStatus::Error => "✗".red(),
        };

        println!("  {} {}: {}", status_str, check.name.bold(), check.message);

        if let Some(details) = &check.details {
            for (key, value) in details {
                println!("      {}: {}", key, value);
            }
        }
    }

    println!();
    println!("Timestamp: {}", output.timestamp);
}
