//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use mechafil_core::config::consts;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mechafil")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (defaults to ./mechafil.toml when present)
    #[arg(long, global = true, env = consts::file::CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// mechafil-server base URL
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Root system prompt template
    #[arg(long, global = true)]
    pub template: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check configuration, prompt template and mechafil-server
    Doctor {
        #[arg(long)]
        json: bool,
    },

    /// Render the system prompt to stdout
    Prompt {
        /// Do not persist `.md` fallbacks as the requested `.txt` file
        #[arg(long)]
        no_write_back: bool,
    },

    /// MCP server
    #[command(subcommand)]
    Mcp(McpCommands),
}

#[derive(Subcommand)]
pub enum McpCommands {
    /// Serve MCP over stdin/stdout
    Stdio {
        /// Expose only tools that need no network
        #[arg(long)]
        offline: bool,
    },
}
