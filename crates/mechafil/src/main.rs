mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Commands, McpCommands};
use mechafil_core::config::consts::logging::LOG_ENV;
use tracing_subscriber::EnvFilter;

/// Log to stderr; stdout carries command output and the MCP channel
fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.global.verbose);

    let result = match cli.command {
        Commands::Doctor { json } => commands::doctor::run(&cli.global, json),
        Commands::Prompt { no_write_back } => commands::prompt::run(&cli.global, !no_write_back),
        Commands::Mcp(mcp_cmd) => match mcp_cmd {
            McpCommands::Stdio { offline } => commands::mcp::run_stdio(&cli.global, offline),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
