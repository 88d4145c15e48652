use crate::cli::GlobalArgs;
use crate::context::Context;
use anyhow::{Context as _, Result};
use mechafil_mcp::{McpContext, MechafilServer};

/// Run MCP server in stdio mode
pub fn run_stdio(args: &GlobalArgs, offline: bool) -> Result<()> {
    let ctx = Context::new(args)?;

    // We need a tokio runtime for the server
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    rt.block_on(async {
        MechafilServer::run_stdio_server(McpContext::new(ctx.config), offline).await
    })
}
