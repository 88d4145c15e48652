use crate::context::McpContext;
use crate::handlers::prompt::PromptTool;
use crate::handlers::simulation::SimulationTool;
use rmcp::{
    ServerHandler, ServiceExt, handler::server::router::tool::ToolRouter, model::*, tool_handler,
};

const INSTRUCTIONS: &str = "Call get_system_prompt first: it explains the Filecoin economics \
    tools and their parameters. Use get_historical_data for current network values and \
    simulate to forecast scenarios.";

/// MCP server forwarding tool calls to mechafil-server
pub struct MechafilServer {
    pub context: McpContext,
    pub tool_router: ToolRouter<MechafilServer>,
    offline: bool,
}

impl MechafilServer {
    /// Build the server; offline mode exposes only tools that need no network
    pub fn new(context: McpContext, offline: bool) -> Self {
        let tool_router = if offline {
            PromptTool.into_router()
        } else {
            SimulationTool.into_router() + PromptTool.into_router()
        };

        Self {
            context,
            tool_router,
            offline,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Serve MCP over stdin/stdout until the client disconnects
    pub async fn run_stdio_server(context: McpContext, offline: bool) -> anyhow::Result<()> {
        let server = Self::new(context, offline);
        tracing::info!(
            "Starting MCP server on stdio ({} tools{})",
            server.tool_router.list_all().len(),
            if offline { ", offline" } else { "" }
        );

        let service = server.serve(rmcp::transport::stdio()).await?;
        let reason = service.waiting().await?;
        tracing::info!("MCP server stopped: {:?}", reason);
        Ok(())
    }
}

#[tool_handler]
impl ServerHandler for MechafilServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = "mechafil-mcp".to_string();
        info.server_info.version = env!("CARGO_PKG_VERSION").to_string();
        info.instructions = Some(INSTRUCTIONS.to_string());
        info
    }
}
