use crate::errors;
use crate::handlers::{Safety, ToolExt, run_blocking};
use crate::server::MechafilServer;
use futures_util::FutureExt;
use mechafil_core::template::render_prompt;
use rmcp::{
    ErrorData as McpError,
    handler::server::common::FromContextPart,
    handler::server::router::tool::{ToolRoute, ToolRouter},
    handler::server::wrapper::Parameters,
    model::*,
    schemars, serde,
};
use std::borrow::Cow;

pub struct PromptTool;

#[derive(Debug, Clone, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct SystemPromptArgs {}

impl PromptTool {
    pub fn into_router(self) -> ToolRouter<MechafilServer> {
        ToolRouter::new().with_route(ToolRoute::new_dyn(
            Self::get_system_prompt_attr(),
            |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<SystemPromptArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(_args) = args_res?;
                    Self::get_system_prompt(server).await
                }
                .boxed()
            },
        ))
    }

    fn get_system_prompt_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("get_system_prompt"),
            "Get the system prompt describing how to use the mechafil tools",
            rmcp::handler::server::common::schema_for_type::<SystemPromptArgs>(),
        )
        .with_safety(Safety {
            network: false,
            reads: true,
            writes: true,
            writes_sot: false,
        })
    }

    /// Render the configured template
    ///
    /// Online servers first send a wake request so the simulation service is
    /// warm by the time the agent calls it. That request never fails the call.
    pub async fn get_system_prompt(server: &MechafilServer) -> Result<CallToolResult, McpError> {
        if !server.is_offline() {
            wake_upstream(server).await;
        }

        let template = server.context.config.prompt.template.clone();
        let write_back = server.context.config.prompt.write_back;
        let rendered = run_blocking(move || {
            render_prompt(&template, write_back).map_err(errors::from_template_error)
        })
        .await?;

        Ok(CallToolResult::success(vec![Content::text(rendered)]))
    }
}

async fn wake_upstream(server: &MechafilServer) {
    let client = match server.context.upstream() {
        Ok(client) => client,
        Err(e) => {
            tracing::debug!("Skipping wake request: {}", e.message);
            return;
        }
    };

    let server_url = server.context.server_url().to_string();
    let outcome = run_blocking(move || {
        client
            .wake()
            .map_err(|e| errors::from_upstream_error(e, &server_url))
    })
    .await;
    match outcome {
        Ok(status) => tracing::debug!("mechafil-server wake answered HTTP {}", status),
        Err(e) => tracing::debug!("mechafil-server wake failed (ignored): {}", e.message),
    }
}
