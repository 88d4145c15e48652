use crate::errors;
use crate::handlers::{Safety, ToolExt, run_blocking};
use crate::server::MechafilServer;
use futures_util::FutureExt;
use mechafil_core::upstream::{RateInput, SimulateRequest};
use rmcp::{
    ErrorData as McpError,
    handler::server::common::FromContextPart,
    handler::server::router::tool::{ToolRoute, ToolRouter},
    handler::server::wrapper::Parameters,
    model::*,
    schemars, serde,
};
use serde_json::Value;
use std::borrow::Cow;

pub struct SimulationTool;

#[derive(Debug, Clone, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct HistoricalDataArgs {}

/// Simulation inputs; omitted fields are derived from historical data
#[derive(Debug, Clone, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct SimulateArgs {
    /// Raw byte power onboarding in PIB/day: a number or one value per day
    #[serde(default)]
    pub rbp: Option<RateInput>,
    /// Sector renewal rate between 0 and 1: a number or one value per day
    #[serde(default)]
    pub rr: Option<RateInput>,
    /// FIL+ rate between 0 and 1: a number or one value per day
    #[serde(default)]
    pub fpr: Option<RateInput>,
    /// Target lock ratio (e.g. 0.3): a number or one value per day
    #[serde(default)]
    pub lock_target: Option<RateInput>,
    /// Forecast length in days
    #[serde(default)]
    pub forecast_length_days: Option<u32>,
    /// Average sector duration in days
    #[serde(default)]
    pub sector_duration_days: Option<u32>,
}

impl From<SimulateArgs> for SimulateRequest {
    fn from(args: SimulateArgs) -> Self {
        SimulateRequest {
            rbp: args.rbp,
            rr: args.rr,
            fpr: args.fpr,
            lock_target: args.lock_target,
            forecast_length_days: args.forecast_length_days,
            sector_duration_days: args.sector_duration_days,
        }
    }
}

impl SimulationTool {
    pub fn into_router(self) -> ToolRouter<MechafilServer> {
        ToolRouter::new()
            .with_route(ToolRoute::new_dyn(
                Self::get_historical_data_attr(),
                |mut ctx| {
                    let server = ctx.service;
                    let args_res = Parameters::<HistoricalDataArgs>::from_context_part(&mut ctx);
                    async move {
                        let Parameters(_args) = args_res?;
                        Self::get_historical_data(server).await
                    }
                    .boxed()
                },
            ))
            .with_route(ToolRoute::new_dyn(Self::simulate_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<SimulateArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(args) = args_res?;
                    Self::simulate(server, args).await
                }
                .boxed()
            }))
    }

    fn get_historical_data_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("get_historical_data"),
            "Get historical Filecoin network data (raw byte power, renewal rate, FIL+ rate, \
             circulating supply) and the smoothed values used as simulation defaults",
            rmcp::handler::server::common::schema_for_type::<HistoricalDataArgs>(),
        )
        .with_safety(Safety {
            network: true,
            reads: true,
            writes: false,
            writes_sot: false,
        })
    }

    fn simulate_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("simulate"),
            "Run a Filecoin economic forecast with mechafil-server. Every parameter is \
             optional; omitted ones default to values derived from historical data",
            rmcp::handler::server::common::schema_for_type::<SimulateArgs>(),
        )
        .with_safety(Safety {
            network: true,
            reads: true,
            writes: false,
            writes_sot: false,
        })
    }

    pub async fn get_historical_data(server: &MechafilServer) -> Result<CallToolResult, McpError> {
        let client = server.context.upstream()?;
        let server_url = server.context.server_url().to_string();
        let data = run_blocking(move || {
            client
                .historical_data()
                .map_err(|e| errors::from_upstream_error(e, &server_url))
        })
        .await?;
        json_result(&data)
    }

    pub async fn simulate(
        server: &MechafilServer,
        args: SimulateArgs,
    ) -> Result<CallToolResult, McpError> {
        let request = SimulateRequest::from(args);
        let server_url = server.context.server_url().to_string();
        request
            .validate()
            .map_err(|e| errors::from_upstream_error(e, &server_url))?;

        let client = server.context.upstream()?;
        let forecast = run_blocking(move || {
            client
                .simulate(&request)
                .map_err(|e| errors::from_upstream_error(e, &server_url))
        })
        .await?;
        json_result(&forecast)
    }
}

fn json_result(value: &Value) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string(value).map_err(errors::from_display)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}
