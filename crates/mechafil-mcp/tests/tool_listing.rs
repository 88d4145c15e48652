//! Tool sets exposed in online and offline mode

use mechafil_core::config::Config;
use mechafil_mcp::context::McpContext;
use mechafil_mcp::server::MechafilServer;

fn tool_names(server: &MechafilServer) -> Vec<String> {
    server
        .tool_router
        .list_all()
        .iter()
        .map(|t| t.name.to_string())
        .collect()
}

#[tokio::test]
async fn test_online_mode_lists_all_tools() {
    let server = MechafilServer::new(McpContext::new(Config::default()), false);
    let mut names = tool_names(&server);
    names.sort();

    assert_eq!(
        names,
        vec!["get_historical_data", "get_system_prompt", "simulate"]
    );
}

#[tokio::test]
async fn test_offline_mode_lists_only_prompt_tool() {
    let server = MechafilServer::new(McpContext::new(Config::default()), true);

    assert!(server.is_offline());
    assert_eq!(tool_names(&server), vec!["get_system_prompt"]);
}

#[tokio::test]
async fn test_network_tools_are_marked_open_world() {
    let server = MechafilServer::new(McpContext::new(Config::default()), false);

    for tool in server.tool_router.list_all() {
        let annotations = tool.annotations.as_ref().expect("annotations set");
        let safety = &tool.meta.as_ref().expect("meta set")["safety"];
        match tool.name.as_ref() {
            "get_historical_data" | "simulate" => {
                assert_eq!(annotations.open_world_hint, Some(true));
                assert_eq!(annotations.read_only_hint, Some(true));
                assert_eq!(safety["network"], true);
            }
            "get_system_prompt" => {
                assert_eq!(annotations.open_world_hint, Some(false));
                assert_eq!(safety["writes"], true);
            }
            other => panic!("Unexpected tool {}", other),
        }
    }
}

#[tokio::test]
async fn test_simulate_schema_lists_all_parameters() {
    let server = MechafilServer::new(McpContext::new(Config::default()), false);
    let tools = server.tool_router.list_all();
    let simulate = tools
        .iter()
        .find(|t| t.name == "simulate")
        .expect("simulate tool");

    let properties = simulate.input_schema["properties"]
        .as_object()
        .expect("object schema");
    for field in [
        "rbp",
        "rr",
        "fpr",
        "lock_target",
        "forecast_length_days",
        "sector_duration_days",
    ] {
        assert!(properties.contains_key(field), "missing {}", field);
    }
}
